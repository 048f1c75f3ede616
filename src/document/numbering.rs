use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use super::types::DocumentType;

/// Process-local entropy: wall-clock nanos hashed with a monotonic counter.
/// Good enough for human-facing suffixes and unique in-process ids; this is
/// not a cryptographic source.
fn entropy() -> u64 {
    static SEQ: AtomicU64 = AtomicU64::new(0);

    let mut hasher = DefaultHasher::new();
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
        .hash(&mut hasher);
    SEQ.fetch_add(1, Ordering::Relaxed).hash(&mut hasher);
    hasher.finish()
}

/// Generate an opaque document id, unique within the process.
pub fn generate_document_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("doc-{nanos:x}-{:x}", entropy())
}

/// Generate a human-facing document number: a type-specific prefix plus a
/// uniform random 4-digit suffix, e.g. "INV-4821" or "QUO-1073".
///
/// Numbers are unique by convention only — the store does not enforce it.
pub fn generate_document_number(document_type: DocumentType) -> String {
    let suffix = 1000 + (entropy() % 9000);
    format!("{}-{suffix}", document_type.number_prefix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_has_prefix_and_four_digit_suffix() {
        for _ in 0..200 {
            let n = generate_document_number(DocumentType::Invoice);
            let suffix = n.strip_prefix("INV-").expect("INV prefix");
            let value: u64 = suffix.parse().unwrap();
            assert_eq!(suffix.len(), 4);
            assert!((1000..=9999).contains(&value));
        }
        assert!(generate_document_number(DocumentType::Quotation).starts_with("QUO-"));
    }

    #[test]
    fn ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(generate_document_id()));
        }
    }
}
