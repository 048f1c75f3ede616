//! Keyed local persistence: the document collection and the logo slot.
//!
//! Storage is modeled as an injected port over named string slots, so the
//! store is testable without a real backend. The collection is read once at
//! startup and rewritten in full on every mutation — there is no partial or
//! incremental persistence.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;
use tracing::{debug, warn};

use crate::document::Document;
use crate::error::EditorError;
use crate::logo::Logo;

/// Slot holding the serialized ordered document collection.
pub const DOCUMENTS_SLOT: &str = "documents";
/// Slot holding the logo data URI, or absent.
pub const LOGO_SLOT: &str = "company_logo";

/// A storage backend failure (read, write, or remove).
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StorageError(pub String);

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError(err.to_string())
    }
}

/// The injected storage capability: named string slots.
///
/// Implementations must make `write` all-or-nothing per slot; a failed
/// write leaves the previous slot contents intact.
pub trait StoragePort {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, slot: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, slot: &str) -> Result<(), StorageError>;
}

/// The persisted, ordered collection of saved documents plus the singleton
/// logo asset.
#[derive(Debug)]
pub struct DocumentStore<S> {
    storage: S,
}

impl<S: StoragePort> DocumentStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Read the persisted collection. Absent or unreadable data is treated
    /// as "no data", never as a fatal error; dates come back as real
    /// calendar dates, not strings.
    pub fn load_all(&self) -> Vec<Document> {
        let raw = match self.storage.read(DOCUMENTS_SLOT) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(slot = DOCUMENTS_SLOT, %err, "storage read failed; treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<Document>>(&raw) {
            Ok(documents) => {
                debug!(count = documents.len(), "loaded document collection");
                documents
            }
            Err(err) => {
                warn!(slot = DOCUMENTS_SLOT, %err, "corrupt document collection; treating as empty");
                Vec::new()
            }
        }
    }

    /// Serialize and persist the full collection, overwriting prior state.
    /// On failure the in-memory copy is untouched and the previous
    /// persisted state survives; the caller surfaces the error.
    pub fn save_all(&mut self, documents: &[Document]) -> Result<(), EditorError> {
        let raw = serde_json::to_string(documents)
            .map_err(|e| EditorError::Persistence(e.to_string()))?;
        self.storage
            .write(DOCUMENTS_SLOT, &raw)
            .map_err(|e| EditorError::Persistence(e.to_string()))?;
        debug!(count = documents.len(), "persisted document collection");
        Ok(())
    }

    /// Read the persisted logo, if any. Invalid data degrades to `None`.
    pub fn load_logo(&self) -> Option<Logo> {
        let raw = match self.storage.read(LOGO_SLOT) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(slot = LOGO_SLOT, %err, "storage read failed; no logo");
                return None;
            }
        };
        match Logo::from_data_uri(&raw) {
            Ok(logo) => Some(logo),
            Err(err) => {
                warn!(slot = LOGO_SLOT, %err, "corrupt logo entry; ignoring");
                None
            }
        }
    }

    /// Persist or clear the logo slot. Clearing removes the entry entirely
    /// rather than storing an empty value.
    pub fn save_logo(&mut self, logo: Option<&Logo>) -> Result<(), EditorError> {
        match logo {
            Some(logo) => self
                .storage
                .write(LOGO_SLOT, logo.as_data_uri())
                .map_err(|e| EditorError::Persistence(e.to_string())),
            None => self
                .storage
                .remove(LOGO_SLOT)
                .map_err(|e| EditorError::Persistence(e.to_string())),
        }
    }

    /// Whether a slot currently exists in the backend. Test affordance.
    pub fn slot_exists(&self, slot: &str) -> bool {
        matches!(self.storage.read(slot), Ok(Some(_)))
    }
}
