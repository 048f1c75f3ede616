use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::currencies;
use super::types::Document;
use crate::error::ValidationError;

/// Validate a candidate document against the completeness invariants.
/// Returns all errors found (not just the first), each scoped to the
/// offending field.
///
/// Failures block save, update, and export — never in-memory editing.
pub fn validate(document: &Document) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if document.number.trim().is_empty() {
        errors.push(ValidationError::new(
            "number",
            "document number is required",
        ));
    }

    if document.client.name.trim().is_empty() {
        errors.push(ValidationError::new(
            "client.name",
            "client name is required",
        ));
    }

    if document.client.email.trim().is_empty() {
        errors.push(ValidationError::new(
            "client.email",
            "client email is required",
        ));
    } else if !is_plausible_email(document.client.email.trim()) {
        errors.push(ValidationError::new(
            "client.email",
            "invalid email address",
        ));
    }

    if document.client.address.trim().is_empty() {
        errors.push(ValidationError::new(
            "client.address",
            "client address is required",
        ));
    }

    if document.items.is_empty() {
        errors.push(ValidationError::new("items", "at least one item is required"));
    }

    for (i, item) in document.items.iter().enumerate() {
        if item.name.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("items[{i}].name"),
                "item name is required",
            ));
        }
        if item.quantity < Decimal::ONE {
            errors.push(ValidationError::new(
                format!("items[{i}].quantity"),
                "quantity must be at least 1",
            ));
        }
        if item.unit_price.is_sign_negative() {
            errors.push(ValidationError::new(
                format!("items[{i}].unit_price"),
                "price must not be negative",
            ));
        }
    }

    if document.tax_rate_percent.is_sign_negative() || document.tax_rate_percent > dec!(100) {
        errors.push(ValidationError::new(
            "tax_rate_percent",
            "tax rate must be between 0 and 100",
        ));
    }

    let currency = document.currency_code.trim();
    if currency.is_empty() {
        errors.push(ValidationError::new(
            "currency_code",
            "currency is required",
        ));
    } else if currency.len() != 3 {
        errors.push(ValidationError::new(
            "currency_code",
            "currency code must be 3 characters (ISO 4217)",
        ));
    } else if !currencies::is_known_currency_code(currency) {
        errors.push(ValidationError::new(
            "currency_code",
            format!("currency code '{currency}' is not a known ISO 4217 code"),
        ));
    }

    errors
}

/// Structural email check: one `@`, non-empty local part, dotted domain,
/// no whitespace. Deliverability is not this crate's problem.
fn is_plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::types::{DocumentType, LineItem};
    use chrono::NaiveDate;

    fn complete_document() -> Document {
        let mut doc = Document::with_issue_date(
            DocumentType::Invoice,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        );
        doc.client.name = "Acme Pty Ltd".into();
        doc.client.email = "billing@acme.example".into();
        doc.client.address = "1 Flinders St\nMelbourne".into();
        doc.items = vec![LineItem {
            name: "Consulting".into(),
            description: None,
            quantity: Decimal::from(2),
            unit_price: dec!(50),
        }];
        doc
    }

    #[test]
    fn complete_document_passes() {
        assert!(validate(&complete_document()).is_empty());
    }

    #[test]
    fn missing_client_fields_are_field_scoped() {
        let mut doc = complete_document();
        doc.client.name.clear();
        doc.client.email = "not-an-email".into();

        let errors = validate(&doc);
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"client.name"));
        assert!(fields.contains(&"client.email"));
        assert!(!fields.contains(&"client.address"));
    }

    #[test]
    fn empty_items_rejected() {
        let mut doc = complete_document();
        doc.items.clear();
        assert!(validate(&doc).iter().any(|e| e.field == "items"));
    }

    #[test]
    fn item_bounds_enforced() {
        let mut doc = complete_document();
        doc.items[0].quantity = Decimal::ZERO;
        doc.items[0].unit_price = dec!(-1);

        let errors = validate(&doc);
        assert!(errors.iter().any(|e| e.field == "items[0].quantity"));
        assert!(errors.iter().any(|e| e.field == "items[0].unit_price"));
    }

    #[test]
    fn tax_rate_range_enforced() {
        let mut doc = complete_document();
        doc.tax_rate_percent = dec!(100);
        assert!(validate(&doc).is_empty());

        doc.tax_rate_percent = dec!(100.01);
        assert!(validate(&doc).iter().any(|e| e.field == "tax_rate_percent"));

        doc.tax_rate_percent = dec!(-1);
        assert!(validate(&doc).iter().any(|e| e.field == "tax_rate_percent"));
    }

    #[test]
    fn currency_code_checked() {
        let mut doc = complete_document();
        doc.currency_code = "XXXX".into();
        assert!(validate(&doc).iter().any(|e| e.field == "currency_code"));

        doc.currency_code = "XYZ".into();
        assert!(validate(&doc).iter().any(|e| e.field == "currency_code"));

        doc.currency_code = "INR".into();
        assert!(validate(&doc).is_empty());
    }

    #[test]
    fn email_structure() {
        assert!(is_plausible_email("a@b.co"));
        assert!(is_plausible_email("first.last+tag@sub.example.org"));
        assert!(!is_plausible_email("no-at-sign.example"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("user@nodot"));
        assert!(!is_plausible_email("user name@example.com"));
        assert!(!is_plausible_email("user@.com"));
    }
}
