use chrono::{Days, Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::numbering;

/// How many days after the issue date a fresh document falls due.
pub const DEFAULT_DUE_DAYS: u64 = 30;

/// The kind of document being edited. Determines labeling, the number
/// prefix, and whether bank details may display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Invoice,
    Quotation,
}

impl DocumentType {
    /// Human-facing label ("Invoice" / "Quotation").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Invoice => "Invoice",
            Self::Quotation => "Quotation",
        }
    }

    /// Lowercase token used in export file names.
    pub fn file_token(&self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::Quotation => "quotation",
        }
    }

    /// Document-number prefix ("INV" / "QUO").
    pub fn number_prefix(&self) -> &'static str {
        match self {
            Self::Invoice => "INV",
            Self::Quotation => "QUO",
        }
    }
}

/// The central entity: one invoice or quotation.
///
/// A `Document` is created in memory with generated `id`/`number` and schema
/// defaults, mutated only through the [`Editor`](crate::editor::Editor), and
/// becomes durable only on explicit save or update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Opaque unique identifier, assigned at creation, immutable.
    pub id: String,
    pub document_type: DocumentType,
    /// Human-facing identifier, unique by convention (not enforced).
    pub number: String,
    pub client: Client,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    /// Ordered line items; must contain at least one element to validate.
    pub items: Vec<LineItem>,
    /// Free-text tax name shown next to the rate (e.g. "GST", "VAT").
    #[serde(default)]
    pub tax_label: Option<String>,
    /// Flat percentage in [0, 100].
    #[serde(default, deserialize_with = "de_loose_decimal")]
    pub tax_rate_percent: Decimal,
    /// ISO 4217 currency code, e.g. "USD".
    #[serde(default = "default_currency")]
    pub currency_code: String,
    #[serde(default)]
    pub company: CompanyBlock,
    /// Meaningful only when `document_type` is [`DocumentType::Invoice`].
    #[serde(default)]
    pub bank: BankBlock,
    #[serde(default)]
    pub signature: SignatureBlock,
}

impl Document {
    /// A fresh document dated today with schema defaults and a generated
    /// id and number.
    pub fn new(document_type: DocumentType) -> Self {
        Self::with_issue_date(document_type, Local::now().date_naive())
    }

    /// A fresh document with an explicit issue date (due date defaults to
    /// [`DEFAULT_DUE_DAYS`] later).
    pub fn with_issue_date(document_type: DocumentType, issue_date: NaiveDate) -> Self {
        let due_date = issue_date
            .checked_add_days(Days::new(DEFAULT_DUE_DAYS))
            .unwrap_or(issue_date);
        Self {
            id: numbering::generate_document_id(),
            document_type,
            number: numbering::generate_document_number(document_type),
            client: Client::default(),
            issue_date,
            due_date,
            items: vec![LineItem::default()],
            tax_label: None,
            tax_rate_percent: Decimal::ZERO,
            currency_code: default_currency(),
            company: CompanyBlock::default(),
            bank: BankBlock::default(),
            signature: SignatureBlock::default(),
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Billing recipient. All three fields are required for a complete document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    pub name: String,
    pub email: String,
    pub address: String,
}

/// A single billable row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Quantity, ≥ 1 for a complete document.
    #[serde(deserialize_with = "de_loose_decimal")]
    pub quantity: Decimal,
    /// Per-unit price, ≥ 0 for a complete document.
    #[serde(deserialize_with = "de_loose_decimal")]
    pub unit_price: Decimal,
}

impl Default for LineItem {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            quantity: Decimal::ONE,
            unit_price: Decimal::ZERO,
        }
    }
}

/// Optional sender/company display group. Each sub-field renders only when
/// both its value is non-empty and its individual flag is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyBlock {
    pub visible: bool,
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub show_name: bool,
    pub show_address: bool,
    pub show_email: bool,
    pub show_phone: bool,
}

impl Default for CompanyBlock {
    fn default() -> Self {
        Self {
            visible: false,
            name: String::new(),
            address: String::new(),
            email: String::new(),
            phone: String::new(),
            show_name: true,
            show_address: true,
            show_email: true,
            show_phone: true,
        }
    }
}

/// Optional bank-details display group. Quotations never render it,
/// regardless of the `visible` flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankBlock {
    pub visible: bool,
    pub bank_name: String,
    pub account_number: String,
    pub branch: String,
    pub routing_code: String,
    pub show_bank_name: bool,
    pub show_account_number: bool,
    pub show_branch: bool,
    pub show_routing_code: bool,
}

impl Default for BankBlock {
    fn default() -> Self {
        Self {
            visible: false,
            bank_name: String::new(),
            account_number: String::new(),
            branch: String::new(),
            routing_code: String::new(),
            show_bank_name: true,
            show_account_number: true,
            show_branch: true,
            show_routing_code: true,
        }
    }
}

/// Footer control: a signature line when a signature is required, otherwise
/// a computer-generated notice; nothing when hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureBlock {
    pub visible: bool,
    pub require_signature: bool,
    pub signer_name: String,
}

impl Default for SignatureBlock {
    fn default() -> Self {
        Self {
            visible: true,
            require_signature: false,
            signer_name: String::new(),
        }
    }
}

/// Accept a JSON number or a numeric string for amount-like fields.
///
/// Persisted data written by looser front ends stores quantities and prices
/// as either; both must reconstruct as exact decimals.
fn de_loose_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Loose::deserialize(deserializer)? {
        Loose::Int(v) => Ok(Decimal::from(v)),
        Loose::Float(v) => Decimal::try_from(v).map_err(serde::de::Error::custom),
        Loose::Text(s) => s.trim().parse::<Decimal>().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn fresh_document_defaults() {
        let issue = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let doc = Document::with_issue_date(DocumentType::Invoice, issue);

        assert_eq!(doc.due_date, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
        assert_eq!(doc.items.len(), 1);
        assert_eq!(doc.items[0].quantity, Decimal::ONE);
        assert_eq!(doc.items[0].unit_price, Decimal::ZERO);
        assert_eq!(doc.currency_code, "USD");
        assert_eq!(doc.tax_rate_percent, Decimal::ZERO);
        assert!(!doc.company.visible);
        assert!(!doc.bank.visible);
        assert!(doc.signature.visible);
        assert!(!doc.signature.require_signature);
        assert!(doc.number.starts_with("INV-"));
    }

    #[test]
    fn loose_numeric_input_accepts_strings_and_numbers() {
        let json = r#"{"name":"Widget","quantity":"2","unit_price":49.5}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.quantity, dec!(2));
        assert_eq!(item.unit_price, dec!(49.5));

        let json = r#"{"name":"Widget","quantity":3,"unit_price":"0.10"}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.quantity, dec!(3));
        assert_eq!(item.unit_price, dec!(0.10));
    }

    #[test]
    fn loose_numeric_input_rejects_garbage() {
        let json = r#"{"name":"Widget","quantity":"lots","unit_price":1}"#;
        assert!(serde_json::from_str::<LineItem>(json).is_err());
    }

    #[test]
    fn document_type_tokens() {
        assert_eq!(DocumentType::Invoice.number_prefix(), "INV");
        assert_eq!(DocumentType::Quotation.number_prefix(), "QUO");
        assert_eq!(DocumentType::Quotation.file_token(), "quotation");
        assert_eq!(
            serde_json::to_string(&DocumentType::Quotation).unwrap(),
            "\"quotation\""
        );
    }
}
