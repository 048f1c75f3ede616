use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use super::numbering;
use super::types::*;
use super::validation;
use crate::error::{self, EditorError};

/// Builder for constructing complete documents.
///
/// ```
/// use chrono::NaiveDate;
/// use invoiceflow::document::*;
/// use rust_decimal_macros::dec;
///
/// let doc = DocumentBuilder::new(
///     DocumentType::Invoice,
///     NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
/// )
/// .client("Acme Pty Ltd", "billing@acme.example", "1 Flinders St, Melbourne")
/// .add_item(LineItemBuilder::new("Consulting", dec!(2), dec!(50)).build())
/// .tax("GST", dec!(10))
/// .build()
/// .unwrap();
///
/// assert!(doc.number.starts_with("INV-"));
/// ```
pub struct DocumentBuilder {
    document_type: DocumentType,
    issue_date: NaiveDate,
    due_date: Option<NaiveDate>,
    number: Option<String>,
    client: Client,
    items: Vec<LineItem>,
    tax_label: Option<String>,
    tax_rate_percent: Decimal,
    currency_code: String,
    company: CompanyBlock,
    bank: BankBlock,
    signature: SignatureBlock,
}

impl DocumentBuilder {
    pub fn new(document_type: DocumentType, issue_date: NaiveDate) -> Self {
        Self {
            document_type,
            issue_date,
            due_date: None,
            number: None,
            client: Client::default(),
            items: Vec::new(),
            tax_label: None,
            tax_rate_percent: Decimal::ZERO,
            currency_code: "USD".to_string(),
            company: CompanyBlock::default(),
            bank: BankBlock::default(),
            signature: SignatureBlock::default(),
        }
    }

    /// Override the generated document number.
    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn client(
        mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        self.client = Client {
            name: name.into(),
            email: email.into(),
            address: address.into(),
        };
        self
    }

    pub fn add_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn tax(mut self, label: impl Into<String>, rate_percent: Decimal) -> Self {
        self.tax_label = Some(label.into());
        self.tax_rate_percent = rate_percent;
        self
    }

    pub fn tax_rate(mut self, rate_percent: Decimal) -> Self {
        self.tax_rate_percent = rate_percent;
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }

    pub fn company(mut self, block: CompanyBlock) -> Self {
        self.company = block;
        self
    }

    pub fn bank(mut self, block: BankBlock) -> Self {
        self.bank = block;
        self
    }

    pub fn signature(mut self, block: SignatureBlock) -> Self {
        self.signature = block;
        self
    }

    /// Build the document, running full validation.
    /// Returns all validation errors joined into one message.
    pub fn build(self) -> Result<Document, EditorError> {
        let document = self.build_draft();
        let errors = validation::validate(&document);
        if !errors.is_empty() {
            return Err(error::joined(&errors));
        }
        Ok(document)
    }

    /// Build without validation — an in-progress draft is a legal value.
    pub fn build_draft(self) -> Document {
        let due_date = self.due_date.unwrap_or_else(|| {
            self.issue_date
                .checked_add_days(Days::new(DEFAULT_DUE_DAYS))
                .unwrap_or(self.issue_date)
        });
        Document {
            id: numbering::generate_document_id(),
            document_type: self.document_type,
            number: self
                .number
                .unwrap_or_else(|| numbering::generate_document_number(self.document_type)),
            client: self.client,
            issue_date: self.issue_date,
            due_date,
            items: self.items,
            tax_label: self.tax_label,
            tax_rate_percent: self.tax_rate_percent,
            currency_code: self.currency_code,
            company: self.company,
            bank: self.bank,
            signature: self.signature,
        }
    }
}

/// Builder for [`LineItem`].
pub struct LineItemBuilder {
    name: String,
    description: Option<String>,
    quantity: Decimal,
    unit_price: Decimal,
}

impl LineItemBuilder {
    pub fn new(name: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            name: name.into(),
            description: None,
            quantity,
            unit_price,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            name: self.name,
            description: self.description,
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }
}
