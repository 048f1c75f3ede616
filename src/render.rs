//! Render surface: turns the in-memory document plus computed totals into a
//! presentation-only layout.
//!
//! The layout is pure data — the embedding UI paints it, and the export
//! surface rasterizes whatever was painted. Placeholder text appears here
//! for display only and is never written back into the model.

use crate::document::{Document, DocumentType, currencies};
use crate::logo::Logo;
use crate::totals::Totals;

/// Placeholder shown where no logo has been uploaded.
pub const LOGO_PLACEHOLDER: &str = "Your Logo";

/// Presentation-only parameters.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Base body font size in pixels; headings scale from it.
    pub font_px: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { font_px: 14.0 }
    }
}

/// A fully resolved visual layout for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// "INVOICE" or "QUOTATION".
    pub title: String,
    /// Document number, or a type-specific placeholder when empty.
    pub number: String,
    pub logo_data_uri: Option<String>,
    /// Company block lines; empty when the block is hidden.
    pub company_lines: Vec<String>,
    pub bill_to: BillTo,
    pub issue_date_label: String,
    pub issue_date: String,
    pub due_date_label: String,
    pub due_date: String,
    pub rows: Vec<ItemRow>,
    /// Shown instead of rows when the item table is empty.
    pub no_items_notice: Option<String>,
    pub subtotal: String,
    /// e.g. "GST (10%)" or "Tax (0%)".
    pub tax_line_label: String,
    pub tax_amount: String,
    pub total: String,
    /// Bank rows as (label, value); empty unless the block renders.
    pub bank_rows: Vec<(String, String)>,
    pub footer: Option<FooterLine>,
    pub body_font_px: f32,
    pub heading_font_px: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillTo {
    pub name: String,
    pub email: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub name: String,
    pub description: Option<String>,
    pub quantity: String,
    pub unit_price: String,
    pub line_total: String,
}

/// Exactly one footer state renders while the signature block is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FooterLine {
    /// Signature line with optional signer name under it.
    Signature { signer_name: Option<String> },
    /// "This is a computer-generated … and requires no signature."
    AutoGenerated(String),
}

/// Resolve the document, its totals, and the shared logo into a layout.
pub fn render(
    document: &Document,
    totals: &Totals,
    logo: Option<&Logo>,
    options: &RenderOptions,
) -> Layout {
    let is_invoice = document.document_type == DocumentType::Invoice;
    let currency = &document.currency_code;
    let money = |amount| currencies::format_amount(currency, amount);

    let number = if document.number.trim().is_empty() {
        format!("{}-0000", document.document_type.number_prefix())
    } else {
        document.number.clone()
    };

    let mut company_lines = Vec::new();
    if document.company.visible {
        let block = &document.company;
        for (flag, value) in [
            (block.show_name, &block.name),
            (block.show_address, &block.address),
            (block.show_email, &block.email),
            (block.show_phone, &block.phone),
        ] {
            if flag && !value.trim().is_empty() {
                company_lines.push(value.clone());
            }
        }
    }

    let rows: Vec<ItemRow> = document
        .items
        .iter()
        .map(|item| ItemRow {
            name: or_placeholder(&item.name, "Item Name"),
            description: item
                .description
                .as_ref()
                .filter(|d| !d.trim().is_empty())
                .cloned(),
            quantity: item.quantity.normalize().to_string(),
            unit_price: money(item.unit_price),
            line_total: money(item.quantity * item.unit_price),
        })
        .collect();
    let no_items_notice = rows
        .is_empty()
        .then(|| "No items added yet.".to_string());

    let tax_line_label = format!(
        "{} ({}%)",
        document
            .tax_label
            .as_ref()
            .filter(|l| !l.trim().is_empty())
            .map_or("Tax", String::as_str),
        document.tax_rate_percent.normalize()
    );

    let mut bank_rows = Vec::new();
    if document.bank.visible && is_invoice {
        let block = &document.bank;
        for (flag, label, value) in [
            (block.show_bank_name, "Bank", &block.bank_name),
            (
                block.show_account_number,
                "Account Number",
                &block.account_number,
            ),
            (block.show_branch, "Branch", &block.branch),
            (block.show_routing_code, "Routing Code", &block.routing_code),
        ] {
            if flag && !value.trim().is_empty() {
                bank_rows.push((label.to_string(), value.clone()));
            }
        }
    }

    let footer = if !document.signature.visible {
        None
    } else if document.signature.require_signature {
        let signer = document.signature.signer_name.trim();
        Some(FooterLine::Signature {
            signer_name: (!signer.is_empty()).then(|| signer.to_string()),
        })
    } else {
        Some(FooterLine::AutoGenerated(format!(
            "This is a computer-generated {} and requires no signature.",
            document.document_type.file_token()
        )))
    };

    Layout {
        title: document.document_type.label().to_uppercase(),
        number,
        logo_data_uri: logo.map(|l| l.as_data_uri().to_string()),
        company_lines,
        bill_to: BillTo {
            name: or_placeholder(&document.client.name, "Client Name"),
            email: or_placeholder(&document.client.email, "client.email@example.com"),
            address: or_placeholder(&document.client.address, "Client Address"),
        },
        issue_date_label: if is_invoice {
            "Invoice Date:".to_string()
        } else {
            "Quotation Date:".to_string()
        },
        issue_date: format_date(document.issue_date),
        due_date_label: if is_invoice {
            "Due Date:".to_string()
        } else {
            "Valid Until:".to_string()
        },
        due_date: format_date(document.due_date),
        rows,
        no_items_notice,
        subtotal: money(totals.subtotal),
        tax_line_label,
        tax_amount: money(totals.tax_amount),
        total: money(totals.total),
        bank_rows,
        footer,
        body_font_px: options.font_px,
        heading_font_px: options.font_px * 1.5,
    }
}

/// "MMM d, yyyy", e.g. "Jun 5, 2025".
fn format_date(date: chrono::NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::document::{DocumentBuilder, DocumentType, LineItemBuilder};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 5).unwrap()
    }

    fn doc() -> Document {
        DocumentBuilder::new(DocumentType::Invoice, date())
            .number("INV-1234")
            .client("Acme", "a@b.co", "Somewhere 1")
            .add_item(LineItemBuilder::new("Consulting", dec!(2), dec!(50)).build())
            .tax("GST", dec!(10))
            .build()
            .unwrap()
    }

    #[test]
    fn formats_dates_and_money() {
        let d = doc();
        let totals = Totals::compute(&d.items, d.tax_rate_percent);
        let layout = render(&d, &totals, None, &RenderOptions::default());

        assert_eq!(layout.title, "INVOICE");
        assert_eq!(layout.issue_date, "Jun 5, 2025");
        assert_eq!(layout.due_date, "Jul 5, 2025");
        assert_eq!(layout.subtotal, "$100.00");
        assert_eq!(layout.tax_line_label, "GST (10%)");
        assert_eq!(layout.tax_amount, "$10.00");
        assert_eq!(layout.total, "$110.00");
        assert_eq!(layout.rows[0].line_total, "$100.00");
        assert_eq!(layout.rows[0].quantity, "2");
    }

    #[test]
    fn placeholders_fill_missing_fields_without_touching_the_model() {
        let mut d = doc();
        d.number.clear();
        d.client.name.clear();

        let layout = render(&d, &Totals::ZERO, None, &RenderOptions::default());
        assert_eq!(layout.number, "INV-0000");
        assert_eq!(layout.bill_to.name, "Client Name");
        // model untouched
        assert!(d.number.is_empty());
        assert!(d.client.name.is_empty());
    }

    #[test]
    fn font_scale_applies() {
        let d = doc();
        let layout = render(&d, &Totals::ZERO, None, &RenderOptions { font_px: 12.0 });
        assert_eq!(layout.body_font_px, 12.0);
        assert_eq!(layout.heading_font_px, 18.0);
    }

    #[test]
    fn empty_items_show_notice() {
        let mut d = doc();
        d.items.clear();
        let layout = render(&d, &Totals::ZERO, None, &RenderOptions::default());
        assert!(layout.rows.is_empty());
        assert_eq!(layout.no_items_notice.as_deref(), Some("No items added yet."));
    }
}
