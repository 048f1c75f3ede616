//! Document model: types, validation, numbering, and currency display.
//!
//! This module provides the schema for an invoice or quotation, the
//! field-scoped completeness validation, and the generation rules for
//! document ids and human-facing numbers.

mod builder;
pub mod currencies;
mod numbering;
mod types;
mod validation;

pub use builder::*;
pub use currencies::{format_amount, is_known_currency_code};
pub use numbering::{generate_document_id, generate_document_number};
pub use types::*;
pub use validation::validate;
