//! # invoiceflow
//!
//! Core of a client-side invoice/quotation editor: the document model with
//! field-scoped validation, exact decimal totals, a storage-port-backed
//! document store, the editing state machine, a presentation-only render
//! surface, and image-based PDF export.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating
//! point. Totals stay exact and unrounded; only display formatting rounds.
//!
//! ## Quick Start
//!
//! ```rust
//! use invoiceflow::document::*;
//! use invoiceflow::editor::Editor;
//! use invoiceflow::store::MemoryStorage;
//! use rust_decimal_macros::dec;
//!
//! let mut editor = Editor::open(MemoryStorage::new());
//! editor.edit(|doc| {
//!     doc.client = Client {
//!         name: "Acme Pty Ltd".into(),
//!         email: "billing@acme.example".into(),
//!         address: "1 Flinders St, Melbourne".into(),
//!     };
//!     doc.items = vec![
//!         LineItemBuilder::new("Consulting", dec!(2), dec!(50)).build(),
//!         LineItemBuilder::new("Hosting", dec!(1), dec!(30)).build(),
//!     ];
//!     doc.tax_label = Some("GST".into());
//!     doc.tax_rate_percent = dec!(10);
//! });
//!
//! assert_eq!(editor.totals().subtotal, dec!(130));
//! assert_eq!(editor.totals().total, dec!(143));
//!
//! editor.save().unwrap();
//! assert_eq!(editor.documents().len(), 1);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `export` (default) | Image-to-PDF export via `lopdf` |

pub mod document;
pub mod editor;
pub mod error;
pub mod logo;
pub mod render;
pub mod store;
pub mod totals;

#[cfg(feature = "export")]
pub mod export;

// Re-export the main types at the crate root for convenience
pub use crate::document::{Document, DocumentType, LineItem};
pub use crate::editor::{EditMode, Editor};
pub use crate::error::{EditorError, ValidationError};
pub use crate::logo::Logo;
pub use crate::render::{Layout, RenderOptions, render};
pub use crate::store::{DocumentStore, FileStorage, MemoryStorage, StoragePort};
pub use crate::totals::Totals;

#[cfg(feature = "export")]
pub use crate::export::{ExportArtifact, RasterImage};
