//! Editor controller: the state machine over one active document plus the
//! persisted collection.
//!
//! All mutation funnels through the editor. Field edits recompute totals
//! and notify subscribers (the live preview); save/update/delete persist
//! synchronously before returning and report success or failure for
//! user-facing notification. Nothing is retried automatically.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::document::{self, Document, DocumentType};
use crate::error::{self, EditorError, ValidationError};
use crate::logo::Logo;
use crate::store::{DocumentStore, StoragePort};
use crate::totals::Totals;

#[cfg(feature = "export")]
use crate::export::{self, ExportArtifact, RasterImage};

/// Where the active document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMode {
    /// Unsaved; no store entry yet.
    Creating,
    /// Bound to the existing store entry with this id.
    Editing(String),
}

type Observer = Box<dyn Fn(&Document, &Totals)>;

/// The single-user editor over a storage port.
///
/// The persisted collection is read once at construction and thereafter
/// treated as a local cache fully owned by this editor; external
/// modification of the underlying storage between operations is undefined
/// behavior (last writer wins).
pub struct Editor<S: StoragePort> {
    store: DocumentStore<S>,
    documents: Vec<Document>,
    current: Document,
    totals: Totals,
    mode: EditMode,
    logo: Option<Logo>,
    observers: Vec<Observer>,
    #[cfg(feature = "export")]
    pending_export: Option<String>,
}

impl<S: StoragePort> Editor<S> {
    /// Load persisted state and start with a fresh blank invoice.
    pub fn open(storage: S) -> Self {
        let store = DocumentStore::new(storage);
        let documents = store.load_all();
        let logo = store.load_logo();
        info!(count = documents.len(), "editor opened");
        Self {
            store,
            documents,
            current: Document::new(DocumentType::Invoice),
            totals: Totals::ZERO,
            mode: EditMode::Creating,
            logo,
            observers: Vec::new(),
            #[cfg(feature = "export")]
            pending_export: None,
        }
    }

    /// The ordered collection of saved documents.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn current(&self) -> &Document {
        &self.current
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn logo(&self) -> Option<&Logo> {
        self.logo.as_ref()
    }

    /// Subscribe to change notifications. Observers fire after every
    /// mutation of the active document, with totals already recomputed —
    /// this is what keeps the live preview current.
    pub fn subscribe(&mut self, observer: impl Fn(&Document, &Totals) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&self) {
        for observer in &self.observers {
            observer(&self.current, &self.totals);
        }
    }

    /// Apply an edit to the active document, recompute totals, and notify.
    pub fn edit(&mut self, f: impl FnOnce(&mut Document)) {
        f(&mut self.current);
        self.totals = Totals::compute(&self.current.items, self.current.tax_rate_percent);
        self.notify();
    }

    /// Force the totals computation out of band (the explicit "calculate"
    /// action). Runs the identical pure function the live preview uses.
    pub fn recalculate(&mut self) -> Totals {
        self.totals = Totals::compute(&self.current.items, self.current.tax_rate_percent);
        self.notify();
        self.totals
    }

    /// Switch the document type. The number regenerates only while the
    /// document is unsaved or has no number; editing an already persisted
    /// document's type keeps its number.
    pub fn set_document_type(&mut self, document_type: DocumentType) {
        if self.current.document_type == document_type {
            return;
        }
        self.current.document_type = document_type;
        if self.mode == EditMode::Creating || self.current.number.trim().is_empty() {
            self.current.number = document::generate_document_number(document_type);
        }
        self.notify();
    }

    /// Set a line-item quantity from loosely-typed input. A value that
    /// fails to parse is reported and the field drops to zero contribution;
    /// out-of-range values are kept and reported by validation, not
    /// silently clamped.
    pub fn set_item_quantity(&mut self, index: usize, raw: &str) -> Result<(), ValidationError> {
        self.set_item_field(index, raw, "quantity", |item, value| item.quantity = value)
    }

    /// Set a line-item unit price from loosely-typed input.
    pub fn set_item_unit_price(&mut self, index: usize, raw: &str) -> Result<(), ValidationError> {
        self.set_item_field(index, raw, "unit_price", |item, value| {
            item.unit_price = value;
        })
    }

    fn set_item_field(
        &mut self,
        index: usize,
        raw: &str,
        field: &str,
        apply: impl FnOnce(&mut crate::document::LineItem, Decimal),
    ) -> Result<(), ValidationError> {
        let path = format!("items[{index}].{field}");
        let Some(item) = self.current.items.get_mut(index) else {
            return Err(ValidationError::new(path, "no such item"));
        };
        let result = match parse_loose_number(raw) {
            Ok(value) => {
                apply(item, value);
                Ok(())
            }
            Err(()) => {
                apply(item, Decimal::ZERO);
                Err(ValidationError::new(path, "must be a number"))
            }
        };
        self.totals = Totals::compute(&self.current.items, self.current.tax_rate_percent);
        self.notify();
        result
    }

    /// Set the tax rate from loosely-typed input; missing input means 0.
    pub fn set_tax_rate(&mut self, raw: &str) -> Result<(), ValidationError> {
        let result = match parse_loose_number(raw) {
            Ok(value) => {
                self.current.tax_rate_percent = value;
                Ok(())
            }
            Err(()) => {
                self.current.tax_rate_percent = Decimal::ZERO;
                Err(ValidationError::new("tax_rate_percent", "must be a number"))
            }
        };
        self.totals = Totals::compute(&self.current.items, self.current.tax_rate_percent);
        self.notify();
        result
    }

    /// Field-scoped validation of the active document.
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        document::validate(&self.current)
    }

    /// Discard the active document and start a fresh one, preserving the
    /// chosen document type. Totals reset to zero.
    pub fn new_document(&mut self) {
        let document_type = self.current.document_type;
        self.current = Document::new(document_type);
        self.totals = Totals::ZERO;
        self.mode = EditMode::Creating;
        self.notify();
    }

    /// Append the active document to the store and persist. On success the
    /// editor resets to a fresh blank document (save-then-reset). On
    /// persistence failure the append is rolled back and the document stays
    /// open for a retry.
    pub fn save(&mut self) -> Result<(), EditorError> {
        if let EditMode::Editing(_) = self.mode {
            return Err(EditorError::InvalidState(
                "document is already saved; use update".into(),
            ));
        }
        let errors = self.validation_errors();
        if !errors.is_empty() {
            return Err(error::joined(&errors));
        }

        self.documents.push(self.current.clone());
        if let Err(err) = self.store.save_all(&self.documents) {
            self.documents.pop();
            warn!(%err, "save failed; rolled back append");
            return Err(err);
        }

        info!(number = %self.current.number, "document saved");
        self.new_document();
        Ok(())
    }

    /// Replace the bound store entry with the active document and persist.
    /// The entry count never changes. Afterwards the editor resets to a
    /// fresh blank document, exactly like [`Editor::save`].
    pub fn update(&mut self) -> Result<(), EditorError> {
        let EditMode::Editing(id) = self.mode.clone() else {
            return Err(EditorError::InvalidState(
                "no document is being edited; use save".into(),
            ));
        };
        let errors = self.validation_errors();
        if !errors.is_empty() {
            return Err(error::joined(&errors));
        }

        let Some(pos) = self.documents.iter().position(|d| d.id == id) else {
            return Err(EditorError::InvalidState(format!(
                "document '{id}' no longer exists in the store"
            )));
        };

        let previous = std::mem::replace(&mut self.documents[pos], self.current.clone());
        if let Err(err) = self.store.save_all(&self.documents) {
            self.documents[pos] = previous;
            warn!(%err, "update failed; restored previous entry");
            return Err(err);
        }

        info!(number = %self.current.number, "document updated");
        self.new_document();
        Ok(())
    }

    /// Copy a store entry into the active document and switch to editing
    /// it. Totals are recomputed immediately.
    pub fn load(&mut self, id: &str) -> Result<(), EditorError> {
        let Some(document) = self.documents.iter().find(|d| d.id == id) else {
            return Err(EditorError::InvalidState(format!(
                "no document with id '{id}'"
            )));
        };
        self.current = document.clone();
        self.mode = EditMode::Editing(id.to_string());
        self.totals = Totals::compute(&self.current.items, self.current.tax_rate_percent);
        self.notify();
        Ok(())
    }

    /// Remove a store entry and persist. A no-op for an unknown id. If the
    /// removed entry is the one currently open, the editor resets to a
    /// fresh document.
    pub fn delete(&mut self, id: &str) -> Result<(), EditorError> {
        let Some(pos) = self.documents.iter().position(|d| d.id == id) else {
            debug!(id, "delete of unknown id ignored");
            return Ok(());
        };

        let removed = self.documents.remove(pos);
        if let Err(err) = self.store.save_all(&self.documents) {
            self.documents.insert(pos, removed);
            warn!(%err, "delete failed; restored entry");
            return Err(err);
        }

        info!(number = %removed.number, "document deleted");
        if self.mode == EditMode::Editing(id.to_string()) {
            self.new_document();
        }
        Ok(())
    }

    /// Set or clear the shared logo and persist it immediately. On failure
    /// the in-memory logo is left unchanged.
    pub fn set_logo(&mut self, logo: Option<Logo>) -> Result<(), EditorError> {
        self.store.save_logo(logo.as_ref())?;
        self.logo = logo;
        self.notify();
        Ok(())
    }
}

#[cfg(feature = "export")]
impl<S: StoragePort> Editor<S> {
    /// Whether an export is currently in flight (the UI disables the
    /// trigger while this is true).
    pub fn export_in_flight(&self) -> bool {
        self.pending_export.is_some()
    }

    /// Start an export of the active document. Returns the artifact file
    /// name; fails if an export is already in flight — a second request is
    /// rejected, never queued.
    pub fn begin_export(&mut self) -> Result<String, EditorError> {
        if self.pending_export.is_some() {
            return Err(EditorError::InvalidState(
                "an export is already in progress".into(),
            ));
        }
        let name = export::file_name(self.current.document_type, &self.current.number);
        self.pending_export = Some(name.clone());
        Ok(name)
    }

    /// Complete an export with the capture outcome. The in-flight flag
    /// clears regardless; a capture failure surfaces as an export error and
    /// changes no model or store state.
    pub fn finish_export(
        &mut self,
        capture: Result<RasterImage, String>,
    ) -> Result<ExportArtifact, EditorError> {
        let file_name = self.pending_export.take().ok_or_else(|| {
            EditorError::InvalidState("no export is in progress".into())
        })?;
        let image = capture.map_err(EditorError::Export)?;
        let bytes = export::image_to_pdf(&image)?;
        Ok(ExportArtifact { file_name, bytes })
    }
}

/// Loose numeric coercion for form input: trimmed decimal text; empty means
/// zero. Never panics.
fn parse_loose_number(raw: &str) -> Result<Decimal, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Decimal::ZERO);
    }
    raw.parse::<Decimal>().map_err(|_| ())
}
