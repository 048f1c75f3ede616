use thiserror::Error;

/// Errors that can occur while editing, persisting, or exporting documents.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EditorError {
    /// One or more validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The backing storage rejected a read or write (e.g. quota exceeded).
    /// In-memory state is preserved; the operation may be retried.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// The export pipeline failed (capture or PDF encoding).
    /// No model or store state is changed.
    #[error("export failed: {0}")]
    Export(String),

    /// A logo asset could not be read or decoded.
    #[error("logo error: {0}")]
    Logo(String),

    /// The operation is not valid in the editor's current state.
    #[error("invalid operation: {0}")]
    InvalidState(String),
}

/// A single validation error with field path and message.
///
/// Validation failures are field-scoped so the embedding form can attach
/// them to the offending input (e.g. `client.email`). They block save,
/// update, and export, but never in-memory editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "items[0].quantity").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Join field-scoped errors into a single [`EditorError::Validation`].
pub(crate) fn joined(errors: &[ValidationError]) -> EditorError {
    let msg = errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    EditorError::Validation(msg)
}
