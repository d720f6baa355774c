//! PDF filler error types

use thiserror::Error;

/// Errors of the form-filling pipeline
#[derive(Debug, Error)]
pub enum FillError {
    /// The template's protection could not be removed
    #[error("Template protection could not be removed: {0}")]
    Integrity(String),

    /// The template's catalog carries no /AcroForm entry
    #[error("Template has no interactive form (missing AcroForm)")]
    MissingForm,

    /// Malformed PDF structure
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
