//! Template engine error types

use thiserror::Error;

/// Rendering-specific errors
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template not found or failed to parse at startup
    #[error("Template error: {0}")]
    Template(String),

    /// Embedded template is not valid UTF-8
    #[error("Invalid embedded template: {0}")]
    InvalidTemplate(String),
}
