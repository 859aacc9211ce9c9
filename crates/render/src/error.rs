//! Render error types.

use thiserror::Error;

/// Reasons a stored payload could not be treated as a document.
///
/// Only [`DocumentRenderer::parse`](crate::DocumentRenderer::parse) surfaces
/// these; rendering absorbs them and produces an empty result.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("document is not valid JSON for the document schema")]
    Parse(#[from] serde_json::Error),

    #[error("root node type is {found:?}, expected \"doc\"")]
    NotADocument { found: String },
}

/// Result type alias using RenderError.
pub type RenderResult<T> = Result<T, RenderError>;
