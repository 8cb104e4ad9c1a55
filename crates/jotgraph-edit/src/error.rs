//! Error types for document editing.

use thiserror::Error;

/// Result type alias for editing operations.
pub type EditResult<T> = Result<T, EditError>;

/// Errors that can abort an edit.
///
/// Only unparseable input aborts an edit. Everything else (missing paths,
/// type mismatches, stale editor text) degrades to "absent" or to the
/// fallback rebuild without surfacing an error.
#[derive(Debug, Error)]
pub enum EditError {
    /// The edited content is not valid JSON.
    #[error("edited content is not valid JSON: {source}")]
    EditParse {
        /// The underlying parse error.
        source: serde_json::Error,
    },

    /// The authoritative document is not valid JSON.
    #[error("document is not valid JSON: {source}")]
    DocumentParse {
        /// The underlying parse error.
        source: serde_json::Error,
    },

    /// JSON serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EditError {
    /// Create an edited-content parse error.
    #[inline]
    pub fn edit_parse(source: serde_json::Error) -> Self {
        EditError::EditParse { source }
    }

    /// Create a document parse error.
    #[inline]
    pub fn document_parse(source: serde_json::Error) -> Self {
        EditError::DocumentParse { source }
    }
}
