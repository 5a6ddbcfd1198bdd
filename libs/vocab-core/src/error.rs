//! Error types for vocab-core.

use thiserror::Error;

/// Result type alias using ExtractError.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur while pulling text out of a document.
///
/// Malformed lines are never errors; only a failing text source is.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read text of page {page}: {source}")]
    Page {
        page: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ExtractError {
    /// Wrap a text source failure for the given zero-based page.
    pub fn page<E>(page: usize, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Page {
            page,
            source: Box::new(source),
        }
    }
}
