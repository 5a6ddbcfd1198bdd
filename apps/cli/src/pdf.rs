//! PDF text extraction.
//!
//! Uses pdf-extract to pull text page by page, then exposes it to the entry
//! extractor as a [`TextSource`].

use std::convert::Infallible;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use vocab_core::TextSource;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to extract text from {path}: {message}")]
    Extract { path: PathBuf, message: String },
}

/// A PDF whose per-page text has been extracted up front.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    path: PathBuf,
    pages: Vec<String>,
}

impl PdfDocument {
    /// Read and extract a PDF file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PdfError> {
        let path = path.as_ref();
        info!("Extracting text from PDF: {:?}", path);

        let bytes = std::fs::read(path).map_err(|source| PdfError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_bytes(path, &bytes)
    }

    /// Extract a PDF already held in memory. `path` is used for messages only.
    pub fn from_bytes(path: impl AsRef<Path>, bytes: &[u8]) -> Result<Self, PdfError> {
        let path = path.as_ref().to_path_buf();

        // pdf-extract panics on some malformed documents (e.g. missing fonts).
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }));

        let pages = match result {
            Ok(Ok(pages)) => pages,
            Ok(Err(e)) => {
                return Err(PdfError::Extract {
                    path,
                    message: e.to_string(),
                })
            }
            Err(_) => {
                return Err(PdfError::Extract {
                    path,
                    message: "PDF extraction panicked (malformed PDF)".to_string(),
                })
            }
        };

        let empty = pages.iter().filter(|p| p.trim().is_empty()).count();
        if empty == pages.len() && !pages.is_empty() {
            warn!("PDF appears to be scanned or has no extractable text: {:?}", path);
        } else if empty > 0 {
            debug!("{} of {} pages have no extractable text", empty, pages.len());
        }
        info!("Extracted {} pages from PDF", pages.len());

        Ok(Self { path, pages })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextSource for PdfDocument {
    type Error = Infallible;

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<Option<String>, Self::Error> {
        Ok(self
            .pages
            .get(index)
            .filter(|text| !text.trim().is_empty())
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_io_error() {
        let err = PdfDocument::open("/definitely/not/here.pdf").unwrap_err();
        assert!(matches!(err, PdfError::Io { .. }));
    }

    #[test]
    fn garbage_bytes_fail_extraction() {
        let err = PdfDocument::from_bytes("junk.pdf", b"not a pdf at all").unwrap_err();
        assert!(matches!(err, PdfError::Extract { .. }));
    }
}
