//! Page-ordered text sources the extractor reads from.

use std::convert::Infallible;

/// A document whose text can be read one page at a time.
///
/// A page yields `None` when it has no extractable text (a scanned image page,
/// for example). Errors are reserved for pages that cannot be read at all.
pub trait TextSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Extracted text of the page at `index` (zero-based).
    fn page_text(&self, index: usize) -> Result<Option<String>, Self::Error>;
}

/// Document whose page text is already in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocument {
    pages: Vec<Option<String>>,
}

impl InMemoryDocument {
    pub fn new(pages: Vec<Option<String>>) -> Self {
        Self { pages }
    }

    /// Build a document where every page has text.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(|p| Some(p.into())).collect(),
        }
    }
}

impl TextSource for InMemoryDocument {
    type Error = Infallible;

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<Option<String>, Self::Error> {
        Ok(self
            .pages
            .get(index)
            .and_then(|p| p.as_deref())
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_page_reads_as_none() {
        let doc = InMemoryDocument::new(vec![Some("text".into()), Some("  \n ".into()), None]);
        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.page_text(0).unwrap().as_deref(), Some("text"));
        assert_eq!(doc.page_text(1).unwrap(), None);
        assert_eq!(doc.page_text(2).unwrap(), None);
    }

    #[test]
    fn out_of_range_page_is_none() {
        let doc = InMemoryDocument::from_pages(["only"]);
        assert_eq!(doc.page_text(5).unwrap(), None);
    }
}
