//! Command implementations behind the CLI.

pub mod export;
pub mod parse;
pub mod sync;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use vocab_core::Entry;

use crate::pdf::PdfDocument;

/// Number of entries shown when previewing a parse.
pub const PREVIEW_LEN: usize = 10;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("No words were parsed from {}", .0.display())]
    NothingParsed(PathBuf),

    #[error(transparent)]
    Pdf(#[from] crate::pdf::PdfError),

    #[error(transparent)]
    Extract(#[from] vocab_core::ExtractError),
}

/// Extract entries from a PDF, treating an empty result as an error.
pub fn load_entries(pdf: &Path) -> Result<Vec<Entry>, CommandError> {
    let document = PdfDocument::open(pdf)?;
    let entries = vocab_core::extract(&document)?;

    if entries.is_empty() {
        return Err(CommandError::NothingParsed(pdf.to_path_buf()));
    }

    info!("Parsed {} entries from {:?}", entries.len(), pdf);
    Ok(entries)
}

/// Deck name: the explicit override, else the PDF's file stem.
pub fn deck_name_for(pdf: &Path, explicit: Option<&str>) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| {
            pdf.file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "default".to_string())
}

/// One line per entry for terminal output.
pub fn format_entry(index: usize, entry: &Entry) -> String {
    format!(
        "{:>4}. {}\n      Meaning: {}\n      Example: {}",
        index + 1,
        entry.term,
        entry.meaning,
        entry.example
    )
}
