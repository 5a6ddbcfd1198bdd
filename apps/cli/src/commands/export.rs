//! `export`: write an `.apkg` file.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use vocab_core::Entry;

use super::{deck_name_for, load_entries};
use crate::package::{DeckPackager, PackageSummary};

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub deck_name: Option<String>,
    /// Output path; defaults to `<deck name>.apkg` next to the PDF.
    pub output: Option<PathBuf>,
    pub tag: String,
}

pub fn run(pdf: &Path, options: &ExportOptions) -> Result<PackageSummary> {
    let entries = load_entries(pdf)?;
    let deck_name = deck_name_for(pdf, options.deck_name.as_deref());
    let output = options
        .output
        .clone()
        .unwrap_or_else(|| default_output(pdf, &deck_name));

    let summary = export_entries(&entries, &deck_name, &output, &options.tag)?;

    println!(
        "Anki package generated: {} ({} cards in deck '{}')",
        summary.path.display(),
        summary.notes,
        summary.deck_name
    );
    println!("Import it into Anki and sync.");

    Ok(summary)
}

/// Package already parsed entries.
pub fn export_entries(
    entries: &[Entry],
    deck_name: &str,
    output: &Path,
    tag: &str,
) -> Result<PackageSummary> {
    DeckPackager::new(deck_name)
        .tags([tag.to_string(), tag_safe(deck_name)])
        .write_to_file(entries, output)
        .with_context(|| format!("Failed to write Anki package {:?}", output))
}

fn default_output(pdf: &Path, deck_name: &str) -> PathBuf {
    pdf.with_file_name(format!("{}.apkg", deck_name))
}

// Anki splits tags on whitespace.
fn tag_safe(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}
