//! `parse`: show what would be turned into cards.

use anyhow::Result;
use std::path::Path;

use super::{format_entry, load_entries, PREVIEW_LEN};

#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Print entries as a JSON array instead of text.
    pub json: bool,
    /// Maximum number of entries to print. JSON output prints all by default,
    /// text output a preview.
    pub limit: Option<usize>,
}

pub fn run(pdf: &Path, options: &ParseOptions) -> Result<()> {
    let entries = load_entries(pdf)?;

    if options.json {
        let shown = &entries[..options.limit.unwrap_or(entries.len()).min(entries.len())];
        println!("{}", serde_json::to_string_pretty(shown)?);
        return Ok(());
    }

    let limit = options.limit.unwrap_or(PREVIEW_LEN).min(entries.len());
    println!("Parsed {} words successfully!", entries.len());
    println!("First {} parsed entries:", limit);
    for (idx, entry) in entries.iter().take(limit).enumerate() {
        println!("{}", format_entry(idx, entry));
    }

    Ok(())
}
