//! Entry extractor for numbered vocabulary lists.
//!
//! # Format
//! ```text
//! 12. abase (verb) to lower in rank
//! Meaning: to humiliate or degrade
//! Example: The king was abased before his enemies.
//! ```
//!
//! Each surviving line is classified as a header, meaning, or example line
//! (first match wins) and fed to a [`ParserState`]. An entry is emitted when an
//! example line arrives while both a term and a meaning are pending.

use crate::error::{ExtractError, Result};
use crate::source::TextSource;
use crate::types::{Entry, LineMatch};

const MEANING_LABEL: &str = "Meaning:";
const EXAMPLE_LABEL: &str = "Example:";

/// Symbol-font bullet that PDF text extraction leaves in the private use area.
const PDF_BULLET: char = '\u{f0b7}';

/// Read every page of `source` and extract its entries.
///
/// Page text blocks are joined in page order, each followed by a line break.
/// A page that fails to read aborts the whole call.
pub fn extract<S>(source: &S) -> Result<Vec<Entry>>
where
    S: TextSource + ?Sized,
{
    let mut text = String::new();

    for index in 0..source.page_count() {
        let page = source
            .page_text(index)
            .map_err(|e| ExtractError::page(index, e))?;

        if let Some(page) = page {
            text.push_str(&page);
            text.push('\n');
        }
    }

    Ok(parse_text(&text))
}

/// Parse already concatenated document text into entries.
pub fn parse_text(text: &str) -> Vec<Entry> {
    let mut state = ParserState::default();

    text.split('\n')
        .filter_map(clean_line)
        .filter_map(|line| state.apply(classify(&line)))
        .collect()
}

/// Classify one cleaned line. Patterns are tried in priority order:
/// header, meaning, example.
pub fn classify(line: &str) -> LineMatch {
    if is_header(line) {
        LineMatch::Header {
            term: header_term(line),
        }
    } else if starts_with_label(line, MEANING_LABEL) {
        LineMatch::Meaning(line.replace(MEANING_LABEL, "").trim().to_string())
    } else if starts_with_label(line, EXAMPLE_LABEL) {
        LineMatch::Example(line.replace(EXAMPLE_LABEL, "").trim().to_string())
    } else {
        LineMatch::NoMatch
    }
}

/// Pending values carried between lines during one parse pass.
///
/// Empty strings are never stored; they count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserState {
    pending_term: Option<String>,
    pending_meaning: Option<String>,
}

impl ParserState {
    pub fn pending_term(&self) -> Option<&str> {
        self.pending_term.as_deref()
    }

    pub fn pending_meaning(&self) -> Option<&str> {
        self.pending_meaning.as_deref()
    }

    /// Apply one classified line, returning the entry it completes, if any.
    pub fn apply(&mut self, line: LineMatch) -> Option<Entry> {
        match line {
            LineMatch::Header { term } => {
                self.pending_term = term.filter(|t| !t.is_empty());
                None
            }
            LineMatch::Meaning(meaning) => {
                self.pending_meaning = Some(meaning).filter(|m| !m.is_empty());
                None
            }
            LineMatch::Example(example) => {
                if self.pending_term.is_none() || self.pending_meaning.is_none() {
                    return None;
                }
                Some(Entry {
                    term: self.pending_term.take().unwrap_or_default(),
                    meaning: self.pending_meaning.take().unwrap_or_default(),
                    example,
                })
            }
            LineMatch::NoMatch => None,
        }
    }
}

fn clean_line(raw: &str) -> Option<String> {
    let line = raw.trim().replace(PDF_BULLET, "");
    let line = line.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

// Only the text before the first period is checked; the parentheses may be
// anywhere in the line.
fn is_header(line: &str) -> bool {
    let Some((number, _)) = line.split_once('.') else {
        return false;
    };
    line.contains('(')
        && line.contains(')')
        && !number.is_empty()
        && number.chars().all(|c| c.is_ascii_digit())
}

fn header_term(line: &str) -> Option<String> {
    let (_, rest) = line.split_once(". ")?;
    let term = rest.split_once('(').map_or(rest, |(before, _)| before).trim();
    if term.is_empty() {
        None
    } else {
        Some(term.to_string())
    }
}

fn starts_with_label(line: &str, label: &str) -> bool {
    line.get(..label.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(label))
}
