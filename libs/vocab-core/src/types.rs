//! Core types for vocabulary extraction.

use serde::{Deserialize, Serialize};

/// One parsed vocabulary record, destined to become one flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    pub term: String,
    pub meaning: String,
    pub example: String,
}

impl Entry {
    pub fn new(
        term: impl Into<String>,
        meaning: impl Into<String>,
        example: impl Into<String>,
    ) -> Self {
        Self {
            term: term.into(),
            meaning: meaning.into(),
            example: example.into(),
        }
    }
}

/// Outcome of classifying a single non-blank line.
///
/// Variants are listed in match priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    /// Numbered header introducing a new term. `term` is `None` when the line
    /// passed the header test but the term could not be cut out of it.
    Header { term: Option<String> },
    /// `Meaning:` line with the label removed.
    Meaning(String),
    /// `Example:` line with the label removed.
    Example(String),
    NoMatch,
}
