//! Core vocabulary-list library shared by the export and sync front ends.
//!
//! Provides:
//! - Line classifier and entry extractor for numbered vocabulary lists
//! - The `TextSource` seam through which documents are read page by page
//! - Shared types (Entry, LineMatch) and errors

pub mod error;
pub mod parser;
pub mod source;
pub mod types;

pub use error::{ExtractError, Result};
pub use parser::{classify, extract, parse_text, ParserState};
pub use source::{InMemoryDocument, TextSource};
pub use types::{Entry, LineMatch};
