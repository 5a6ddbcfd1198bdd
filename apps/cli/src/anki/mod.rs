//! Pushing entries into a running Anki through AnkiConnect.

pub mod client;
pub mod retry;
pub mod sync;

pub use client::{answer_html, deck_query, AnkiConnect, Note, NoteFields, BASIC_MODEL};
pub use retry::RetryPolicy;
pub use sync::{sync_deck, NoteFailure, SyncOptions, SyncProgress, SyncReport};

/// AnkiConnect errors.
#[derive(Debug, thiserror::Error)]
pub enum AnkiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("AnkiConnect HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("AnkiConnect error: {0}")]
    Api(String),

    #[error("AnkiConnect unreachable after {attempts} attempts: {last_error}")]
    Unreachable { attempts: u32, last_error: String },

    #[error("Anki model '{0}' not found")]
    ModelNotFound(String),

    #[error("No entries to sync")]
    NoEntries,
}

impl AnkiError {
    /// Transport-level failures are worth retrying; answers from Anki are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Http { .. } | Self::Parse(_))
    }
}
