//! Vocabulary PDF to Anki flashcards.
//!
//! Parses numbered vocabulary lists out of PDFs (via `vocab-core`) and either
//! packages them as an `.apkg` file or pushes them into a running Anki through
//! AnkiConnect.

pub mod anki;
pub mod commands;
pub mod config;
pub mod package;
pub mod pdf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber, honouring `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
