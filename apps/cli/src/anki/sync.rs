//! Deck sync workflow: recreate a deck and add one note per entry.

use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};
use vocab_core::Entry;

use super::{AnkiConnect, AnkiError, Note, BASIC_MODEL};
use crate::config::{DEFAULT_TAG, DEFAULT_THROTTLE_MS};

/// Options for a sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Delete the deck before recreating it, so reruns do not duplicate cards.
    pub delete_existing: bool,
    /// Pause between note insertions.
    pub throttle: Duration,
    /// Fixed label tagged onto every note, next to the deck name.
    pub tag: String,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            delete_existing: true,
            throttle: Duration::from_millis(DEFAULT_THROTTLE_MS),
            tag: DEFAULT_TAG.to_string(),
        }
    }
}

/// Progress after each attempted note.
#[derive(Debug, Clone, Serialize)]
pub struct SyncProgress {
    pub current: usize,
    pub total: usize,
    pub term: String,
    pub added: bool,
}

/// A note that Anki refused.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteFailure {
    pub term: String,
    pub reason: String,
}

/// Outcome of a sync run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    pub added: usize,
    pub failures: Vec<NoteFailure>,
    pub deck_size: usize,
}

/// Push `entries` into deck `deck_name`.
///
/// Individual note failures are collected in the report; any other failure
/// aborts the run.
pub async fn sync_deck<F>(
    client: &AnkiConnect,
    deck_name: &str,
    entries: &[Entry],
    options: &SyncOptions,
    mut on_progress: F,
) -> Result<SyncReport, AnkiError>
where
    F: FnMut(&SyncProgress),
{
    if entries.is_empty() {
        return Err(AnkiError::NoEntries);
    }

    let models = client.model_names().await?;
    if !models.iter().any(|m| m == BASIC_MODEL) {
        return Err(AnkiError::ModelNotFound(BASIC_MODEL.to_string()));
    }

    if options.delete_existing {
        match client.delete_deck(deck_name).await {
            Ok(()) => debug!("Deleted existing deck: {}", deck_name),
            Err(e) => debug!("No deck to delete: {} ({})", deck_name, e),
        }
    }

    client.create_deck(deck_name).await?;
    info!("Created deck: {}", deck_name);

    let mut report = SyncReport::default();
    let total = entries.len();

    for (idx, entry) in entries.iter().enumerate() {
        let note = Note::basic(deck_name, entry, &options.tag);

        let added = match client.add_note(&note).await {
            Ok(_) => {
                debug!("[OK] {}", entry.term);
                report.added += 1;
                true
            }
            Err(e) => {
                warn!("[FAIL] {} -> {}", entry.term, e);
                report.failures.push(NoteFailure {
                    term: entry.term.clone(),
                    reason: e.to_string(),
                });
                false
            }
        };

        on_progress(&SyncProgress {
            current: idx + 1,
            total,
            term: entry.term.clone(),
            added,
        });

        if !options.throttle.is_zero() {
            tokio::time::sleep(options.throttle).await;
        }
    }

    report.deck_size = client.deck_card_count(deck_name).await?;
    info!(
        "Added {} of {} notes, deck '{}' now has {} cards",
        report.added, total, deck_name, report.deck_size
    );

    Ok(report)
}
