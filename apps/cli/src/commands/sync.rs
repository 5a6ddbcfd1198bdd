//! `sync`: push entries into a running Anki.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use super::{deck_name_for, load_entries, PREVIEW_LEN};
use crate::anki::{sync_deck, AnkiConnect, SyncOptions, SyncReport};
use crate::config::Config;

pub async fn run(
    pdf: &Path,
    deck_name: Option<&str>,
    config: &Config,
    options: &SyncOptions,
) -> Result<SyncReport> {
    let entries = load_entries(pdf)?;
    let deck_name = deck_name_for(pdf, deck_name);

    let client = AnkiConnect::from_config(config).context("Failed to build AnkiConnect client")?;

    let bar = ProgressBar::new(entries.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let report = sync_deck(&client, &deck_name, &entries, options, |progress| {
        bar.set_position(progress.current as u64);
        bar.set_message(progress.term.clone());
    })
    .await
    .with_context(|| format!("Sync to {} failed", client.endpoint()))?;
    bar.finish_and_clear();

    print_report(&deck_name, &report);
    Ok(report)
}

fn print_report(deck_name: &str, report: &SyncReport) {
    println!("Added {} cards successfully.", report.added);

    if report.failures.is_empty() {
        println!("All cards added successfully!");
    } else {
        println!("Failed to add {} cards.", report.failures.len());
        println!("Sample failures:");
        for failure in report.failures.iter().take(PREVIEW_LEN) {
            println!("  {} -> {}", failure.term, failure.reason);
        }
    }

    println!(
        "Total cards in Anki deck '{}': {}",
        deck_name, report.deck_size
    );
    println!("Open Anki and click Sync to push to AnkiWeb.");
}
