//! Anki package (`.apkg`) writer.
//!
//! An `.apkg` is a zip archive holding a SQLite collection (`collection.anki2`)
//! and a media map (`media`). Each entry becomes one note with fields
//! `Word`, `Meaning`, `Example` and one card.

pub mod error;
pub mod ids;
pub mod schema;

pub use error::PackageError;

use chrono::Utc;
use rusqlite::{params, Connection};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use vocab_core::Entry;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use schema::ModelSpec;

type Result<T> = std::result::Result<T, PackageError>;

pub const MODEL_NAME: &str = "GRE Basic Model";
pub const MODEL_FIELDS: [&str; 3] = ["Word", "Meaning", "Example"];
pub const TEMPLATE_NAME: &str = "Card 1";
pub const FRONT_TEMPLATE: &str = "<h2>{{Word}}</h2>";
pub const BACK_TEMPLATE: &str = "<b>Meaning:</b> {{Meaning}}<br><br><b>Example:</b> {{Example}}";

const COLLECTION_FILE: &str = "collection.anki2";
const MEDIA_FILE: &str = "media";

/// Result of writing a package.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PackageSummary {
    pub path: PathBuf,
    pub deck_name: String,
    pub deck_id: i64,
    pub model_id: i64,
    pub notes: usize,
}

/// Writes entries into a single-deck Anki package.
#[derive(Debug, Clone)]
pub struct DeckPackager {
    deck_name: String,
    deck_id: i64,
    model_id: i64,
    tags: Vec<String>,
}

impl DeckPackager {
    /// Packager with random deck and model ids.
    pub fn new(deck_name: impl Into<String>) -> Self {
        Self::with_ids(deck_name, ids::random_id(), ids::random_id())
    }

    /// Packager with fixed ids, so re-imports update the same deck and model.
    pub fn with_ids(deck_name: impl Into<String>, deck_id: i64, model_id: i64) -> Self {
        Self {
            deck_name: deck_name.into(),
            deck_id,
            model_id,
            tags: Vec::new(),
        }
    }

    /// Tags applied to every note.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }

    pub fn deck_id(&self) -> i64 {
        self.deck_id
    }

    pub fn model_id(&self) -> i64 {
        self.model_id
    }

    /// Write `entries` as an `.apkg` file at `path`.
    pub fn write_to_file(&self, entries: &[Entry], path: impl AsRef<Path>) -> Result<PackageSummary> {
        if entries.is_empty() {
            return Err(PackageError::NoEntries);
        }
        let path = path.as_ref();

        let scratch = tempfile::tempdir()?;
        let db_path = scratch.path().join(COLLECTION_FILE);
        {
            let mut conn = Connection::open(&db_path)?;
            self.write_collection(&mut conn, entries)?;
        }
        let collection = fs::read(&db_path)?;
        debug!("Collection database is {} bytes", collection.len());

        let file = File::create(path)?;
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.start_file(COLLECTION_FILE, options)?;
        zip.write_all(&collection)?;
        zip.start_file(MEDIA_FILE, options)?;
        zip.write_all(b"{}")?;
        zip.finish()?;

        info!(
            "Wrote {} notes to deck '{}' in {:?}",
            entries.len(),
            self.deck_name,
            path
        );

        Ok(PackageSummary {
            path: path.to_path_buf(),
            deck_name: self.deck_name.clone(),
            deck_id: self.deck_id,
            model_id: self.model_id,
            notes: entries.len(),
        })
    }

    fn write_collection(&self, conn: &mut Connection, entries: &[Entry]) -> Result<()> {
        conn.execute_batch(schema::SCHEMA)?;

        let now = Utc::now();
        let now_secs = now.timestamp();
        let now_millis = now.timestamp_millis();

        let model = ModelSpec {
            id: self.model_id,
            name: MODEL_NAME,
            fields: &MODEL_FIELDS,
            template_name: TEMPLATE_NAME,
            front: FRONT_TEMPLATE,
            back: BACK_TEMPLATE,
        };

        let tx = conn.transaction()?;

        tx.execute(
            schema::INSERT_COL,
            params![
                now_secs,
                now_millis,
                now_millis,
                schema::SCHEMA_VERSION,
                serde_json::to_string(&schema::collection_conf(self.model_id))?,
                serde_json::to_string(&schema::models(&model, self.deck_id, now_secs))?,
                serde_json::to_string(&schema::decks(self.deck_id, &self.deck_name, now_secs))?,
                serde_json::to_string(&schema::deck_conf())?,
            ],
        )?;

        let tags = format_tags(&self.tags);

        for (idx, entry) in entries.iter().enumerate() {
            let fields = [
                entry.term.as_str(),
                entry.meaning.as_str(),
                entry.example.as_str(),
            ];
            // Millisecond ids, offset per row so they stay unique.
            let id = now_millis + idx as i64;

            tx.execute(
                schema::INSERT_NOTE,
                params![
                    id,
                    ids::guid_for(&fields),
                    self.model_id,
                    now_secs,
                    tags,
                    fields.join("\x1f"),
                    entry.term,
                    ids::field_checksum(&entry.term),
                ],
            )?;

            tx.execute(
                schema::INSERT_CARD,
                params![id, id, self.deck_id, now_secs, idx as i64 + 1],
            )?;
        }

        tx.commit()?;
        Ok(())
    }
}

/// Anki stores tags space separated with a leading and trailing space.
fn format_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        String::new()
    } else {
        format!(" {} ", tags.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_tags_wraps_with_spaces() {
        assert_eq!(format_tags(&[]), "");
        assert_eq!(format_tags(&["GRE".into(), "List_1".into()]), " GRE List_1 ");
    }

    #[test]
    fn empty_entries_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.apkg");
        let err = DeckPackager::new("Deck").write_to_file(&[], &path).unwrap_err();
        assert!(matches!(err, PackageError::NoEntries));
        assert!(!path.exists());
    }

    #[test]
    fn random_ids_are_in_range() {
        let packager = DeckPackager::new("Deck");
        assert!((1 << 30..1 << 31).contains(&packager.deck_id()));
        assert!((1 << 30..1 << 31).contains(&packager.model_id()));
    }
}
