//! AnkiConnect client.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use vocab_core::Entry;

use super::{AnkiError, RetryPolicy};
use crate::config::Config;

/// AnkiConnect API version spoken by this client.
pub const ANKI_CONNECT_VERSION: u32 = 6;

/// Note type every pushed note uses.
pub const BASIC_MODEL: &str = "Basic";

// === API Request/Response Types ===

#[derive(Debug, Serialize)]
struct AnkiRequest<'a, P> {
    action: &'a str,
    version: u32,
    params: P,
}

#[derive(Debug, Deserialize)]
struct AnkiResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<String>,
}

/// Note payload for `addNote`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub deck_name: String,
    pub model_name: String,
    pub fields: NoteFields,
    pub tags: Vec<String>,
}

/// Fields of the built-in `Basic` note type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NoteFields {
    pub front: String,
    pub back: String,
}

impl Note {
    /// `Basic` note for an entry: term on the front, meaning and example on
    /// the back. Tagged with `tag` and the deck name.
    pub fn basic(deck_name: &str, entry: &Entry, tag: &str) -> Self {
        Self {
            deck_name: deck_name.to_string(),
            model_name: BASIC_MODEL.to_string(),
            fields: NoteFields {
                front: entry.term.clone(),
                back: answer_html(&entry.meaning, &entry.example),
            },
            tags: vec![tag.to_string(), deck_name.to_string()],
        }
    }
}

/// HTML for the answer side of a card.
pub fn answer_html(meaning: &str, example: &str) -> String {
    format!("<b>Meaning:</b> {meaning}<br><br><b>Example:</b> {example}")
}

struct AnkiConnectInner {
    client: Client,
    endpoint: String,
    retry: RetryPolicy,
}

/// Client for a locally running AnkiConnect add-on.
///
/// Cheap to clone; all clones share one HTTP connection pool.
#[derive(Clone)]
pub struct AnkiConnect {
    inner: Arc<AnkiConnectInner>,
}

impl AnkiConnect {
    /// Create a client for `endpoint` (e.g. `http://localhost:8765`).
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, AnkiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnkiError::Network(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(AnkiConnectInner {
                client,
                endpoint: endpoint.into(),
                retry,
            }),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AnkiError> {
        Self::new(
            config.endpoint(),
            config.request_timeout,
            RetryPolicy::with_attempts(config.max_attempts),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    /// Invoke an AnkiConnect action, retrying transport failures.
    pub async fn invoke<P, R>(&self, action: &str, params: P) -> Result<R, AnkiError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let request = AnkiRequest {
            action,
            version: ANKI_CONNECT_VERSION,
            params,
        };

        let result = self
            .inner
            .retry
            .run(action, || self.send_once(&request))
            .await?;

        serde_json::from_value(result).map_err(|e| AnkiError::Parse(e.to_string()))
    }

    /// Names of all note types.
    pub async fn model_names(&self) -> Result<Vec<String>, AnkiError> {
        self.invoke("modelNames", json!({})).await
    }

    /// Create a deck, returning its id. Existing decks are left as they are.
    pub async fn create_deck(&self, deck_name: &str) -> Result<i64, AnkiError> {
        self.invoke("createDeck", json!({ "deck": deck_name })).await
    }

    /// Delete a deck together with its cards.
    pub async fn delete_deck(&self, deck_name: &str) -> Result<(), AnkiError> {
        self.invoke(
            "deleteDecks",
            json!({ "decks": [deck_name], "cardsToo": true }),
        )
        .await
    }

    /// Add one note, returning the new note id.
    pub async fn add_note(&self, note: &Note) -> Result<i64, AnkiError> {
        self.invoke("addNote", json!({ "note": note })).await
    }

    /// Card ids matching a search query.
    pub async fn find_cards(&self, query: &str) -> Result<Vec<i64>, AnkiError> {
        self.invoke("findCards", json!({ "query": query })).await
    }

    /// Number of cards currently in a deck.
    pub async fn deck_card_count(&self, deck_name: &str) -> Result<usize, AnkiError> {
        let cards = self.find_cards(&deck_query(deck_name)).await?;
        Ok(cards.len())
    }

    // === Private methods ===

    async fn send_once<P: Serialize>(&self, request: &AnkiRequest<'_, P>) -> Result<Value, AnkiError> {
        debug!("AnkiConnect request: {}", request.action);

        let resp = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| AnkiError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(AnkiError::Http { status, message });
        }

        let response: AnkiResponse = resp
            .json()
            .await
            .map_err(|e| AnkiError::Parse(e.to_string()))?;

        match response.error {
            Some(error) => Err(AnkiError::Api(error)),
            None => Ok(response.result),
        }
    }
}

/// Search query selecting every card of a deck.
pub fn deck_query(deck_name: &str) -> String {
    format!("deck:\"{}\"", deck_name)
}
