//! Common test utilities for integration tests.
//!
//! Provides an in-process fake AnkiConnect server so the sync workflow can be
//! exercised without a running Anki.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use vocab_core::Entry;
use vocab_deck::anki::{AnkiConnect, RetryPolicy};

/// Mutable state behind the fake server.
#[derive(Debug, Default)]
pub struct FakeAnkiState {
    pub models: Vec<String>,
    pub decks: BTreeMap<String, Vec<i64>>,
    pub notes: Vec<Value>,
    pub requests: Vec<Value>,
    /// Fronts that `addNote` refuses as duplicates.
    pub reject_fronts: HashSet<String>,
    /// Number of upcoming requests answered with HTTP 500.
    pub fail_next: usize,
    pub next_id: i64,
}

impl FakeAnkiState {
    pub fn with_basic_model() -> Self {
        Self {
            models: vec!["Basic".to_string(), "Cloze".to_string()],
            ..Self::default()
        }
    }
}

type Shared = Arc<Mutex<FakeAnkiState>>;

/// Fake AnkiConnect bound to an ephemeral local port.
pub struct FakeAnki {
    pub addr: SocketAddr,
    pub state: Shared,
    task: tokio::task::JoinHandle<()>,
}

impl FakeAnki {
    pub async fn start() -> Self {
        Self::start_with(FakeAnkiState::with_basic_model()).await
    }

    pub async fn start_with(state: FakeAnkiState) -> Self {
        let state = Arc::new(Mutex::new(state));
        let app = Router::new()
            .route("/", post(handle))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake AnkiConnect");
        let addr = listener.local_addr().expect("local addr");

        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { addr, state, task }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client pointed at this server that retries without sleeping.
    pub fn client(&self, attempts: u32) -> AnkiConnect {
        AnkiConnect::new(
            self.endpoint(),
            Duration::from_secs(2),
            RetryPolicy::immediate(attempts),
        )
        .expect("client")
    }

    /// Actions received so far, in order.
    pub fn actions(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .map(|r| r["action"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    pub fn notes(&self) -> Vec<Value> {
        self.state.lock().unwrap().notes.clone()
    }

    pub fn deck_exists(&self, name: &str) -> bool {
        self.state.lock().unwrap().decks.contains_key(name)
    }
}

impl Drop for FakeAnki {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn ok(result: Value) -> Value {
    json!({ "result": result, "error": null })
}

fn err(message: impl Into<String>) -> Value {
    json!({ "result": null, "error": message.into() })
}

async fn handle(State(state): State<Shared>, Json(request): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(request.clone());

    if state.fail_next > 0 {
        state.fail_next -= 1;
        return (StatusCode::INTERNAL_SERVER_ERROR, "busy").into_response();
    }

    let params = &request["params"];
    let reply = match request["action"].as_str().unwrap_or_default() {
        "modelNames" => ok(json!(state.models)),
        "createDeck" => {
            let name = params["deck"].as_str().unwrap_or_default().to_string();
            state.decks.entry(name).or_default();
            ok(json!(1_700_000_000_000_i64))
        }
        "deleteDecks" => {
            let names: Vec<String> = params["decks"]
                .as_array()
                .map(|a| {
                    a.iter()
                        .filter_map(|d| d.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default();
            for name in names {
                state.decks.remove(&name);
            }
            ok(Value::Null)
        }
        "addNote" => {
            let note = params["note"].clone();
            let deck = note["deckName"].as_str().unwrap_or_default().to_string();
            let front = note["fields"]["Front"].as_str().unwrap_or_default().to_string();

            if state.reject_fronts.contains(&front) {
                err("cannot create note because it is a duplicate")
            } else if !state.decks.contains_key(&deck) {
                err(format!("deck was not found: {deck}"))
            } else {
                state.next_id += 1;
                let id = state.next_id;
                state.decks.entry(deck).or_default().push(id);
                state.notes.push(note);
                ok(json!(id))
            }
        }
        "findCards" => {
            let query = params["query"].as_str().unwrap_or_default();
            let deck = query.trim_start_matches("deck:").trim_matches('"');
            let cards = state.decks.get(deck).cloned().unwrap_or_default();
            ok(json!(cards))
        }
        other => err(format!("unsupported action {other}")),
    };

    Json(reply).into_response()
}

/// Sample parsed entries.
pub fn sample_entries(count: usize) -> Vec<Entry> {
    (1..=count)
        .map(|i| {
            Entry::new(
                format!("word{i}"),
                format!("meaning of word{i}"),
                format!("An example using word{i}."),
            )
        })
        .collect()
}
