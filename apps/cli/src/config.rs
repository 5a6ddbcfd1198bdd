//! Runtime configuration read from the environment (and `.env`).

use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ANKI_HOST: &str = "http://localhost";
pub const DEFAULT_ANKI_PORT: u16 = 8765;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_RETRIES: u32 = 5;
pub const DEFAULT_TAG: &str = "GRE";
pub const DEFAULT_THROTTLE_MS: u64 = 50;
pub const MAX_THROTTLE_MS: u64 = 200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// AnkiConnect connection and tagging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub anki_host: String,
    pub anki_port: u16,
    pub request_timeout: Duration,
    pub max_attempts: u32,
    pub tag: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anki_host: DEFAULT_ANKI_HOST.to_string(),
            anki_port: DEFAULT_ANKI_PORT,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_attempts: DEFAULT_RETRIES,
            tag: DEFAULT_TAG.to_string(),
        }
    }
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Missing keys fall back to
    /// defaults; present but unparseable values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("ANKI_HOST") {
            config.anki_host = host;
        }
        if let Some(port) = lookup("ANKI_PORT") {
            config.anki_port = parse_value("ANKI_PORT", &port)?;
        }
        if let Some(secs) = lookup("ANKI_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(parse_value("ANKI_TIMEOUT_SECS", &secs)?);
        }
        if let Some(retries) = lookup("ANKI_RETRIES") {
            config.max_attempts = parse_value("ANKI_RETRIES", &retries)?;
        }
        config.tag = tag_from_lookup(&lookup);

        Ok(config)
    }

    /// AnkiConnect URL, `{host}:{port}`.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.anki_host.trim_end_matches('/'), self.anki_port)
    }
}

/// Note tag from `.env` and the environment. Reads nothing else, so commands
/// that never contact AnkiConnect are not affected by its settings.
pub fn tag_from_env() -> String {
    dotenvy::dotenv().ok();
    tag_from_lookup(|key| std::env::var(key).ok())
}

pub fn tag_from_lookup<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("VOCAB_DECK_TAG").unwrap_or_else(|| DEFAULT_TAG.to_string())
}

/// Delay between note insertions, clamped to `0..=MAX_THROTTLE_MS`.
pub fn throttle(ms: u64) -> Duration {
    Duration::from_millis(ms.min(MAX_THROTTLE_MS))
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}
