use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Default Google Natural Language v2 sentiment endpoint.
pub const DEFAULT_REMOTE_ENDPOINT: &str =
    "https://language.googleapis.com/v2/documents:analyzeSentiment";

/// Default per-call remote timeout, also used when the configured value is 0.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

// ── Journal ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// Working language of the journal.  Sent to the remote analyzer as the
    /// document language; the local word lists are Japanese regardless.
    pub language: String,
    /// Number of most-recent entries the trend advisor's caller assembles
    /// into a score series.
    pub history_window: usize,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            language: "ja".to_string(),
            history_window: 30,
        }
    }
}

// ── Remote analyzer ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Master switch.  When `false` every entry is scored locally.
    pub enabled: bool,
    pub endpoint: String,
    /// API key for the sentiment endpoint.  Can also be set via the
    /// `GOOGLE_API_KEY` env var (env takes precedence).
    pub api_key: String,
    /// Upper bound on a single remote call, after which the entry is scored
    /// locally.  There are no retries.
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_REMOTE_ENDPOINT.to_string(),
            api_key: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RemoteConfig {
    /// `true` when a remote call can even be attempted: the switch is on and
    /// both an endpoint and a credential are present.
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.endpoint.trim().is_empty() && !self.api_key.trim().is_empty()
    }

    /// Per-call timeout.  `0` means the 5 second default.
    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub journal: JournalConfig,
    pub remote: RemoteConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::default();
        if let Ok(raw) = fs::read_to_string(path) {
            config = toml::from_str(&raw)?;
        }

        config.apply_env_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    /// Apply environment overrides on top of file values.  Blank values are
    /// ignored so an empty `GOOGLE_API_KEY=` does not wipe a configured key.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_blank("GOOGLE_API_KEY") {
            self.remote.api_key = key;
        }
        if let Some(endpoint) = non_blank("MOODJOURNAL_REMOTE_ENDPOINT") {
            self.remote.endpoint = endpoint;
        }
        if let Some(language) = non_blank("MOODJOURNAL_LANGUAGE") {
            self.journal.language = language;
        }
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let rendered = toml::to_string_pretty(self)?;
        fs::write(path, rendered)?;
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
