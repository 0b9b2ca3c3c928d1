//! # Configuration
//!
//! Tally reads an optional TOML file (default `tally.toml`) and then applies
//! `TALLY_*` environment overrides on top of it.
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! rate_limit = 100
//! cors_origins = ["http://localhost:3000"]
//! api_key = "secret"
//!
//! [log]
//! format = "json"
//! filter = "tally=debug"
//! ```
//!
//! ## Environment Overrides
//!
//! - `TALLY_LOG_FORMAT`: `text` or `json`
//! - `TALLY_API_KEY`: bearer key; empty disables authentication
//! - `TALLY_RATE_LIMIT`: requests per second, 0 disables
//! - `TALLY_CORS_ORIGINS`: comma-separated origins, or `*` for all

use serde::{Deserialize, Serialize};
use std::path::Path;
use tally_core::TallyError;

/// Default log filter when neither the file nor `RUST_LOG` sets one.
pub const DEFAULT_LOG_FILTER: &str = "tally=info,tower_http=debug";

// =============================================================================
// CONFIG SECTIONS
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TallyConfig {
    pub server: ServerConfig,
    pub log: LogConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests per second across all clients. 0 disables rate limiting.
    pub rate_limit: u32,
    /// Allowed CORS origins. `None` means localhost only, `["*"]` means any.
    pub cors_origins: Option<Vec<String>>,
    /// Bearer key required on every endpoint except `/health`.
    pub api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            rate_limit: 100,
            cors_origins: None,
            api_key: None,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The API key, if one is configured and non-empty.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(TallyError::Config(format!(
                "unknown log format '{}', expected 'text' or 'json'",
                other
            ))),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub format: LogFormat,
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

impl TallyConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, TallyError> {
        toml::from_str(text).map_err(|e| TallyError::Config(e.to_string()))
    }

    /// Load the file at `path` (defaults if it does not exist) and apply
    /// environment overrides.
    pub fn load(path: &Path) -> Result<Self, TallyError> {
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(path).map_err(|e| {
                TallyError::Io(format!("Cannot read config '{}': {}", path.display(), e))
            })?;
            Self::from_toml(&text)?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `TALLY_*` overrides using `lookup` to read variables.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), TallyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(format) = lookup("TALLY_LOG_FORMAT") {
            self.log.format = format.parse()?;
        }
        if let Some(key) = lookup("TALLY_API_KEY") {
            self.server.api_key = Some(key).filter(|k| !k.is_empty());
        }
        if let Some(limit) = lookup("TALLY_RATE_LIMIT") {
            self.server.rate_limit = limit.trim().parse().map_err(|_| {
                TallyError::Config(format!("TALLY_RATE_LIMIT must be a number, got '{}'", limit))
            })?;
        }
        if let Some(origins) = lookup("TALLY_CORS_ORIGINS") {
            self.server.cors_origins = Some(
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            );
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
