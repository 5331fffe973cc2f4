//! Application configuration loaded from environment variables.

use std::time::Duration;

use serde::Deserialize;

use crate::error::FinderError;
use crate::market::{MarketReference, CLOB_API_URL, GAMMA_API_URL, POLYMARKET_EVENT_URL};

/// Asset/interval pairs reported when nothing else is configured.
pub const DEFAULT_ASSETS: [(&str, u32); 3] = [("btc", 5), ("btc", 15), ("eth", 15)];

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Endpoints ===
    /// Gamma (metadata) API base URL.
    #[serde(default = "default_gamma_url")]
    pub gamma_api_url: String,

    /// CLOB (price) API base URL.
    #[serde(default = "default_clob_url")]
    pub clob_api_url: String,

    /// Event page base URL used to build market URLs.
    #[serde(default = "default_event_url")]
    pub polymarket_event_url: String,

    // === HTTP ===
    /// Per-request timeout in milliseconds. Unset means no timeout.
    #[serde(default)]
    pub http_timeout_ms: Option<u64>,

    // === Markets ===
    /// Comma-separated `asset:minutes` list, e.g. `btc:5,eth:15`.
    #[serde(default)]
    pub market_assets: Option<String>,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_gamma_url() -> String {
    GAMMA_API_URL.to_string()
}

fn default_clob_url() -> String {
    CLOB_API_URL.to_string()
}

fn default_event_url() -> String {
    POLYMARKET_EVENT_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gamma_api_url: default_gamma_url(),
            clob_api_url: default_clob_url(),
            polymarket_event_url: default_event_url(),
            http_timeout_ms: None,
            market_assets: None,
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), FinderError> {
        for (name, value) in [
            ("GAMMA_API_URL", &self.gamma_api_url),
            ("CLOB_API_URL", &self.clob_api_url),
            ("POLYMARKET_EVENT_URL", &self.polymarket_event_url),
        ] {
            if value.trim().is_empty() {
                return Err(FinderError::InvalidConfig(format!("{} must not be empty", name)));
            }
        }

        if self.http_timeout_ms == Some(0) {
            return Err(FinderError::InvalidConfig(
                "HTTP_TIMEOUT_MS must be greater than 0".to_string(),
            ));
        }

        self.assets()?;

        Ok(())
    }

    /// Configured asset list, falling back to [`DEFAULT_ASSETS`].
    pub fn assets(&self) -> Result<Vec<MarketReference>, FinderError> {
        match self.market_assets.as_deref().map(str::trim) {
            Some(list) if !list.is_empty() => list
                .split(',')
                .filter(|item| !item.trim().is_empty())
                .map(|item| item.parse::<MarketReference>().map_err(FinderError::from))
                .collect(),
            _ => Ok(default_assets()),
        }
    }

    /// Log filter directives; `verbose` turns on debug output for this crate.
    pub fn log_directives(&self, verbose: bool) -> &str {
        if verbose {
            "updown_quotes=debug,info"
        } else {
            &self.rust_log
        }
    }

    /// Optional per-request timeout.
    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_ms.map(Duration::from_millis)
    }

    /// Build the shared HTTP client.
    pub fn http_client(&self) -> Result<reqwest::Client, FinderError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.http_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

/// The built-in asset list.
pub fn default_assets() -> Vec<MarketReference> {
    DEFAULT_ASSETS
        .iter()
        .map(|(asset, minutes)| MarketReference::new(*asset, *minutes))
        .collect()
}
