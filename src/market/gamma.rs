//! Gamma API client resolving an event URL to its market and token IDs.

use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::slug::slug_from_url;
use super::types::{opaque_string, GammaEvent, MarketIdentity};
use crate::error::MarketError;

/// Gamma API base URL.
pub const GAMMA_API_URL: &str = "https://gamma-api.polymarket.com";

/// Polymarket Gamma (metadata) API client.
#[derive(Debug, Clone)]
pub struct GammaClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Base URL for the Gamma API.
    base_url: String,
}

impl GammaClient {
    /// Create a client over a shared HTTP client.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Get the Gamma base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve an event URL to its market identity.
    ///
    /// Every failure is logged and reported as `None`.
    #[instrument(skip(self))]
    pub async fn resolve(&self, url: &str) -> Option<MarketIdentity> {
        let Some(slug) = slug_from_url(url) else {
            warn!(error = %MarketError::MissingSlug(url.to_string()), "Cannot resolve market");
            return None;
        };

        let event = match self.fetch_event(&slug).await {
            Ok(event) => event,
            Err(e) => {
                warn!(slug = %slug, error = %e, "Error fetching market data");
                return None;
            }
        };

        let identity = identity_from_event(&event);
        if identity.is_none() {
            debug!(slug = %slug, markets = event.markets.len(), "Event has no usable market");
        }
        identity
    }

    /// Fetch the event for a slug from `GET /events/slug/{slug}`.
    #[instrument(skip(self))]
    pub async fn fetch_event(&self, slug: &str) -> Result<GammaEvent, MarketError> {
        let url = format!("{}/events/slug/{}", self.base_url, slug);

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(MarketError::FetchFailed {
                slug: slug.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        response
            .json()
            .await
            .map_err(|e| MarketError::ParseError(format!("Failed to parse event {}: {}", slug, e)))
    }
}

/// Identity of the first market in an event, if the event has any market.
pub fn identity_from_event(event: &GammaEvent) -> Option<MarketIdentity> {
    let market = event.markets.first()?;

    let market_id = market.id.as_ref().and_then(opaque_string);
    if market_id.is_none() {
        warn!(slug = ?event.slug, "First market has no usable id");
    }

    let mut token_ids = market
        .clob_token_ids
        .as_ref()
        .map(parse_token_ids)
        .unwrap_or_default()
        .into_iter();

    Some(MarketIdentity {
        market_id,
        up_token_id: token_ids.next().flatten(),
        down_token_id: token_ids.next().flatten(),
    })
}

/// Decode a `clobTokenIds` value.
///
/// Gamma sends a JSON-encoded string array; a plain array is accepted as
/// well. Anything else decodes to an empty list. Entries keep their position;
/// one that is not a string or number is `None`.
pub fn parse_token_ids(raw: &Value) -> Vec<Option<String>> {
    let items = match raw {
        Value::String(encoded) => match serde_json::from_str::<Value>(encoded) {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "clobTokenIds is not valid JSON");
                return Vec::new();
            }
        },
        other => other.clone(),
    };

    match items {
        Value::Array(ids) => ids.iter().map(opaque_string).collect(),
        _ => Vec::new(),
    }
}
