//! CLOB price client for best buy/sell quotes.

use reqwest::StatusCode;
use tracing::{debug, instrument, warn};

use super::types::{opaque_string, PriceResponse, Quote, Side};
use crate::error::QuoteError;

/// CLOB API base URL.
pub const CLOB_API_URL: &str = "https://clob.polymarket.com";

/// Polymarket CLOB API client, read-only price endpoint.
#[derive(Debug, Clone)]
pub struct ClobClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Base URL for the CLOB API.
    base_url: String,
}

impl ClobClient {
    /// Create a client over a shared HTTP client.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Get the CLOB base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Best buy and sell price for a token.
    ///
    /// With no token, or an empty one, no request is made. Each side is
    /// fetched on its own; a failed side is logged and left empty.
    #[instrument(skip(self))]
    pub async fn quote(&self, token_id: Option<&str>) -> Quote {
        let Some(token_id) = token_id.filter(|id| !id.is_empty()) else {
            return Quote::default();
        };

        Quote {
            buy_price: self.price_or_none(token_id, Side::Buy).await,
            sell_price: self.price_or_none(token_id, Side::Sell).await,
        }
    }

    async fn price_or_none(&self, token_id: &str, side: Side) -> Option<String> {
        match self.best_price(token_id, side).await {
            Ok(price) => price,
            Err(QuoteError::UnexpectedStatus { side, status }) => {
                warn!(%side, status, "Price unavailable");
                None
            }
            Err(e) => {
                warn!(%side, error = %e, "Error fetching price");
                None
            }
        }
    }

    /// Get the best price on one side from `GET /price`.
    ///
    /// Any status other than 200 is an error; a 200 body without `price`
    /// yields `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn best_price(&self, token_id: &str, side: Side) -> Result<Option<String>, QuoteError> {
        let url = format!("{}/price", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("token_id", token_id), ("side", side.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(QuoteError::UnexpectedStatus {
                side,
                status: status.as_u16(),
            });
        }

        let body: PriceResponse = response.json().await.map_err(|e| QuoteError::ParseError {
            side,
            reason: e.to_string(),
        })?;

        let price = body.price.as_ref().and_then(opaque_string);
        debug!(price = ?price, "Retrieved price");

        Ok(price)
    }
}
