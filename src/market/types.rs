//! Market-related types for up/down prediction markets.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;
use strum::{Display, IntoStaticStr};

use crate::error::MarketError;

/// Market outcome for binary up/down markets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Outcome {
    /// Price finishes up (first CLOB token).
    Up,
    /// Price finishes down (second CLOB token).
    Down,
}

/// Order book side selector for the CLOB price endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Side {
    /// Best price to buy the token at.
    Buy,
    /// Best price to sell the token at.
    Sell,
}

impl Side {
    /// Wire value for the `side` query parameter.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// An asset and interval length naming one family of up/down markets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarketReference {
    /// Lowercase asset symbol as used in slugs (e.g., "btc").
    pub asset: String,
    /// Interval length in minutes.
    pub duration_minutes: u32,
}

impl MarketReference {
    /// Create a reference, lowercasing the asset symbol.
    pub fn new(asset: impl Into<String>, duration_minutes: u32) -> Self {
        Self {
            asset: asset.into().to_lowercase(),
            duration_minutes,
        }
    }
}

impl fmt::Display for MarketReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}m", self.asset.to_uppercase(), self.duration_minutes)
    }
}

impl FromStr for MarketReference {
    type Err = MarketError;

    /// Parse `"<asset>:<minutes>"`, e.g. `btc:15`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| MarketError::InvalidReference {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (asset, minutes) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| invalid("expected <asset>:<minutes>"))?;

        let asset = asset.trim();
        if asset.is_empty() {
            return Err(invalid("asset is empty"));
        }

        let minutes: u32 = minutes
            .trim()
            .parse()
            .map_err(|_| invalid("minutes must be a positive integer"))?;
        if minutes == 0 {
            return Err(invalid("minutes must be a positive integer"));
        }

        Ok(Self::new(asset, minutes))
    }
}

/// Identifiers resolved for the live market of a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketIdentity {
    /// Gamma market identifier, if the market carries one.
    pub market_id: Option<String>,
    /// UP token ID for CLOB, if the market lists one.
    pub up_token_id: Option<String>,
    /// DOWN token ID for CLOB, if the market lists one.
    pub down_token_id: Option<String>,
}

impl MarketIdentity {
    /// Get the token ID for a given outcome.
    pub fn token_id(&self, outcome: Outcome) -> Option<&str> {
        match outcome {
            Outcome::Up => self.up_token_id.as_deref(),
            Outcome::Down => self.down_token_id.as_deref(),
        }
    }
}

/// Best buy and sell prices for one token. `None` means unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Quote {
    /// Best price to buy at.
    pub buy_price: Option<String>,
    /// Best price to sell at.
    pub sell_price: Option<String>,
}

impl Quote {
    /// Price for the given side.
    pub fn price(&self, side: Side) -> Option<&str> {
        match side {
            Side::Buy => self.buy_price.as_deref(),
            Side::Sell => self.sell_price.as_deref(),
        }
    }
}

/// Event payload from `GET /events/slug/{slug}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GammaEvent {
    /// Event slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// Markets grouped under the event.
    #[serde(default)]
    pub markets: Vec<GammaMarket>,
}

/// Market entry inside a Gamma event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GammaMarket {
    /// Market ID, usually a string but kept loose.
    #[serde(default)]
    pub id: Option<Value>,
    /// CLOB token IDs, a JSON-encoded string array like `"[\"1\", \"2\"]"`.
    #[serde(rename = "clobTokenIds", default)]
    pub clob_token_ids: Option<Value>,
}

/// Price payload from `GET /price`.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceResponse {
    /// Price as a decimal string.
    #[serde(default)]
    pub price: Option<Value>,
}

/// Render an opaque JSON scalar as a string without touching its digits.
pub(crate) fn opaque_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
