//! Human-readable per-asset report blocks.

use std::fmt;

use time::macros::format_description;
use time::OffsetDateTime;

use crate::market::{MarketIdentity, MarketReference, Outcome, Quote, Side};

/// Placeholder for values the APIs did not provide.
const MISSING: &str = "None";

/// Report for one configured asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReport {
    /// Asset and interval the block describes.
    pub reference: MarketReference,
    /// Event URL of the current interval.
    pub url: String,
    /// Resolved market with quotes, if the market was found.
    pub market: Option<MarketReport>,
}

/// Resolved market identity and the quotes for both outcome tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketReport {
    /// Market and token identifiers.
    pub identity: MarketIdentity,
    /// Quote for the UP token.
    pub up: Quote,
    /// Quote for the DOWN token.
    pub down: Quote,
}

impl MarketReport {
    /// Quote for a given outcome.
    pub fn quote(&self, outcome: Outcome) -> &Quote {
        match outcome {
            Outcome::Up => &self.up,
            Outcome::Down => &self.down,
        }
    }
}

/// Header line printed before the blocks.
pub fn header(now: OffsetDateTime) -> String {
    let clock = now
        .format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_else(|_| now.unix_timestamp().to_string());
    format!("--- Fetching Live Prices for Current Interval (UTC: {}) ---", clock)
}

fn or_missing(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING)
}

impl fmt::Display for AssetReport {
    /// Renders the block with a leading blank line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "Asset: {}", self.reference)?;
        writeln!(f, "URL: {}", self.url)?;

        let Some(market) = &self.market else {
            return writeln!(f, "Could not find market data.");
        };

        writeln!(
            f,
            "Market ID: {}",
            or_missing(market.identity.market_id.as_deref())
        )?;
        for outcome in [Outcome::Up, Outcome::Down] {
            let quote = market.quote(outcome);
            writeln!(
                f,
                "{} Token ID: {}",
                outcome,
                or_missing(market.identity.token_id(outcome))
            )?;
            writeln!(
                f,
                "  -> Best Buy: ${} | Best Sell: ${}",
                or_missing(quote.price(Side::Buy)),
                or_missing(quote.price(Side::Sell))
            )?;
        }
        Ok(())
    }
}
