//! Market URL construction for the current interval of an up/down market.

use time::OffsetDateTime;
use url::Url;

use super::types::MarketReference;

/// Polymarket event base URL.
pub const POLYMARKET_EVENT_URL: &str = "https://polymarket.com/event";

/// Floor a Unix timestamp to the start of its `duration_minutes` interval.
pub fn interval_start(timestamp: i64, duration_minutes: u32) -> i64 {
    let interval = i64::from(duration_minutes.max(1)) * 60;
    timestamp.div_euclid(interval) * interval
}

/// Slug of the market covering `timestamp`, e.g. `btc-updown-15m-1765301400`.
pub fn market_slug(reference: &MarketReference, timestamp: i64) -> String {
    format!(
        "{}-updown-{}m-{}",
        reference.asset,
        reference.duration_minutes,
        interval_start(timestamp, reference.duration_minutes)
    )
}

/// Event URL of the market covering `instant`.
pub fn market_url(event_base: &str, reference: &MarketReference, instant: OffsetDateTime) -> String {
    format!(
        "{}/{}",
        event_base.trim_end_matches('/'),
        market_slug(reference, instant.unix_timestamp())
    )
}

/// Trailing path segment of an event URL.
pub fn slug_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .path_segments()?
        .rev()
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}
