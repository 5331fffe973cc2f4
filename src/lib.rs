//! Live Polymarket up/down market finder.
//!
//! Up/down markets open on a fixed grid: the `btc` 15-minute market covering
//! 12:07 UTC started at 12:00 and its slug is `btc-updown-15m-<start>`. This
//! library computes that slug for the current instant, resolves it on the
//! Gamma API, and asks the CLOB for the best buy and sell price of both
//! outcome tokens.
//!
//! ```text
//! btc:15 ──▶ btc-updown-15m-1765301400 ──▶ Gamma /events/slug ──▶ market id
//!                                                               ├─▶ UP token   ──▶ CLOB /price BUY|SELL
//!                                                               └─▶ DOWN token ──▶ CLOB /price BUY|SELL
//! ```
//!
//! Lookups never fail the run: a missing market or price is logged and shown
//! as `None`.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`market`]: URL construction plus Gamma and CLOB clients
//! - [`finder`]: Per-asset lookup driver
//! - [`report`]: Report rendering

pub mod config;
pub mod error;
pub mod finder;
pub mod market;
pub mod report;

pub use config::Config;
pub use error::{FinderError, Result};
pub use finder::MarketFinder;
