//! Market module for up/down prediction markets.
//!
//! This module handles:
//! - Market types and data structures
//! - Market URL construction for the current interval
//! - Gamma API market resolution
//! - CLOB API price quotes

pub mod clob;
pub mod gamma;
pub mod slug;
pub mod types;

pub use clob::{ClobClient, CLOB_API_URL};
pub use gamma::{GammaClient, GAMMA_API_URL};
pub use slug::{market_url, slug_from_url, POLYMARKET_EVENT_URL};
pub use types::{MarketIdentity, MarketReference, Outcome, Quote, Side};
