//! Unified error types for the market finder.

use thiserror::Error;

use crate::market::Side;

/// Unified error type for startup and configuration failures.
#[derive(Error, Debug)]
pub enum FinderError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Market-related error.
    #[error("market error: {0}")]
    Market(#[from] MarketError),

    /// HTTP client error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Market lookup errors from the Gamma API.
#[derive(Error, Debug)]
pub enum MarketError {
    /// The market URL carries no slug segment.
    #[error("no slug in market url {0}")]
    MissingSlug(String),

    /// Gamma answered with a non-success status.
    #[error("failed to fetch market {slug}: {reason}")]
    FetchFailed {
        /// The market slug that failed.
        slug: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to parse market data.
    #[error("failed to parse market data: {0}")]
    ParseError(String),

    /// An asset reference could not be parsed.
    #[error("invalid asset reference {input:?}: {reason}")]
    InvalidReference {
        /// The rejected input.
        input: String,
        /// Reason for rejection.
        reason: String,
    },

    /// HTTP request failed.
    #[error("http request failed: {0}")]
    HttpError(#[from] reqwest::Error),
}

/// Price lookup errors from the CLOB API.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// The CLOB answered with something other than 200.
    #[error("{side} price request returned HTTP {status}")]
    UnexpectedStatus {
        /// Requested side.
        side: Side,
        /// Status code returned.
        status: u16,
    },

    /// The response body was not the expected JSON.
    #[error("failed to parse {side} price: {reason}")]
    ParseError {
        /// Requested side.
        side: Side,
        /// Decoder message.
        reason: String,
    },

    /// HTTP request failed.
    #[error("http request failed: {0}")]
    HttpError(#[from] reqwest::Error),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, FinderError>;
