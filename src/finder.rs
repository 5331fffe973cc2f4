//! Sequential lookup of each configured asset's live market and quotes.

use std::io::Write;

use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::config::Config;
use crate::error::Result;
use crate::market::{market_url, ClobClient, GammaClient, MarketReference, Outcome};
use crate::report::{self, AssetReport, MarketReport};

/// Resolves markets on Gamma and prices their tokens on the CLOB.
#[derive(Debug, Clone)]
pub struct MarketFinder {
    gamma: GammaClient,
    clob: ClobClient,
    event_url: String,
}

impl MarketFinder {
    /// Create a finder from explicit clients.
    pub fn new(gamma: GammaClient, clob: ClobClient, event_url: impl Into<String>) -> Self {
        Self {
            gamma,
            clob,
            event_url: event_url.into(),
        }
    }

    /// Create a finder sharing one HTTP client across both APIs.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = config.http_client()?;
        Ok(Self::new(
            GammaClient::new(http.clone(), config.gamma_api_url.clone()),
            ClobClient::new(http, config.clob_api_url.clone()),
            config.polymarket_event_url.clone(),
        ))
    }

    /// Event URL of `reference`'s market at `now`.
    pub fn url_for(&self, reference: &MarketReference, now: OffsetDateTime) -> String {
        market_url(&self.event_url, reference, now)
    }

    /// Build the report for one asset: URL, identity, then UP and DOWN quotes.
    #[instrument(skip(self), fields(asset = %reference))]
    pub async fn report(&self, reference: &MarketReference, now: OffsetDateTime) -> AssetReport {
        let url = self.url_for(reference, now);

        let market = match self.gamma.resolve(&url).await {
            Some(identity) => {
                let up = self.clob.quote(identity.token_id(Outcome::Up)).await;
                let down = self.clob.quote(identity.token_id(Outcome::Down)).await;
                Some(MarketReport { identity, up, down })
            }
            None => {
                info!(url = %url, "Could not find market data");
                None
            }
        };

        AssetReport {
            reference: reference.clone(),
            url,
            market,
        }
    }

    /// Report every asset in order, one at a time.
    pub async fn report_all(
        &self,
        references: &[MarketReference],
        now: OffsetDateTime,
    ) -> Vec<AssetReport> {
        let mut reports = Vec::with_capacity(references.len());
        for reference in references {
            reports.push(self.report(reference, now).await);
        }
        reports
    }

    /// Write the header and one block per asset to `out` as each completes.
    pub async fn run<W: Write>(
        &self,
        references: &[MarketReference],
        now: OffsetDateTime,
        out: &mut W,
    ) -> Result<()> {
        writeln!(out, "{}", report::header(now))?;
        for reference in references {
            let block = self.report(reference, now).await;
            write!(out, "{}", block)?;
            out.flush()?;
        }
        Ok(())
    }
}
