//! The identity and financial passes over kabutan stock pages.

use std::path::Path;
use std::time::Duration;

use kabutan_api::parse::{parse_stock_financial, parse_stock_info};
use kabutan_api::types::{Stock, StockInfo};
use kabutan_api::Client;

use crate::batch::run_paced;
use crate::error::ScraperError;
use crate::inventory;

/// Default spacing between request dispatches.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(300);

/// First securities code of a full refresh.
pub const RANGE_START: u32 = 1300;

/// Number of consecutive codes a full refresh covers.
pub const RANGE_LEN: u32 = 8700;

/// Where a run gets its identities from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Rediscover identities by probing a whole code range.
    Update {
        /// First code of the range.
        start: u32,
        /// Number of consecutive codes.
        len: u32,
    },

    /// Reuse the identities recorded by the most recent snapshot.
    Resume,
}

/// Drives the two scrape passes against kabutan.
pub struct Scraper {
    client: Client,
    interval: Duration,
}

impl Scraper {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            interval: DEFAULT_INTERVAL,
        }
    }

    /// Replaces the dispatch interval. Tests shorten it.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// One whole collection run: identities from the mode's source, then
    /// the financial pass over every resolved identity.
    pub async fn collect(&self, mode: &Mode, dir: &Path) -> Result<Vec<Stock>, ScraperError> {
        let infos = match mode {
            Mode::Update { start, len } => self.stock_infos(range_codes(*start, *len)).await?,
            Mode::Resume => inventory::read_latest(dir)?,
        };
        self.stock_financials(infos).await
    }

    /// Identity pass: resolves code, name and market for each candidate
    /// code. Codes whose page is unavailable or not a covered stock are
    /// dropped.
    pub async fn stock_infos(&self, codes: Vec<String>) -> Result<Vec<StockInfo>, ScraperError> {
        tracing::info!("Dispatching {} identity requests", codes.len());
        let infos = run_paced(codes, self.interval, |code| {
            let client = self.client.clone();
            async move {
                let Some(html) = client.stock_page(&code).await? else {
                    return Ok(None);
                };
                Ok(parse_stock_info(&html))
            }
        })
        .await?;
        tracing::info!("Resolved {} identities", infos.len());
        Ok(infos)
    }

    /// Financial pass: attaches a snapshot to every identity. Identities
    /// whose results page is unavailable or incomplete are dropped.
    pub async fn stock_financials(
        &self,
        infos: Vec<StockInfo>,
    ) -> Result<Vec<Stock>, ScraperError> {
        tracing::info!("Dispatching {} financial requests", infos.len());
        let stocks = run_paced(infos, self.interval, |info| {
            let client = self.client.clone();
            async move {
                let Some(html) = client.finance_page(&info.code).await? else {
                    return Ok(None);
                };
                Ok(parse_stock_financial(&html).map(|financial| Stock { info, financial }))
            }
        })
        .await?;
        tracing::info!("Collected {} complete stocks", stocks.len());
        Ok(stocks)
    }
}

/// Candidate codes for a full refresh: `len` consecutive codes starting
/// at `start`, zero-padded to the four digits kabutan expects.
pub fn range_codes(start: u32, len: u32) -> Vec<String> {
    (start..start + len).map(|code| format!("{:04}", code)).collect()
}
