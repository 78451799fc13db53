//! Pipeline layer for the kabutan snapshot scraper: paced batch dispatch,
//! the identity and financial passes over kabutan pages, dated CSV
//! inventories, and environment configuration.
//!
//! Builds on the `kabutan_api` crate, which owns the page client and the
//! HTML extractors.

pub mod batch;
pub mod config;
pub mod error;
pub mod inventory;
pub mod scraper;

pub use kabutan_api;
pub use kabutan_api::types;

pub use config::Config;
pub use error::ScraperError;
pub use scraper::{range_codes, Mode, Scraper, DEFAULT_INTERVAL, RANGE_LEN, RANGE_START};
