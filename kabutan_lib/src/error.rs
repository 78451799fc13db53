//! Error types for the pipeline layer.

use std::path::PathBuf;

/// Errors that abort a whole snapshot run.
///
/// Per-security problems never show up here: unavailable pages and
/// unrecognized markup drop that security from the run instead. What
/// remains fatal is transport failure, bad configuration, and anything
/// wrong with the inventory files this tool itself maintains.
#[derive(thiserror::Error, Debug)]
pub enum ScraperError {
    /// Transport failure from the page client.
    #[error(transparent)]
    Fetch(#[from] kabutan_api::FetchError),

    /// Required configuration is missing or unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// No inventory file to resume from.
    #[error("no inventory file found in {}", .0.display())]
    EmptyInventory(PathBuf),

    /// Reading or writing snapshot files failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding or decoding a snapshot CSV failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A scrape task panicked or was aborted.
    #[error("scrape task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
