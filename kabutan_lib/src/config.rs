//! Environment configuration for snapshot runs.

use std::env;
use std::path::PathBuf;

use crate::error::ScraperError;

/// Where inventories are read from and snapshots written to.
pub const CSV_DIRECTORY: &str = "CSV_DIRECTORY";

/// Optional base-URL override for the page client. Points test runs at a
/// local server instead of the production site.
pub const KABUTAN_BASE_URL: &str = "KABUTAN_BASE_URL";

/// Resolved run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Snapshot directory.
    pub csv_directory: PathBuf,

    /// Base URL for the page client, if overridden.
    pub base_url: Option<String>,
}

impl Config {
    /// Reads configuration from the process environment. The snapshot
    /// directory is required; a run has nowhere to put its output
    /// without it.
    pub fn from_env() -> Result<Self, ScraperError> {
        Self::resolve(None)
    }

    /// Like [`Config::from_env`], but a command-line directory override
    /// takes precedence over the environment.
    pub fn resolve(dir_override: Option<PathBuf>) -> Result<Self, ScraperError> {
        let csv_directory = match dir_override {
            Some(dir) => dir,
            None => env::var(CSV_DIRECTORY)
                .ok()
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .ok_or_else(|| {
                    ScraperError::Config(format!("{} is not set", CSV_DIRECTORY))
                })?,
        };

        Ok(Self {
            csv_directory,
            base_url: env::var(KABUTAN_BASE_URL)
                .ok()
                .filter(|value| !value.is_empty()),
        })
    }
}
