//! The `snapshot` subcommand: scrape kabutan into a dated CSV.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use kabutan_lib::kabutan_api::Client;
use kabutan_lib::{inventory, Config, Mode, Scraper, DEFAULT_INTERVAL, RANGE_LEN, RANGE_START};

/// Arguments for the `snapshot` subcommand.
#[derive(Args)]
pub struct SnapshotArgs {
    /// Full refresh: rediscover identities across the whole code range
    /// instead of resuming from the latest inventory
    #[arg(long)]
    pub update: bool,

    /// Delay between request dispatches in milliseconds
    #[arg(long, default_value_t = DEFAULT_INTERVAL.as_millis() as u64)]
    pub interval_ms: u64,

    /// First securities code of the full-refresh range
    #[arg(long, default_value_t = RANGE_START)]
    pub start: u32,

    /// Number of consecutive codes the full refresh covers
    #[arg(long, default_value_t = RANGE_LEN)]
    pub count: u32,

    /// Snapshot directory (overrides CSV_DIRECTORY)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

pub async fn run(args: &SnapshotArgs) -> Result<()> {
    let config = Config::resolve(args.dir.clone())?;

    let client = match config.base_url.as_deref() {
        Some(url) => Client::with_base_url(url)?,
        None => Client::new()?,
    };
    let scraper = Scraper::new(client).with_interval(Duration::from_millis(args.interval_ms));

    let mode = if args.update {
        Mode::Update {
            start: args.start,
            len: args.count,
        }
    } else {
        Mode::Resume
    };

    match mode {
        Mode::Update { start, len } => {
            eprintln!("Starting full refresh ({} codes from {})", len, start);
        }
        Mode::Resume => {
            eprintln!(
                "Resuming from the latest inventory in {}",
                config.csv_directory.display()
            );
        }
    }

    let stocks = scraper.collect(&mode, &config.csv_directory).await?;

    match inventory::write_snapshot(&config.csv_directory, &stocks)? {
        Some(path) => eprintln!("Wrote {} stocks to {}", stocks.len(), path.display()),
        None => eprintln!("No stocks collected; nothing written"),
    }

    Ok(())
}
