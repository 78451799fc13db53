mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kabutan")]
#[command(about = "Collect stock identities and financial snapshots from kabutan.jp")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape kabutan and write a dated CSV snapshot
    Snapshot(commands::snapshot::SnapshotArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kabutan_lib=info".parse().unwrap())
                .add_directive("kabutan_api=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Snapshot(args) => commands::snapshot::run(args).await?,
    }

    Ok(())
}
