//! Dated CSV snapshots of collected stocks.
//!
//! Every run writes one file named `YYYY-MM-DD-<unix millis>.csv`, a
//! scheme that makes lexicographic filename order chronological. The next
//! incremental run resumes by reading the identity columns back out of
//! the newest file, so the column names are part of the file format.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use kabutan_api::types::{Market, Stock, StockInfo};

use crate::error::ScraperError;

/// One output row: the identity plus all fifteen normalized deltas.
#[derive(Serialize)]
struct SnapshotRow {
    #[serde(rename = "info.code")]
    code: String,
    #[serde(rename = "info.name")]
    name: String,
    #[serde(rename = "info.market")]
    market: Market,
    #[serde(rename = "financial.YoYForecastNetSales")]
    yoy_forecast_net_sales: String,
    #[serde(rename = "financial.YoYForecastOperatingProfit")]
    yoy_forecast_operating_profit: String,
    #[serde(rename = "financial.YoYForecastOrdinaryProfit")]
    yoy_forecast_ordinary_profit: String,
    #[serde(rename = "financial.YoYForecastProfit")]
    yoy_forecast_profit: String,
    #[serde(rename = "financial.YoYForecastEarningsPerShare")]
    yoy_forecast_earnings_per_share: String,
    #[serde(rename = "financial.YoYNetSales")]
    yoy_net_sales: String,
    #[serde(rename = "financial.YoYOperatingProfit")]
    yoy_operating_profit: String,
    #[serde(rename = "financial.YoYOrdinaryProfit")]
    yoy_ordinary_profit: String,
    #[serde(rename = "financial.YoYProfit")]
    yoy_profit: String,
    #[serde(rename = "financial.YoYEarningsPerShare")]
    yoy_earnings_per_share: String,
    #[serde(rename = "financial.QoQNetSales")]
    qoq_net_sales: String,
    #[serde(rename = "financial.QoQOperatingProfit")]
    qoq_operating_profit: String,
    #[serde(rename = "financial.QoQOrdinaryProfit")]
    qoq_ordinary_profit: String,
    #[serde(rename = "financial.QoQProfit")]
    qoq_profit: String,
    #[serde(rename = "financial.QoQEarningsPerShare")]
    qoq_earnings_per_share: String,
}

/// The columns an incremental run reads back. Financial columns are
/// ignored on the way in; they are refetched every run.
#[derive(Deserialize)]
struct InventoryRow {
    #[serde(rename = "info.code")]
    code: String,
    #[serde(rename = "info.name")]
    name: String,
    #[serde(rename = "info.market")]
    market: Market,
}

// -- Reading --

/// Reads the identities recorded by the most recent snapshot in `dir`.
///
/// A row with an unrecognized market label fails the run: these files are
/// this tool's own output, so a bad label means corruption rather than
/// remote drift.
pub fn read_latest(dir: &Path) -> Result<Vec<StockInfo>, ScraperError> {
    let path = latest_file(dir)?;
    tracing::info!("Reading inventory {}", path.display());

    let mut reader = csv::Reader::from_path(&path)?;
    let mut infos = Vec::new();
    for row in reader.deserialize() {
        let row: InventoryRow = row?;
        infos.push(StockInfo {
            code: row.code,
            name: row.name,
            market: row.market,
        });
    }

    tracing::info!("Loaded {} identities from inventory", infos.len());
    Ok(infos)
}

/// The lexicographically last filename in `dir`, which the dated naming
/// scheme makes the newest snapshot.
fn latest_file(dir: &Path) -> Result<PathBuf, ScraperError> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    match names.pop() {
        Some(name) => Ok(dir.join(name)),
        None => Err(ScraperError::EmptyInventory(dir.to_path_buf())),
    }
}

// -- Writing --

/// Writes this run's snapshot into `dir`, creating the directory if
/// needed. Nothing is written when no stock survived the run.
pub fn write_snapshot(dir: &Path, stocks: &[Stock]) -> Result<Option<PathBuf>, ScraperError> {
    fs::create_dir_all(dir)?;

    if stocks.is_empty() {
        tracing::warn!("No stocks survived the run; snapshot not written");
        return Ok(None);
    }

    let path = dir.join(snapshot_filename(Local::now()));
    let mut writer = csv::Writer::from_path(&path)?;
    for row in snapshot_rows(stocks) {
        writer.serialize(row)?;
    }
    writer.flush()?;

    tracing::info!("Wrote {} stocks to {}", stocks.len(), path.display());
    Ok(Some(path))
}

fn snapshot_rows(stocks: &[Stock]) -> Vec<SnapshotRow> {
    stocks
        .iter()
        .map(|stock| SnapshotRow {
            code: stock.info.code.clone(),
            name: stock.info.name.clone(),
            market: stock.info.market,
            yoy_forecast_net_sales: stock.financial.yoy_forecast.net_sales.clone(),
            yoy_forecast_operating_profit: stock.financial.yoy_forecast.operating_profit.clone(),
            yoy_forecast_ordinary_profit: stock.financial.yoy_forecast.ordinary_profit.clone(),
            yoy_forecast_profit: stock.financial.yoy_forecast.profit.clone(),
            yoy_forecast_earnings_per_share: stock
                .financial
                .yoy_forecast
                .earnings_per_share
                .clone(),
            yoy_net_sales: stock.financial.yoy.net_sales.clone(),
            yoy_operating_profit: stock.financial.yoy.operating_profit.clone(),
            yoy_ordinary_profit: stock.financial.yoy.ordinary_profit.clone(),
            yoy_profit: stock.financial.yoy.profit.clone(),
            yoy_earnings_per_share: stock.financial.yoy.earnings_per_share.clone(),
            qoq_net_sales: stock.financial.qoq.net_sales.clone(),
            qoq_operating_profit: stock.financial.qoq.operating_profit.clone(),
            qoq_ordinary_profit: stock.financial.qoq.ordinary_profit.clone(),
            qoq_profit: stock.financial.qoq.profit.clone(),
            qoq_earnings_per_share: stock.financial.qoq.earnings_per_share.clone(),
        })
        .collect()
}

/// `YYYY-MM-DD-<unix millis>.csv` for the moment the run finished.
fn snapshot_filename(now: DateTime<Local>) -> String {
    format!("{}-{}.csv", now.format("%Y-%m-%d"), now.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use kabutan_api::types::{Performance, StockFinancial};

    fn sample_stock(code: &str, name: &str) -> Stock {
        Stock {
            info: StockInfo {
                code: code.to_string(),
                name: name.to_string(),
                market: Market::Prime,
            },
            financial: StockFinancial {
                yoy_forecast: Performance {
                    net_sales: "0.125".to_string(),
                    operating_profit: "-0.034".to_string(),
                    ordinary_profit: "0.048".to_string(),
                    profit: "0.010".to_string(),
                    earnings_per_share: "0.022".to_string(),
                },
                yoy: Performance {
                    net_sales: "0.128".to_string(),
                    operating_profit: "0.001".to_string(),
                    ordinary_profit: "0.075".to_string(),
                    profit: "0.036".to_string(),
                    earnings_per_share: "0.033".to_string(),
                },
                qoq: Performance {
                    net_sales: "0.029".to_string(),
                    operating_profit: "0.730".to_string(),
                    ordinary_profit: "0.555".to_string(),
                    profit: "".to_string(),
                    earnings_per_share: "赤転".to_string(),
                },
            },
        }
    }

    #[test]
    fn write_then_read_round_trips_the_identities() {
        let dir = tempfile::tempdir().unwrap();
        let stocks = vec![
            sample_stock("6758", "ソニーグループ"),
            sample_stock("4063", "信越化学工業"),
        ];

        let path = write_snapshot(dir.path(), &stocks).unwrap().unwrap();
        assert!(path.exists());

        let infos = read_latest(dir.path()).unwrap();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].code, "6758");
        assert_eq!(infos[0].name, "ソニーグループ");
        assert_eq!(infos[0].market, Market::Prime);
        assert_eq!(infos[1].code, "4063");
    }

    #[test]
    fn snapshot_header_names_every_column_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(dir.path(), &[sample_stock("6758", "ソニーグループ")])
            .unwrap()
            .unwrap();

        let content = fs::read_to_string(path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(
            header,
            "info.code,info.name,info.market,\
             financial.YoYForecastNetSales,financial.YoYForecastOperatingProfit,\
             financial.YoYForecastOrdinaryProfit,financial.YoYForecastProfit,\
             financial.YoYForecastEarningsPerShare,\
             financial.YoYNetSales,financial.YoYOperatingProfit,\
             financial.YoYOrdinaryProfit,financial.YoYProfit,\
             financial.YoYEarningsPerShare,\
             financial.QoQNetSales,financial.QoQOperatingProfit,\
             financial.QoQOrdinaryProfit,financial.QoQProfit,\
             financial.QoQEarningsPerShare"
        );
    }

    #[test]
    fn market_labels_are_written_as_page_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(dir.path(), &[sample_stock("6758", "ソニーグループ")])
            .unwrap()
            .unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("6758,ソニーグループ,東証Ｐ"));
    }

    #[test]
    fn read_picks_the_lexicographically_last_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("2026-08-20-1755648000000.csv"),
            "info.code,info.name,info.market\n9432,日本電信電話,東証Ｐ\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("2026-08-24-1755993600000.csv"),
            "info.code,info.name,info.market\n6758,ソニーグループ,東証Ｐ\n",
        )
        .unwrap();

        let infos = read_latest(dir.path()).unwrap();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].code, "6758");
    }

    #[test]
    fn extra_financial_columns_are_ignored_on_read() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("2026-08-24-1755993600000.csv"),
            "info.code,info.name,info.market,financial.YoYNetSales\n6758,ソニーグループ,東証Ｇ,0.125\n",
        )
        .unwrap();

        let infos = read_latest(dir.path()).unwrap();
        assert_eq!(infos[0].market, Market::Growth);
    }

    #[test]
    fn unrecognized_market_label_fails_the_read() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("2026-08-24-1755993600000.csv"),
            "info.code,info.name,info.market\n8600,名証上場,名証Ｐ\n",
        )
        .unwrap();

        let result = read_latest(dir.path());
        assert!(matches!(result, Err(ScraperError::Csv(_))));
    }

    #[test]
    fn empty_directory_is_an_inventory_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_latest(dir.path());
        assert!(matches!(result, Err(ScraperError::EmptyInventory(_))));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nowhere");
        let result = read_latest(&missing);
        assert!(matches!(result, Err(ScraperError::Io(_))));
    }

    #[test]
    fn empty_run_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_snapshot(dir.path(), &[]).unwrap();
        assert_eq!(written, None);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn snapshot_filename_encodes_date_and_millis() {
        let now = Local::now();
        let name = snapshot_filename(now);
        assert!(name.starts_with(&format!("{}-", now.format("%Y-%m-%d"))));
        assert!(name.ends_with(".csv"));

        let millis: i64 = name
            .trim_end_matches(".csv")
            .rsplit('-')
            .next()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(millis, now.timestamp_millis());
    }

    #[test]
    fn snapshot_filenames_sort_chronologically() {
        let earlier = Local.with_ymd_and_hms(2026, 8, 24, 23, 59, 59).unwrap();
        let later = Local.with_ymd_and_hms(2026, 8, 25, 0, 0, 1).unwrap();
        assert!(snapshot_filename(earlier) < snapshot_filename(later));
    }
}
