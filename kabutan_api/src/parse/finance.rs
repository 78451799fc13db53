//! Financial-results extraction from a stock's finance page.

use scraper::{ElementRef, Html};

use super::sel;
use crate::normalize::normalize_ratio;
use crate::types::{Performance, StockFinancial};

const YOY_FORECAST_ROWS: &str = "#finance_box div.fin_year_t0_d.fin_year_result_d table tbody tr";
const YOY_FORECAST_ANCHOR: &str = "前期比";

/// The year-over-year row carries no container class of its own; it is
/// found by its heading anywhere under the results box.
const YOY_ROWS: &str = "#finance_box table tbody tr";
const YOY_ANCHOR: &str = "前年比";

const QOQ_ROWS: &str = "#finance_box div.fin_quarter_t0_d.fin_quarter_result_d table tbody tr";
const QOQ_ANCHOR: &str = "前年同期比";

/// Extracts the three comparison groups from a finance-page document.
///
/// Every group must be present with all five of its cells non-empty. A
/// page with data missing anywhere yields `None` and the security is
/// dropped for this run rather than recorded half-filled.
pub fn parse_stock_financial(html: &str) -> Option<StockFinancial> {
    let doc = Html::parse_document(html);

    Some(StockFinancial {
        yoy_forecast: performance_row(&doc, YOY_FORECAST_ROWS, YOY_FORECAST_ANCHOR)?,
        yoy: performance_row(&doc, YOY_ROWS, YOY_ANCHOR)?,
        qoq: performance_row(&doc, QOQ_ROWS, QOQ_ANCHOR)?,
    })
}

/// Finds the row whose heading contains `anchor` and normalizes the five
/// cells following the heading.
fn performance_row(doc: &Html, rows: &str, anchor: &str) -> Option<Performance> {
    let row_sel = sel(rows)?;
    let th_sel = sel("th")?;

    let row = doc.select(&row_sel).find(|row| {
        row.select(&th_sel)
            .any(|th| th.text().collect::<String>().contains(anchor))
    })?;

    // Element children only: cell 0 is the heading, the five deltas
    // follow in column order.
    let cells: Vec<String> = row
        .children()
        .filter_map(ElementRef::wrap)
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect();
    let cell = |index: usize| cells.get(index).filter(|text| !text.is_empty());

    Some(Performance {
        net_sales: normalize_ratio(cell(1)?),
        operating_profit: normalize_ratio(cell(2)?),
        ordinary_profit: normalize_ratio(cell(3)?),
        profit: normalize_ratio(cell(4)?),
        earnings_per_share: normalize_ratio(cell(5)?),
    })
}
