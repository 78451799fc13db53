//! Domain types for kabutan stock records.

use serde::{Deserialize, Serialize};

/// Tokyo Stock Exchange segment shown next to the code on a stock page.
///
/// Only the three current TSE segments are recognized. Anything else the
/// page may show there (ETFs, REITs, regional exchanges) leaves the
/// identity unresolved and the record is dropped.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Market {
    /// TSE Prime.
    #[serde(rename = "東証Ｐ")]
    Prime,

    /// TSE Standard.
    #[serde(rename = "東証Ｓ")]
    Standard,

    /// TSE Growth.
    #[serde(rename = "東証Ｇ")]
    Growth,
}

impl Market {
    /// Parses the trimmed text of the page's market label. Returns `None`
    /// for labels outside the three recognized segments.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "東証Ｐ" => Some(Market::Prime),
            "東証Ｓ" => Some(Market::Standard),
            "東証Ｇ" => Some(Market::Growth),
            _ => None,
        }
    }

    /// The label as it appears on the page and in snapshot files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Market::Prime => "東証Ｐ",
            Market::Standard => "東証Ｓ",
            Market::Growth => "東証Ｇ",
        }
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity of one listed security, taken from its kabutan top page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockInfo {
    /// Four-digit securities code.
    pub code: String,

    /// Company name.
    pub name: String,

    /// TSE segment the security trades on.
    pub market: Market,
}

/// One comparison group from a financial-results table: the five deltas of
/// a single row, already normalized to decimal-ratio strings.
///
/// An empty string means the page showed its no-data placeholder for that
/// cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Performance {
    pub net_sales: String,
    pub operating_profit: String,
    pub ordinary_profit: String,
    pub profit: String,
    pub earnings_per_share: String,
}

/// The three comparison groups extracted from a financial-results page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockFinancial {
    /// Full-year forecast versus the prior period (前期比).
    pub yoy_forecast: Performance,

    /// Most recent full year versus the year before (前年比).
    pub yoy: Performance,

    /// Most recent quarter versus the same quarter a year earlier
    /// (前年同期比).
    pub qoq: Performance,
}

/// A fully collected stock record: an identity plus its financial
/// snapshot. Only constructed once both passes have succeeded, so every
/// `Stock` that reaches the output is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stock {
    /// Resolved identity from the top page (or the previous inventory).
    pub info: StockInfo,

    /// Normalized financials from the results page.
    pub financial: StockFinancial,
}
