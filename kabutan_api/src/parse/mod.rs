//! Extraction of structured records from kabutan HTML pages.
//!
//! Both extractors are total over arbitrary HTML: anything that does not
//! match the expected page structure yields `None` rather than an error,
//! and the caller drops that security from the run.

mod finance;
pub use self::finance::parse_stock_financial;

mod stock;
pub use self::stock::parse_stock_info;

use scraper::{Html, Selector};

/// Compiles a selector literal. The literals used here are all valid, so
/// a `None` can only come from a typo and will surface in tests.
fn sel(selector: &str) -> Option<Selector> {
    Selector::parse(selector).ok()
}

/// Trimmed text of the first element matching `selector`, or `None` when
/// nothing matches or the text is empty.
fn select_text(doc: &Html, selector: &str) -> Option<String> {
    let sel = sel(selector)?;
    let element = doc.select(&sel).next()?;
    let text = element.text().collect::<String>().trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
