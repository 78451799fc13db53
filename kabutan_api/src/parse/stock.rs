//! Identity extraction from a stock's top page.

use scraper::{ElementRef, Html, Node};

use super::{sel, select_text};
use crate::types::{Market, StockInfo};

/// Extracts code, name and market segment from a top-page document.
///
/// The code is the first child node of the price-box heading, which keeps
/// any markup following it (links, line breaks) out of the value. All
/// three parts must be present and the market label must be a recognized
/// TSE segment, otherwise the page does not describe a covered stock and
/// `None` is returned.
pub fn parse_stock_info(html: &str) -> Option<StockInfo> {
    let doc = Html::parse_document(html);

    let code = heading_code(&doc)?;
    let name = select_text(&doc, "#kobetsu_right div.company_block h3")?;
    let market = select_text(&doc, "#stockinfo_i1 div.si_i1_1 span.market")
        .and_then(|label| Market::from_label(&label))?;

    Some(StockInfo { code, name, market })
}

/// Trimmed text of the heading's first child node.
fn heading_code(doc: &Html) -> Option<String> {
    let heading = doc.select(&sel("#stockinfo_i1 div.si_i1_1 h2")?).next()?;
    let first = heading.children().next()?;

    let code = match first.value() {
        Node::Text(text) => text.trim().to_string(),
        _ => ElementRef::wrap(first)
            .map(|element| element.text().collect::<String>().trim().to_string())
            .unwrap_or_default(),
    };

    if code.is_empty() {
        None
    } else {
        Some(code)
    }
}
