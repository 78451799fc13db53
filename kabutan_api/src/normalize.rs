//! Normalization of kabutan's comparison figures into decimal ratios.
//!
//! Result tables print year-over-year changes either as a percentage
//! (`12.5`) or, past the +100% mark, as a multiplier (`2.1倍`). Both forms
//! are rewritten as a plain decimal ratio with three places (`0.125`,
//! `1.100`) so downstream consumers get one uniform scale.

/// Placeholder kabutan prints for a figure it has no data for.
const NO_DATA: &str = "－";

/// Suffix marking a multiplier-formatted comparison.
const TIMES_SUFFIX: char = '倍';

/// Rewrites one raw table cell as a decimal ratio.
///
/// The no-data placeholder becomes the empty string. Cells without an
/// ASCII digit (sign-flip glyphs like 赤転 and 黒転, or an already empty
/// cell) pass through unchanged, as does a digit-bearing cell that fails
/// to parse.
pub fn normalize_ratio(value: &str) -> String {
    if value == NO_DATA {
        return String::new();
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return value.to_string();
    }

    if let Some(times) = value.strip_suffix(TIMES_SUFFIX) {
        return match times.parse::<f64>() {
            Ok(times) => {
                let percent = (times - 1.0) * 100.0;
                format!("{:.3}", percent / 100.0)
            }
            Err(_) => value.to_string(),
        };
    }

    match value.parse::<f64>() {
        Ok(percent) => format!("{:.3}", percent / 100.0),
        Err(_) => value.to_string(),
    }
}
