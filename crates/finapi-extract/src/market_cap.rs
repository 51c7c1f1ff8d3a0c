//! Market capitalization extraction.

use crate::scan::numeric_suffix;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;
use tracing::error;

/// Marker preceding the market cap span.
const CAP_MARKER: &str = "Market Cap:";

/// Extract the native-currency market cap, in billions, from a page body.
///
/// The span content after the marker looks like
/// `data-v-4e6e2268>HK$ 3.56B`: the unit letter is the last character, the
/// number sits behind an arbitrary prefix handled by the backward scan.
/// Normalization: 'B' passes through, 'M' divides by 1000, 'T' multiplies by
/// 1000 (both rounded to 2 decimals). Any other letter means the page layout
/// changed and the figure is reported unavailable.
pub fn extract_market_cap(source: &str) -> Option<String> {
    let rest = source.split_once(CAP_MARKER)?.1;
    let span = rest.split_once("<span ")?.1;
    let content = span.split_once("</span>")?.0;

    let mut chars = content.chars();
    let unit_letter = chars.next_back()?.to_ascii_uppercase();
    let body = chars.as_str();

    let raw = numeric_suffix(body)?;
    let value = Decimal::from_str(raw).ok()?;

    match unit_letter {
        'B' => Some(value.normalize().to_string()),
        'M' => Some((value / dec!(1000)).round_dp(2).normalize().to_string()),
        'T' => Some((value * dec!(1000)).round_dp(2).normalize().to_string()),
        other => {
            error!(unit = %other, "Unknown letter following market cap");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(span_content: &str) -> String {
        format!(
            "<div>Market Cap: <span class=\"t-body\" {span_content}</span></div>"
        )
    }

    #[test]
    fn test_billions_pass_through() {
        let source = page("data-v-x>$32.5B");
        assert_eq!(extract_market_cap(&source).as_deref(), Some("32.5"));
    }

    #[test]
    fn test_millions_divide_by_thousand() {
        let source = page("data-v-x>$845.3M");
        assert_eq!(extract_market_cap(&source).as_deref(), Some("0.85"));
    }

    #[test]
    fn test_trillions_multiply_by_thousand() {
        let source = page("data-v-x>$3.56T");
        assert_eq!(extract_market_cap(&source).as_deref(), Some("3560"));
    }

    #[test]
    fn test_multichar_currency_prefix_with_space() {
        let source = page("data-v-4e6e2268>HK$ 3.56B");
        assert_eq!(extract_market_cap(&source).as_deref(), Some("3.56"));
    }

    #[test]
    fn test_unknown_unit_letter_is_unavailable() {
        let source = page("data-v-x>$12.5Q");
        assert_eq!(extract_market_cap(&source), None);
    }

    #[test]
    fn test_missing_marker() {
        assert_eq!(extract_market_cap("<html>no cap</html>"), None);
    }

    #[test]
    fn test_missing_span() {
        assert_eq!(extract_market_cap("Market Cap: plain text only"), None);
    }

    #[test]
    fn test_span_without_number() {
        let source = page("data-v-x>N/A");
        assert_eq!(extract_market_cap(&source), None);
    }
}
