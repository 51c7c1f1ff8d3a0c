//! Stock price extraction.

use crate::scan::numeric_suffix;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Marker preceding the price sentence on equity pages.
const PRICE_MARKER: &str = "The current price of ";
/// Marker used on ETF pages, where the price only appears in inline JS.
const ETF_PRICE_MARKER: &str = ".price=";

/// Extract the native-currency stock price from a page body.
///
/// Equity layout: the sentence after the marker reads
/// `"<TICKER> is <symbol><price>. ..."`, so the third space-delimited field
/// of a 50-char window is the price token with trailing punctuation. The
/// currency symbol is discarded by the backward numeric-boundary scan.
///
/// ETF layout: the price sits between `".price="` and the next `";"` in
/// inline JS, and is rounded to 2 decimals.
pub fn extract_price(source: &str) -> Option<String> {
    match source.split_once(PRICE_MARKER) {
        Some((_, rest)) => {
            let window: String = rest.chars().take(50).collect();
            let fields: Vec<&str> = window.split(' ').collect();
            if fields.len() < 3 {
                return None;
            }

            let token = fields[2];
            let mut chars = token.chars();
            chars.next_back()?;

            numeric_suffix(chars.as_str())
                .filter(|price| !price.is_empty())
                .map(str::to_string)
        }
        None => {
            let rest = source.split_once(ETF_PRICE_MARKER)?.1;
            let raw = rest.split(';').next()?;
            let value = Decimal::from_str(raw).ok()?;
            Some(value.round_dp(2).normalize().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dollar_price() {
        let source = "data-v-00a2281e>\n The current price of LVS is $51.65. </div>";
        assert_eq!(extract_price(source).as_deref(), Some("51.65"));
    }

    #[test]
    fn test_multibyte_currency_symbol() {
        let source = "The current price of MIC:SBER is ₽292.19. More text";
        assert_eq!(extract_price(source).as_deref(), Some("292.19"));
    }

    #[test]
    fn test_multichar_currency_prefix() {
        let source = "The current price of 00700 is HK$428.80. More text";
        assert_eq!(extract_price(source).as_deref(), Some("428.80"));
    }

    #[test]
    fn test_etf_layout() {
        let source = ";aA.pretax_margain=a;aA.price=100.3201;aA.price52whigh=100.67;";
        assert_eq!(extract_price(source).as_deref(), Some("100.32"));
    }

    #[test]
    fn test_etf_layout_rounds_to_two_decimals() {
        let source = "x.price=55.555;";
        assert_eq!(extract_price(source).as_deref(), Some("55.56"));
    }

    #[test]
    fn test_missing_markers() {
        assert_eq!(extract_price("<html>no price here</html>"), None);
    }

    #[test]
    fn test_short_window_after_marker() {
        assert_eq!(extract_price("The current price of X"), None);
    }

    #[test]
    fn test_token_without_currency_prefix_is_unavailable() {
        // No boundary character means the page did not match the expected
        // "<symbol><number>" shape.
        let source = "The current price of LVS is 51.65. More text";
        assert_eq!(extract_price(source), None);
    }

    #[test]
    fn test_etf_unparseable_value() {
        assert_eq!(extract_price("x.price=oops;"), None);
    }
}
