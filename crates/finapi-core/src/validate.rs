//! Request input validation.
//!
//! Tickers and currency codes are interpolated into upstream URLs, so they
//! are validated against a strict character set before any network call.

/// Currency code: 1-4 ASCII letters.
pub fn is_valid_currency(currency: &str) -> bool {
    !currency.is_empty()
        && currency.len() <= 4
        && currency.chars().all(|c| c.is_ascii_alphabetic())
}

/// Scraped-site ticker: 1-12 chars, alphanumeric or colon (e.g. "MIC:SBER").
pub fn is_valid_ticker(ticker: &str) -> bool {
    !ticker.is_empty()
        && ticker.len() <= 12
        && ticker.chars().all(|c| c.is_ascii_alphanumeric() || c == ':')
}

/// Market-data API symbol: like [`is_valid_ticker`] but also admits '.'
/// for exchange-suffixed symbols (e.g. "0005.HK").
pub fn is_valid_symbol_ticker(ticker: &str) -> bool {
    !ticker.is_empty()
        && ticker.len() <= 12
        && ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ':' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_accepts_letters_only() {
        assert!(is_valid_currency("JPY"));
        assert!(is_valid_currency("j"));
        assert!(is_valid_currency("EURO"));
    }

    #[test]
    fn test_currency_rejects_bad_input() {
        assert!(!is_valid_currency(""));
        assert!(!is_valid_currency("EUROS"));
        assert!(!is_valid_currency("US1"));
        assert!(!is_valid_currency("US$"));
        assert!(!is_valid_currency("U D"));
    }

    #[test]
    fn test_ticker_accepts_alnum_and_colon() {
        assert!(is_valid_ticker("LVS"));
        assert!(is_valid_ticker("MIC:SBER"));
        assert!(is_valid_ticker("00700"));
    }

    #[test]
    fn test_ticker_rejects_bad_input() {
        assert!(!is_valid_ticker(""));
        assert!(!is_valid_ticker("ABCDEFGHIJKLM"));
        assert!(!is_valid_ticker("LVS;DROP"));
        assert!(!is_valid_ticker("A B"));
    }

    #[test]
    fn test_symbol_ticker_admits_dot() {
        assert!(is_valid_symbol_ticker("0005.HK"));
        assert!(is_valid_symbol_ticker("IBM"));
        assert!(!is_valid_symbol_ticker("0005 HK"));
    }
}
