//! Position-based text extraction for scraped equity pages.
//!
//! The source markup is not a stable structured format, so extraction works
//! off literal markers and positional slicing. Every failure degrades to
//! `None` ("unavailable"); nothing in this crate returns an error or panics
//! on hostile input.

pub mod market_cap;
pub mod price;
mod scan;

pub use market_cap::extract_market_cap;
pub use price::extract_price;

/// Figures recovered from one page.
///
/// A price with no market cap is a valid combination (ETF pages have no cap
/// section) and is distinct from both fields missing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedFigures {
    /// Native-currency price, as a decimal string.
    pub price: Option<String>,
    /// Native-currency market cap in billions, as a decimal string.
    pub market_cap: Option<String>,
}

impl ExtractedFigures {
    /// Run both extractors over a page body.
    pub fn from_page(source: &str) -> Self {
        Self {
            price: extract_price(source),
            market_cap: extract_market_cap(source),
        }
    }

    /// True when neither figure could be recovered.
    pub fn is_empty(&self) -> bool {
        self.price.is_none() && self.market_cap.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_extraction() {
        let source = "What is Las Vegas Sands Corp(LVS)'s stock price today?\n</span> \
            <div class=\"t-caption\" data-v-00a2281e>\n The current price of LVS is $51.65. \
            Market Cap: <span class=\"t-body\" data-v-x>$32.5B</span>";
        let figures = ExtractedFigures::from_page(source);
        assert_eq!(figures.price.as_deref(), Some("51.65"));
        assert_eq!(figures.market_cap.as_deref(), Some("32.5"));
        assert!(!figures.is_empty());
    }

    #[test]
    fn test_total_failure_is_empty() {
        let figures = ExtractedFigures::from_page("<html><body>nothing here</body></html>");
        assert!(figures.is_empty());
    }
}
