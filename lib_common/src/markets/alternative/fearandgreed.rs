//! # Fear & Greed Page Client
//!
//! Fetches the Alternative.me Fear & Greed page and extracts the index value.
//!
//! ## Key Features:
//! - **Single GET**: one request per call, no caching. Retries only happen if
//!   the [`ApiClientOptions`] enable them.
//! - **Selector Driven**: the value-bearing element is located with a CSS
//!   selector (`div.fng-value` by default). The page nests the number in a
//!   `.fng-circle` child; when that child exists its text wins over the text
//!   of the whole element.
//! - **Strict Parsing**: the text must be an integer in `[0, 100]`. Anything
//!   else is a [`FetchError::Parse`], never a silently clamped value.

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::error::FetchError;
use crate::markets::sources::IndexSource;
use crate::retrieve::ky_http::{ApiClient, ApiClientOptions};

/// Public page carrying the index.
pub const FEAR_GREED_URL: &str = "https://alternative.me/crypto/fear-and-greed-index/";
/// Element holding the current value on [`FEAR_GREED_URL`].
pub const FEAR_GREED_SELECTOR: &str = "div.fng-value";

const NESTED_VALUE_SELECTOR: &str = ".fng-circle";

/// # Fear & Greed Page
///
/// An [`IndexSource`] backed by a scraped web page.
pub struct FearGreedPage {
    /// HTTP client whose base URL is the page itself.
    client: ApiClient,
    /// CSS selector of the value-bearing element.
    selector: String,
}

impl FearGreedPage {
    /// Creates a client for the page at `page_url`.
    ///
    /// # Errors
    /// [`FetchError::InvalidUrl`] if `page_url` is not absolute, or
    /// [`FetchError::Parse`] if `selector` is not a valid CSS selector.
    pub fn new(page_url: &str, selector: &str, options: ApiClientOptions) -> Result<Self, FetchError> {
        compile_selector(selector)?;
        Ok(Self {
            client: ApiClient::new(page_url, options)?,
            selector: selector.to_string(),
        })
    }

    /// Client for the default Alternative.me page and selector.
    pub fn with_defaults(options: ApiClientOptions) -> Result<Self, FetchError> {
        Self::new(FEAR_GREED_URL, FEAR_GREED_SELECTOR, options)
    }
}

#[async_trait]
impl IndexSource for FearGreedPage {
    async fn fetch_index(&self) -> Result<u8, FetchError> {
        let html = self.client.get_text("", None).await?;
        tracing::debug!(url = %self.client.base_url(), bytes = html.len(), "fear & greed page retrieved");
        parse_index(&html, &self.selector)
    }
}

fn compile_selector(selector: &str) -> Result<Selector, FetchError> {
    Selector::parse(selector).map_err(|e| FetchError::Parse(format!("invalid selector `{}`: {}", selector, e)))
}

/// Extracts the index value from the page markup.
///
/// # Errors
/// - [`FetchError::MissingElement`] when nothing matches `selector`.
/// - [`FetchError::Parse`] when the element text is not an integer in `[0, 100]`.
pub fn parse_index(html: &str, selector: &str) -> Result<u8, FetchError> {
    let outer = compile_selector(selector)?;
    let nested = compile_selector(NESTED_VALUE_SELECTOR)?;
    let document = Html::parse_document(html);

    let element = document
        .select(&outer)
        .next()
        .ok_or_else(|| FetchError::MissingElement { selector: selector.to_string() })?;

    let text: String = match element.select(&nested).next() {
        Some(inner) => inner.text().collect(),
        None => element.text().collect(),
    };
    let text = text.trim();

    let value: i64 = text
        .parse()
        .map_err(|_| FetchError::Parse(format!("index text {:?} is not an integer", text)))?;
    if !(0..=100).contains(&value) {
        return Err(FetchError::Parse(format!("index value {} is outside 0..=100", value)));
    }
    Ok(value as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieve::test_support::serve_fixed;

    const PAGE: &str = r#"<html><body>
        <div class="fng-value">
            <div class="status">Now: Greed</div>
            <div class="fng-circle" style="background-color:#93d900">72</div>
        </div>
    </body></html>"#;

    #[test]
    fn reads_nested_circle_value() {
        assert_eq!(parse_index(PAGE, FEAR_GREED_SELECTOR).unwrap(), 72);
    }

    #[test]
    fn reads_plain_element_text() {
        let html = "<div class=\"fng-value\">\n  17 \n</div>";
        assert_eq!(parse_index(html, FEAR_GREED_SELECTOR).unwrap(), 17);
    }

    #[test]
    fn first_match_wins() {
        let html = r#"<div class="fng-value">0</div><div class="fng-value">100</div>"#;
        assert_eq!(parse_index(html, FEAR_GREED_SELECTOR).unwrap(), 0);
    }

    #[test]
    fn missing_element_is_reported() {
        let err = parse_index("<html><body><p>maintenance</p></body></html>", FEAR_GREED_SELECTOR).unwrap_err();
        assert!(matches!(err, FetchError::MissingElement { ref selector } if selector == "div.fng-value"));
    }

    #[test]
    fn non_numeric_text_is_parse_error() {
        let err = parse_index(r#"<div class="fng-value">Greed</div>"#, FEAR_GREED_SELECTOR).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn out_of_range_is_parse_error() {
        let err = parse_index(r#"<div class="fng-value">101</div>"#, FEAR_GREED_SELECTOR).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
        let err = parse_index(r#"<div class="fng-value">-3</div>"#, FEAR_GREED_SELECTOR).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn invalid_selector_is_rejected_up_front() {
        let result = FearGreedPage::new(FEAR_GREED_URL, "div[", ApiClientOptions::default());
        assert!(matches!(result, Err(FetchError::Parse(_))));
    }

    #[tokio::test]
    async fn fetches_and_parses_page() {
        let base = serve_fixed("200 OK", "text/html", PAGE).await;
        let page = FearGreedPage::new(&base, FEAR_GREED_SELECTOR, ApiClientOptions::default()).unwrap();
        assert_eq!(page.fetch_index().await.unwrap(), 72);
    }

    #[tokio::test]
    async fn server_error_is_not_a_value() {
        let base = serve_fixed("500 Internal Server Error", "text/html", "oops").await;
        let page = FearGreedPage::new(&base, FEAR_GREED_SELECTOR, ApiClientOptions::default()).unwrap();
        assert!(matches!(page.fetch_index().await, Err(FetchError::HttpStatus { status: 500, .. })));
    }
}
