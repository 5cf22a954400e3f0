//! # Yahoo Finance API Client
//!
//! Thin wrapper over [`ApiClient`] for `v1/finance/search`. Only the news part
//! of the response is modelled; quotes are requested with a count of zero.

use reqwest::Method;
use serde::Deserialize;

use crate::error::FetchError;
use crate::retrieve::ky_http::{ApiClient, ApiClientOptions};

const SEARCH_PATH: &str = "v1/finance/search";

/// Raw search response. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// News items, newest first as decided by the provider.
    #[serde(default)]
    pub news: Vec<RawNewsItem>,
}

/// One news entry exactly as Yahoo sends it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNewsItem {
    /// Headline. Yahoo occasionally omits it.
    pub title: Option<String>,
    /// Publishing outlet.
    pub publisher: Option<String>,
    /// Article URL.
    pub link: Option<String>,
    /// Publication time in Unix seconds.
    pub provider_publish_time: Option<i64>,
}

/// # Yahoo API Call Client
///
/// Holds the HTTP client configured for the Yahoo Finance query host.
pub struct ApiCallYahoo {
    client: ApiClient,
}

impl ApiCallYahoo {
    /// Creates a client rooted at `base_url` (e.g. `https://query2.finance.yahoo.com/`).
    pub fn new(base_url: &str, options: ApiClientOptions) -> Result<Self, FetchError> {
        Ok(Self {
            client: ApiClient::new(base_url, options)?,
        })
    }

    /// Requests up to `news_count` news items for `symbol`.
    ///
    /// # Errors
    /// [`FetchError::HttpStatus`] for non-2xx answers (Yahoo answers 429 when
    /// throttling), [`FetchError::Parse`] for bodies that do not match
    /// [`SearchResponse`], [`FetchError::Network`] for transport failures.
    pub async fn search_news(&self, symbol: &str, news_count: u32) -> Result<SearchResponse, FetchError> {
        let query = [
            ("q", symbol.to_string()),
            ("quotesCount", "0".to_string()),
            ("newsCount", news_count.to_string()),
        ];

        let response = self
            .client
            .request::<SearchResponse, ()>(Method::GET, SEARCH_PATH, Some(&query[..]), None, None)
            .await?;

        if !response.is_success() {
            tracing::warn!(
                symbol,
                status = response.status.as_u16(),
                body = response.error_body.as_deref().unwrap_or(""),
                "Yahoo search request failed"
            );
            return Err(FetchError::HttpStatus {
                status: response.status.as_u16(),
                url: format!("{}{}", self.client.base_url(), SEARCH_PATH),
            });
        }

        response
            .data
            .ok_or_else(|| FetchError::Parse("Yahoo search returned an empty body".to_string()))
    }
}
