//! # Yahoo Finance News Provider
//!
//! Normalizes raw search results into [`NewsItem`]s. Entries keep their
//! provider order; a missing title is passed on as `None`.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::error::FetchError;
use crate::markets::sources::{normalize_symbol, MarketDataProvider, NewsItem};
use crate::markets::yahoo::apicallyahoo::{ApiCallYahoo, RawNewsItem};
use crate::retrieve::ky_http::ApiClientOptions;

/// Query host for Yahoo Finance.
pub const YAHOO_BASE_URL: &str = "https://query2.finance.yahoo.com/";

/// Number of news items requested from Yahoo per symbol.
pub const DEFAULT_NEWS_COUNT: u32 = 10;

/// # Yahoo News
///
/// [`MarketDataProvider`] backed by the Yahoo Finance search endpoint.
pub struct YahooNews {
    api: ApiCallYahoo,
    news_count: u32,
}

impl YahooNews {
    /// Creates a provider rooted at `base_url`.
    pub fn new(base_url: &str, options: ApiClientOptions) -> Result<Self, FetchError> {
        Ok(Self {
            api: ApiCallYahoo::new(base_url, options)?,
            news_count: DEFAULT_NEWS_COUNT,
        })
    }

    /// Overrides how many items are requested per symbol.
    pub fn with_news_count(mut self, news_count: u32) -> Self {
        self.news_count = news_count;
        self
    }

    /// Items requested per symbol.
    pub fn news_count(&self) -> u32 {
        self.news_count
    }
}

#[async_trait]
impl MarketDataProvider for YahooNews {
    async fn news(&self, symbol: &str) -> Result<Vec<NewsItem>, FetchError> {
        let symbol = normalize_symbol(symbol)?;
        let raw = self.api.search_news(&symbol, self.news_count).await?;
        tracing::debug!(symbol = %symbol, items = raw.news.len(), "Yahoo news retrieved");
        Ok(raw.news.into_iter().map(normalize_item).collect())
    }
}

fn normalize_item(raw: RawNewsItem) -> NewsItem {
    NewsItem {
        title: raw.title,
        publisher: raw.publisher,
        link: raw.link,
        published_at: raw
            .provider_publish_time
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
    }
}
