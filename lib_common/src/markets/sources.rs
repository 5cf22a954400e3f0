//! # Market Data Sources
//!
//! Seams between the analysis pipeline and the outside world. Each trait has
//! one production implementation in a sibling module and is mocked in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Fear & greed value used when the index cannot be fetched.
pub const DEFAULT_FEAR_INDEX: u8 = 50;

/// A source of the 0–100 fear & greed index.
#[async_trait]
pub trait IndexSource: Send + Sync {
    /// Fetches the current index value. Every call goes to the network.
    async fn fetch_index(&self) -> Result<u8, FetchError>;
}

/// A provider of recent news for a ticker symbol.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Returns the provider's recent news items for `symbol`, in provider order.
    async fn news(&self, symbol: &str) -> Result<Vec<NewsItem>, FetchError>;
}

/// # News Item
///
/// One headline as returned by a [`MarketDataProvider`]. Only `title` takes
/// part in scoring; the rest is carried for display. Providers pass untitled
/// items through so the scorer can ignore those it never reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Headline text, when the provider sent one.
    pub title: Option<String>,
    /// Name of the publishing outlet.
    pub publisher: Option<String>,
    /// Link to the full article.
    pub link: Option<String>,
    /// Publication time.
    pub published_at: Option<DateTime<Utc>>,
}

impl NewsItem {
    /// A news item carrying only a headline.
    pub fn headline(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            publisher: None,
            link: None,
            published_at: None,
        }
    }
}

/// # Index Reading
///
/// The fear & greed value shown to the user, together with the reason it had
/// to fall back to [`DEFAULT_FEAR_INDEX`], if it did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexReading {
    /// Index value in `[0, 100]`.
    pub value: u8,
    /// User-facing warning when `value` is the fallback rather than live data.
    pub fallback: Option<String>,
}

impl IndexReading {
    /// A live reading.
    pub fn live(value: u8) -> Self {
        Self { value, fallback: None }
    }

    /// True when the value is the default rather than a fetched one.
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Fetches the index and collapses any failure into [`DEFAULT_FEAR_INDEX`].
///
/// The failure is logged and kept in [`IndexReading::fallback`] so the page can
/// display it and callers can tell a real 50 from a defaulted one.
pub async fn fetch_index_or_default(source: &dyn IndexSource) -> IndexReading {
    match source.fetch_index().await {
        Ok(value) => {
            tracing::info!(value, "fear & greed index fetched");
            IndexReading::live(value)
        }
        Err(e) => {
            tracing::warn!(error = %e, fallback = DEFAULT_FEAR_INDEX, "fear & greed index unavailable");
            IndexReading {
                value: DEFAULT_FEAR_INDEX,
                fallback: Some(format!("Error fetching Fear & Greed Index: {}", e)),
            }
        }
    }
}

/// Trims and upper-cases a ticker symbol.
pub fn normalize_symbol(symbol: &str) -> Result<String, FetchError> {
    let trimmed = symbol.trim();
    if trimmed.is_empty() {
        return Err(FetchError::EmptySymbol);
    }
    Ok(trimmed.to_ascii_uppercase())
}
