//! # News Sentiment Scorer
//!
//! Averages the polarity of a symbol's most recent headlines.
//!
//! ## Logic:
//! 1. Retrieve the provider's news feed for the symbol.
//! 2. Empty feed: the score is exactly `0.0`.
//! 3. Otherwise take the first `max_headlines` items in provider order, score
//!    each title and return the arithmetic mean. A single headline yields its
//!    own polarity unchanged. Only these items need a title; a missing one is
//!    a [`FetchError::Parse`], while untitled items past the cap are ignored.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::sentiment::SentimentScorer;
use crate::error::FetchError;
use crate::markets::sources::MarketDataProvider;

/// Headlines scored per symbol unless configured otherwise.
pub const MAX_HEADLINES: usize = 5;

/// # Sentiment Reading
///
/// Average headline polarity for one symbol and how it was obtained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReading {
    /// Mean polarity in `[-1, 1]`, unrounded.
    pub score: f64,
    /// Number of headlines that went into the mean.
    pub headlines: usize,
    /// User-facing warning when `score` is the fallback rather than a measurement.
    pub fallback: Option<String>,
}

/// Scores symbols by combining a [`MarketDataProvider`] with a [`SentimentScorer`].
#[derive(Clone)]
pub struct NewsSentimentScorer {
    provider: Arc<dyn MarketDataProvider>,
    scorer: Arc<dyn SentimentScorer>,
    max_headlines: usize,
}

impl NewsSentimentScorer {
    /// Creates a scorer using [`MAX_HEADLINES`] headlines per symbol.
    pub fn new(provider: Arc<dyn MarketDataProvider>, scorer: Arc<dyn SentimentScorer>) -> Self {
        Self {
            provider,
            scorer,
            max_headlines: MAX_HEADLINES,
        }
    }

    /// Overrides the headline cap. A cap of zero is treated as one.
    pub fn with_max_headlines(mut self, max_headlines: usize) -> Self {
        self.max_headlines = max_headlines.max(1);
        self
    }

    /// Average polarity of the first headlines for `symbol`.
    ///
    /// # Errors
    /// Propagates the provider's [`FetchError`]; nothing is defaulted here.
    pub async fn score(&self, symbol: &str) -> Result<SentimentReading, FetchError> {
        let news = self.provider.news(symbol).await?;
        if news.is_empty() {
            tracing::debug!(symbol, "no news, neutral sentiment");
            return Ok(SentimentReading {
                score: 0.0,
                headlines: 0,
                fallback: None,
            });
        }

        let polarities: Vec<f64> = news
            .iter()
            .take(self.max_headlines)
            .map(|item| {
                item.title
                    .as_deref()
                    .map(|title| self.scorer.polarity(title))
                    .ok_or_else(|| FetchError::Parse("news item without a title".to_string()))
            })
            .collect::<Result<_, _>>()?;
        let score = polarities.iter().sum::<f64>() / polarities.len() as f64;

        tracing::debug!(symbol, headlines = polarities.len(), score, "headline sentiment scored");
        Ok(SentimentReading {
            score,
            headlines: polarities.len(),
            fallback: None,
        })
    }

    /// Like [`score`](Self::score), but any failure becomes a neutral `0.0`
    /// with the reason kept in [`SentimentReading::fallback`].
    pub async fn score_or_default(&self, symbol: &str) -> SentimentReading {
        match self.score(symbol).await {
            Ok(reading) => reading,
            Err(e) => {
                tracing::warn!(symbol, error = %e, "news sentiment unavailable, using neutral score");
                SentimentReading {
                    score: 0.0,
                    headlines: 0,
                    fallback: Some(format!("Error analyzing news for {}: {}", symbol, e)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markets::sources::NewsItem;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Provider returning a canned feed, or failing for unknown symbols.
    struct CannedNews(HashMap<&'static str, Vec<&'static str>>);

    #[async_trait]
    impl MarketDataProvider for CannedNews {
        async fn news(&self, symbol: &str) -> Result<Vec<NewsItem>, FetchError> {
            self.0
                .get(symbol)
                .map(|titles| titles.iter().map(|t| NewsItem::headline(*t)).collect())
                .ok_or_else(|| FetchError::Network("connection refused".into()))
        }
    }

    /// Scores a headline by parsing it as a number.
    struct NumericScorer;

    impl SentimentScorer for NumericScorer {
        fn polarity(&self, text: &str) -> f64 {
            text.parse().unwrap()
        }
    }

    fn scorer(feeds: &[(&'static str, Vec<&'static str>)]) -> NewsSentimentScorer {
        NewsSentimentScorer::new(
            Arc::new(CannedNews(feeds.iter().cloned().collect())),
            Arc::new(NumericScorer),
        )
    }

    #[tokio::test]
    async fn no_headlines_is_exactly_zero() {
        let reading = scorer(&[("AAPL", vec![])]).score("AAPL").await.unwrap();
        assert_eq!(reading.score, 0.0);
        assert_eq!(reading.headlines, 0);
        assert!(reading.fallback.is_none());
    }

    #[tokio::test]
    async fn single_headline_is_returned_unmodified() {
        let reading = scorer(&[("AAPL", vec!["0.37"])]).score("AAPL").await.unwrap();
        assert_eq!(reading.score, 0.37);
        assert_eq!(reading.headlines, 1);
    }

    #[tokio::test]
    async fn averages_only_the_first_five() {
        let feed = vec!["1", "0.5", "0", "-0.5", "0.5", "-1", "-1"];
        let reading = scorer(&[("MSFT", feed)]).score("MSFT").await.unwrap();
        assert_eq!(reading.headlines, 5);
        assert!((reading.score - 0.3).abs() < 1e-12);
    }

    #[tokio::test]
    async fn headline_cap_is_configurable() {
        let feed = vec!["1", "-1", "-1"];
        let reading = scorer(&[("GOOGL", feed)])
            .with_max_headlines(1)
            .score("GOOGL")
            .await
            .unwrap();
        assert_eq!(reading.score, 1.0);
    }

    /// Provider returning the same items for every symbol.
    struct FixedFeed(Vec<NewsItem>);

    #[async_trait]
    impl MarketDataProvider for FixedFeed {
        async fn news(&self, _symbol: &str) -> Result<Vec<NewsItem>, FetchError> {
            Ok(self.0.clone())
        }
    }

    fn untitled() -> NewsItem {
        NewsItem {
            title: None,
            ..NewsItem::headline("")
        }
    }

    #[tokio::test]
    async fn untitled_items_past_the_cap_are_ignored() {
        let mut feed = vec![NewsItem::headline("0.5"); 5];
        feed.push(untitled());
        let scorer = NewsSentimentScorer::new(Arc::new(FixedFeed(feed)), Arc::new(NumericScorer));

        let reading = scorer.score_or_default("AAPL").await;
        assert_eq!(reading.score, 0.5);
        assert_eq!(reading.headlines, 5);
        assert!(reading.fallback.is_none());
    }

    #[tokio::test]
    async fn untitled_item_within_the_cap_is_a_parse_error() {
        let feed = vec![NewsItem::headline("0.5"), untitled(), NewsItem::headline("0.1")];
        let scorer = NewsSentimentScorer::new(Arc::new(FixedFeed(feed)), Arc::new(NumericScorer));

        assert!(matches!(scorer.score("AAPL").await, Err(FetchError::Parse(_))));
        let reading = scorer.score_or_default("AAPL").await;
        assert_eq!(reading.score, 0.0);
        assert!(reading.fallback.is_some());
    }

    #[tokio::test]
    async fn failures_propagate_from_score() {
        let result = scorer(&[]).score("META").await;
        assert!(matches!(result, Err(FetchError::Network(_))));
    }

    #[tokio::test]
    async fn failures_default_to_neutral() {
        let reading = scorer(&[]).score_or_default("META").await;
        assert_eq!(reading.score, 0.0);
        assert_eq!(
            reading.fallback.as_deref(),
            Some("Error analyzing news for META: network error: connection refused")
        );
    }
}
