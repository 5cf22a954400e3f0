//! # Analysis Pipeline
//!
//! [`Analyzer`] runs fetch → score → label → select for the symbols of one
//! request. Symbols and the fear index reading are passed in per call; the
//! analyzer itself only holds the shared clients, so nothing carries over
//! between requests.
//!
//! Outbound calls are awaited one after another in symbol order.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::news_scorer::NewsSentimentScorer;
use crate::analysis::recommender::{recommend, Recommendation};
use crate::analysis::selection::{bear_of_the_day, bull_of_the_day};
use crate::markets::sources::{fetch_index_or_default, IndexReading, IndexSource};

/// Tickers offered (and preselected) on the dashboard.
pub const DEFAULT_SYMBOLS: [&str; 5] = ["AAPL", "MSFT", "GOOGL", "AMZN", "META"];

/// # Analysis Row
///
/// One line of the results table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRow {
    /// Ticker as requested. Duplicates are kept.
    pub symbol: String,
    /// Mean headline polarity rounded to 2 decimals.
    pub sentiment_score: f64,
    /// Label computed from the fear index and the unrounded score.
    pub recommendation: Recommendation,
    /// Headlines that went into the score.
    pub headlines: usize,
    /// True when the score is the neutral fallback after a failed fetch.
    pub degraded: bool,
}

impl AnalysisRow {
    /// Score formatted with exactly two decimals.
    pub fn display_score(&self) -> String {
        format!("{:.2}", self.sentiment_score)
    }
}

/// # Analysis Report
///
/// Everything the dashboard renders after an analysis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// The fear & greed reading the labels were computed from.
    pub fear_index: IndexReading,
    /// One row per requested symbol, in request order.
    pub rows: Vec<AnalysisRow>,
    /// Row with the highest score.
    pub bull: Option<AnalysisRow>,
    /// Row with the lowest score.
    pub bear: Option<AnalysisRow>,
    /// User-facing warnings collected during the run, index first.
    pub warnings: Vec<String>,
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
}

/// Rounds to two decimal places, half away from zero.
///
/// Exact binary ties differ from banker's rounding: `round2(0.125)` is `0.13`
/// where a round-half-to-even rule gives `0.12`. Scores are means of VADER
/// compounds, so such ties are rare in practice.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Runs the analysis against shared market clients.
#[derive(Clone)]
pub struct Analyzer {
    index: Arc<dyn IndexSource>,
    news: NewsSentimentScorer,
}

impl Analyzer {
    /// Builds an analyzer from its two inputs.
    pub fn new(index: Arc<dyn IndexSource>, news: NewsSentimentScorer) -> Self {
        Self { index, news }
    }

    /// Fetches the fear & greed index, defaulting to 50 on failure.
    pub async fn fear_index(&self) -> IndexReading {
        fetch_index_or_default(self.index.as_ref()).await
    }

    /// Scores and labels every symbol, then picks the bull and bear of the day.
    pub async fn analyze(&self, fear_index: &IndexReading, symbols: &[String]) -> AnalysisReport {
        let mut warnings: Vec<String> = fear_index.fallback.iter().cloned().collect();
        let mut rows = Vec::with_capacity(symbols.len());

        for symbol in symbols {
            let reading = self.news.score_or_default(symbol).await;
            let recommendation = recommend(fear_index.value, reading.score);
            let degraded = reading.fallback.is_some();
            if let Some(warning) = reading.fallback {
                warnings.push(warning);
            }
            rows.push(AnalysisRow {
                symbol: symbol.clone(),
                sentiment_score: round2(reading.score),
                recommendation,
                headlines: reading.headlines,
                degraded,
            });
        }

        let bull = bull_of_the_day(&rows).cloned();
        let bear = bear_of_the_day(&rows).cloned();
        tracing::info!(
            fear_index = fear_index.value,
            symbols = rows.len(),
            bull = bull.as_ref().map(|r| r.symbol.as_str()).unwrap_or("-"),
            bear = bear.as_ref().map(|r| r.symbol.as_str()).unwrap_or("-"),
            "analysis complete"
        );

        AnalysisReport {
            fear_index: fear_index.clone(),
            rows,
            bull,
            bear,
            warnings,
            generated_at: Utc::now(),
        }
    }
}
