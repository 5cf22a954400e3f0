//! # Analysis Module
//!
//! Turns market data into the per-symbol bull/bear table shown on the
//! dashboard. Data flows one way: fetch → score → label → select.
//!
//! ## Contained Modules:
//!
//! - **`sentiment`**: [`sentiment::SentimentScorer`] and the VADER-backed
//!   implementation.
//! - **`news_scorer`**: averages headline polarity for one symbol.
//! - **`recommender`**: maps (fear index, sentiment) to a
//!   [`recommender::Recommendation`].
//! - **`selection`**: bull and bear of the day.
//! - **`pipeline`**: [`pipeline::Analyzer`], which runs the steps above for a
//!   list of symbols.

/// Headline polarity scoring.
pub mod sentiment;
/// Per-symbol average headline sentiment.
pub mod news_scorer;
/// Fear index + sentiment to label mapping.
pub mod recommender;
/// Bull/bear of the day selection.
pub mod selection;
/// End-to-end analysis for a set of symbols.
pub mod pipeline;

pub use news_scorer::{NewsSentimentScorer, SentimentReading, MAX_HEADLINES};
pub use pipeline::{round2, AnalysisReport, AnalysisRow, Analyzer, DEFAULT_SYMBOLS};
pub use recommender::{combined_score, recommend, Recommendation};
pub use selection::{bear_of_the_day, bull_of_the_day};
pub use sentiment::{SentimentScorer, VaderScorer};
