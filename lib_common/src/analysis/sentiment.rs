//! Headline polarity scoring using VADER (Valence Aware Dictionary and
//! sEntiment Reasoner), which is tuned for short social-media and news text.

use vader_sentiment::SentimentIntensityAnalyzer;

/// Scores the tone of a piece of text.
pub trait SentimentScorer: Send + Sync {
    /// Polarity in `[-1, 1]`: negative tone below zero, positive above.
    fn polarity(&self, text: &str) -> f64;
}

/// [`SentimentScorer`] returning VADER's compound score.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    /// Create a new scorer with the bundled VADER lexicon.
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for VaderScorer {
    fn polarity(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        let scores = self.analyzer.polarity_scores(text);
        scores.get("compound").copied().unwrap_or(0.0).clamp(-1.0, 1.0)
    }
}
