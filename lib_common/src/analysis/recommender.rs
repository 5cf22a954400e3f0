//! # Bull/Bear Recommender
//!
//! Weighs the market-wide fear & greed index and a symbol's news sentiment
//! equally:
//!
//! ```text
//! combined = (fear_index / 100 + (sentiment + 1) / 2) / 2
//! ```
//!
//! and labels the result. The branches are checked in this order, each bound
//! inclusive:
//!
//! | combined      | label         |
//! |---------------|---------------|
//! | `>= 0.6`      | Strong Bull   |
//! | `>= 0.5`      | Moderate Bull |
//! | `<= 0.4`      | Strong Bear   |
//! | anything else | Moderate Bear |
//!
//! The open interval `(0.4, 0.5)` therefore reads as Moderate Bear.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordinal market stance for a symbol, most bullish first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    /// Combined score at or above 0.6.
    #[serde(rename = "Strong Bull")]
    StrongBull,
    /// Combined score in `[0.5, 0.6)`.
    #[serde(rename = "Moderate Bull")]
    ModerateBull,
    /// Combined score in `(0.4, 0.5)`.
    #[serde(rename = "Moderate Bear")]
    ModerateBear,
    /// Combined score at or below 0.4.
    #[serde(rename = "Strong Bear")]
    StrongBear,
}

impl Recommendation {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Recommendation::StrongBull => "Strong Bull",
            Recommendation::ModerateBull => "Moderate Bull",
            Recommendation::ModerateBear => "Moderate Bear",
            Recommendation::StrongBear => "Strong Bear",
        }
    }

    /// Label for an already combined score.
    pub fn from_combined(combined: f64) -> Self {
        if combined >= 0.6 {
            Recommendation::StrongBull
        } else if combined >= 0.5 {
            Recommendation::ModerateBull
        } else if combined <= 0.4 {
            Recommendation::StrongBear
        } else {
            Recommendation::ModerateBear
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Equal-weight blend of the normalized index and normalized sentiment, in `[0, 1]`.
///
/// Inputs outside their domains are clamped first: the index to `100`, the
/// sentiment to `[-1, 1]`.
pub fn combined_score(fear_index: u8, sentiment: f64) -> f64 {
    let normalized_fear = f64::from(fear_index.min(100)) / 100.0;
    let normalized_sentiment = (sentiment.clamp(-1.0, 1.0) + 1.0) / 2.0;
    (normalized_fear + normalized_sentiment) / 2.0
}

/// Labels a symbol from the fear & greed index and its news sentiment.
pub fn recommend(fear_index: u8, sentiment: f64) -> Recommendation {
    Recommendation::from_combined(combined_score(fear_index, sentiment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremes() {
        assert_eq!(recommend(100, 1.0), Recommendation::StrongBull);
        assert_eq!(recommend(0, -1.0), Recommendation::StrongBear);
    }

    #[test]
    fn boundaries_are_inclusive_in_branch_order() {
        assert_eq!(Recommendation::from_combined(0.6), Recommendation::StrongBull);
        assert_eq!(Recommendation::from_combined(0.5), Recommendation::ModerateBull);
        assert_eq!(Recommendation::from_combined(0.4), Recommendation::StrongBear);
        assert_eq!(Recommendation::from_combined(0.45), Recommendation::ModerateBear);
        assert_eq!(Recommendation::from_combined(0.5999), Recommendation::ModerateBull);
        assert_eq!(Recommendation::from_combined(0.4001), Recommendation::ModerateBear);
    }

    #[test]
    fn boundaries_through_recommend() {
        assert_eq!(combined_score(70, 0.0), 0.6);
        assert_eq!(recommend(70, 0.0), Recommendation::StrongBull);
        assert_eq!(combined_score(50, 0.0), 0.5);
        assert_eq!(recommend(50, 0.0), Recommendation::ModerateBull);
        assert_eq!(combined_score(30, 0.0), 0.4);
        assert_eq!(recommend(30, 0.0), Recommendation::StrongBear);
        assert_eq!(combined_score(40, 0.0), 0.45);
        assert_eq!(recommend(40, 0.0), Recommendation::ModerateBear);
    }

    #[test]
    fn total_over_the_domain() {
        for fear in 0..=100u8 {
            for step in 0..=200 {
                let sentiment = -1.0 + f64::from(step) * 0.01;
                let combined = combined_score(fear, sentiment);
                assert!((0.0..=1.0).contains(&combined));
                let label = recommend(fear, sentiment);
                let expected = if combined >= 0.6 {
                    Recommendation::StrongBull
                } else if combined >= 0.5 {
                    Recommendation::ModerateBull
                } else if combined <= 0.4 {
                    Recommendation::StrongBear
                } else {
                    Recommendation::ModerateBear
                };
                assert_eq!(label, expected);
            }
        }
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        assert_eq!(combined_score(255, 3.0), 1.0);
        assert_eq!(combined_score(0, -7.5), 0.0);
    }

    #[test]
    fn labels_serialize_as_display_text() {
        assert_eq!(serde_json::to_string(&Recommendation::ModerateBear).unwrap(), "\"Moderate Bear\"");
        assert_eq!(Recommendation::StrongBull.to_string(), "Strong Bull");
    }
}
