//! Bull and bear of the day: the rows with the highest and lowest displayed
//! sentiment score. Ties go to the earliest row.

use crate::analysis::pipeline::AnalysisRow;

/// First row holding the maximum sentiment score, `None` for an empty table.
pub fn bull_of_the_day(rows: &[AnalysisRow]) -> Option<&AnalysisRow> {
    first_by(rows, |candidate, best| candidate > best)
}

/// First row holding the minimum sentiment score, `None` for an empty table.
pub fn bear_of_the_day(rows: &[AnalysisRow]) -> Option<&AnalysisRow> {
    first_by(rows, |candidate, best| candidate < best)
}

fn first_by(rows: &[AnalysisRow], beats: impl Fn(f64, f64) -> bool) -> Option<&AnalysisRow> {
    let mut iter = rows.iter();
    let mut best = iter.next()?;
    for row in iter {
        // Strict comparison keeps the earliest row on ties.
        if beats(row.sentiment_score, best.sentiment_score) {
            best = row;
        }
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::recommender::Recommendation;

    fn row(symbol: &str, score: f64) -> AnalysisRow {
        AnalysisRow {
            symbol: symbol.to_string(),
            sentiment_score: score,
            recommendation: Recommendation::ModerateBull,
            headlines: 1,
            degraded: false,
        }
    }

    #[test]
    fn first_max_and_sole_min() {
        let rows = vec![row("A", 0.5), row("B", -0.3), row("C", 0.5)];
        assert_eq!(bull_of_the_day(&rows).unwrap().symbol, "A");
        assert_eq!(bear_of_the_day(&rows).unwrap().symbol, "B");
    }

    #[test]
    fn ties_on_the_minimum_go_to_the_first_row() {
        let rows = vec![row("A", 0.1), row("B", -0.2), row("C", -0.2)];
        assert_eq!(bear_of_the_day(&rows).unwrap().symbol, "B");
    }

    #[test]
    fn single_row_is_both() {
        let rows = vec![row("AAPL", 0.12)];
        assert_eq!(bull_of_the_day(&rows).unwrap().symbol, "AAPL");
        assert_eq!(bear_of_the_day(&rows).unwrap().symbol, "AAPL");
    }

    #[test]
    fn empty_table_has_no_pick() {
        assert!(bull_of_the_day(&[]).is_none());
        assert!(bear_of_the_day(&[]).is_none());
    }
}
