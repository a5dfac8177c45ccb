//! Weighted blend of the three sub-scores into the final verdict.

use research_core::scale::clamp_score;
use research_core::{now_utc_iso, FactSnapshot, OverallScore, Rating, SubScore, Verdict};

/// Overall blend weights (financial, exogenous, behavioral); sum to 1.0.
const FINANCIAL_WEIGHT: f64 = 0.65;
const EXOGENOUS_WEIGHT: f64 = 0.15;
const BEHAVIORAL_WEIGHT: f64 = 0.20;

/// Deterministic blend of three sub-scores already in [0, 100].
pub fn overall_score(financial: i64, exogenous: i64, behavioral: i64) -> i64 {
    clamp_score(
        FINANCIAL_WEIGHT * financial as f64
            + EXOGENOUS_WEIGHT * exogenous as f64
            + BEHAVIORAL_WEIGHT * behavioral as f64,
    )
}

/// Assemble the final verdict, stamped with the current UTC time.
pub fn compose(
    ticker: &str,
    facts: FactSnapshot,
    financial: SubScore,
    exogenous: SubScore,
    behavioral: SubScore,
) -> Verdict {
    let score = overall_score(financial.score, exogenous.score, behavioral.score);
    Verdict {
        as_of: now_utc_iso(),
        ticker: ticker.to_string(),
        facts,
        financial,
        exogenous,
        behavioral,
        overall: OverallScore {
            score,
            rating: Rating::from_score(score),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_sub_scores_blend_to_buy() {
        // round(0.65*80 + 0.15*40 + 0.20*60) = 70
        let score = overall_score(80, 40, 60);
        assert_eq!(score, 70);
        assert_eq!(Rating::from_score(score), Rating::Buy);
    }

    #[test]
    fn blend_is_deterministic() {
        assert_eq!(overall_score(80, 40, 60), overall_score(80, 40, 60));
    }

    #[test]
    fn blend_of_bounded_inputs_stays_bounded() {
        assert_eq!(overall_score(100, 100, 100), 100);
        assert_eq!(overall_score(0, 0, 0), 0);
        for f in [0, 43, 67, 100] {
            for e in [0, 67, 100] {
                for b in [0, 52, 100] {
                    let s = overall_score(f, e, b);
                    assert!((0..=100).contains(&s));
                }
            }
        }
    }

    #[test]
    fn rating_tracks_overall_thresholds() {
        // hold just below the buy line: round(.65*69 + .15*69 + .20*69) = 69
        assert_eq!(Rating::from_score(overall_score(69, 69, 69)), Rating::Hold);
        assert_eq!(Rating::from_score(overall_score(70, 70, 70)), Rating::Buy);
        assert_eq!(Rating::from_score(overall_score(49, 49, 49)), Rating::Sell);
    }
}
