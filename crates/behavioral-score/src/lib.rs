//! Behavioral / sentiment scoring.
//!
//! Runs the lexicon analyzer over headline titles, averages the compound
//! values, and blends the result with a fixed discipline baseline so a
//! handful of noisy headlines cannot swing the score to the extremes.

use research_core::scale::clamp_score;
use research_core::{FactSnapshot, Scorer, SubScore};
use serde_json::json;

pub mod lexicon;
pub use lexicon::SentimentLexicon;

/// Neutral anchor blended into every non-empty result.
const DISCIPLINE_BASELINE: f64 = 55.0;
const SENTIMENT_WEIGHT: f64 = 0.7;
const BASELINE_WEIGHT: f64 = 0.3;

pub struct BehavioralScoreEngine {
    lexicon: SentimentLexicon,
}

impl BehavioralScoreEngine {
    pub fn new() -> Self {
        Self {
            lexicon: SentimentLexicon::new(),
        }
    }
}

impl Scorer for BehavioralScoreEngine {
    fn name(&self) -> &'static str {
        "behavioral"
    }

    fn score(&self, facts: &FactSnapshot) -> SubScore {
        let compounds: Vec<f64> = facts
            .news_headlines
            .iter()
            .filter(|h| !h.title.trim().is_empty())
            .map(|h| self.lexicon.compound(&h.title))
            .collect();

        if compounds.is_empty() {
            return SubScore {
                score: 50,
                detail: json!({ "sentiment": 0.0 }),
            };
        }

        let avg = compounds.iter().sum::<f64>() / compounds.len() as f64;
        // [-1, 1] -> [0, 100], then damp toward the baseline
        let sent = ((avg + 1.0) * 50.0).round();
        let score = clamp_score(SENTIMENT_WEIGHT * sent + BASELINE_WEIGHT * DISCIPLINE_BASELINE);

        tracing::debug!(
            ticker = %facts.ticker,
            avg_compound = avg,
            headline_count = compounds.len(),
            score,
            "behavioral score computed"
        );

        SubScore {
            score,
            detail: json!({
                "avg_compound": avg,
                "headline_count": compounds.len(),
            }),
        }
    }
}

impl Default for BehavioralScoreEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use research_core::{
        CompanyInfo, FetchedDocument, FinancialRatios, Headline, Window,
    };
    use std::collections::BTreeMap;

    fn facts_with_titles(titles: &[&str]) -> FactSnapshot {
        FactSnapshot {
            ticker: "TEST".to_string(),
            window: Window {
                from: NaiveDate::from_ymd_opt(2024, 8, 27).unwrap(),
                to: NaiveDate::from_ymd_opt(2025, 8, 27).unwrap(),
            },
            company_info: CompanyInfo::default(),
            last_4_quarters: BTreeMap::new(),
            financial_ratios: FinancialRatios::default(),
            edgar_filings: FetchedDocument::restricted("https://example.com"),
            news_headlines: titles
                .iter()
                .map(|t| Headline {
                    title: (*t).to_string(),
                    link: "https://news.example.com/a".to_string(),
                    published: None,
                })
                .collect(),
            sources_used: vec![],
            enrichment: None,
        }
    }

    #[test]
    fn no_headlines_is_neutral() {
        let result = BehavioralScoreEngine::new().score(&facts_with_titles(&[]));
        assert_eq!(result.score, 50);
        assert_eq!(result.detail["sentiment"], 0.0);
    }

    #[test]
    fn blank_titles_are_not_usable() {
        let result = BehavioralScoreEngine::new().score(&facts_with_titles(&["", "   "]));
        assert_eq!(result.score, 50);
        assert_eq!(result.detail["sentiment"], 0.0);
    }

    #[test]
    fn neutral_headlines_land_on_baseline_blend() {
        let result = BehavioralScoreEngine::new()
            .score(&facts_with_titles(&["Company schedules annual meeting"]));
        // avg 0 -> sent 50 -> round(0.7*50 + 0.3*55) = 52
        assert_eq!(result.score, 52);
        assert_eq!(result.detail["avg_compound"], 0.0);
        assert_eq!(result.detail["headline_count"], 1);
    }

    #[test]
    fn positive_headlines_score_above_baseline() {
        let result = BehavioralScoreEngine::new().score(&facts_with_titles(&[
            "Shares surge after strong earnings beat",
            "Analysts upgrade on robust growth momentum",
        ]));
        assert!(result.score > 52);
        assert!(result.score <= 100);
        assert!(result.detail["avg_compound"].as_f64().unwrap() > 0.0);
        assert_eq!(result.detail["headline_count"], 2);
    }

    #[test]
    fn negative_headlines_score_below_baseline() {
        let result = BehavioralScoreEngine::new().score(&facts_with_titles(&[
            "Stock plunges on revenue miss",
            "Lawsuit and layoff warning weigh on shares",
        ]));
        assert!(result.score < 52);
        assert!(result.score >= 0);
    }

    #[test]
    fn scoring_is_idempotent() {
        let snapshot = facts_with_titles(&[
            "Shares surge after strong earnings beat",
            "Tariff concern weighs on outlook",
        ]);
        let engine = BehavioralScoreEngine::new();
        assert_eq!(engine.score(&snapshot), engine.score(&snapshot));
    }
}
