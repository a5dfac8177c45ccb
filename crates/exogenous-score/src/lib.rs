//! Exogenous / news-event scoring.
//!
//! Counts headlines that mention policy tailwinds (subsidies, incentives,
//! partnerships) against headlines that mention external shocks (tariffs,
//! sanctions, disasters, conflict), then rescales the net count onto 0-100.

use research_core::scale::clamp_round;
use research_core::{FactSnapshot, Headline, Scorer, SubScore};
use serde_json::json;

const POSITIVE_KEYWORDS: &[&str] = &[
    "subsidy",
    "grant",
    "government stake",
    "partnership",
    "investment",
    "chips",
    "incentive",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "tariff",
    "sanction",
    "ban",
    "strike",
    "flood",
    "earthquake",
    "war",
    "export control",
    "geopolitics",
    "conflict",
    "typhoon",
    "hurricane",
];

/// Negative hits are weighted double, and the net count is clamped to
/// [-20, 10] before the linear rescale onto [0, 100].
const RAW_MIN: i64 = -20;
const RAW_MAX: i64 = 10;

fn matches_any(title: &str, keywords: &[&str]) -> bool {
    let lower = title.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

pub struct ExogenousScoreEngine;

impl ExogenousScoreEngine {
    pub fn new() -> Self {
        Self
    }

    /// A headline counts at most once per polarity, no matter how many
    /// keywords it hits.
    fn count_hits(&self, headlines: &[Headline]) -> (i64, i64) {
        let pos = headlines
            .iter()
            .filter(|h| matches_any(&h.title, POSITIVE_KEYWORDS))
            .count() as i64;
        let neg = headlines
            .iter()
            .filter(|h| matches_any(&h.title, NEGATIVE_KEYWORDS))
            .count() as i64;
        (pos, neg)
    }
}

impl Scorer for ExogenousScoreEngine {
    fn name(&self) -> &'static str {
        "exogenous"
    }

    fn score(&self, facts: &FactSnapshot) -> SubScore {
        let (pos, neg) = self.count_hits(&facts.news_headlines);
        let raw = (pos - 2 * neg).clamp(RAW_MIN, RAW_MAX);
        let score = clamp_round((raw - RAW_MIN) as f64 * 100.0 / (RAW_MAX - RAW_MIN) as f64, 0, 100);

        tracing::debug!(ticker = %facts.ticker, pos, neg, raw, score, "exogenous score computed");

        SubScore {
            score,
            detail: json!({
                "raw": raw,
                "pos_hits": pos,
                "neg_hits": neg,
            }),
        }
    }
}

impl Default for ExogenousScoreEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use research_core::{
        CompanyInfo, FetchedDocument, FinancialRatios, Window,
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
    fn no_hits_maps_to_midpoint() {
        let result = ExogenousScoreEngine::new()
            .score(&facts_with_titles(&["Quarterly results due next week"]));
        // raw 0 -> round((0 + 20) * 100 / 30) = 67
        assert_eq!(result.score, 67);
        assert_eq!(result.detail["raw"], 0);
        assert_eq!(result.detail["pos_hits"], 0);
        assert_eq!(result.detail["neg_hits"], 0);
    }

    #[test]
    fn positive_hits_saturate_at_hundred() {
        let result = ExogenousScoreEngine::new().score(&facts_with_titles(&[
            "Government subsidy announced",
            "New grant for fab expansion",
            "Strategic partnership signed",
            "Major investment round",
            "State incentive package approved",
            "CHIPS funding allocated",
            "Another grant cleared",
            "Second partnership inked",
            "Fresh investment pledged",
            "Incentive scheme extended",
            "Subsidy round two confirmed",
            "Grant renewal approved",
        ]));
        // raw clamps to +10 -> 100
        assert_eq!(result.score, 100);
        assert_eq!(result.detail["raw"], 10);
    }

    #[test]
    fn negative_hits_floor_at_zero() {
        let titles: Vec<String> = (0..12).map(|i| format!("Tariff escalation round {i}")).collect();
        let refs: Vec<&str> = titles.iter().map(|s| s.as_str()).collect();
        let result = ExogenousScoreEngine::new().score(&facts_with_titles(&refs));
        // raw = -24 clamps to -20 -> 0
        assert_eq!(result.score, 0);
        assert_eq!(result.detail["raw"], -20);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let result = ExogenousScoreEngine::new().score(&facts_with_titles(&[
            "GOVERNMENT STAKE under discussion",
            "Export Control tightening feared",
        ]));
        assert_eq!(result.detail["pos_hits"], 1);
        assert_eq!(result.detail["neg_hits"], 1);
    }

    #[test]
    fn headline_counts_once_per_polarity() {
        let result = ExogenousScoreEngine::new().score(&facts_with_titles(&[
            "Subsidy plus grant plus incentive in one package",
        ]));
        assert_eq!(result.detail["pos_hits"], 1);
        assert_eq!(result.detail["raw"], 1);
    }

    #[test]
    fn mixed_headline_hits_both_polarities() {
        // one headline can be both a positive and a negative hit
        let result = ExogenousScoreEngine::new().score(&facts_with_titles(&[
            "Partnership at risk from new tariff",
        ]));
        assert_eq!(result.detail["pos_hits"], 1);
        assert_eq!(result.detail["neg_hits"], 1);
        assert_eq!(result.detail["raw"], -1);
    }
}
