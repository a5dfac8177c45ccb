use research_core::scale::{clamp_round, clamp_score, mean};
use research_core::{FactSnapshot, FinancialRatios, Scorer, SubScore};
use serde_json::json;

/// Sub-dimension weights. Must sum to 1.0.
const WEIGHTS: [(&str, f64); 7] = [
    ("profitability", 0.25),
    ("growth", 0.20),
    ("balance_sheet", 0.15),
    ("cashflow_quality", 0.10),
    ("valuation", 0.20),
    ("industry_position", 0.05),
    ("regulatory_signals", 0.05),
];

fn weight_of(name: &str) -> f64 {
    WEIGHTS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, w)| *w)
        .unwrap_or(0.0)
}

/// Converts the snapshot's ratios and quarterly figures into a 0-100
/// score across seven named sub-dimensions.
pub struct FinancialScoreEngine;

impl FinancialScoreEngine {
    pub fn new() -> Self {
        Self
    }

    /// Average of whichever of profit margin, operating margin, and ROE
    /// are present; missing ratios are excluded, not zero-filled. The
    /// `20 * count_present` term rewards having more signals independent
    /// of their magnitude (deliberate heuristic, kept as-is). A fully
    /// blank ratio set averages to -0.2.
    fn profitability(&self, ratios: &FinancialRatios) -> i64 {
        let present: Vec<f64> = [
            ratios.profit_margins,
            ratios.operating_margins,
            ratios.return_on_equity,
        ]
        .into_iter()
        .flatten()
        .collect();

        let avg = if present.is_empty() {
            -0.2
        } else {
            mean(&present)
        };
        clamp_score(50.0 + 20.0 * present.len() as f64 + 100.0 * avg)
    }

    /// Revenue trend across the reported quarters, earliest vs latest.
    /// Fewer than two usable figures (or a zero base) is penalized with a
    /// fixed -5% growth assumption.
    fn growth(&self, facts: &FactSnapshot) -> i64 {
        let revs: Vec<f64> = facts
            .last_4_quarters
            .values()
            .filter_map(|q| q.revenue)
            .collect();

        let growth = if revs.len() >= 2 && revs[0] != 0.0 {
            (revs[revs.len() - 1] - revs[0]) / revs[0].abs()
        } else {
            -0.05
        };
        clamp_score(50.0 + 200.0 * growth)
    }

    /// Higher leverage lowers the score; the ratio is capped at 200 so a
    /// pathological debt-to-equity cannot dominate. Unknown leverage is
    /// neutral.
    fn balance_sheet(&self, ratios: &FinancialRatios) -> i64 {
        match ratios.debt_to_equity {
            None => 50,
            Some(d2e) => clamp_score(80.0 - d2e.min(200.0) / 2.0),
        }
    }

    /// Rough P/B and P/E check around a neutral 50, each adjustment
    /// clamped to +/-20. Non-positive P/E carries no signal here.
    fn valuation(&self, ratios: &FinancialRatios) -> i64 {
        let mut val: i64 = 50;

        if let Some(pb) = ratios.price_to_book {
            val += clamp_round(10.0 * (1.5 - pb.min(5.0)), -20, 20);
        }

        let pe = ratios.trailing_pe.or(ratios.forward_pe);
        if let Some(pe) = pe {
            if pe > 0.0 {
                val += clamp_round(5.0 * (12.0 - pe.min(40.0)) / 12.0, -20, 20);
            }
        }

        clamp_score(val as f64)
    }
}

impl Scorer for FinancialScoreEngine {
    fn name(&self) -> &'static str {
        "financial"
    }

    fn score(&self, facts: &FactSnapshot) -> SubScore {
        let subscores: [(&str, i64); 7] = [
            ("profitability", self.profitability(&facts.financial_ratios)),
            ("growth", self.growth(facts)),
            ("balance_sheet", self.balance_sheet(&facts.financial_ratios)),
            // No cash-flow-statement data in this pipeline; placeholder.
            ("cashflow_quality", 50),
            ("valuation", self.valuation(&facts.financial_ratios)),
            // Unimplemented signals, kept neutral as extension points.
            ("industry_position", 50),
            ("regulatory_signals", 50),
        ];

        let blended: f64 = subscores
            .iter()
            .map(|(name, s)| *s as f64 * weight_of(name))
            .sum();
        let score = clamp_score(blended);

        let mut detail = serde_json::Map::new();
        for (name, s) in &subscores {
            detail.insert((*name).to_string(), json!(s));
        }

        tracing::debug!(ticker = %facts.ticker, score, "financial score computed");

        SubScore {
            score,
            detail: serde_json::Value::Object(detail),
        }
    }
}

impl Default for FinancialScoreEngine {
    fn default() -> Self {
        Self::new()
    }
}
