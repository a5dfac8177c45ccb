use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current UTC time at second precision with a trailing "Z".
pub fn now_utc_iso() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Trailing analysis window, date precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Company profile fields from the market-data provider.
/// Every field is nullable: a missing profile degrades to all-null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
    #[serde(rename = "longName")]
    pub long_name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub exchange: Option<String>,
    pub country: Option<String>,
}

/// The fixed ratio snapshot consumed by the financial scorer.
/// Keys mirror the market-data provider's naming; absent values stay null
/// and are excluded from downstream averages, never zero-filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialRatios {
    #[serde(rename = "trailingPE")]
    pub trailing_pe: Option<f64>,
    #[serde(rename = "forwardPE")]
    pub forward_pe: Option<f64>,
    #[serde(rename = "priceToBook")]
    pub price_to_book: Option<f64>,
    #[serde(rename = "returnOnEquity")]
    pub return_on_equity: Option<f64>,
    #[serde(rename = "profitMargins")]
    pub profit_margins: Option<f64>,
    #[serde(rename = "debtToEquity")]
    pub debt_to_equity: Option<f64>,
    #[serde(rename = "operatingMargins")]
    pub operating_margins: Option<f64>,
}

/// Revenue and net income for one fiscal quarter. Other statement lines
/// are discarded at the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QuarterFigures {
    #[serde(rename = "Revenue")]
    pub revenue: Option<f64>,
    #[serde(rename = "NetIncome")]
    pub net_income: Option<f64>,
}

/// Profile and ratios come from the same provider call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyOverview {
    pub info: CompanyInfo,
    pub ratios: FinancialRatios,
}

/// One news headline as returned by the feed, most-recent-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    pub link: String,
    pub published: Option<String>,
}

/// Sentinel substituted wherever a source fetch fails, times out, or
/// returns a non-success status. Serializes as
/// `{"restricted; visit link": "<url>"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestrictedMarker {
    #[serde(rename = "restricted; visit link")]
    pub visit_link: String,
}

impl RestrictedMarker {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            visit_link: url.into(),
        }
    }
}

/// Result of fetching an external document. Untagged so the restricted
/// marker stays distinguishable from valid payloads without erroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FetchedDocument {
    /// Source unreachable, non-2xx, or paywalled.
    Restricted(RestrictedMarker),
    /// Non-JSON response; body truncated at the source.
    Text { url: String, content: String },
    /// Structured JSON payload passed through as-is.
    Json(serde_json::Value),
}

impl FetchedDocument {
    pub fn restricted(url: impl Into<String>) -> Self {
        FetchedDocument::Restricted(RestrictedMarker::new(url))
    }

    pub fn is_restricted(&self) -> bool {
        matches!(self, FetchedDocument::Restricted(_))
    }
}

/// Aggregated, normalized external data for one ticker over a trailing
/// 12-month window. Immutable once assembled: scorers take it by shared
/// reference and never mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactSnapshot {
    pub ticker: String,
    pub window: Window,
    pub company_info: CompanyInfo,
    /// ISO date -> figures. BTreeMap keeps ISO keys chronologically
    /// ordered, so the most recent quarter iterates last. At most 4 rows.
    pub last_4_quarters: BTreeMap<String, QuarterFigures>,
    pub financial_ratios: FinancialRatios,
    pub edgar_filings: FetchedDocument,
    pub news_headlines: Vec<Headline>,
    pub sources_used: Vec<String>,
    /// Extra sections contributed by a matching enrichment provider
    /// (corporate actions, leadership, dividends for the demo ticker).
    /// Flattened into the snapshot body; absent for most tickers.
    #[serde(flatten)]
    pub enrichment: Option<serde_json::Map<String, serde_json::Value>>,
}

/// One bounded heuristic rating plus its diagnostic detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    /// Integer in [0, 100] inclusive, clamped.
    pub score: i64,
    pub detail: serde_json::Value,
}

/// Discrete verdict rating, a step function of the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Buy,
    Hold,
    Sell,
}

impl Rating {
    pub fn from_score(overall: i64) -> Self {
        if overall >= 70 {
            Rating::Buy
        } else if overall >= 50 {
            Rating::Hold
        } else {
            Rating::Sell
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Buy => "Buy",
            Rating::Hold => "Hold",
            Rating::Sell => "Sell",
        }
    }
}

/// Weighted blend of the three sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallScore {
    pub score: i64,
    pub rating: Rating,
}

/// Full research response for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub as_of: String,
    pub ticker: String,
    pub facts: FactSnapshot,
    pub financial: SubScore,
    pub exogenous: SubScore,
    pub behavioral: SubScore,
    pub overall: OverallScore,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restricted_marker_serializes_to_sentinel_object() {
        let doc = FetchedDocument::restricted("https://www.sec.gov/edgar/search/");
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"restricted; visit link": "https://www.sec.gov/edgar/search/"})
        );
    }

    #[test]
    fn restricted_marker_round_trips_as_restricted() {
        let json = serde_json::json!({"restricted; visit link": "https://example.com/ir"});
        let doc: FetchedDocument = serde_json::from_value(json).unwrap();
        assert!(doc.is_restricted());
    }

    #[test]
    fn json_payload_is_not_restricted() {
        let json = serde_json::json!({"filings": [{"form": "10-K"}]});
        let doc: FetchedDocument = serde_json::from_value(json).unwrap();
        assert!(!doc.is_restricted());
    }

    #[test]
    fn rating_step_function_boundaries() {
        assert_eq!(Rating::from_score(70), Rating::Buy);
        assert_eq!(Rating::from_score(69), Rating::Hold);
        assert_eq!(Rating::from_score(50), Rating::Hold);
        assert_eq!(Rating::from_score(49), Rating::Sell);
        assert_eq!(Rating::from_score(100), Rating::Buy);
        assert_eq!(Rating::from_score(0), Rating::Sell);
    }

    #[test]
    fn quarter_map_iterates_most_recent_last() {
        let mut quarters = BTreeMap::new();
        quarters.insert(
            "2025-06-30".to_string(),
            QuarterFigures {
                revenue: Some(4.0),
                net_income: None,
            },
        );
        quarters.insert(
            "2024-09-30".to_string(),
            QuarterFigures {
                revenue: Some(1.0),
                net_income: None,
            },
        );
        quarters.insert(
            "2025-03-31".to_string(),
            QuarterFigures {
                revenue: Some(3.0),
                net_income: None,
            },
        );
        let revs: Vec<f64> = quarters.values().filter_map(|q| q.revenue).collect();
        assert_eq!(revs, vec![1.0, 3.0, 4.0]);
    }

    #[test]
    fn now_utc_iso_has_second_precision_and_z() {
        let ts = now_utc_iso();
        assert_eq!(ts.len(), 20);
        assert!(ts.ends_with('Z'));
        assert!(!ts.contains('.'));
    }
}
