//! Research pipeline orchestration: fan out over the external sources,
//! join into one immutable fact snapshot, run the three scorers, and
//! compose the verdict.

use chrono::{Duration, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

use behavioral_score::BehavioralScoreEngine;
use exogenous_score::ExogenousScoreEngine;
use financial_score::FinancialScoreEngine;
use research_core::{
    CompanyOverview, FactSnapshot, FilingsSource, MarketDataSource, NewsSource, ResearchError,
    Scorer, Verdict, Window,
};
use research_sources::{FilingsClient, MarketDataClient, NewsFeedClient};

pub mod composer;
pub mod enrichment;

pub use enrichment::{EnrichmentRegistry, IntelDemoEnrichment};

const WINDOW_DAYS: i64 = 365;
const MAX_HEADLINES: usize = 30;
const MAX_QUARTERS: usize = 4;
const TICKER_MAX_LEN: usize = 10;

pub struct ResearchOrchestrator {
    market: Arc<dyn MarketDataSource>,
    filings: Arc<dyn FilingsSource>,
    news: Arc<dyn NewsSource>,
    financial: FinancialScoreEngine,
    exogenous: ExogenousScoreEngine,
    behavioral: BehavioralScoreEngine,
    enrichment: EnrichmentRegistry,
}

impl ResearchOrchestrator {
    /// Orchestrator wired to the live HTTP collaborators.
    pub fn new() -> Self {
        Self::with_sources(
            Arc::new(MarketDataClient::new()),
            Arc::new(FilingsClient::new()),
            Arc::new(NewsFeedClient::new()),
            EnrichmentRegistry::with_defaults(),
        )
    }

    /// Injection point: tests swap in canned sources here.
    pub fn with_sources(
        market: Arc<dyn MarketDataSource>,
        filings: Arc<dyn FilingsSource>,
        news: Arc<dyn NewsSource>,
        enrichment: EnrichmentRegistry,
    ) -> Self {
        Self {
            market,
            filings,
            news,
            financial: FinancialScoreEngine::new(),
            exogenous: ExogenousScoreEngine::new(),
            behavioral: BehavioralScoreEngine::new(),
            enrichment,
        }
    }

    /// Canonical ticker form: trimmed, uppercased, 1-10 characters.
    pub fn normalize_ticker(ticker: &str) -> Result<String, ResearchError> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() || ticker.len() > TICKER_MAX_LEN {
            return Err(ResearchError::InvalidTicker(ticker));
        }
        Ok(ticker)
    }

    /// Trailing 12-month window anchored on the current UTC date.
    fn window() -> Window {
        let to = Utc::now().date_naive();
        Window {
            from: to - Duration::days(WINDOW_DAYS),
            to,
        }
    }

    /// Collect raw facts for `ticker` into one snapshot. The sources fan
    /// out concurrently and each failure degrades only its own field;
    /// this never returns an error for a valid ticker.
    pub async fn aggregate_facts(&self, ticker: &str) -> FactSnapshot {
        let window = Self::window();
        tracing::info!(ticker, from = %window.from, to = %window.to, "aggregating facts");

        let (overview, quarters, filings, headlines) = tokio::join!(
            self.market.overview(ticker),
            self.market.quarterly_figures(ticker, &window),
            self.filings.fetch(ticker),
            self.news.headlines(ticker, MAX_HEADLINES),
        );

        let overview = overview.unwrap_or_else(|e| {
            tracing::warn!(ticker, error = %e, "company overview degraded to nulls");
            CompanyOverview::default()
        });

        let mut quarters = quarters.unwrap_or_else(|e| {
            tracing::warn!(ticker, error = %e, "quarterly figures degraded to empty");
            BTreeMap::new()
        });
        // keep only the most recent rows; ISO keys sort chronologically
        while quarters.len() > MAX_QUARTERS {
            let Some(oldest) = quarters.keys().next().cloned() else {
                break;
            };
            quarters.remove(&oldest);
        }

        if filings.is_restricted() {
            tracing::warn!(ticker, "filings source restricted");
        }

        let headlines: Vec<_> = headlines
            .unwrap_or_else(|e| {
                tracing::warn!(ticker, error = %e, "news feed degraded to empty");
                Vec::new()
            })
            .into_iter()
            .take(MAX_HEADLINES)
            .collect();

        let sources_used = vec![
            self.market.profile_url(ticker),
            self.filings.discovery_url(ticker),
            self.news.feed_url(),
        ];

        FactSnapshot {
            ticker: ticker.to_string(),
            window,
            company_info: overview.info,
            last_4_quarters: quarters,
            financial_ratios: overview.ratios,
            edgar_filings: filings,
            news_headlines: headlines,
            sources_used,
            enrichment: self.enrichment.enrich(ticker),
        }
    }

    /// Full pipeline: validate, aggregate, score, compose. The only
    /// request-level failure is an invalid ticker.
    pub async fn research(&self, ticker: &str) -> Result<Verdict, ResearchError> {
        let ticker = Self::normalize_ticker(ticker)?;
        let facts = self.aggregate_facts(&ticker).await;

        let financial = self.financial.score(&facts);
        let exogenous = self.exogenous.score(&facts);
        let behavioral = self.behavioral.score(&facts);
        tracing::info!(
            ticker,
            financial = financial.score,
            exogenous = exogenous.score,
            behavioral = behavioral.score,
            "sub-scores computed"
        );

        Ok(composer::compose(
            &ticker, facts, financial, exogenous, behavioral,
        ))
    }
}

impl Default for ResearchOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}
