use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::{
    CompanyOverview, FactSnapshot, FetchedDocument, Headline, QuarterFigures, ResearchError,
    SubScore, Window,
};

/// Market-data provider: company profile, the fixed ratio snapshot, and
/// quarterly revenue/net-income rows.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Public quote page recorded in `sources_used`.
    fn profile_url(&self, ticker: &str) -> String;

    async fn overview(&self, ticker: &str) -> Result<CompanyOverview, ResearchError>;

    /// Quarterly figures inside the window, keyed by ISO date. Callers
    /// keep only the 4 most recent rows.
    async fn quarterly_figures(
        &self,
        ticker: &str,
        window: &Window,
    ) -> Result<BTreeMap<String, QuarterFigures>, ResearchError>;
}

/// Filings registry (or a company IR page for overridden tickers).
#[async_trait]
pub trait FilingsSource: Send + Sync {
    /// Discovery URL for this ticker; also what the restricted marker
    /// points at when the fetch degrades.
    fn discovery_url(&self, ticker: &str) -> String;

    /// Never fails: any transport problem comes back as the restricted
    /// marker for the discovery URL.
    async fn fetch(&self, ticker: &str) -> FetchedDocument;
}

/// News feed returning recent headlines, most-recent-first.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Feed base URL recorded in `sources_used`.
    fn feed_url(&self) -> String;

    async fn headlines(&self, ticker: &str, limit: usize)
        -> Result<Vec<Headline>, ResearchError>;
}

/// Per-ticker enrichment hook. Providers are looked up by ticker and
/// contribute extra snapshot sections; unmatched tickers get nothing.
pub trait EnrichmentProvider: Send + Sync {
    /// Uppercase ticker this provider responds to.
    fn ticker(&self) -> &'static str;

    fn enrich(&self, ticker: &str) -> serde_json::Map<String, serde_json::Value>;
}

/// A scorer is a pure function of the fact snapshot. Implementations must
/// not mutate the snapshot and must return a score clamped to [0, 100].
pub trait Scorer: Send + Sync {
    fn name(&self) -> &'static str;

    fn score(&self, facts: &FactSnapshot) -> SubScore;
}
