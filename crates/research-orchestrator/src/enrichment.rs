//! Per-ticker enrichment lookup.
//!
//! Extra snapshot sections (corporate actions, leadership, dividends) are
//! contributed by providers registered against a specific ticker. Tickers
//! without a provider get nothing; the general pipeline carries no
//! company-specific branches.

use research_core::EnrichmentProvider;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

pub struct EnrichmentRegistry {
    providers: HashMap<String, Arc<dyn EnrichmentProvider>>,
}

impl EnrichmentRegistry {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Production registry: just the Intel walkthrough provider.
    pub fn with_defaults() -> Self {
        Self::new().register(Arc::new(IntelDemoEnrichment))
    }

    pub fn register(mut self, provider: Arc<dyn EnrichmentProvider>) -> Self {
        self.providers
            .insert(provider.ticker().to_string(), provider);
        self
    }

    pub fn enrich(&self, ticker: &str) -> Option<Map<String, Value>> {
        self.providers
            .get(&ticker.to_uppercase())
            .map(|p| p.enrich(ticker))
            .filter(|sections| !sections.is_empty())
    }
}

impl Default for EnrichmentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Illustrative sections for the INTC walkthrough, pointing readers at
/// public pages rather than asserting facts of our own.
pub struct IntelDemoEnrichment;

impl EnrichmentProvider for IntelDemoEnrichment {
    fn ticker(&self) -> &'static str {
        "INTC"
    }

    fn enrich(&self, ticker: &str) -> Map<String, Value> {
        let mut sections = Map::new();
        sections.insert(
            "corporate_actions".to_string(),
            json!([{
                "item": "Example: Noted major partnership and restructuring in last 12 months (see news/filings).",
                "sources": [
                    "https://www.intc.com/filings-reports/all-sec-filings",
                    format!("https://news.google.com/search?q={ticker}"),
                ],
            }]),
        );
        sections.insert(
            "leadership".to_string(),
            json!({
                "change": "Example: leadership changes referenced in public news.",
                "sources": [format!("https://news.google.com/search?q={ticker}+leadership")],
            }),
        );
        sections.insert(
            "dividends".to_string(),
            json!({
                "status": "Check company IR or Yahoo 'Dividends' tab for current status.",
                "sources": [format!("https://finance.yahoo.com/quote/{ticker}/history?p={ticker}")],
            }),
        );
        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_ticker_is_a_no_op() {
        let registry = EnrichmentRegistry::with_defaults();
        assert!(registry.enrich("AAPL").is_none());
    }

    #[test]
    fn matched_ticker_contributes_sections() {
        let registry = EnrichmentRegistry::with_defaults();
        let sections = registry.enrich("INTC").unwrap();
        assert!(sections.contains_key("corporate_actions"));
        assert!(sections.contains_key("leadership"));
        assert!(sections.contains_key("dividends"));
    }

    #[test]
    fn lookup_is_case_insensitive_on_ticker() {
        let registry = EnrichmentRegistry::with_defaults();
        assert!(registry.enrich("intc").is_some());
    }

    #[test]
    fn empty_registry_enriches_nothing() {
        assert!(EnrichmentRegistry::new().enrich("INTC").is_none());
    }
}
