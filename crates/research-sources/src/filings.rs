//! Filings-registry client.
//!
//! Points at the EDGAR full-text search page for most tickers; a small
//! override table redirects tickers whose registry page is known to be
//! unusable to the company's own IR filings page instead.

use async_trait::async_trait;
use reqwest::Client;

use research_core::{FetchedDocument, FilingsSource};

use crate::fetch::fetch_document;

/// (ticker, IR filings page) overrides for the generic registry pattern.
const DISCOVERY_OVERRIDES: &[(&str, &str)] = &[(
    "INTC",
    "https://www.intc.com/filings-reports/all-sec-filings",
)];

#[derive(Clone)]
pub struct FilingsClient {
    client: Client,
}

impl FilingsClient {
    pub fn new() -> Self {
        Self {
            client: crate::http_client(),
        }
    }
}

impl Default for FilingsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FilingsSource for FilingsClient {
    fn discovery_url(&self, ticker: &str) -> String {
        let upper = ticker.to_uppercase();
        if let Some((_, url)) = DISCOVERY_OVERRIDES.iter().find(|(t, _)| *t == upper) {
            return (*url).to_string();
        }
        format!(
            "https://www.sec.gov/edgar/search/#/q={upper}&category=custom&forms=10-K,10-Q,8-K"
        )
    }

    async fn fetch(&self, ticker: &str) -> FetchedDocument {
        let url = self.discovery_url(ticker);
        tracing::debug!(ticker, url, "fetching filings discovery page");
        fetch_document(&self.client, &url).await
    }
}
