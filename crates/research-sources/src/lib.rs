//! External data collaborators: market-data provider, filings registry,
//! and news feed. Every client applies a bounded timeout and degrades to
//! nulls, empty collections, or the restricted marker instead of failing
//! the request.

pub mod fetch;
pub mod filings;
pub mod market;
pub mod news;

pub use filings::FilingsClient;
pub use market::MarketDataClient;
pub use news::NewsFeedClient;

use std::time::Duration;

/// Bounded per-fetch timeout; a slow source resolves to a degraded value
/// instead of stalling the request.
pub(crate) const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Descriptive outbound identifier, sent so registry operators can reach
/// us (SEC fair-access policy expects a contact string).
pub(crate) const CLIENT_IDENT: &str =
    "OpenResearch/1.0 (contact: research@openresearch.example)";

pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(CLIENT_IDENT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
