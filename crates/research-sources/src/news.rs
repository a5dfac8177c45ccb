//! News-feed client (Google News RSS search).

use async_trait::async_trait;
use reqwest::Client;

use research_core::{Headline, NewsSource, ResearchError};

const FEED_BASE: &str = "https://news.google.com/rss/";

fn parse_feed(bytes: &[u8], limit: usize) -> Result<Vec<Headline>, ResearchError> {
    let channel = rss::Channel::read_from(bytes).map_err(|e| ResearchError::Data(e.to_string()))?;
    Ok(channel
        .items()
        .iter()
        .take(limit)
        .map(|item| Headline {
            title: item.title().unwrap_or_default().to_string(),
            link: item.link().unwrap_or_default().to_string(),
            published: item.pub_date().map(|d| d.to_string()),
        })
        .collect())
}

#[derive(Clone)]
pub struct NewsFeedClient {
    client: Client,
}

impl NewsFeedClient {
    pub fn new() -> Self {
        Self {
            client: crate::http_client(),
        }
    }
}

impl Default for NewsFeedClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NewsSource for NewsFeedClient {
    fn feed_url(&self) -> String {
        FEED_BASE.to_string()
    }

    async fn headlines(
        &self,
        ticker: &str,
        limit: usize,
    ) -> Result<Vec<Headline>, ResearchError> {
        // "when:365d" keeps the feed aligned with the snapshot window
        let query = format!("{ticker} when:365d");
        let url = format!(
            "{FEED_BASE}search?q={}&hl=en-US&gl=US&ceid=US:en",
            urlencoding::encode(&query)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ResearchError::Source(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ResearchError::Source(format!(
                "HTTP {} from news feed",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ResearchError::Source(e.to_string()))?;

        let headlines = parse_feed(&bytes, limit)?;
        tracing::debug!(ticker, count = headlines.len(), "news headlines fetched");
        Ok(headlines)
    }
}
