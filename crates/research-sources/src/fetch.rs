use reqwest::Client;
use research_core::FetchedDocument;

/// Cap on pass-through text bodies.
const MAX_TEXT_CHARS: usize = 50_000;

/// GET `url` and classify the body. Never fails: transport errors,
/// timeouts, and non-2xx statuses all resolve to the restricted marker
/// pointing back at the URL.
pub async fn fetch_document(client: &Client, url: &str) -> FetchedDocument {
    let response = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(url, error = %e, "document fetch failed");
            return FetchedDocument::restricted(url);
        }
    };

    if !response.status().is_success() {
        tracing::warn!(url, status = %response.status(), "document fetch returned non-success");
        return FetchedDocument::restricted(url);
    }

    let is_json = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.contains("application/json"))
        .unwrap_or(false)
        || url.ends_with(".json");

    if is_json {
        match response.json::<serde_json::Value>().await {
            Ok(value) => FetchedDocument::Json(value),
            Err(e) => {
                tracing::warn!(url, error = %e, "document body was not valid JSON");
                FetchedDocument::restricted(url)
            }
        }
    } else {
        match response.text().await {
            Ok(body) => FetchedDocument::Text {
                url: url.to_string(),
                content: body.chars().take(MAX_TEXT_CHARS).collect(),
            },
            Err(e) => {
                tracing::warn!(url, error = %e, "document body read failed");
                FetchedDocument::restricted(url)
            }
        }
    }
}
