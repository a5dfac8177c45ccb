//! Research Routes
//!
//! Single endpoint returning facts, sub-scores, and the composite verdict
//! for a ticker.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use research_core::Verdict;

use crate::{ApiError, AppState};

#[derive(Deserialize)]
pub struct ResearchQuery {
    pub ticker: String,
}

pub fn research_routes() -> Router<AppState> {
    Router::new().route("/api/research", get(get_research))
}

/// Facts + scores + verdict for a ticker using only free/public sources.
/// Restricted or unreachable sources come back inline as
/// `{"restricted; visit link": "<url>"}` for that item.
async fn get_research(
    State(state): State<AppState>,
    Query(query): Query<ResearchQuery>,
) -> Result<Json<Verdict>, ApiError> {
    let verdict = state.orchestrator.research(&query.ticker).await?;
    Ok(Json(verdict))
}
