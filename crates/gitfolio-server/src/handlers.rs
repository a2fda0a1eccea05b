//! Request handlers

use crate::error::ApiError;
use crate::AppState;
use axum::extract::{Query, State};
use axum::Json;
use gitfolio_core::{CacheStats, RepositoryRecord, SearchQuery};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query string of `GET /api/portfolio/search`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub repo_name: Option<String>,
    pub language: Option<String>,
    pub user: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub cache: CacheStats,
}

/// GET /api/portfolio - enriched repositories of the configured user
pub async fn get_portfolio(
    State(state): State<AppState>,
) -> Result<Json<Arc<Vec<RepositoryRecord>>>, ApiError> {
    let portfolio = state.portfolio.get_portfolio().await?;
    Ok(Json(portfolio))
}

/// GET /api/portfolio/search - uncached repository search
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<RepositoryRecord>>, ApiError> {
    let query = SearchQuery::parse(
        params.repo_name.as_deref(),
        params.language.as_deref(),
        params.user.as_deref(),
    )?;
    let records = state.aggregator.search(&query).await?;
    Ok(Json(records))
}

/// GET /health - liveness plus portfolio cache counters
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cache: state.portfolio.stats(),
    })
}
