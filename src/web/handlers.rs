//! HTTP request handlers

use super::state::AppState;
use crate::error::SearchError;
use crate::providers::ProviderId;
use crate::results::SearchResponse;
use crate::search::SearchQuery;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::str::FromStr;

/// Query parameters for single-provider search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub provider: Option<String>,
    pub max_results: Option<usize>,
}

/// Query parameters for fallback search
#[derive(Debug, Deserialize)]
pub struct FallbackParams {
    pub q: Option<String>,
    pub max_results: Option<usize>,
    /// Comma-separated preference order
    pub providers: Option<String>,
}

/// Query parameters for multi-provider comparison search
#[derive(Debug, Deserialize)]
pub struct MultiParams {
    pub q: Option<String>,
    /// Comma-separated provider list; defaults to all configured
    pub providers: Option<String>,
    pub max_results_per_provider: Option<usize>,
}

/// Error shape returned by every endpoint
pub enum ApiError {
    Search(SearchError),
    UnknownProvider(String),
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        Self::Search(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::UnknownProvider(message) => (StatusCode::BAD_REQUEST, message),
            Self::Search(err) => {
                let status = match &err {
                    SearchError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
                    SearchError::ProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                    SearchError::ProviderTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
                    SearchError::ProviderFailure { .. } | SearchError::AllProvidersFailed { .. } => {
                        StatusCode::BAD_GATEWAY
                    }
                };
                (status, err.to_string())
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

fn require_query(q: Option<String>, max_results: Option<usize>) -> Result<SearchQuery, ApiError> {
    let text = q.unwrap_or_default();
    let mut query = SearchQuery::new(text);
    if let Some(max) = max_results {
        query = query.with_max_results(max);
    }
    query.validate()?;
    Ok(query)
}

fn parse_provider(name: &str) -> Result<ProviderId, ApiError> {
    ProviderId::from_str(name).map_err(ApiError::UnknownProvider)
}

fn parse_provider_list(list: &str) -> Result<Vec<ProviderId>, ApiError> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_provider)
        .collect()
}

/// `GET /search` — single-provider search
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = require_query(params.q, params.max_results)?;
    let provider = match params.provider.as_deref() {
        Some(name) => parse_provider(name)?,
        None => state.manager.default_provider(),
    };

    let response = state.manager.search(&query, provider).await?;
    Ok(Json(response))
}

/// `GET /search/fallback` — fallback search through a preference order
pub async fn search_fallback(
    State(state): State<AppState>,
    Query(params): Query<FallbackParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = require_query(params.q, params.max_results)?;
    let order = params
        .providers
        .as_deref()
        .map(parse_provider_list)
        .transpose()?;

    let response = state
        .manager
        .search_with_fallback(&query, order.as_deref())
        .await?;
    Ok(Json(response))
}

/// `GET /search/multi` — concurrent comparison search
pub async fn search_multi(
    State(state): State<AppState>,
    Query(params): Query<MultiParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = require_query(params.q, None)?;
    let providers = params
        .providers
        .as_deref()
        .map(parse_provider_list)
        .transpose()?;

    let response = state
        .manager
        .multi_provider_search(&query, providers.as_deref(), params.max_results_per_provider)
        .await?;
    Ok(Json(response))
}

/// `GET /providers` — provider availability and fallback chain
pub async fn providers(State(state): State<AppState>) -> Json<serde_json::Value> {
    let status = state.manager.provider_status();
    let available = status.iter().filter(|(_, ok)| *ok).count();

    let mut providers = serde_json::Map::new();
    for (id, ok) in status {
        providers.insert(id.as_str().to_string(), serde_json::json!(ok));
    }

    Json(serde_json::json!({
        "providers": providers,
        "default_provider": state.manager.default_provider().as_str(),
        "fallback_chain": state
            .manager
            .fallback_chain()
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>(),
        "total_available": available,
    }))
}

/// `GET /healthz` — liveness probe
pub async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "version": crate::VERSION }))
}
