//! Result type definitions

use crate::providers::ProviderId;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// A single normalized search result
///
/// Provider-agnostic representation of one hit; adapters map their wire
/// formats into this shape and nothing downstream cares who produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// Result title
    pub title: String,
    /// Result URL (may be empty for AI answers)
    pub url: String,
    /// Content snippet or summary
    pub snippet: String,
    /// Originating source label (e.g. "DuckDuckGo", "Tavily AI")
    pub source: Option<String>,
    /// Publication date as reported by the provider
    pub published_date: Option<String>,
    /// Provider-specific extras (position, score, answer type, ...)
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl SearchResult {
    /// Create a new result
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            source: None,
            published_date: None,
            metadata: HashMap::new(),
        }
    }

    /// Set the source label
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the publication date
    pub fn with_published_date(mut self, date: impl Into<String>) -> Self {
        self.published_date = Some(date.into());
        self
    }

    /// Attach a metadata entry
    pub fn with_meta(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// What produced a response: one concrete provider, or the aggregate of a
/// multi-provider comparison search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSource {
    Provider(ProviderId),
    Multi,
}

impl std::fmt::Display for SearchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provider(id) => write!(f, "{}", id),
            Self::Multi => write!(f, "multi"),
        }
    }
}

impl Serialize for SearchSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Normalized response returned by every search operation
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchResponse {
    /// The query text, echoed back
    pub query: String,
    /// Provider that produced the response, or the "multi" marker
    pub provider: SearchSource,
    /// Always equals `results.len()`; provider-reported estimates live in
    /// `metadata` instead
    pub total_results: usize,
    /// Wall-clock search time in seconds
    pub search_time: f64,
    /// Ordered result sequence
    pub results: Vec<SearchResult>,
    /// Response-level metadata (per-provider outcomes, fallback attempts, ...)
    pub metadata: HashMap<String, serde_json::Value>,
}

impl SearchResponse {
    /// Create a response; `total_results` is derived from the results
    pub fn new(
        query: impl Into<String>,
        provider: SearchSource,
        results: Vec<SearchResult>,
    ) -> Self {
        Self {
            query: query.into(),
            provider,
            total_results: results.len(),
            search_time: 0.0,
            results,
            metadata: HashMap::new(),
        }
    }

    /// Set the elapsed search time
    pub fn with_search_time(mut self, seconds: f64) -> Self {
        self.search_time = seconds;
        self
    }

    /// Attach a metadata entry
    pub fn insert_meta(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.metadata.insert(key.into(), value);
    }
}

/// Why a provider call produced no results
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProviderError {
    /// Required credentials were not resolved at startup
    NotConfigured,
    /// No outcome within the per-provider timeout
    Timeout,
    /// Transport-level failure
    Network(String),
    /// Non-success HTTP status
    Http(u16),
    /// HTTP 429
    RateLimited,
    /// HTTP 403
    AccessDenied,
    /// Response body could not be interpreted
    Parse(String),
    /// The adapter could not build its request
    Request(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "provider not configured"),
            Self::Timeout => write!(f, "request timed out"),
            Self::Network(msg) => write!(f, "network error: {}", msg),
            Self::Http(code) => write!(f, "HTTP error: {}", code),
            Self::RateLimited => write!(f, "too many requests"),
            Self::AccessDenied => write!(f, "access denied"),
            Self::Parse(msg) => write!(f, "failed to parse response: {}", msg),
            Self::Request(msg) => write!(f, "failed to build request: {}", msg),
        }
    }
}

/// Terminal outcome of one dispatched provider call
///
/// Internal to the scheduler and dispatcher; the manager folds these into
/// `SearchResponse` metadata or typed errors before anything reaches a caller.
#[derive(Debug, Clone)]
pub enum ProviderOutcome {
    Success(SearchResponse),
    Failure(ProviderError),
    Unavailable,
}

impl ProviderOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Outcome summary for response metadata, keeping "returned zero
    /// results" distinguishable from "failed".
    pub fn summary(&self) -> serde_json::Value {
        match self {
            Self::Success(response) => serde_json::json!({
                "status": "success",
                "result_count": response.total_results,
                "search_time": response.search_time,
            }),
            Self::Failure(error) => serde_json::json!({
                "status": "failure",
                "error": error.to_string(),
            }),
            Self::Unavailable => serde_json::json!({
                "status": "unavailable",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_builder() {
        let result = SearchResult::new("Rust", "https://rust-lang.org", "A language")
            .with_source("DuckDuckGo")
            .with_meta("position", serde_json::json!(1));

        assert_eq!(result.source.as_deref(), Some("DuckDuckGo"));
        assert_eq!(result.metadata["position"], serde_json::json!(1));
    }

    #[test]
    fn test_response_count_matches_results() {
        let results = vec![
            SearchResult::new("a", "https://a.example", ""),
            SearchResult::new("b", "https://b.example", ""),
        ];
        let response =
            SearchResponse::new("q", SearchSource::Provider(ProviderId::DuckDuckGo), results);

        assert_eq!(response.total_results, response.results.len());
    }

    #[test]
    fn test_source_serializes_as_string() {
        let single = serde_json::to_value(SearchSource::Provider(ProviderId::Tavily)).unwrap();
        assert_eq!(single, serde_json::json!("tavily"));

        let multi = serde_json::to_value(SearchSource::Multi).unwrap();
        assert_eq!(multi, serde_json::json!("multi"));
    }

    #[test]
    fn test_outcome_summary_distinguishes_empty_from_failed() {
        let empty = ProviderOutcome::Success(SearchResponse::new(
            "q",
            SearchSource::Provider(ProviderId::SerpApi),
            vec![],
        ));
        let failed = ProviderOutcome::Failure(ProviderError::Http(500));

        assert_eq!(empty.summary()["status"], "success");
        assert_eq!(empty.summary()["result_count"], 0);
        assert_eq!(failed.summary()["status"], "failure");
    }
}
