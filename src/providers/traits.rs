//! Provider contract and request/response types

use super::ProviderId;
use crate::config::ProviderSettings;
use crate::results::SearchResult;
use crate::search::SearchQuery;
use std::collections::HashMap;

/// HTTP request to be made on behalf of a provider
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// URL to request
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters
    pub params: HashMap<String, String>,
    /// Request body
    pub body: Option<RequestBody>,
}

impl ProviderRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Get,
            headers: HashMap::new(),
            params: HashMap::new(),
            body: None,
        }
    }

    /// Create a POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Post,
            headers: HashMap::new(),
            params: HashMap::new(),
            body: None,
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Set a form body
    pub fn form(mut self, data: HashMap<String, String>) -> Self {
        self.body = Some(RequestBody::Form(data));
        self
    }

    /// Set a JSON body
    pub fn json(mut self, data: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(data));
        self
    }
}

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Request body types
#[derive(Debug, Clone)]
pub enum RequestBody {
    Form(HashMap<String, String>),
    Json(serde_json::Value),
}

/// HTTP response handed back to the provider for parsing
#[derive(Debug)]
pub struct ProviderResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl ProviderResponse {
    /// Parse the body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> anyhow::Result<T> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Check if the response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Normalized output of one provider parse
#[derive(Debug, Clone, Default)]
pub struct ProviderResults {
    /// Normalized search results
    pub results: Vec<SearchResult>,
    /// Provider-reported total estimate, if any
    pub total_results: Option<u64>,
    /// Provider-specific response metadata
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ProviderResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            ..Default::default()
        }
    }

    pub fn add_result(&mut self, result: SearchResult) {
        self.results.push(result);
    }

    pub fn insert_meta(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.metadata.insert(key.into(), value);
    }
}

/// Contract every provider adapter must satisfy
///
/// Adapters are pure request builders and response parsers; the shared HTTP
/// client executes the request and the dispatch layer enforces the timeout
/// and converts any error into a typed outcome. Nothing here may panic
/// across the boundary on malformed provider data.
pub trait Provider: Send + Sync {
    /// Provider identifier
    fn id(&self) -> ProviderId;

    /// Whether this provider needs an API key to be available
    fn requires_api_key(&self) -> bool {
        true
    }

    /// Build the HTTP request for a search
    fn request(
        &self,
        query: &SearchQuery,
        settings: &ProviderSettings,
    ) -> anyhow::Result<ProviderRequest>;

    /// Parse a successful HTTP response into normalized results
    fn parse(
        &self,
        response: ProviderResponse,
        query: &SearchQuery,
        settings: &ProviderSettings,
    ) -> anyhow::Result<ProviderResults>;
}
