//! SerpAPI provider (Google, Bing and other engines behind one API)

use super::traits::*;
use super::ProviderId;
use crate::config::ProviderSettings;
use crate::results::SearchResult;
use crate::search::SearchQuery;
use anyhow::{anyhow, Result};

pub struct SerpApi {
    base_url: String,
}

impl SerpApi {
    pub fn new() -> Self {
        Self {
            base_url: "https://serpapi.com/search".to_string(),
        }
    }

    fn parse_organic(&self, data: &serde_json::Value) -> Vec<SearchResult> {
        let mut results = Vec::new();

        for item in data
            .get("organic_results")
            .and_then(|v| v.as_array())
            .map(|a| a.as_slice())
            .unwrap_or_default()
        {
            let mut result = SearchResult::new(
                item.get("title").and_then(|v| v.as_str()).unwrap_or_default(),
                item.get("link").and_then(|v| v.as_str()).unwrap_or_default(),
                item.get("snippet").and_then(|v| v.as_str()).unwrap_or_default(),
            );
            if let Some(source) = item.get("source").and_then(|v| v.as_str()) {
                result = result.with_source(source);
            }
            if let Some(date) = item.get("date").and_then(|v| v.as_str()) {
                result = result.with_published_date(date);
            }
            if let Some(position) = item.get("position") {
                result = result.with_meta("position", position.clone());
            }
            if let Some(displayed) = item.get("displayed_link") {
                result = result.with_meta("displayed_link", displayed.clone());
            }
            results.push(result);
        }

        for item in data
            .get("news_results")
            .and_then(|v| v.as_array())
            .map(|a| a.as_slice())
            .unwrap_or_default()
        {
            let mut result = SearchResult::new(
                item.get("title").and_then(|v| v.as_str()).unwrap_or_default(),
                item.get("link").and_then(|v| v.as_str()).unwrap_or_default(),
                item.get("snippet").and_then(|v| v.as_str()).unwrap_or_default(),
            )
            .with_meta("type", serde_json::json!("news"));
            if let Some(source) = item.get("source").and_then(|v| v.as_str()) {
                result = result.with_source(source);
            }
            if let Some(date) = item.get("date").and_then(|v| v.as_str()) {
                result = result.with_published_date(date);
            }
            if let Some(thumbnail) = item.get("thumbnail") {
                result = result.with_meta("thumbnail", thumbnail.clone());
            }
            results.push(result);
        }

        results
    }
}

impl Default for SerpApi {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for SerpApi {
    fn id(&self) -> ProviderId {
        ProviderId::SerpApi
    }

    fn request(&self, query: &SearchQuery, settings: &ProviderSettings) -> Result<ProviderRequest> {
        let api_key = settings
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("SerpAPI requires an API key"))?;

        let mut request = ProviderRequest::get(&self.base_url)
            .param("q", &query.text)
            .param("api_key", api_key)
            .param("engine", &settings.serpapi_engine)
            .param("num", query.max_results.to_string())
            .param("safe", if settings.safe_search { "active" } else { "off" });

        if let Some(ref region) = settings.region {
            request = request.param("gl", region);
        }
        if let Some(ref language) = settings.language {
            request = request.param("hl", language);
        }

        Ok(request)
    }

    fn parse(
        &self,
        response: ProviderResponse,
        query: &SearchQuery,
        settings: &ProviderSettings,
    ) -> Result<ProviderResults> {
        let data: serde_json::Value = response.json()?;

        let mut results = self.parse_organic(&data);
        results.truncate(query.max_results);

        let mut parsed = ProviderResults::with_results(results);
        parsed.total_results = data
            .pointer("/search_information/total_results")
            .and_then(|v| v.as_u64());
        parsed.insert_meta("engine", serde_json::json!(settings.serpapi_engine));
        if let Some(info) = data.get("search_information") {
            parsed.insert_meta("search_information", info.clone());
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_requires_api_key() {
        let serpapi = SerpApi::new();
        let err = serpapi
            .request(&SearchQuery::new("rust"), &ProviderSettings::default())
            .unwrap_err();
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn test_request_parameters() {
        let serpapi = SerpApi::new();
        let settings = ProviderSettings::default().with_api_key("secret");
        let request = serpapi
            .request(&SearchQuery::new("rust").with_max_results(7), &settings)
            .unwrap();

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.params["q"], "rust");
        assert_eq!(request.params["engine"], "google");
        assert_eq!(request.params["num"], "7");
        assert_eq!(request.params["safe"], "active");
    }

    #[test]
    fn test_parse_organic_and_news() {
        let body = serde_json::json!({
            "search_information": { "total_results": 1234567u64 },
            "organic_results": [
                {
                    "title": "The Rust Programming Language",
                    "link": "https://www.rust-lang.org/",
                    "snippet": "Empowering everyone",
                    "position": 1,
                    "date": "2024-01-01"
                }
            ],
            "news_results": [
                {
                    "title": "Rust 1.75 released",
                    "link": "https://blog.rust-lang.org/",
                    "snippet": "Release notes",
                    "source": "Rust Blog"
                }
            ]
        });

        let serpapi = SerpApi::new();
        let parsed = serpapi
            .parse(
                ProviderResponse {
                    status: 200,
                    text: body.to_string(),
                    url: "https://serpapi.com/search".to_string(),
                },
                &SearchQuery::new("rust"),
                &ProviderSettings::default(),
            )
            .unwrap();

        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].title, "The Rust Programming Language");
        assert_eq!(parsed.results[0].published_date.as_deref(), Some("2024-01-01"));
        assert_eq!(parsed.results[1].metadata["type"], "news");
        // Provider-reported estimate stays out of the normalized count
        assert_eq!(parsed.total_results, Some(1234567));
    }
}
