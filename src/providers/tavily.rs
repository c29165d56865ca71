//! Tavily provider (AI search with a synthesized answer)

use super::traits::*;
use super::ProviderId;
use crate::config::ProviderSettings;
use crate::results::SearchResult;
use crate::search::SearchQuery;
use anyhow::{anyhow, Result};

pub struct Tavily {
    base_url: String,
}

impl Tavily {
    pub fn new() -> Self {
        Self {
            base_url: "https://api.tavily.com/search".to_string(),
        }
    }
}

impl Default for Tavily {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for Tavily {
    fn id(&self) -> ProviderId {
        ProviderId::Tavily
    }

    fn request(&self, query: &SearchQuery, settings: &ProviderSettings) -> Result<ProviderRequest> {
        let api_key = settings
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("Tavily requires an API key"))?;

        let mut payload = serde_json::json!({
            "api_key": api_key,
            "query": query.text,
            "search_depth": "advanced",
            "include_answer": true,
            "include_raw_content": false,
            "max_results": query.max_results,
        });
        if let Some(ref language) = settings.language {
            payload["language"] = serde_json::json!(language);
        }

        Ok(ProviderRequest::post(&self.base_url)
            .header("Content-Type", "application/json")
            .json(payload))
    }

    fn parse(
        &self,
        response: ProviderResponse,
        query: &SearchQuery,
        _settings: &ProviderSettings,
    ) -> Result<ProviderResults> {
        let data: serde_json::Value = response.json()?;
        let mut results = Vec::new();

        // The synthesized answer leads the result list
        if let Some(answer) = data.get("answer").and_then(|v| v.as_str()) {
            if !answer.is_empty() {
                results.push(
                    SearchResult::new("AI Answer", "", answer)
                        .with_source("Tavily AI")
                        .with_meta("type", serde_json::json!("ai_answer")),
                );
            }
        }

        for item in data
            .get("results")
            .and_then(|v| v.as_array())
            .map(|a| a.as_slice())
            .unwrap_or_default()
        {
            let mut result = SearchResult::new(
                item.get("title").and_then(|v| v.as_str()).unwrap_or_default(),
                item.get("url").and_then(|v| v.as_str()).unwrap_or_default(),
                item.get("content").and_then(|v| v.as_str()).unwrap_or_default(),
            )
            .with_meta("type", serde_json::json!("search_result"));
            if let Some(source) = item.get("source").and_then(|v| v.as_str()) {
                result = result.with_source(source);
            }
            if let Some(date) = item.get("published_date").and_then(|v| v.as_str()) {
                result = result.with_published_date(date);
            }
            if let Some(score) = item.get("score") {
                result = result.with_meta("score", score.clone());
            }
            results.push(result);
        }

        results.truncate(query.max_results);

        let mut parsed = ProviderResults::with_results(results);
        if let Some(answer) = data.get("answer") {
            parsed.insert_meta("answer", answer.clone());
        }
        if let Some(follow_ups) = data.get("follow_up_questions") {
            parsed.insert_meta("follow_up_questions", follow_ups.clone());
        }
        if let Some(response_time) = data.get("response_time") {
            parsed.insert_meta("response_time", response_time.clone());
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_embeds_key_in_payload() {
        let tavily = Tavily::new();
        let settings = ProviderSettings::default().with_api_key("tvly-123");
        let request = tavily
            .request(&SearchQuery::new("rust").with_max_results(5), &settings)
            .unwrap();

        match request.body {
            Some(RequestBody::Json(payload)) => {
                assert_eq!(payload["api_key"], "tvly-123");
                assert_eq!(payload["max_results"], 5);
                assert_eq!(payload["search_depth"], "advanced");
            }
            other => panic!("expected JSON body, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_answer_leads_results() {
        let body = serde_json::json!({
            "answer": "Rust is a systems programming language.",
            "response_time": 0.42,
            "results": [
                {
                    "title": "rust-lang.org",
                    "url": "https://www.rust-lang.org/",
                    "content": "Official site",
                    "score": 0.98,
                    "published_date": "2024-02-02"
                }
            ]
        });

        let tavily = Tavily::new();
        let parsed = tavily
            .parse(
                ProviderResponse {
                    status: 200,
                    text: body.to_string(),
                    url: "https://api.tavily.com/search".to_string(),
                },
                &SearchQuery::new("rust"),
                &ProviderSettings::default(),
            )
            .unwrap();

        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].metadata["type"], "ai_answer");
        assert_eq!(parsed.results[1].url, "https://www.rust-lang.org/");
        assert_eq!(parsed.results[1].published_date.as_deref(), Some("2024-02-02"));
        assert!(parsed.metadata.contains_key("answer"));
    }

    #[test]
    fn test_parse_without_answer() {
        let body = serde_json::json!({ "results": [] });

        let tavily = Tavily::new();
        let parsed = tavily
            .parse(
                ProviderResponse {
                    status: 200,
                    text: body.to_string(),
                    url: "https://api.tavily.com/search".to_string(),
                },
                &SearchQuery::new("rust"),
                &ProviderSettings::default(),
            )
            .unwrap();

        assert!(parsed.results.is_empty());
    }
}
