//! Perplexity provider (AI-augmented search with citations)

use super::traits::*;
use super::{clip, ProviderId};
use crate::config::ProviderSettings;
use crate::results::SearchResult;
use crate::search::SearchQuery;
use anyhow::{anyhow, Result};

pub struct Perplexity {
    base_url: String,
}

impl Perplexity {
    pub fn new() -> Self {
        Self {
            base_url: "https://api.perplexity.ai/chat/completions".to_string(),
        }
    }

    /// Citations come back either as plain URL strings or as objects with
    /// title/url/text fields, depending on the model.
    fn citation_result(citation: &serde_json::Value, index: usize) -> SearchResult {
        match citation {
            serde_json::Value::String(url) => {
                SearchResult::new(format!("Result {}", index + 1), url.clone(), "")
                    .with_meta("citation_index", serde_json::json!(index))
                    .with_meta("type", serde_json::json!("citation"))
            }
            _ => {
                let title = citation
                    .get("title")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("Result {}", index + 1));
                let url = citation.get("url").and_then(|v| v.as_str()).unwrap_or_default();
                let text = citation.get("text").and_then(|v| v.as_str()).unwrap_or_default();

                let mut result = SearchResult::new(title, url, clip(text, 200))
                    .with_meta("citation_index", serde_json::json!(index))
                    .with_meta("type", serde_json::json!("citation"));
                if let Some(source) = citation.get("source").and_then(|v| v.as_str()) {
                    result = result.with_source(source);
                }
                if let Some(score) = citation.get("score") {
                    result = result.with_meta("relevance_score", score.clone());
                }
                result
            }
        }
    }
}

impl Default for Perplexity {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for Perplexity {
    fn id(&self) -> ProviderId {
        ProviderId::Perplexity
    }

    fn request(&self, query: &SearchQuery, settings: &ProviderSettings) -> Result<ProviderRequest> {
        let api_key = settings
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("Perplexity requires an API key"))?;

        let payload = serde_json::json!({
            "model": settings.perplexity_model,
            "messages": [
                {
                    "role": "system",
                    "content": format!(
                        "You are a helpful search assistant. Provide comprehensive search \
                         results for the given query. Return up to {} relevant results with \
                         titles, URLs, and descriptions.",
                        query.max_results
                    ),
                },
                { "role": "user", "content": format!("Search for: {}", query.text) }
            ],
            "max_tokens": 2000,
            "temperature": 0.1,
            "return_citations": true,
            "return_images": false,
        });

        Ok(ProviderRequest::post(&self.base_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(payload))
    }

    fn parse(
        &self,
        response: ProviderResponse,
        query: &SearchQuery,
        settings: &ProviderSettings,
    ) -> Result<ProviderResults> {
        let data: serde_json::Value = response.json()?;

        let citations = data
            .get("citations")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        let results: Vec<SearchResult> = if !citations.is_empty() {
            citations
                .iter()
                .take(query.max_results)
                .enumerate()
                .map(|(i, citation)| Self::citation_result(citation, i))
                .collect()
        } else {
            // No citations: fold the AI answer into a single summary result
            let content = data
                .pointer("/choices/0/message/content")
                .and_then(|v| v.as_str())
                .unwrap_or_default();
            vec![SearchResult::new(
                format!("AI Summary for: {}", query.text),
                "",
                clip(content, 300),
            )
            .with_source("Perplexity AI")
            .with_meta("type", serde_json::json!("ai_summary"))
            .with_meta("full_content", serde_json::json!(content))]
        };

        let mut parsed = ProviderResults::with_results(results);
        parsed.insert_meta("model", serde_json::json!(settings.perplexity_model));
        if let Some(usage) = data.get("usage") {
            parsed.insert_meta("usage", usage.clone());
        }
        parsed.insert_meta("citations", serde_json::json!(citations.len()));
        Ok(parsed)
    }
}
