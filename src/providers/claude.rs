//! Claude provider (search summaries via the Anthropic messages API)

use super::traits::*;
use super::{clip, ProviderId};
use crate::config::ProviderSettings;
use crate::results::SearchResult;
use crate::search::SearchQuery;
use anyhow::{anyhow, Result};

const MODEL: &str = "claude-3-5-sonnet-20241022";
const API_VERSION: &str = "2023-06-01";

pub struct Claude {
    base_url: String,
}

impl Claude {
    pub fn new() -> Self {
        Self {
            base_url: "https://api.anthropic.com/v1/messages".to_string(),
        }
    }
}

impl Default for Claude {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for Claude {
    fn id(&self) -> ProviderId {
        ProviderId::Claude
    }

    fn request(&self, query: &SearchQuery, settings: &ProviderSettings) -> Result<ProviderRequest> {
        let api_key = settings
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("Claude requires an API key"))?;

        let payload = serde_json::json!({
            "model": MODEL,
            "max_tokens": 2000,
            "messages": [
                {
                    "role": "user",
                    "content": format!(
                        "Search the web for information about: {}. Provide detailed search \
                         results with titles, URLs, and descriptions. Return up to {} \
                         relevant results.",
                        query.text, query.max_results
                    ),
                }
            ],
        });

        Ok(ProviderRequest::post(&self.base_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
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
        for block in data
            .get("content")
            .and_then(|v| v.as_array())
            .map(|a| a.as_slice())
            .unwrap_or_default()
        {
            if block.get("type").and_then(|v| v.as_str()) != Some("text") {
                continue;
            }
            let content = block.get("text").and_then(|v| v.as_str()).unwrap_or_default();
            if content.is_empty() {
                continue;
            }
            results.push(
                SearchResult::new(
                    format!("Claude Search Results: {}", query.text),
                    "",
                    clip(content, 300),
                )
                .with_source("Claude AI")
                .with_meta("type", serde_json::json!("claude_response"))
                .with_meta("full_content", serde_json::json!(content)),
            );
        }
        results.truncate(query.max_results);

        let mut parsed = ProviderResults::with_results(results);
        parsed.insert_meta("model", serde_json::json!(MODEL));
        if let Some(usage) = data.get("usage") {
            parsed.insert_meta("usage", usage.clone());
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_headers() {
        let claude = Claude::new();
        let settings = ProviderSettings::default().with_api_key("sk-ant-123");
        let request = claude.request(&SearchQuery::new("rust"), &settings).unwrap();

        assert_eq!(request.headers["x-api-key"], "sk-ant-123");
        assert_eq!(request.headers["anthropic-version"], API_VERSION);
        assert_eq!(request.method, HttpMethod::Post);
    }

    #[test]
    fn test_parse_text_blocks() {
        let body = serde_json::json!({
            "content": [
                { "type": "text", "text": "Here are the search results..." },
                { "type": "tool_use", "id": "t1" }
            ],
            "usage": { "input_tokens": 50, "output_tokens": 200 }
        });

        let claude = Claude::new();
        let parsed = claude
            .parse(
                ProviderResponse {
                    status: 200,
                    text: body.to_string(),
                    url: "https://api.anthropic.com/v1/messages".to_string(),
                },
                &SearchQuery::new("rust"),
                &ProviderSettings::default(),
            )
            .unwrap();

        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].source.as_deref(), Some("Claude AI"));
        assert_eq!(parsed.metadata["model"], MODEL);
    }
}
