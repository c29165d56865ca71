//! DuckDuckGo provider (credential-free HTML endpoint)

use super::traits::*;
use super::ProviderId;
use crate::config::ProviderSettings;
use crate::results::SearchResult;
use crate::search::SearchQuery;
use anyhow::Result;
use scraper::{Html, Selector};
use std::collections::HashMap;

/// DuckDuckGo web search via the HTML endpoint
pub struct DuckDuckGo {
    html_url: String,
}

impl DuckDuckGo {
    pub fn new() -> Self {
        Self {
            html_url: "https://html.duckduckgo.com/html/".to_string(),
        }
    }

    fn parse_html_results(&self, html: &str, max_results: usize) -> Vec<SearchResult> {
        let document = Html::parse_document(html);
        let mut results = Vec::new();

        let result_selector = Selector::parse("div.result").unwrap();
        let title_selector = Selector::parse("a.result__a").unwrap();
        let snippet_selector = Selector::parse("a.result__snippet").unwrap();
        let url_selector = Selector::parse("span.result__url").unwrap();

        let mut position = 1u32;

        for element in document.select(&result_selector) {
            if results.len() >= max_results {
                break;
            }

            let title_elem = match element.select(&title_selector).next() {
                Some(t) => t,
                None => continue,
            };

            let title = title_elem.text().collect::<String>();
            let url = title_elem
                .value()
                .attr("href")
                .map(|h| h.to_string())
                .unwrap_or_default();

            // Skip DuckDuckGo internal links
            if title.is_empty() || url.is_empty() || url.contains("duckduckgo.com") {
                continue;
            }

            let snippet = element
                .select(&snippet_selector)
                .next()
                .map(|s| s.text().collect::<String>())
                .unwrap_or_default();

            let displayed_url = element
                .select(&url_selector)
                .next()
                .map(|s| s.text().collect::<String>().trim().to_string());

            let mut result = SearchResult::new(title, url, snippet)
                .with_source("DuckDuckGo")
                .with_meta("type", serde_json::json!("web_result"))
                .with_meta("position", serde_json::json!(position));
            if let Some(displayed) = displayed_url {
                result = result.with_meta("displayed_url", serde_json::json!(displayed));
            }
            position += 1;

            results.push(result);
        }

        results
    }
}

impl Default for DuckDuckGo {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for DuckDuckGo {
    fn id(&self) -> ProviderId {
        ProviderId::DuckDuckGo
    }

    fn requires_api_key(&self) -> bool {
        false
    }

    fn request(&self, query: &SearchQuery, settings: &ProviderSettings) -> Result<ProviderRequest> {
        let mut form = HashMap::new();
        form.insert("q".to_string(), query.text.clone());

        // kp: 1 = strict, -1 = moderate, -2 = off
        let kp = match settings.duckduckgo_safesearch.as_str() {
            "strict" => "1",
            "off" => "-2",
            _ => "-1",
        };
        form.insert("kp".to_string(), kp.to_string());

        if let Some(ref region) = settings.region {
            form.insert("kl".to_string(), region.clone());
        }

        Ok(ProviderRequest::post(&self.html_url).form(form))
    }

    fn parse(
        &self,
        response: ProviderResponse,
        query: &SearchQuery,
        settings: &ProviderSettings,
    ) -> Result<ProviderResults> {
        let results = self.parse_html_results(&response.text, query.max_results);

        let mut parsed = ProviderResults::with_results(results);
        parsed.insert_meta(
            "safesearch",
            serde_json::json!(settings.duckduckgo_safesearch),
        );
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(text: &str) -> ProviderResponse {
        ProviderResponse {
            status: 200,
            text: text.to_string(),
            url: "https://html.duckduckgo.com/html/".to_string(),
        }
    }

    #[test]
    fn test_request_uses_html_endpoint() {
        let ddg = DuckDuckGo::new();
        let request = ddg
            .request(&SearchQuery::new("rust programming"), &ProviderSettings::default())
            .unwrap();

        assert!(request.url.contains("html.duckduckgo.com"));
        assert_eq!(request.method, HttpMethod::Post);
        match request.body {
            Some(RequestBody::Form(form)) => {
                assert_eq!(form["q"], "rust programming");
                assert_eq!(form["kp"], "-1");
            }
            other => panic!("expected form body, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_skips_internal_links() {
        let html = r#"
            <div class="result">
                <a class="result__a" href="https://www.rust-lang.org/">Rust</a>
                <a class="result__snippet">A systems language</a>
                <span class="result__url">rust-lang.org</span>
            </div>
            <div class="result">
                <a class="result__a" href="https://duckduckgo.com/settings">Settings</a>
            </div>
        "#;

        let ddg = DuckDuckGo::new();
        let parsed = ddg
            .parse(
                response(html),
                &SearchQuery::new("rust"),
                &ProviderSettings::default(),
            )
            .unwrap();

        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].title, "Rust");
        assert_eq!(parsed.results[0].url, "https://www.rust-lang.org/");
        assert_eq!(parsed.results[0].source.as_deref(), Some("DuckDuckGo"));
    }

    #[test]
    fn test_parse_honors_result_bound() {
        let html: String = (0..5)
            .map(|i| {
                format!(
                    r#"<div class="result"><a class="result__a" href="https://example{i}.com/">Result {i}</a></div>"#
                )
            })
            .collect();

        let ddg = DuckDuckGo::new();
        let parsed = ddg
            .parse(
                response(&html),
                &SearchQuery::new("q").with_max_results(2),
                &ProviderSettings::default(),
            )
            .unwrap();

        assert_eq!(parsed.results.len(), 2);
    }
}
