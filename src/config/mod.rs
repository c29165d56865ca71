//! Resolved configuration for the server and each provider
//!
//! Environment lookups happen here, once, at startup. The search core only
//! ever sees the validated structs; it performs no environment or file I/O
//! itself.

use crate::providers::ProviderId;
use crate::{DEFAULT_MAX_RESULTS, DEFAULT_TIMEOUT, MAX_RESULTS, MAX_TIMEOUT};
use std::time::Duration;

/// Top-level settings: one block per provider plus the HTTP server
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub serpapi: ProviderSettings,
    pub perplexity: ProviderSettings,
    pub duckduckgo: ProviderSettings,
    pub tavily: ProviderSettings,
    pub claude: ProviderSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            serpapi: ProviderSettings::default(),
            perplexity: ProviderSettings::default(),
            duckduckgo: ProviderSettings::default(),
            tavily: ProviderSettings::default(),
            claude: ProviderSettings::default(),
        }
    }
}

impl Settings {
    /// Resolve all settings from environment variables
    pub fn from_env() -> Self {
        Self {
            server: ServerSettings::from_env(),
            serpapi: ProviderSettings::from_env(ProviderId::SerpApi),
            perplexity: ProviderSettings::from_env(ProviderId::Perplexity),
            duckduckgo: ProviderSettings::from_env(ProviderId::DuckDuckGo),
            tavily: ProviderSettings::from_env(ProviderId::Tavily),
            claude: ProviderSettings::from_env(ProviderId::Claude),
        }
    }

    /// Settings block for one provider
    pub fn provider(&self, id: ProviderId) -> &ProviderSettings {
        match id {
            ProviderId::SerpApi => &self.serpapi,
            ProviderId::Perplexity => &self.perplexity,
            ProviderId::DuckDuckGo => &self.duckduckgo,
            ProviderId::Tavily => &self.tavily,
            ProviderId::Claude => &self.claude,
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub bind_address: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerSettings {
    fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(addr) = std::env::var("WEBSEARCH_BIND_ADDRESS") {
            if !addr.is_empty() {
                settings.bind_address = addr;
            }
        }
        if let Ok(port) = std::env::var("WEBSEARCH_PORT") {
            if let Ok(port) = port.parse() {
                settings.port = port;
            }
        }
        settings
    }
}

/// Per-provider settings, validated and clamped at construction
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// API key; `None` for providers that need none or whose key was unset
    pub api_key: Option<String>,
    /// Default result bound when the query does not override it (1-100)
    pub max_results: usize,
    /// Per-call timeout (1-300 seconds)
    pub timeout: Duration,
    /// Whether safe search is requested from providers that support it
    pub safe_search: bool,
    /// Region code (e.g. "us")
    pub region: Option<String>,
    /// Language code (e.g. "en")
    pub language: Option<String>,
    /// SerpAPI backing engine (google, bing, ...)
    pub serpapi_engine: String,
    /// Perplexity model name
    pub perplexity_model: String,
    /// DuckDuckGo safe search level: strict, moderate, off
    pub duckduckgo_safesearch: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            max_results: DEFAULT_MAX_RESULTS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
            safe_search: true,
            region: None,
            language: None,
            serpapi_engine: "google".to_string(),
            perplexity_model: "sonar-pro".to_string(),
            duckduckgo_safesearch: "moderate".to_string(),
        }
    }
}

impl ProviderSettings {
    /// Resolve one provider's settings from the environment
    ///
    /// An empty API key counts as unset; unparsable numbers fall back to
    /// defaults; out-of-range values are clamped rather than rejected.
    pub fn from_env(id: ProviderId) -> Self {
        let mut settings = Self::default();

        if let Some(env) = id.api_key_env() {
            settings.api_key = read_env(env);
        }

        let prefix = id.as_str().to_ascii_uppercase();
        if let Some(max) = read_env(&format!("{}_MAX_RESULTS", prefix)) {
            if let Ok(max) = max.parse::<usize>() {
                settings.max_results = clamp_max_results(max);
            }
        }
        if let Some(timeout) = read_env("SEARCH_TIMEOUT") {
            if let Ok(secs) = timeout.parse::<u64>() {
                settings.timeout = Duration::from_secs(clamp_timeout(secs));
            }
        }
        if let Some(safe) = read_env("SAFE_SEARCH") {
            settings.safe_search = safe.parse().unwrap_or(true);
        }
        settings.region = read_env("SEARCH_REGION");
        settings.language = read_env("SEARCH_LANGUAGE");

        match id {
            ProviderId::SerpApi => {
                if let Some(engine) = read_env("SERPAPI_ENGINE") {
                    settings.serpapi_engine = engine;
                }
            }
            ProviderId::Perplexity => {
                if let Some(model) = read_env("PERPLEXITY_MODEL") {
                    settings.perplexity_model = model;
                }
            }
            ProviderId::DuckDuckGo => {
                if let Some(level) = read_env("DUCKDUCKGO_SAFESEARCH") {
                    settings.duckduckgo_safesearch = level;
                }
            }
            _ => {}
        }

        settings
    }

    /// Builder used by tests and embedders
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = clamp_max_results(max);
        self
    }
}

/// Read an environment variable, treating empty as unset
fn read_env(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

fn clamp_max_results(value: usize) -> usize {
    value.clamp(1, MAX_RESULTS)
}

fn clamp_timeout(secs: u64) -> u64 {
    secs.clamp(1, MAX_TIMEOUT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ProviderSettings::default();
        assert_eq!(settings.max_results, 10);
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert!(settings.safe_search);
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn test_clamping() {
        assert_eq!(clamp_max_results(0), 1);
        assert_eq!(clamp_max_results(500), 100);
        assert_eq!(clamp_timeout(0), 1);
        assert_eq!(clamp_timeout(9999), 300);
    }

    #[test]
    fn test_env_resolution() {
        std::env::set_var("SERPAPI_API_KEY", "test-key");
        std::env::set_var("SERPAPI_MAX_RESULTS", "250");
        std::env::set_var("SERPAPI_ENGINE", "bing");

        let settings = ProviderSettings::from_env(ProviderId::SerpApi);
        assert_eq!(settings.api_key.as_deref(), Some("test-key"));
        assert_eq!(settings.max_results, 100); // clamped
        assert_eq!(settings.serpapi_engine, "bing");

        std::env::remove_var("SERPAPI_API_KEY");
        std::env::remove_var("SERPAPI_MAX_RESULTS");
        std::env::remove_var("SERPAPI_ENGINE");
    }

    #[test]
    fn test_empty_api_key_counts_as_unset() {
        std::env::set_var("TAVILY_API_KEY", "");
        let settings = ProviderSettings::from_env(ProviderId::Tavily);
        assert!(settings.api_key.is_none());
        std::env::remove_var("TAVILY_API_KEY");
    }
}
