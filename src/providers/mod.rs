//! Provider adapters for the supported search backends

pub mod claude;
pub mod duckduckgo;
pub mod perplexity;
pub mod registry;
pub mod serpapi;
pub mod tavily;
pub mod traits;

pub use registry::{ProviderEntry, ProviderRegistry};
pub use traits::{
    HttpMethod, Provider, ProviderRequest, ProviderResponse, ProviderResults, RequestBody,
};

use serde::{Deserialize, Serialize};

/// Identifier for each supported search provider
///
/// A fixed, closed set: adapters are selected from a static table at
/// registry construction, never discovered at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    SerpApi,
    Perplexity,
    DuckDuckGo,
    Tavily,
    Claude,
}

impl ProviderId {
    /// All providers, in registry declaration order
    pub const ALL: [ProviderId; 5] = [
        ProviderId::SerpApi,
        ProviderId::Perplexity,
        ProviderId::DuckDuckGo,
        ProviderId::Tavily,
        ProviderId::Claude,
    ];

    /// Default fallback preference: the free provider first, then the
    /// credentialed ones
    pub const FALLBACK_ORDER: [ProviderId; 5] = [
        ProviderId::DuckDuckGo,
        ProviderId::SerpApi,
        ProviderId::Perplexity,
        ProviderId::Tavily,
        ProviderId::Claude,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SerpApi => "serpapi",
            Self::Perplexity => "perplexity",
            Self::DuckDuckGo => "duckduckgo",
            Self::Tavily => "tavily",
            Self::Claude => "claude",
        }
    }

    /// Environment variable holding this provider's API key, if it needs one
    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            Self::SerpApi => Some("SERPAPI_API_KEY"),
            Self::Perplexity => Some("PERPLEXITY_API_KEY"),
            Self::DuckDuckGo => None,
            Self::Tavily => Some("TAVILY_API_KEY"),
            Self::Claude => Some("ANTHROPIC_API_KEY"),
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "serpapi" => Ok(Self::SerpApi),
            "perplexity" => Ok(Self::Perplexity),
            "duckduckgo" => Ok(Self::DuckDuckGo),
            "tavily" => Ok(Self::Tavily),
            "claude" => Ok(Self::Claude),
            other => Err(format!(
                "unknown provider '{}', available: {}",
                other,
                ProviderId::ALL
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

/// Clip a snippet to at most `max_chars` characters, appending an ellipsis
/// when truncated. Safe on multi-byte content.
pub(crate) fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let clipped: String = text.chars().take(max_chars).collect();
    format!("{}...", clipped)
}
