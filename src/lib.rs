//! websearch-rs: a uniform web search service backed by multiple providers
//!
//! One logical query fans out to heterogeneous third-party search APIs
//! (DuckDuckGo, SerpAPI, Perplexity, Tavily, Claude) and comes back as a
//! normalized result set. The core supports direct single-provider search,
//! sequential fallback with short-circuit, and concurrent multi-provider
//! comparison search with partial-failure tolerance.

pub mod config;
pub mod error;
pub mod network;
pub mod providers;
pub mod results;
pub mod search;
pub mod web;

pub use config::{ProviderSettings, Settings};
pub use error::SearchError;
pub use network::HttpClient;
pub use providers::{Provider, ProviderId, ProviderRegistry};
pub use results::{ProviderOutcome, SearchResponse, SearchResult};
pub use search::{SearchManager, SearchQuery};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default per-provider timeout in seconds
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Maximum per-provider timeout in seconds
pub const MAX_TIMEOUT: u64 = 300;

/// Default number of results per search
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Upper bound on the requested result count
pub const MAX_RESULTS: usize = 100;
