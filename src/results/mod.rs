//! Normalized result types shared by every provider

mod types;

pub use types::{
    ProviderError, ProviderOutcome, SearchResponse, SearchResult, SearchSource,
};
