//! Error taxonomy for the search core

use crate::providers::ProviderId;
use crate::results::ProviderError;
use thiserror::Error;

/// One failed provider attempt, recorded in order by the fallback scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAttempt {
    pub provider: ProviderId,
    pub error: ProviderError,
}

/// Errors surfaced by [`crate::SearchManager`]
#[derive(Debug, Error)]
pub enum SearchError {
    /// Empty query text or out-of-bounds result count, caught before dispatch
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Requested provider has no resolved credentials
    #[error("provider '{0}' is not configured")]
    ProviderUnavailable(ProviderId),

    /// A single-provider search failed at the provider boundary
    #[error("provider '{provider}' failed: {error}")]
    ProviderFailure {
        provider: ProviderId,
        error: ProviderError,
    },

    /// A single-provider search produced no outcome within its timeout
    #[error("provider '{0}' timed out")]
    ProviderTimeout(ProviderId),

    /// Fallback search exhausted its provider list without a success
    #[error("all providers failed: {}", format_attempts(.attempts))]
    AllProvidersFailed { attempts: Vec<FailedAttempt> },
}

fn format_attempts(attempts: &[FailedAttempt]) -> String {
    if attempts.is_empty() {
        return "no providers were available".to_string();
    }
    attempts
        .iter()
        .map(|a| format!("{}: {}", a.provider, a.error))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_lists_attempts_in_order() {
        let err = SearchError::AllProvidersFailed {
            attempts: vec![
                FailedAttempt {
                    provider: ProviderId::DuckDuckGo,
                    error: ProviderError::Http(500),
                },
                FailedAttempt {
                    provider: ProviderId::SerpApi,
                    error: ProviderError::Timeout,
                },
            ],
        };

        let message = err.to_string();
        let ddg = message.find("duckduckgo").unwrap();
        let serp = message.find("serpapi").unwrap();
        assert!(ddg < serp);
        assert!(message.contains("HTTP error: 500"));
        assert!(message.contains("timed out"));
    }

    #[test]
    fn test_aggregate_with_no_attempts() {
        let err = SearchError::AllProvidersFailed { attempts: vec![] };
        assert!(err.to_string().contains("no providers were available"));
    }
}
