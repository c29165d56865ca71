//! Sequential fallback across an ordered provider preference list

use super::dispatch::execute_provider;
use super::query::SearchQuery;
use crate::error::{FailedAttempt, SearchError};
use crate::network::HttpClient;
use crate::providers::{ProviderId, ProviderRegistry};
use crate::results::{ProviderError, ProviderOutcome, SearchResponse};
use tracing::{debug, info};

/// Tries providers strictly in order until one succeeds
///
/// Unavailable providers are skipped immediately; a failure moves on to the
/// next provider, never a retry of the same one. The first success
/// short-circuits the rest of the list.
pub struct FallbackScheduler<'a> {
    registry: &'a ProviderRegistry,
    client: &'a HttpClient,
}

impl<'a> FallbackScheduler<'a> {
    pub fn new(registry: &'a ProviderRegistry, client: &'a HttpClient) -> Self {
        Self { registry, client }
    }

    /// Run the fallback chain. Returns the first successful response, with
    /// any earlier failures recorded in its metadata; errs with the full
    /// attempt list only when the order is exhausted.
    pub async fn run(
        &self,
        order: &[ProviderId],
        query: &SearchQuery,
    ) -> Result<SearchResponse, SearchError> {
        let mut attempts: Vec<FailedAttempt> = Vec::new();

        for &id in order {
            let entry = match self.registry.get(id) {
                Some(entry) if entry.available => entry,
                _ => {
                    debug!(provider = %id, "skipping unconfigured provider");
                    attempts.push(FailedAttempt {
                        provider: id,
                        error: ProviderError::NotConfigured,
                    });
                    continue;
                }
            };

            match execute_provider(entry, self.client, query).await {
                ProviderOutcome::Success(mut response) => {
                    info!(provider = %id, attempts = attempts.len(), "fallback search succeeded");
                    if !attempts.is_empty() {
                        let attempted: Vec<_> = attempts
                            .iter()
                            .map(|a| {
                                serde_json::json!({
                                    "provider": a.provider.as_str(),
                                    "error": a.error.to_string(),
                                })
                            })
                            .collect();
                        response.insert_meta("fallback_attempts", serde_json::json!(attempted));
                    }
                    return Ok(response);
                }
                ProviderOutcome::Failure(error) => {
                    debug!(provider = %id, error = %error, "fallback attempt failed, trying next");
                    attempts.push(FailedAttempt {
                        provider: id,
                        error,
                    });
                }
                ProviderOutcome::Unavailable => {
                    attempts.push(FailedAttempt {
                        provider: id,
                        error: ProviderError::NotConfigured,
                    });
                }
            }
        }

        Err(SearchError::AllProvidersFailed { attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_order_fails_with_empty_attempts() {
        let registry = ProviderRegistry::new();
        let client = HttpClient::new().unwrap();
        let scheduler = FallbackScheduler::new(&registry, &client);

        let err = scheduler.run(&[], &SearchQuery::new("test")).await.unwrap_err();
        match err {
            SearchError::AllProvidersFailed { attempts } => assert!(attempts.is_empty()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_unregistered_providers_recorded_as_not_configured() {
        let registry = ProviderRegistry::new();
        let client = HttpClient::new().unwrap();
        let scheduler = FallbackScheduler::new(&registry, &client);

        let err = scheduler
            .run(
                &[ProviderId::SerpApi, ProviderId::Claude],
                &SearchQuery::new("test"),
            )
            .await
            .unwrap_err();

        match err {
            SearchError::AllProvidersFailed { attempts } => {
                assert_eq!(attempts.len(), 2);
                assert_eq!(attempts[0].provider, ProviderId::SerpApi);
                assert_eq!(attempts[0].error, ProviderError::NotConfigured);
                assert_eq!(attempts[1].provider, ProviderId::Claude);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
