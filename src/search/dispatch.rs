//! Concurrent fan-out/fan-in across providers

use super::query::SearchQuery;
use crate::network::HttpClient;
use crate::providers::{ProviderEntry, ProviderId, ProviderRegistry};
use crate::results::{ProviderError, ProviderOutcome, SearchResponse, SearchSource};
use futures::future::join_all;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Execute one provider call end to end: build the request, run it through
/// the shared client under the provider's timeout, parse, and fold every
/// failure mode into a terminal [`ProviderOutcome`]. Nothing escapes as a
/// raw error.
pub(crate) async fn execute_provider(
    entry: &ProviderEntry,
    client: &HttpClient,
    query: &SearchQuery,
) -> ProviderOutcome {
    let id = entry.provider.id();
    let start = Instant::now();

    debug!(provider = %id, timeout = ?entry.settings.timeout, "dispatching provider");

    let request = match entry.provider.request(query, &entry.settings) {
        Ok(request) => request,
        Err(e) => {
            warn!(provider = %id, error = %e, "failed to build request");
            return ProviderOutcome::Failure(ProviderError::Request(e.to_string()));
        }
    };

    let response = match timeout(
        entry.settings.timeout,
        client.execute_with_timeout(request, entry.settings.timeout),
    )
    .await
    {
        Err(_) => {
            warn!(provider = %id, "provider timed out");
            return ProviderOutcome::Failure(ProviderError::Timeout);
        }
        Ok(Err(e)) => {
            warn!(provider = %id, error = %e, "request failed");
            let error = match e.downcast_ref::<reqwest::Error>() {
                Some(e) if e.is_timeout() => ProviderError::Timeout,
                _ => ProviderError::Network(e.to_string()),
            };
            return ProviderOutcome::Failure(error);
        }
        Ok(Ok(response)) => response,
    };

    if !response.is_success() {
        warn!(provider = %id, status = response.status, "provider returned error status");
        let error = match response.status {
            429 => ProviderError::RateLimited,
            403 => ProviderError::AccessDenied,
            status => ProviderError::Http(status),
        };
        return ProviderOutcome::Failure(error);
    }

    match entry.provider.parse(response, query, &entry.settings) {
        Ok(parsed) => {
            let elapsed = start.elapsed();
            let mut results = parsed.results;
            results.truncate(query.max_results);

            let mut response =
                SearchResponse::new(query.text.clone(), SearchSource::Provider(id), results)
                    .with_search_time(elapsed.as_secs_f64());
            for (key, value) in parsed.metadata {
                response.insert_meta(key, value);
            }
            if let Some(total) = parsed.total_results {
                response.insert_meta("reported_total_results", serde_json::json!(total));
            }

            debug!(
                provider = %id,
                results = response.total_results,
                elapsed_ms = elapsed.as_millis() as u64,
                "provider succeeded"
            );
            ProviderOutcome::Success(response)
        }
        Err(e) => {
            warn!(provider = %id, error = %e, "failed to parse response");
            ProviderOutcome::Failure(ProviderError::Parse(e.to_string()))
        }
    }
}

/// Fan-out to a set of providers, fan-in all outcomes
///
/// All invocations start together and each runs under its own timeout, so
/// one slow provider cannot delay another's outcome past its own bound. The
/// dispatcher always waits for every outcome; a mix of successes and
/// failures is a normal result, not an error.
pub struct ConcurrentDispatcher<'a> {
    registry: &'a ProviderRegistry,
    client: &'a HttpClient,
}

impl<'a> ConcurrentDispatcher<'a> {
    pub fn new(registry: &'a ProviderRegistry, client: &'a HttpClient) -> Self {
        Self { registry, client }
    }

    /// Invoke every requested provider concurrently and report each outcome
    /// in the input order. Unregistered or unconfigured providers yield
    /// `Unavailable` without being called.
    pub async fn run(
        &self,
        providers: &[ProviderId],
        query: &SearchQuery,
    ) -> Vec<(ProviderId, ProviderOutcome)> {
        info!(
            query = %query.text,
            providers = providers.len(),
            "dispatching concurrent search"
        );

        let futures: Vec<_> = providers
            .iter()
            .map(|&id| async move {
                match self.registry.get(id) {
                    Some(entry) if entry.available => {
                        (id, execute_provider(entry, self.client, query).await)
                    }
                    _ => {
                        debug!(provider = %id, "provider unavailable, skipping call");
                        (id, ProviderOutcome::Unavailable)
                    }
                }
            })
            .collect();

        join_all(futures).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_registry_reports_unavailable() {
        let registry = ProviderRegistry::new();
        let client = HttpClient::new().unwrap();
        let dispatcher = ConcurrentDispatcher::new(&registry, &client);

        let outcomes = dispatcher
            .run(
                &[ProviderId::DuckDuckGo, ProviderId::Tavily],
                &SearchQuery::new("test"),
            )
            .await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].0, ProviderId::DuckDuckGo);
        assert_eq!(outcomes[1].0, ProviderId::Tavily);
        assert!(outcomes
            .iter()
            .all(|(_, o)| matches!(o, ProviderOutcome::Unavailable)));
    }
}
