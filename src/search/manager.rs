//! Search manager: the façade over registry, fallback, and dispatch

use super::dispatch::{execute_provider, ConcurrentDispatcher};
use super::fallback::FallbackScheduler;
use super::query::SearchQuery;
use crate::error::SearchError;
use crate::network::HttpClient;
use crate::providers::{ProviderId, ProviderRegistry};
use crate::results::{ProviderError, ProviderOutcome, SearchResponse, SearchSource};
use crate::MAX_RESULTS;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Coordinates the configured providers behind three public operations:
/// single-provider search, fallback search, and multi-provider comparison
/// search. Holds no mutable state; the registry is read-only once built.
pub struct SearchManager {
    registry: Arc<ProviderRegistry>,
    client: HttpClient,
    default_provider: ProviderId,
}

impl SearchManager {
    /// Create a manager over an already-built registry and shared client
    pub fn new(registry: Arc<ProviderRegistry>, client: HttpClient) -> Self {
        Self {
            registry,
            client,
            default_provider: ProviderId::DuckDuckGo,
        }
    }

    /// Override the default provider used by the transport layer
    pub fn with_default_provider(mut self, provider: ProviderId) -> Self {
        self.default_provider = provider;
        self
    }

    pub fn default_provider(&self) -> ProviderId {
        self.default_provider
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Availability of every registered provider
    pub fn provider_status(&self) -> Vec<(ProviderId, bool)> {
        self.registry.status()
    }

    /// Available providers in fallback preference order (free first)
    pub fn fallback_chain(&self) -> Vec<ProviderId> {
        ProviderId::FALLBACK_ORDER
            .iter()
            .copied()
            .filter(|&id| self.registry.is_available(id))
            .collect()
    }

    /// Search a single named provider
    ///
    /// An unconfigured provider is a configuration error; a provider failure
    /// or timeout is surfaced as a typed error, never swallowed.
    pub async fn search(
        &self,
        query: &SearchQuery,
        provider: ProviderId,
    ) -> Result<SearchResponse, SearchError> {
        query.validate()?;

        let entry = self
            .registry
            .get(provider)
            .filter(|entry| entry.available)
            .ok_or(SearchError::ProviderUnavailable(provider))?;

        match execute_provider(entry, &self.client, query).await {
            ProviderOutcome::Success(response) => Ok(response),
            ProviderOutcome::Failure(ProviderError::Timeout) => {
                Err(SearchError::ProviderTimeout(provider))
            }
            ProviderOutcome::Failure(error) => {
                Err(SearchError::ProviderFailure { provider, error })
            }
            ProviderOutcome::Unavailable => Err(SearchError::ProviderUnavailable(provider)),
        }
    }

    /// Search with automatic fallback through a preference order
    ///
    /// Defaults to all available providers, free provider first. Fails only
    /// with the aggregate error once every provider in the order has failed
    /// or been skipped.
    pub async fn search_with_fallback(
        &self,
        query: &SearchQuery,
        preference_order: Option<&[ProviderId]>,
    ) -> Result<SearchResponse, SearchError> {
        query.validate()?;

        let default_order;
        let order = match preference_order {
            Some(order) => order,
            None => {
                default_order = self.fallback_chain();
                &default_order
            }
        };

        FallbackScheduler::new(&self.registry, &self.client)
            .run(order, query)
            .await
    }

    /// Concurrent comparison search across several providers
    ///
    /// Per-provider failures and unavailability are reported in the response
    /// metadata, never as a call failure; the result sequence concatenates
    /// each successful provider's results in request order.
    pub async fn multi_provider_search(
        &self,
        query: &SearchQuery,
        providers: Option<&[ProviderId]>,
        max_results_per_provider: Option<usize>,
    ) -> Result<SearchResponse, SearchError> {
        query.validate()?;

        let mut requested: Vec<ProviderId> = match providers {
            Some(ids) => ids.to_vec(),
            None => self.registry.providers().to_vec(),
        };
        // Each provider is called at most once; repeats keep their first position
        let mut seen = HashSet::new();
        requested.retain(|id| seen.insert(*id));
        if requested.is_empty() {
            return Err(SearchError::InvalidQuery(
                "no providers requested".to_string(),
            ));
        }

        let mut per_provider_query = query.clone();
        if let Some(bound) = max_results_per_provider {
            per_provider_query.max_results = bound.clamp(1, MAX_RESULTS);
        }

        let start = Instant::now();
        let outcomes = ConcurrentDispatcher::new(&self.registry, &self.client)
            .run(&requested, &per_provider_query)
            .await;

        let mut results = Vec::new();
        let mut provider_outcomes = serde_json::Map::new();
        let mut succeeded = 0usize;

        for (id, outcome) in &outcomes {
            provider_outcomes.insert(id.as_str().to_string(), outcome.summary());
            if let ProviderOutcome::Success(response) = outcome {
                succeeded += 1;
                results.extend(response.results.iter().cloned());
            }
        }

        info!(
            query = %query.text,
            requested = requested.len(),
            succeeded,
            results = results.len(),
            "multi-provider search complete"
        );

        let mut response = SearchResponse::new(query.text.clone(), SearchSource::Multi, results)
            .with_search_time(start.elapsed().as_secs_f64());
        response.insert_meta(
            "providers",
            serde_json::Value::Object(provider_outcomes),
        );
        response.insert_meta("providers_requested", serde_json::json!(requested.len()));
        response.insert_meta("providers_succeeded", serde_json::json!(succeeded));

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn manager_with(settings: Settings) -> SearchManager {
        let registry = Arc::new(ProviderRegistry::from_settings(&settings));
        SearchManager::new(registry, HttpClient::new().unwrap())
    }

    #[tokio::test]
    async fn test_invalid_query_rejected_before_dispatch() {
        let manager = manager_with(Settings::default());

        let err = manager
            .search(&SearchQuery::new(""), ProviderId::DuckDuckGo)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidQuery(_)));

        let err = manager
            .multi_provider_search(&SearchQuery::new("q").with_max_results(101), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn test_unconfigured_provider_is_a_configuration_error() {
        let manager = manager_with(Settings::default());

        let err = manager
            .search(&SearchQuery::new("rust"), ProviderId::SerpApi)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SearchError::ProviderUnavailable(ProviderId::SerpApi)
        ));
    }

    #[tokio::test]
    async fn test_empty_provider_list_rejected() {
        let manager = manager_with(Settings::default());

        let err = manager
            .multi_provider_search(&SearchQuery::new("rust"), Some(&[]), None)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidQuery(_)));
    }

    #[test]
    fn test_fallback_chain_only_lists_available() {
        let mut settings = Settings::default();
        settings.serpapi.api_key = Some("key".to_string());
        let manager = manager_with(settings);

        assert_eq!(
            manager.fallback_chain(),
            vec![ProviderId::DuckDuckGo, ProviderId::SerpApi]
        );
    }
}
