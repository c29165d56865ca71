//! Provider registry: the fixed table of configured search backends

use super::traits::Provider;
use super::ProviderId;
use crate::config::{ProviderSettings, Settings};
use crate::providers::{claude, duckduckgo, perplexity, serpapi, tavily};
use std::collections::HashMap;
use std::sync::Arc;

/// One registered provider: adapter, resolved settings, availability
pub struct ProviderEntry {
    pub provider: Arc<dyn Provider>,
    pub settings: ProviderSettings,
    /// Whether required credentials resolved at construction. Fixed for the
    /// registry's lifetime; a provider that becomes unreachable mid-session
    /// simply fails per-call.
    pub available: bool,
}

/// Registry of configured providers
///
/// Built once at manager construction, read-only thereafter. Iteration
/// order follows registration order for deterministic defaults.
pub struct ProviderRegistry {
    entries: HashMap<ProviderId, ProviderEntry>,
    order: Vec<ProviderId>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Build the full registry from resolved settings
    pub fn from_settings(settings: &Settings) -> Self {
        let mut registry = Self::new();
        for id in ProviderId::ALL {
            let provider: Arc<dyn Provider> = match id {
                ProviderId::SerpApi => Arc::new(serpapi::SerpApi::new()),
                ProviderId::Perplexity => Arc::new(perplexity::Perplexity::new()),
                ProviderId::DuckDuckGo => Arc::new(duckduckgo::DuckDuckGo::new()),
                ProviderId::Tavily => Arc::new(tavily::Tavily::new()),
                ProviderId::Claude => Arc::new(claude::Claude::new()),
            };
            registry.register(provider, settings.provider(id).clone());
        }
        registry
    }

    /// Register a provider; availability is derived from its credential
    /// requirement and the resolved settings
    pub fn register(&mut self, provider: Arc<dyn Provider>, settings: ProviderSettings) {
        let id = provider.id();
        let available = !provider.requires_api_key() || settings.api_key.is_some();

        if !self.entries.contains_key(&id) {
            self.order.push(id);
        }
        self.entries.insert(
            id,
            ProviderEntry {
                provider,
                settings,
                available,
            },
        );
    }

    /// Get a provider entry by identifier
    pub fn get(&self, id: ProviderId) -> Option<&ProviderEntry> {
        self.entries.get(&id)
    }

    /// Check if a provider is registered
    pub fn contains(&self, id: ProviderId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Check if a provider is registered and available
    pub fn is_available(&self, id: ProviderId) -> bool {
        self.entries.get(&id).map(|e| e.available).unwrap_or(false)
    }

    /// All registered providers, in registration order
    pub fn providers(&self) -> &[ProviderId] {
        &self.order
    }

    /// Providers whose credentials resolved, in registration order
    pub fn available_providers(&self) -> Vec<ProviderId> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.is_available(*id))
            .collect()
    }

    /// Availability of every registered provider, in registration order
    pub fn status(&self) -> Vec<(ProviderId, bool)> {
        self.order
            .iter()
            .map(|&id| (id, self.is_available(id)))
            .collect()
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
