//! Search query model

use crate::error::SearchError;
use crate::{DEFAULT_MAX_RESULTS, MAX_RESULTS};
use std::collections::HashMap;

/// One logical search: query text, a result bound, and an opaque option bag
/// that each provider interprets for only the keys it recognizes.
///
/// Created per call, never persisted.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// Query text (must be non-empty)
    pub text: String,
    /// Requested result count bound (1-100)
    pub max_results: usize,
    /// Provider-specific options
    pub options: HashMap<String, serde_json::Value>,
}

impl SearchQuery {
    /// Create a query with the default result bound
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            max_results: DEFAULT_MAX_RESULTS,
            options: HashMap::new(),
        }
    }

    /// Set the result bound
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Attach a provider-specific option
    pub fn with_option(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    /// Validate before dispatch
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.text.trim().is_empty() {
            return Err(SearchError::InvalidQuery(
                "query text must not be empty".to_string(),
            ));
        }
        if self.max_results < 1 || self.max_results > MAX_RESULTS {
            return Err(SearchError::InvalidQuery(format!(
                "max_results must be between 1 and {}, got {}",
                MAX_RESULTS, self.max_results
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = SearchQuery::new("rust async");
        assert_eq!(query.max_results, 10);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_empty_text_rejected() {
        assert!(SearchQuery::new("   ").validate().is_err());
    }

    #[test]
    fn test_result_bound_enforced() {
        assert!(SearchQuery::new("q").with_max_results(0).validate().is_err());
        assert!(SearchQuery::new("q").with_max_results(101).validate().is_err());
        assert!(SearchQuery::new("q").with_max_results(1).validate().is_ok());
        assert!(SearchQuery::new("q").with_max_results(100).validate().is_ok());
    }
}
