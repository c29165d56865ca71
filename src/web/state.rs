//! Shared application state

use crate::search::SearchManager;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<SearchManager>,
}

impl AppState {
    pub fn new(manager: SearchManager) -> Self {
        Self {
            manager: Arc::new(manager),
        }
    }
}
