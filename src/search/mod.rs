//! Search orchestration: query model, dispatch, fallback, façade

mod dispatch;
mod fallback;
mod manager;
mod query;

pub use dispatch::ConcurrentDispatcher;
pub use fallback::FallbackScheduler;
pub use manager::SearchManager;
pub use query::SearchQuery;
