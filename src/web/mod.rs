//! Outward-facing HTTP adapter
//!
//! A thin translation layer: query parameters in, `SearchResponse` JSON out.
//! All orchestration lives in the search core.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
