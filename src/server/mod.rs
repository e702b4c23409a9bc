//! HTTP layer: router, envelope, guards, and per-entity route handlers.

pub mod extract;
pub mod guards;
pub mod respond;
pub mod router;
pub mod routes;

pub use router::{AppState, api_router, cors_layer};
