//! Per-entity route handlers. Mutations authenticate via the
//! [`RequireApiKey`](crate::server::guards::RequireApiKey) extractor
//! argument; reads are public except where noted.

pub mod contact;
pub mod docs;
pub mod experience;
pub mod projects;

use crate::error::ApiError;

/// Path ids arrive as raw strings so a non-numeric id yields the
/// standard 400 envelope rather than axum's plain-text rejection.
fn parse_id(raw: &str, what: &'static str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::InvalidInput(format!("invalid {what} id")))
}
