use axum::http::request::Parts;
use axum::{extract::FromRequestParts, http::HeaderMap};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use std::convert::Infallible;
use subtle::ConstantTimeEq;

use crate::error::ApiError;
use crate::server::router::AppState;

/// Pulls the client-supplied key from, in order: the `X-API-Key` header,
/// a Bearer-scheme `Authorization` header, or the `api_key` query
/// parameter.
fn extract_key(headers: &HeaderMap, query: Option<&str>) -> Option<String> {
    if let Some(k) = headers.get("x-api-key").and_then(|v| v.to_str().ok()) {
        return Some(k.to_string());
    }
    if let Some(auth) = headers.typed_get::<Authorization<Bearer>>() {
        return Some(auth.token().to_string());
    }
    query.and_then(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .find(|(k, _)| k == "api_key")
            .map(|(_, v)| v.into_owned())
    })
}

fn key_matches(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Guard for mutation endpoints. Fails closed with a 500-class error when
/// the server itself has no key configured; otherwise 401 for a missing
/// client key and 403 for a mismatch.
#[derive(Debug, Clone, Copy)]
pub struct RequireApiKey;

impl FromRequestParts<AppState> for RequireApiKey {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let expected = state.api_key.as_ref();
        if expected.is_empty() {
            return Err(ApiError::ServerMisconfigured);
        }

        match extract_key(&parts.headers, parts.uri.query()) {
            Some(key) if key_matches(&key, expected) => Ok(RequireApiKey),
            Some(_) => Err(ApiError::InvalidKey),
            None => Err(ApiError::MissingKey),
        }
    }
}

/// Optional-auth variant: never rejects, only records whether a valid key
/// was presented. Used where the response shape differs for
/// authenticated callers (documentation visibility).
#[derive(Debug, Clone, Copy)]
pub struct Viewer {
    pub authenticated: bool,
}

impl FromRequestParts<AppState> for Viewer {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let expected = state.api_key.as_ref();
        let authenticated = !expected.is_empty()
            && extract_key(&parts.headers, parts.uri.query())
                .is_some_and(|key| key_matches(&key, expected));
        Ok(Viewer { authenticated })
    }
}
