use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;

use crate::mailer::MailError;
use crate::server::respond::ApiResponse;

/// Request-facing error taxonomy. Every variant renders as the standard
/// `{success:false, error}` envelope; the status code carries the class.
#[derive(Debug, ThisError)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    /// Uniform not-found: the body never reveals whether the record is
    /// absent or merely hidden from the caller.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("API key required. Provide via X-API-Key header or Authorization: Bearer <key>")]
    MissingKey,

    #[error("invalid API key")]
    InvalidKey,

    #[error("API key not configured on server")]
    ServerMisconfigured,

    #[error("documentation with slug '{0}' already exists")]
    SlugConflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored value could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to send email: {0}")]
    Mail(#[from] MailError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(format!("invalid request body: {rejection}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MissingKey => StatusCode::UNAUTHORIZED,
            ApiError::InvalidKey => StatusCode::FORBIDDEN,
            ApiError::SlugConflict(_) => StatusCode::CONFLICT,
            ApiError::ServerMisconfigured
            | ApiError::Database(_)
            | ApiError::Decode(_)
            | ApiError::Mail(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}
