use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use super::parse_id;
use crate::db::models::{ContactInput, ContactMessage};
use crate::error::ApiError;
use crate::mailer::OutboxJob;
use crate::server::extract::ApiJson;
use crate::server::guards::RequireApiKey;
use crate::server::respond::ApiResponse;
use crate::server::router::AppState;

/// POST /api/v1/contact — public. The submission is durable once the
/// insert returns; notification email rides the outbox and cannot fail
/// the request.
pub async fn submit(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ContactInput>,
) -> Result<(StatusCode, Json<ApiResponse<Value>>), ApiError> {
    input.validate()?;
    let message = state.contact.create(input).await?;

    state
        .outbox
        .enqueue(OutboxJob::ContactNotification(message.clone()));

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Message sent successfully! I'll get back to you soon.",
            json!({ "id": message.id }),
        )),
    ))
}

/// GET /api/v1/messages (protected)
pub async fn list(
    _auth: RequireApiKey,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ContactMessage>>>, ApiError> {
    let messages = state.contact.list().await?;
    Ok(Json(ApiResponse::data(messages)))
}

/// GET /api/v1/messages/unread (protected)
pub async fn list_unread(
    _auth: RequireApiKey,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ContactMessage>>>, ApiError> {
    let messages = state.contact.list_unread().await?;
    Ok(Json(ApiResponse::data(messages)))
}

/// GET /api/v1/messages/{id} (protected)
pub async fn get_by_id(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<ContactMessage>>, ApiError> {
    let id = parse_id(&raw_id, "message")?;
    let message = state
        .contact
        .get(id)
        .await?
        .ok_or(ApiError::NotFound("message"))?;
    Ok(Json(ApiResponse::data(message)))
}

/// PUT /api/v1/messages/{id}/read (protected)
pub async fn mark_read(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = parse_id(&raw_id, "message")?;
    if !state.contact.mark_read(id).await? {
        return Err(ApiError::NotFound("message"));
    }
    Ok(Json(ApiResponse::message("message marked as read")))
}

/// DELETE /api/v1/messages/{id} (protected)
pub async fn remove(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = parse_id(&raw_id, "message")?;
    if !state.contact.delete(id).await? {
        return Err(ApiError::NotFound("message"));
    }
    Ok(Json(ApiResponse::message("message deleted successfully")))
}

/// POST /api/v1/test-email (protected) — synchronous, unlike the contact
/// notification path, so a misconfigured provider is visible here.
pub async fn test_email(
    _auth: RequireApiKey,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.mailer.send_test().await?;
    Ok(Json(ApiResponse::message("test email sent successfully")))
}
