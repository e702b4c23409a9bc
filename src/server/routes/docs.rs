use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::parse_id;
use crate::db::models::{CreateDocInput, DocEntry, UpdateDocInput};
use crate::error::ApiError;
use crate::server::extract::ApiJson;
use crate::server::guards::{RequireApiKey, Viewer};
use crate::server::respond::ApiResponse;
use crate::server::router::AppState;

/// GET /api/v1/docs — published only for anonymous callers, everything
/// for holders of the shared secret.
pub async fn list(
    viewer: Viewer,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<DocEntry>>>, ApiError> {
    let docs = state.docs.list(!viewer.authenticated).await?;
    Ok(Json(ApiResponse::data(docs)))
}

/// GET /api/v1/docs/category/{category}
pub async fn list_by_category(
    viewer: Viewer,
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<ApiResponse<Vec<DocEntry>>>, ApiError> {
    let docs = state
        .docs
        .list_by_category(&category, !viewer.authenticated)
        .await?;
    Ok(Json(ApiResponse::data(docs)))
}

/// GET /api/v1/docs/{slug} — an unpublished entry is indistinguishable
/// from a missing one for anonymous callers.
pub async fn get_by_slug(
    viewer: Viewer,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<DocEntry>>, ApiError> {
    match state.docs.get_by_slug(&slug).await? {
        Some(doc) if doc.published || viewer.authenticated => Ok(Json(ApiResponse::data(doc))),
        _ => Err(ApiError::NotFound("documentation")),
    }
}

/// GET /api/v1/docs/id/{id} (protected; sees unpublished entries)
pub async fn get_by_id(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<DocEntry>>, ApiError> {
    let id = parse_id(&raw_id, "documentation")?;
    let doc = state
        .docs
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("documentation"))?;
    Ok(Json(ApiResponse::data(doc)))
}

/// POST /api/v1/docs (protected)
pub async fn create(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateDocInput>,
) -> Result<(StatusCode, Json<ApiResponse<DocEntry>>), ApiError> {
    input.validate()?;
    let doc = state.docs.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "documentation created successfully",
            doc,
        )),
    ))
}

/// PUT /api/v1/docs/id/{id} (protected, sparse update)
pub async fn update(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ApiJson(patch): ApiJson<UpdateDocInput>,
) -> Result<Json<ApiResponse<DocEntry>>, ApiError> {
    let id = parse_id(&raw_id, "documentation")?;
    let doc = state.docs.update(id, patch).await?;
    Ok(Json(ApiResponse::with_message(
        "documentation updated successfully",
        doc,
    )))
}

/// DELETE /api/v1/docs/id/{id} (protected)
pub async fn remove(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = parse_id(&raw_id, "documentation")?;
    if !state.docs.delete(id).await? {
        return Err(ApiError::NotFound("documentation"));
    }
    Ok(Json(ApiResponse::message(
        "documentation deleted successfully",
    )))
}
