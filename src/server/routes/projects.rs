use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::parse_id;
use crate::db::models::{CreateProjectInput, Project};
use crate::error::ApiError;
use crate::server::extract::ApiJson;
use crate::server::guards::RequireApiKey;
use crate::server::respond::ApiResponse;
use crate::server::router::AppState;

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Project>>>, ApiError> {
    let projects = state.projects.list().await?;
    Ok(Json(ApiResponse::data(projects)))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let id = parse_id(&raw_id, "project")?;
    let project = state
        .projects
        .get(id)
        .await?
        .ok_or(ApiError::NotFound("project"))?;
    Ok(Json(ApiResponse::data(project)))
}

/// POST /api/v1/projects (protected)
pub async fn create(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateProjectInput>,
) -> Result<(StatusCode, Json<ApiResponse<Project>>), ApiError> {
    input.validate()?;
    let project = state.projects.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "project created successfully",
            project,
        )),
    ))
}

/// PUT /api/v1/projects/{id} (protected, full replace)
pub async fn update(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ApiJson(input): ApiJson<CreateProjectInput>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let id = parse_id(&raw_id, "project")?;
    input.validate()?;
    let project = state
        .projects
        .update(id, input)
        .await?
        .ok_or(ApiError::NotFound("project"))?;
    Ok(Json(ApiResponse::with_message(
        "project updated successfully",
        project,
    )))
}

/// DELETE /api/v1/projects/{id} (protected)
pub async fn remove(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = parse_id(&raw_id, "project")?;
    if !state.projects.delete(id).await? {
        return Err(ApiError::NotFound("project"));
    }
    Ok(Json(ApiResponse::message("project deleted successfully")))
}
