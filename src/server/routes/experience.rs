use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::parse_id;
use crate::db::models::{CreateExperienceInput, Experience};
use crate::error::ApiError;
use crate::server::extract::ApiJson;
use crate::server::guards::RequireApiKey;
use crate::server::respond::ApiResponse;
use crate::server::router::AppState;

/// GET /api/v1/experience
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Experience>>>, ApiError> {
    let experiences = state.experience.list().await?;
    Ok(Json(ApiResponse::data(experiences)))
}

/// GET /api/v1/experience/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<Experience>>, ApiError> {
    let id = parse_id(&raw_id, "experience")?;
    let experience = state
        .experience
        .get(id)
        .await?
        .ok_or(ApiError::NotFound("experience"))?;
    Ok(Json(ApiResponse::data(experience)))
}

/// POST /api/v1/experience (protected)
pub async fn create(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateExperienceInput>,
) -> Result<(StatusCode, Json<ApiResponse<Experience>>), ApiError> {
    input.validate()?;
    let experience = state.experience.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "experience created successfully",
            experience,
        )),
    ))
}

/// PUT /api/v1/experience/{id} (protected, full replace)
pub async fn update(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ApiJson(input): ApiJson<CreateExperienceInput>,
) -> Result<Json<ApiResponse<Experience>>, ApiError> {
    let id = parse_id(&raw_id, "experience")?;
    input.validate()?;
    let experience = state
        .experience
        .update(id, input)
        .await?
        .ok_or(ApiError::NotFound("experience"))?;
    Ok(Json(ApiResponse::with_message(
        "experience updated successfully",
        experience,
    )))
}

/// DELETE /api/v1/experience/{id} (protected)
pub async fn remove(
    _auth: RequireApiKey,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = parse_id(&raw_id, "experience")?;
    if !state.experience.delete(id).await? {
        return Err(ApiError::NotFound("experience"));
    }
    Ok(Json(ApiResponse::message("experience deleted successfully")))
}
