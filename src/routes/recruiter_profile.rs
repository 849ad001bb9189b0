//! Company profile handlers, nested under `/api/recruiters/{id}/profile`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::profile_dto::RecruiterProfilePayload,
    dto::{ExistsResponse, MessageResponse},
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/recruiters/{id}/profile",
    params(("id" = i64, Path, description = "Recruiter ID")),
    responses(
        (status = 200, description = "Company profile", body = RecruiterProfile),
        (status = 404, description = "Profile not found")
    )
)]
#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let profile = state.recruiter_profile_service.get_by_recruiter(id).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    get,
    path = "/api/recruiters/{id}/profile/exists",
    params(("id" = i64, Path, description = "Recruiter ID")),
    responses((status = 200, description = "Whether the recruiter has a profile", body = ExistsResponse))
)]
#[axum::debug_handler]
pub async fn profile_exists(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let exists = state.recruiter_profile_service.exists(id).await?;
    Ok(Json(ExistsResponse { exists }))
}

#[utoipa::path(
    post,
    path = "/api/recruiters/{id}/profile",
    params(("id" = i64, Path, description = "Recruiter ID")),
    request_body = RecruiterProfilePayload,
    responses(
        (status = 201, description = "Profile created", body = RecruiterProfile),
        (status = 404, description = "Recruiter not found"),
        (status = 409, description = "Recruiter already has a profile")
    )
)]
#[axum::debug_handler]
pub async fn create_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<RecruiterProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let profile = state
        .recruiter_profile_service
        .create(id, payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

#[utoipa::path(
    put,
    path = "/api/recruiters/{id}/profile",
    params(("id" = i64, Path, description = "Recruiter ID")),
    request_body = RecruiterProfilePayload,
    responses(
        (status = 200, description = "Profile created or overwritten", body = RecruiterProfile),
        (status = 404, description = "Recruiter not found")
    )
)]
#[axum::debug_handler]
pub async fn upsert_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<RecruiterProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let profile = state
        .recruiter_profile_service
        .upsert(id, payload.into())
        .await?;
    Ok(Json(profile))
}

#[utoipa::path(
    delete,
    path = "/api/recruiters/{id}/profile",
    params(("id" = i64, Path, description = "Recruiter ID")),
    responses(
        (status = 200, description = "Profile deleted", body = MessageResponse),
        (status = 404, description = "Profile not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.recruiter_profile_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Profile deleted successfully")))
}
