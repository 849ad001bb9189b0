use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::profile_dto::{CreateProfilePayload, ProfilePayload},
    dto::{ExistsResponse, MessageResponse},
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/profiles",
    responses((status = 200, description = "Every seeker profile", body = Vec<Profile>))
)]
#[axum::debug_handler]
pub async fn list_profiles(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let profiles = state.profile_service.list().await?;
    Ok(Json(profiles))
}

#[utoipa::path(
    post,
    path = "/api/profiles",
    request_body = CreateProfilePayload,
    responses(
        (status = 201, description = "Profile created", body = Profile),
        (status = 404, description = "Seeker not found"),
        (status = 409, description = "Seeker already has a profile")
    )
)]
#[axum::debug_handler]
pub async fn create_profile(
    State(state): State<AppState>,
    Json(payload): Json<CreateProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let profile = state
        .profile_service
        .create(payload.seeker_id, payload.fields.into())
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

#[utoipa::path(
    get,
    path = "/api/profiles/seeker/{seeker_id}",
    params(("seeker_id" = i64, Path, description = "Seeker ID")),
    responses(
        (status = 200, description = "The seeker's profile", body = Profile),
        (status = 404, description = "Profile not found")
    )
)]
#[axum::debug_handler]
pub async fn get_by_seeker(
    State(state): State<AppState>,
    Path(seeker_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let profile = state.profile_service.get_by_seeker(seeker_id).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    put,
    path = "/api/profiles/seeker/{seeker_id}",
    params(("seeker_id" = i64, Path, description = "Seeker ID")),
    request_body = ProfilePayload,
    responses(
        (status = 200, description = "Profile overwritten", body = Profile),
        (status = 404, description = "Profile not found")
    )
)]
#[axum::debug_handler]
pub async fn update_by_seeker(
    State(state): State<AppState>,
    Path(seeker_id): Path<i64>,
    Json(payload): Json<ProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let profile = state
        .profile_service
        .update_by_seeker(seeker_id, payload.into())
        .await?;
    Ok(Json(profile))
}

#[utoipa::path(
    get,
    path = "/api/profiles/check/{seeker_id}",
    params(("seeker_id" = i64, Path, description = "Seeker ID")),
    responses((status = 200, description = "Whether the seeker has a profile", body = ExistsResponse))
)]
#[axum::debug_handler]
pub async fn profile_exists(
    State(state): State<AppState>,
    Path(seeker_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let exists = state.profile_service.exists(seeker_id).await?;
    Ok(Json(ExistsResponse { exists }))
}

#[utoipa::path(
    put,
    path = "/api/profiles/{profile_id}",
    params(("profile_id" = i64, Path, description = "Profile ID")),
    request_body = ProfilePayload,
    responses(
        (status = 200, description = "Profile overwritten", body = Profile),
        (status = 404, description = "Profile not found")
    )
)]
#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<i64>,
    Json(payload): Json<ProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let profile = state
        .profile_service
        .update(profile_id, payload.into())
        .await?;
    Ok(Json(profile))
}

#[utoipa::path(
    delete,
    path = "/api/profiles/{profile_id}",
    params(("profile_id" = i64, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "Profile deleted", body = MessageResponse),
        (status = 404, description = "Profile not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.profile_service.delete(profile_id).await?;
    Ok(Json(MessageResponse::new("Profile deleted successfully")))
}
