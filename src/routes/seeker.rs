use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::account_dto::{AccountResponse, SigninPayload, SignupPayload, UpdateSeekerPayload},
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/seekers",
    responses((status = 200, description = "All seekers", body = Vec<AccountResponse>))
)]
#[axum::debug_handler]
pub async fn list_seekers(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let seekers = state.seeker_service.list().await?;
    let body: Vec<AccountResponse> = seekers.into_iter().map(AccountResponse::from).collect();
    Ok(Json(body))
}

#[utoipa::path(
    post,
    path = "/api/seekers/signup",
    request_body = SignupPayload,
    responses(
        (status = 201, description = "Seeker registered", body = AccountResponse),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let seeker = state
        .seeker_service
        .signup(&payload.name, &payload.email, &payload.password)
        .await?;
    Ok((StatusCode::CREATED, Json(AccountResponse::from(seeker))))
}

#[utoipa::path(
    post,
    path = "/api/seekers/signin",
    request_body = SigninPayload,
    responses(
        (status = 200, description = "Credentials accepted", body = AccountResponse),
        (status = 401, description = "Invalid email or password")
    )
)]
#[axum::debug_handler]
pub async fn signin(
    State(state): State<AppState>,
    Json(payload): Json<SigninPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let seeker = state
        .seeker_service
        .signin(&payload.email, &payload.password)
        .await?;
    Ok(Json(AccountResponse::from(seeker)))
}

#[utoipa::path(
    get,
    path = "/api/seekers/{id}",
    params(("id" = i64, Path, description = "Seeker ID")),
    responses(
        (status = 200, description = "Seeker", body = AccountResponse),
        (status = 404, description = "Seeker not found")
    )
)]
#[axum::debug_handler]
pub async fn get_seeker(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let seeker = state.seeker_service.get(id).await?;
    Ok(Json(AccountResponse::from(seeker)))
}

#[utoipa::path(
    put,
    path = "/api/seekers/{id}",
    params(("id" = i64, Path, description = "Seeker ID")),
    request_body = UpdateSeekerPayload,
    responses(
        (status = 200, description = "Seeker updated", body = AccountResponse),
        (status = 404, description = "Seeker not found")
    )
)]
#[axum::debug_handler]
pub async fn update_seeker(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSeekerPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let seeker = state.seeker_service.update(id, payload.into()).await?;
    Ok(Json(AccountResponse::from(seeker)))
}

#[utoipa::path(
    delete,
    path = "/api/seekers/{id}",
    params(("id" = i64, Path, description = "Seeker ID")),
    responses(
        (status = 204, description = "Seeker and owned records deleted"),
        (status = 404, description = "Seeker not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_seeker(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.seeker_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
