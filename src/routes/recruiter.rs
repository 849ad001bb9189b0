use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::account_dto::{AccountResponse, SigninPayload, SignupPayload, UpdateRecruiterPayload},
    dto::MessageResponse,
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/recruiters",
    responses(
        (status = 200, description = "All recruiters", body = Vec<AccountResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_recruiters(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let recruiters = state.recruiter_service.list().await?;
    let body: Vec<AccountResponse> = recruiters.into_iter().map(AccountResponse::from).collect();
    Ok(Json(body))
}

#[utoipa::path(
    post,
    path = "/api/recruiters/signup",
    request_body = SignupPayload,
    responses(
        (status = 201, description = "Recruiter registered", body = AccountResponse),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let recruiter = state
        .recruiter_service
        .signup(&payload.name, &payload.email, &payload.password)
        .await?;
    Ok((StatusCode::CREATED, Json(AccountResponse::from(recruiter))))
}

#[utoipa::path(
    post,
    path = "/api/recruiters/signin",
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
    let recruiter = state
        .recruiter_service
        .signin(&payload.email, &payload.password)
        .await?;
    Ok(Json(AccountResponse::from(recruiter)))
}

#[utoipa::path(
    get,
    path = "/api/recruiters/{id}",
    params(("id" = i64, Path, description = "Recruiter ID")),
    responses(
        (status = 200, description = "Recruiter", body = AccountResponse),
        (status = 404, description = "Recruiter not found")
    )
)]
#[axum::debug_handler]
pub async fn get_recruiter(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let recruiter = state.recruiter_service.get(id).await?;
    Ok(Json(AccountResponse::from(recruiter)))
}

#[utoipa::path(
    put,
    path = "/api/recruiters/{id}",
    params(("id" = i64, Path, description = "Recruiter ID")),
    request_body = UpdateRecruiterPayload,
    responses(
        (status = 200, description = "Recruiter updated", body = AccountResponse),
        (status = 404, description = "Recruiter not found"),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn update_recruiter(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateRecruiterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let recruiter = state.recruiter_service.update(id, payload.into()).await?;
    Ok(Json(AccountResponse::from(recruiter)))
}

#[utoipa::path(
    delete,
    path = "/api/recruiters/{id}",
    params(("id" = i64, Path, description = "Recruiter ID")),
    responses(
        (status = 200, description = "Recruiter deleted", body = MessageResponse),
        (status = 404, description = "Recruiter not found"),
        (status = 409, description = "Recruiter still owns jobs")
    )
)]
#[axum::debug_handler]
pub async fn delete_recruiter(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.recruiter_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Recruiter deleted successfully")))
}
