use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::job_dto::{CreateJobPayload, JobListQuery, UpdateJobPayload},
    dto::MessageResponse,
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/jobs",
    params(
        ("page" = Option<i64>, Query, description = "Page number, starting at 1"),
        ("per_page" = Option<i64>, Query, description = "Page size, 1 to 100"),
        ("search" = Option<String>, Query, description = "Matches title, company or description"),
        ("location" = Option<String>, Query, description = "Location substring"),
        ("job_type" = Option<String>, Query, description = "Exact job type"),
        ("experience_level" = Option<String>, Query, description = "Exact experience level")
    ),
    responses((status = 200, description = "Page of jobs, newest first", body = JobList))
)]
#[axum::debug_handler]
pub async fn search_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    let page = state.job_service.search(query.into()).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/jobs/all",
    responses((status = 200, description = "Every job", body = Vec<Job>))
)]
#[axum::debug_handler]
pub async fn list_jobs(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list_all().await?;
    Ok(Json(jobs))
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created", body = Job),
        (status = 400, description = "Invalid payload or unknown recruiter")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (draft, recruiter_id) = payload.into_draft();
    let job = state.job_service.create(draft, recruiter_id).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(("id" = i64, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job", body = Job),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(State(state): State<AppState>, Path(id): Path<i64>) -> Result<impl IntoResponse> {
    let job = state.job_service.get(id).await?;
    Ok(Json(job))
}

#[utoipa::path(
    get,
    path = "/api/jobs/recruiter/{recruiter_id}",
    params(("recruiter_id" = i64, Path, description = "Recruiter ID")),
    responses((status = 200, description = "Jobs posted by the recruiter", body = Vec<Job>))
)]
#[axum::debug_handler]
pub async fn jobs_by_recruiter(
    State(state): State<AppState>,
    Path(recruiter_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list_by_recruiter(recruiter_id).await?;
    Ok(Json(jobs))
}

#[utoipa::path(
    put,
    path = "/api/jobs/{id}",
    params(("id" = i64, Path, description = "Job ID")),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Job updated", body = Job),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.update(id, payload.into()).await?;
    Ok(Json(job))
}

#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    params(("id" = i64, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job deleted", body = MessageResponse),
        (status = 404, description = "Job not found"),
        (status = 409, description = "Job still referenced; use force delete")
    )
)]
#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.job_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Job deleted successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/jobs/{id}/force",
    params(("id" = i64, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job and dependents deleted", body = ForceDeleteSummary),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn force_delete_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let summary = state.job_service.force_delete(id).await?;
    Ok(Json(summary))
}
