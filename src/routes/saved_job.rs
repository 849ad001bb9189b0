use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::saved_job_dto::{IsSavedResponse, RemovedResponse, SaveJobPayload},
    dto::{CountResponse, MessageResponse},
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/saved-jobs",
    request_body = SaveJobPayload,
    responses(
        (status = 201, description = "Job saved", body = SavedJob),
        (status = 404, description = "Job or seeker not found"),
        (status = 409, description = "Job already saved")
    )
)]
#[axum::debug_handler]
pub async fn save_job(
    State(state): State<AppState>,
    Json(payload): Json<SaveJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let saved = state
        .saved_job_service
        .save(payload.job_id, payload.seeker_id)
        .await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

#[utoipa::path(
    get,
    path = "/api/saved-jobs/seeker/{seeker_id}",
    params(("seeker_id" = i64, Path, description = "Seeker ID")),
    responses((status = 200, description = "Saved jobs with job details, newest first", body = Vec<SavedJobWithDetails>))
)]
#[axum::debug_handler]
pub async fn list_for_seeker(
    State(state): State<AppState>,
    Path(seeker_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let rows = state
        .saved_job_service
        .list_with_job_details(seeker_id)
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/saved-jobs/seeker/{seeker_id}/count",
    params(("seeker_id" = i64, Path, description = "Seeker ID")),
    responses((status = 200, description = "Number of saved jobs", body = CountResponse))
)]
#[axum::debug_handler]
pub async fn count_for_seeker(
    State(state): State<AppState>,
    Path(seeker_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let count = state.saved_job_service.count_for_seeker(seeker_id).await?;
    Ok(Json(CountResponse { count }))
}

#[utoipa::path(
    delete,
    path = "/api/saved-jobs/seeker/{seeker_id}",
    params(("seeker_id" = i64, Path, description = "Seeker ID")),
    request_body = Vec<i64>,
    responses((status = 200, description = "Listed bookmarks removed; unknown ones skipped", body = RemovedResponse))
)]
#[axum::debug_handler]
pub async fn unsave_many(
    State(state): State<AppState>,
    Path(seeker_id): Path<i64>,
    Json(job_ids): Json<Vec<i64>>,
) -> Result<impl IntoResponse> {
    let removed = state
        .saved_job_service
        .unsave_many(seeker_id, &job_ids)
        .await?;
    Ok(Json(RemovedResponse { removed }))
}

#[utoipa::path(
    get,
    path = "/api/saved-jobs/job/{job_id}/seeker/{seeker_id}",
    params(
        ("job_id" = i64, Path, description = "Job ID"),
        ("seeker_id" = i64, Path, description = "Seeker ID")
    ),
    responses((status = 200, description = "Whether the job is saved", body = IsSavedResponse))
)]
#[axum::debug_handler]
pub async fn is_saved(
    State(state): State<AppState>,
    Path((job_id, seeker_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse> {
    let is_saved = state.saved_job_service.is_saved(job_id, seeker_id).await?;
    Ok(Json(IsSavedResponse { is_saved }))
}

#[utoipa::path(
    delete,
    path = "/api/saved-jobs/job/{job_id}/seeker/{seeker_id}",
    params(
        ("job_id" = i64, Path, description = "Job ID"),
        ("seeker_id" = i64, Path, description = "Seeker ID")
    ),
    responses(
        (status = 200, description = "Bookmark removed", body = MessageResponse),
        (status = 404, description = "Job not saved")
    )
)]
#[axum::debug_handler]
pub async fn unsave_job(
    State(state): State<AppState>,
    Path((job_id, seeker_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse> {
    state.saved_job_service.unsave(job_id, seeker_id).await?;
    Ok(Json(MessageResponse::new("Job unsaved successfully")))
}

#[utoipa::path(
    get,
    path = "/api/saved-jobs/job/{job_id}/seekers",
    params(("job_id" = i64, Path, description = "Job ID")),
    responses((status = 200, description = "Bookmarks pointing at the job", body = Vec<SavedJob>))
)]
#[axum::debug_handler]
pub async fn list_for_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let rows = state.saved_job_service.list_for_job(job_id).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    delete,
    path = "/api/saved-jobs/job/{job_id}",
    params(("job_id" = i64, Path, description = "Job ID")),
    responses((status = 200, description = "Every bookmark for the job removed", body = RemovedResponse))
)]
#[axum::debug_handler]
pub async fn delete_all_for_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let removed = state.saved_job_service.delete_all_for_job(job_id).await?;
    Ok(Json(RemovedResponse { removed }))
}
