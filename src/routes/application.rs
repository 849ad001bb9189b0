use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::application_dto::{
        ApplicationFilterQuery, CreateApplicationPayload, HasAppliedResponse,
        ResumeUploadResponse, UpdateStatusPayload,
    },
    dto::{CountResponse, MessageResponse},
    error::{Error, Result},
    AppState,
};

/// Resume part of a multipart form.
struct UploadedFile {
    name: String,
    data: bytes::Bytes,
}

#[derive(Default)]
struct ApplicationForm {
    job_id: Option<i64>,
    seeker_id: Option<i64>,
    cover_letter: Option<String>,
    resume: Option<UploadedFile>,
}

fn parse_id(field: &str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| Error::BadRequest(format!("{} must be a number", field)))
}

async fn read_form(mut multipart: Multipart) -> Result<ApplicationForm> {
    let mut form = ApplicationForm::default();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "job_id" | "jobId" => form.job_id = Some(parse_id("job_id", &field.text().await?)?),
            "seeker_id" | "seekerId" => {
                form.seeker_id = Some(parse_id("seeker_id", &field.text().await?)?)
            }
            "cover_letter" | "coverLetter" => {
                let text = field.text().await?;
                if !text.trim().is_empty() {
                    form.cover_letter = Some(text);
                }
            }
            "resume" => {
                let name = field.file_name().unwrap_or("resume.bin").to_string();
                let data = field.bytes().await?;
                form.resume = Some(UploadedFile { name, data });
            }
            other => tracing::debug!(field = other, "ignoring unknown form field"),
        }
    }

    Ok(form)
}

#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = CreateApplicationPayload,
    responses(
        (status = 201, description = "Application submitted", body = ApplicationView),
        (status = 404, description = "Job or seeker not found"),
        (status = 409, description = "Already applied")
    )
)]
#[axum::debug_handler]
pub async fn create_application(
    State(state): State<AppState>,
    Json(payload): Json<CreateApplicationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let view = state.application_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(
    post,
    path = "/api/applications/upload",
    responses(
        (status = 201, description = "Application submitted with resume", body = ApplicationView),
        (status = 400, description = "Missing fields or rejected file"),
        (status = 409, description = "Already applied")
    )
)]
#[axum::debug_handler]
pub async fn submit_with_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = read_form(multipart).await?;
    let job_id = form
        .job_id
        .ok_or_else(|| Error::BadRequest("job_id is required".into()))?;
    let seeker_id = form
        .seeker_id
        .ok_or_else(|| Error::BadRequest("seeker_id is required".into()))?;
    let resume = form
        .resume
        .ok_or_else(|| Error::BadRequest("resume file is required".into()))?;

    let view = state
        .application_service
        .submit_with_resume(job_id, seeker_id, &resume.data, &resume.name, form.cover_letter)
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(
    post,
    path = "/api/applications/upload-resume",
    responses(
        (status = 200, description = "Resume stored", body = ResumeUploadResponse),
        (status = 400, description = "Missing or rejected file")
    )
)]
#[axum::debug_handler]
pub async fn upload_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let resume = read_form(multipart)
        .await?
        .resume
        .ok_or_else(|| Error::BadRequest("resume file is required".into()))?;
    let resume_url = state
        .application_service
        .upload_resume(&resume.data, &resume.name)
        .await?;
    Ok(Json(ResumeUploadResponse {
        resume_url,
        file_name: resume.name,
    }))
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    params(("id" = i64, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application with job, seeker and recruiter", body = ApplicationView),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let view = state.application_service.get(id).await?;
    Ok(Json(view))
}

#[utoipa::path(
    put,
    path = "/api/applications/{id}/status",
    params(("id" = i64, Path, description = "Application ID")),
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status changed", body = Application),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state
        .application_service
        .update_status(id, &payload.status)
        .await?;
    Ok(Json(application))
}

#[utoipa::path(
    delete,
    path = "/api/applications/{id}",
    params(("id" = i64, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application deleted", body = MessageResponse),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.application_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Application deleted successfully")))
}

#[utoipa::path(
    get,
    path = "/api/applications/recruiter/{recruiter_id}",
    params(("recruiter_id" = i64, Path, description = "Recruiter ID")),
    responses((status = 200, description = "Applications to the recruiter's jobs", body = Vec<ApplicationView>))
)]
#[axum::debug_handler]
pub async fn by_recruiter(
    State(state): State<AppState>,
    Path(recruiter_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let views = state.application_service.by_recruiter(recruiter_id).await?;
    Ok(Json(views))
}

#[utoipa::path(
    get,
    path = "/api/applications/recruiter/{recruiter_id}/details",
    params(("recruiter_id" = i64, Path, description = "Recruiter ID")),
    responses((status = 200, description = "Flat dashboard rows, newest first", body = Vec<RecruiterApplicationRow>))
)]
#[axum::debug_handler]
pub async fn by_recruiter_with_details(
    State(state): State<AppState>,
    Path(recruiter_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let rows = state
        .application_service
        .by_recruiter_with_details(recruiter_id)
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/applications/recruiter/{recruiter_id}/count",
    params(
        ("recruiter_id" = i64, Path, description = "Recruiter ID"),
        ("status" = String, Query, description = "Application status")
    ),
    responses(
        (status = 200, description = "Matching application count", body = CountResponse),
        (status = 400, description = "Missing or unknown status")
    )
)]
#[axum::debug_handler]
pub async fn count_by_recruiter(
    State(state): State<AppState>,
    Path(recruiter_id): Path<i64>,
    Query(query): Query<ApplicationFilterQuery>,
) -> Result<impl IntoResponse> {
    let status = query
        .status
        .ok_or_else(|| Error::BadRequest("status is required".into()))?;
    let count = state
        .application_service
        .count_by_recruiter_and_status(recruiter_id, &status)
        .await?;
    Ok(Json(CountResponse { count }))
}

#[utoipa::path(
    get,
    path = "/api/applications/job/{job_id}",
    params(
        ("job_id" = i64, Path, description = "Job ID"),
        ("status" = Option<String>, Query, description = "Only applications in this status")
    ),
    responses((status = 200, description = "Applications for the job", body = Vec<ApplicationView>))
)]
#[axum::debug_handler]
pub async fn by_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    Query(query): Query<ApplicationFilterQuery>,
) -> Result<impl IntoResponse> {
    let views = state
        .application_service
        .by_job(job_id, query.status.as_deref())
        .await?;
    Ok(Json(views))
}

#[utoipa::path(
    get,
    path = "/api/applications/job/{job_id}/count",
    params(("job_id" = i64, Path, description = "Job ID")),
    responses((status = 200, description = "Number of applications", body = CountResponse))
)]
#[axum::debug_handler]
pub async fn count_by_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let count = state.application_service.count_by_job(job_id).await?;
    Ok(Json(CountResponse { count }))
}

#[utoipa::path(
    get,
    path = "/api/applications/seeker/{seeker_id}",
    params(("seeker_id" = i64, Path, description = "Seeker ID")),
    responses((status = 200, description = "The seeker's applications", body = Vec<ApplicationView>))
)]
#[axum::debug_handler]
pub async fn by_seeker(
    State(state): State<AppState>,
    Path(seeker_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let views = state.application_service.by_seeker(seeker_id).await?;
    Ok(Json(views))
}

#[utoipa::path(
    get,
    path = "/api/applications/status/{status}",
    params(("status" = String, Path, description = "Application status, any case")),
    responses(
        (status = 200, description = "Applications in the status", body = Vec<ApplicationView>),
        (status = 400, description = "Unknown status")
    )
)]
#[axum::debug_handler]
pub async fn by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<impl IntoResponse> {
    let views = state.application_service.by_status(&status).await?;
    Ok(Json(views))
}

#[utoipa::path(
    get,
    path = "/api/applications/check/{job_id}/{seeker_id}",
    params(
        ("job_id" = i64, Path, description = "Job ID"),
        ("seeker_id" = i64, Path, description = "Seeker ID")
    ),
    responses((status = 200, description = "Whether the seeker applied", body = HasAppliedResponse))
)]
#[axum::debug_handler]
pub async fn has_applied(
    State(state): State<AppState>,
    Path((job_id, seeker_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse> {
    let has_applied = state
        .application_service
        .has_applied(job_id, seeker_id)
        .await?;
    Ok(Json(HasAppliedResponse { has_applied }))
}
