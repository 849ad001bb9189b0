use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::application_service::ApplicationDraft;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateApplicationPayload {
    #[validate(range(min = 1))]
    pub job_id: i64,
    #[validate(range(min = 1))]
    pub seeker_id: i64,
    pub resume_url: Option<String>,
    pub cover_letter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateStatusPayload {
    #[validate(length(min = 1))]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApplicationFilterQuery {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HasAppliedResponse {
    pub has_applied: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeUploadResponse {
    pub resume_url: String,
    pub file_name: String,
}

impl From<CreateApplicationPayload> for ApplicationDraft {
    fn from(value: CreateApplicationPayload) -> Self {
        Self {
            job_id: value.job_id,
            seeker_id: value.seeker_id,
            resume_url: value.resume_url,
            cover_letter: value.cover_letter,
        }
    }
}
