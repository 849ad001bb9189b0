use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::job_service::{JobDraft, JobSearch, JobUpdate};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobPayload {
    pub recruiter_id: Option<i64>,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub company: String,
    #[validate(length(min = 1))]
    pub location: String,
    pub description: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub company: String,
    #[validate(length(min = 1))]
    pub location: String,
    pub description: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub posted_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub search: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
}

impl CreateJobPayload {
    pub fn into_draft(self) -> (JobDraft, Option<i64>) {
        let draft = JobDraft {
            title: self.title,
            company: self.company,
            location: self.location,
            description: self.description,
            salary_range: self.salary_range,
            job_type: self.job_type,
            experience_level: self.experience_level,
        };
        (draft, self.recruiter_id)
    }
}

impl From<UpdateJobPayload> for JobUpdate {
    fn from(value: UpdateJobPayload) -> Self {
        Self {
            title: value.title,
            company: value.company,
            location: value.location,
            description: value.description,
            salary_range: value.salary_range,
            job_type: value.job_type,
            experience_level: value.experience_level,
            posted_date: value.posted_date,
        }
    }
}

impl From<JobListQuery> for JobSearch {
    fn from(value: JobListQuery) -> Self {
        Self {
            page: value.page,
            per_page: value.per_page,
            search: value.search,
            location: value.location,
            job_type: value.job_type,
            experience_level: value.experience_level,
        }
    }
}
