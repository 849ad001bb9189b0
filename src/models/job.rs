use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: i64,
    pub recruiter_id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub posted_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewJob {
    pub recruiter_id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub posted_date: NaiveDate,
}

/// Filters for the paginated job listing. Text filters match case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub search: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl JobFilter {
    pub fn matches(&self, job: &Job) -> bool {
        fn contains(haystack: &str, needle: &str) -> bool {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }

        if let Some(search) = &self.search {
            let hit = contains(&job.title, search)
                || contains(&job.company, search)
                || job
                    .description
                    .as_deref()
                    .map(|d| contains(d, search))
                    .unwrap_or(false);
            if !hit {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if !contains(&job.location, location) {
                return false;
            }
        }
        if let Some(job_type) = &self.job_type {
            if !job
                .job_type
                .as_deref()
                .map(|t| t.eq_ignore_ascii_case(job_type))
                .unwrap_or(false)
            {
                return false;
            }
        }
        if let Some(level) = &self.experience_level {
            if !job
                .experience_level
                .as_deref()
                .map(|l| l.eq_ignore_ascii_case(level))
                .unwrap_or(false)
            {
                return false;
            }
        }
        true
    }
}
