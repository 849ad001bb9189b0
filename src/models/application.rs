use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::Error;

/// Workflow state of an application. `Pending` is the only initial state;
/// any state may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
        ApplicationStatus::Withdrawn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Accepted => "ACCEPTED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Withdrawn => "WITHDRAWN",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::BadRequest(format!("Unknown application status: {}", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub job_id: i64,
    pub seeker_id: i64,
    pub status: ApplicationStatus,
    pub applied_date: DateTime<Utc>,
    pub resume_url: Option<String>,
    pub cover_letter: Option<String>,
}

/// Raw `applications` row; status is stored as text.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationRow {
    pub id: i64,
    pub job_id: i64,
    pub seeker_id: i64,
    pub status: String,
    pub applied_date: DateTime<Utc>,
    pub resume_url: Option<String>,
    pub cover_letter: Option<String>,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = Error;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(|_| {
            Error::Storage(format!(
                "application {} has unrecognised status '{}'",
                row.id, row.status
            ))
        })?;
        Ok(Self {
            id: row.id,
            job_id: row.job_id,
            seeker_id: row.seeker_id,
            status,
            applied_date: row.applied_date,
            resume_url: row.resume_url,
            cover_letter: row.cover_letter,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub job_id: i64,
    pub seeker_id: i64,
    pub status: ApplicationStatus,
    pub applied_date: DateTime<Utc>,
    pub resume_url: Option<String>,
    pub cover_letter: Option<String>,
}
