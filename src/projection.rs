//! Read-only views assembled from independently fetched rows.
//!
//! Nothing here touches the store; callers fetch the aggregates in bulk and
//! the views are joined in memory.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus};
use crate::models::job::Job;
use crate::models::recruiter::{Recruiter, RecruiterSummary};
use crate::models::saved_job::SavedJob;
use crate::models::seeker::{Seeker, SeekerSummary};

/// A bookmark with the job's display fields. Job fields stay `None` when
/// the job no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedJobWithDetails {
    pub saved_job_id: i64,
    pub job_id: i64,
    pub seeker_id: i64,
    pub saved_date: DateTime<Utc>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
}

impl SavedJobWithDetails {
    pub fn new(saved: &SavedJob, job: Option<&Job>) -> Self {
        Self {
            saved_job_id: saved.id,
            job_id: saved.job_id,
            seeker_id: saved.seeker_id,
            saved_date: saved.saved_date,
            job_title: job.map(|j| j.title.clone()),
            company: job.map(|j| j.company.clone()),
            location: job.map(|j| j.location.clone()),
            description: job.and_then(|j| j.description.clone()),
            salary_range: job.and_then(|j| j.salary_range.clone()),
            job_type: job.and_then(|j| j.job_type.clone()),
            experience_level: job.and_then(|j| j.experience_level.clone()),
        }
    }
}

/// Joins bookmarks with whatever jobs were found, keeping bookmark order.
pub fn saved_jobs_with_details(saved: &[SavedJob], jobs: Vec<Job>) -> Vec<SavedJobWithDetails> {
    let jobs = index(jobs, |j| j.id);
    saved
        .iter()
        .map(|s| SavedJobWithDetails::new(s, jobs.get(&s.job_id)))
        .collect()
}

/// An application with its job and seeker resolved. `recruiter` is set on
/// recruiter-facing queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationView {
    pub id: i64,
    pub job_id: i64,
    pub seeker_id: i64,
    pub status: ApplicationStatus,
    pub applied_date: DateTime<Utc>,
    pub resume_url: Option<String>,
    pub cover_letter: Option<String>,
    pub job: Job,
    pub seeker: SeekerSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recruiter: Option<RecruiterSummary>,
}

/// Flat row for a recruiter's dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecruiterApplicationRow {
    pub application_id: i64,
    pub status: ApplicationStatus,
    pub applied_date: DateTime<Utc>,
    pub resume_url: Option<String>,
    pub cover_letter: Option<String>,
    pub job_id: i64,
    pub job_title: String,
    pub company: String,
    pub posted_date: NaiveDate,
    pub seeker_id: i64,
    pub seeker_name: String,
    pub seeker_email: String,
}

/// Everything needed to resolve a batch of applications.
pub struct ApplicationContext {
    jobs: HashMap<i64, Job>,
    seekers: HashMap<i64, Seeker>,
    recruiters: HashMap<i64, Recruiter>,
}

impl ApplicationContext {
    pub fn new(jobs: Vec<Job>, seekers: Vec<Seeker>, recruiters: Vec<Recruiter>) -> Self {
        Self {
            jobs: index(jobs, |j| j.id),
            seekers: index(seekers, |s| s.id),
            recruiters: index(recruiters, |r| r.id),
        }
    }

    fn job(&self, application: &Application) -> Result<&Job> {
        self.jobs.get(&application.job_id).ok_or_else(|| {
            Error::Internal(format!(
                "application {} references missing job {}",
                application.id, application.job_id
            ))
        })
    }

    fn seeker(&self, application: &Application) -> Result<&Seeker> {
        self.seekers.get(&application.seeker_id).ok_or_else(|| {
            Error::Internal(format!(
                "application {} references missing seeker {}",
                application.id, application.seeker_id
            ))
        })
    }

    pub fn view(&self, application: Application) -> Result<ApplicationView> {
        let job = self.job(&application)?.clone();
        let seeker = SeekerSummary::from(self.seeker(&application)?);
        let recruiter = self.recruiters.get(&job.recruiter_id).map(RecruiterSummary::from);
        Ok(ApplicationView {
            id: application.id,
            job_id: application.job_id,
            seeker_id: application.seeker_id,
            status: application.status,
            applied_date: application.applied_date,
            resume_url: application.resume_url,
            cover_letter: application.cover_letter,
            job,
            seeker,
            recruiter,
        })
    }

    pub fn views(&self, applications: Vec<Application>) -> Result<Vec<ApplicationView>> {
        applications.into_iter().map(|a| self.view(a)).collect()
    }

    pub fn dashboard_row(&self, application: Application) -> Result<RecruiterApplicationRow> {
        let job = self.job(&application)?;
        let seeker = self.seeker(&application)?;
        Ok(RecruiterApplicationRow {
            application_id: application.id,
            status: application.status,
            applied_date: application.applied_date,
            resume_url: application.resume_url,
            cover_letter: application.cover_letter,
            job_id: job.id,
            job_title: job.title.clone(),
            company: job.company.clone(),
            posted_date: job.posted_date,
            seeker_id: seeker.id,
            seeker_name: seeker.name.clone(),
            seeker_email: seeker.email.clone(),
        })
    }
}

fn index<T>(rows: Vec<T>, key: impl Fn(&T) -> i64) -> HashMap<i64, T> {
    rows.into_iter().map(|row| (key(&row), row)).collect()
}

/// Distinct ids in first-seen order, for bulk lookups.
pub fn distinct_ids(ids: impl IntoIterator<Item = i64>) -> Vec<i64> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time;

    fn job(id: i64) -> Job {
        Job {
            id,
            recruiter_id: 1,
            title: "Backend Engineer".into(),
            company: "Acme".into(),
            location: "Berlin".into(),
            description: Some("Rust services".into()),
            salary_range: None,
            job_type: Some("Full-time".into()),
            experience_level: None,
            posted_date: time::today(),
            created_at: time::now(),
        }
    }

    fn saved(id: i64, job_id: i64) -> SavedJob {
        SavedJob {
            id,
            job_id,
            seeker_id: 5,
            saved_date: time::now(),
        }
    }

    #[test]
    fn missing_job_leaves_detail_fields_empty() {
        let rows = saved_jobs_with_details(&[saved(1, 10), saved(2, 77)], vec![job(10)]);
        assert_eq!(rows[0].job_title.as_deref(), Some("Backend Engineer"));
        assert_eq!(rows[1].job_id, 77);
        assert_eq!(rows[1].saved_job_id, 2);
        assert!(rows[1].job_title.is_none());
        assert!(rows[1].company.is_none());
    }

    #[test]
    fn dangling_application_reference_is_an_error() {
        let ctx = ApplicationContext::new(vec![job(10)], vec![], vec![]);
        let application = Application {
            id: 3,
            job_id: 10,
            seeker_id: 5,
            status: ApplicationStatus::Pending,
            applied_date: time::now(),
            resume_url: None,
            cover_letter: None,
        };
        assert!(matches!(ctx.view(application), Err(Error::Internal(_))));
    }

    #[test]
    fn distinct_ids_keeps_first_seen_order() {
        assert_eq!(distinct_ids([3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }

    #[test]
    fn distinct_ids_handles_large_repetitive_input() {
        let ids = (0..50_000).map(|i| 9_999 - (i % 10_000));
        let distinct = distinct_ids(ids);
        assert_eq!(distinct.len(), 10_000);
        assert_eq!(distinct[0], 9_999);
        assert_eq!(distinct[9_999], 0);
    }
}
