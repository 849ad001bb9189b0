use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::job::{Job, JobFilter, NewJob};
use crate::repository::{
    ApplicationRepository, JobRepository, RecruiterRepository, Repositories, SavedJobRepository,
    UnitOfWork, WriteTx,
};
use crate::services::saved_job_service::SavedJobService;
use crate::utils::{time, validation::require_non_empty};

/// Fields a recruiter supplies when posting a job.
#[derive(Debug, Clone, Default)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
}

/// Full replacement of a job's editable fields. A missing `posted_date`
/// keeps the stored one.
#[derive(Debug, Clone, Default)]
pub struct JobUpdate {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub posted_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct JobSearch {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub search: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JobList {
    pub items: Vec<Job>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

/// Rows removed by a force delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForceDeleteSummary {
    pub job_id: i64,
    pub saved_jobs_removed: u64,
    pub applications_removed: u64,
}

fn not_found(id: i64) -> Error {
    Error::NotFound(format!("Job not found with id: {}", id))
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Removes a job with its bookmarks and applications inside `tx`.
/// The job row is locked first so no bookmark can be added behind the purge;
/// then bookmarks, applications and the job row go.
pub(crate) async fn purge_job(tx: &mut dyn WriteTx, job_id: i64) -> Result<ForceDeleteSummary> {
    if !tx.lock_job(job_id).await? {
        return Err(not_found(job_id));
    }
    let saved_jobs_removed = SavedJobService::delete_all_for_job_in(tx, job_id).await?;
    let applications_removed = tx.delete_applications_by_job(job_id).await?;
    if tx.delete_job(job_id).await? == 0 {
        return Err(not_found(job_id));
    }
    Ok(ForceDeleteSummary {
        job_id,
        saved_jobs_removed,
        applications_removed,
    })
}

#[derive(Clone)]
pub struct JobService {
    jobs: Arc<dyn JobRepository>,
    recruiters: Arc<dyn RecruiterRepository>,
    applications: Arc<dyn ApplicationRepository>,
    saved_jobs: Arc<dyn SavedJobRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl JobService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            jobs: repos.jobs.clone(),
            recruiters: repos.recruiters.clone(),
            applications: repos.applications.clone(),
            saved_jobs: repos.saved_jobs.clone(),
            unit_of_work: repos.unit_of_work.clone(),
        }
    }

    pub async fn create(&self, draft: JobDraft, recruiter_id: Option<i64>) -> Result<Job> {
        let recruiter_id =
            recruiter_id.ok_or_else(|| Error::BadRequest("Recruiter ID is required".into()))?;
        let missing_recruiter =
            || Error::BadRequest(format!("Recruiter not found with id: {}", recruiter_id));

        if self.recruiters.find_by_id(recruiter_id).await?.is_none() {
            return Err(missing_recruiter());
        }

        let new_job = NewJob {
            recruiter_id,
            title: require_non_empty("Title", &draft.title)?,
            company: require_non_empty("Company", &draft.company)?,
            location: require_non_empty("Location", &draft.location)?,
            description: blank_to_none(draft.description),
            salary_range: blank_to_none(draft.salary_range),
            job_type: blank_to_none(draft.job_type),
            experience_level: blank_to_none(draft.experience_level),
            posted_date: time::today(),
        };

        let job = match self.jobs.insert(new_job).await {
            Ok(job) => job,
            Err(err) if err.is_conflict() => {
                // The only foreign key on jobs is the owner.
                if self.recruiters.find_by_id(recruiter_id).await?.is_none() {
                    return Err(missing_recruiter());
                }
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        tracing::info!(job_id = job.id, recruiter_id, "job created");
        Ok(job)
    }

    pub async fn update(&self, job_id: i64, update: JobUpdate) -> Result<Job> {
        let mut job = self.get(job_id).await?;

        job.title = require_non_empty("Title", &update.title)?;
        job.company = require_non_empty("Company", &update.company)?;
        job.location = require_non_empty("Location", &update.location)?;
        job.description = blank_to_none(update.description);
        job.salary_range = blank_to_none(update.salary_range);
        job.job_type = blank_to_none(update.job_type);
        job.experience_level = blank_to_none(update.experience_level);
        if let Some(posted_date) = update.posted_date {
            job.posted_date = posted_date;
        }

        let job = self.jobs.update(&job).await?;
        tracing::info!(job_id, "job updated");
        Ok(job)
    }

    /// Deletes a job that nothing references. Jobs with applications or
    /// bookmarks need [`JobService::force_delete`].
    pub async fn delete(&self, job_id: i64) -> Result<()> {
        self.get(job_id).await?;

        let applications = self.applications.count_by_job_id(job_id).await?;
        let bookmarks = self.saved_jobs.find_by_job_id(job_id).await?.len();
        if applications > 0 || bookmarks > 0 {
            return Err(Error::Conflict(format!(
                "Job {} still has {} application(s) and {} saved bookmark(s); use force delete to remove them",
                job_id, applications, bookmarks
            )));
        }

        match self.jobs.delete_by_id(job_id).await {
            Ok(_) => {
                tracing::info!(job_id, "job deleted");
                Ok(())
            }
            Err(err) if err.is_conflict() => {
                tracing::warn!(job_id, error = %err, "job gained dependents during delete");
                Err(Error::Conflict(format!(
                    "Job {} has dependent records; use force delete to remove them",
                    job_id
                )))
            }
            Err(err) => Err(err),
        }
    }

    /// Removes the job together with every bookmark and application that
    /// references it. All three steps commit together or not at all.
    pub async fn force_delete(&self, job_id: i64) -> Result<ForceDeleteSummary> {
        self.get(job_id).await?;

        let mut tx = self.unit_of_work.begin().await?;
        let summary = match purge_job(tx.as_mut(), job_id).await {
            Ok(summary) => summary,
            Err(err) => {
                tracing::error!(job_id, error = %err, "force delete rolled back");
                return Err(err);
            }
        };
        tx.commit().await?;

        tracing::info!(
            job_id,
            saved_jobs_removed = summary.saved_jobs_removed,
            applications_removed = summary.applications_removed,
            "job force deleted"
        );
        Ok(summary)
    }

    pub async fn get(&self, job_id: i64) -> Result<Job> {
        self.jobs
            .find_by_id(job_id)
            .await?
            .ok_or_else(|| not_found(job_id))
    }

    pub async fn list_all(&self) -> Result<Vec<Job>> {
        self.jobs.find_all().await
    }

    pub async fn list_by_recruiter(&self, recruiter_id: i64) -> Result<Vec<Job>> {
        self.jobs.find_by_recruiter_id(recruiter_id).await
    }

    pub async fn search(&self, query: JobSearch) -> Result<JobList> {
        let (page, per_page, offset) = super::page_window(query.page, query.per_page);
        let filter = JobFilter {
            search: blank_to_none(query.search),
            location: blank_to_none(query.location),
            job_type: blank_to_none(query.job_type),
            experience_level: blank_to_none(query.experience_level),
            limit: per_page,
            offset,
        };

        let (items, total) = self.jobs.search(&filter).await?;
        let total_pages = ((total as f64) / (per_page as f64)).ceil() as i64;

        Ok(JobList {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::{ApplicationStatus, NewApplication};
    use crate::models::recruiter::NewRecruiter;
    use crate::models::seeker::NewSeeker;

    struct Fixture {
        repos: Repositories,
        service: JobService,
        recruiter_id: i64,
        seeker_id: i64,
    }

    async fn fixture() -> Fixture {
        let repos = Repositories::in_memory();
        let recruiter = repos
            .recruiters
            .insert(NewRecruiter {
                name: "Rita".into(),
                email: "rita@example.com".into(),
                password_hash: "x".into(),
            })
            .await
            .unwrap();
        let seeker = repos
            .seekers
            .insert(NewSeeker {
                name: "Sam".into(),
                email: "sam@example.com".into(),
                password_hash: "x".into(),
            })
            .await
            .unwrap();
        Fixture {
            service: JobService::new(&repos),
            repos,
            recruiter_id: recruiter.id,
            seeker_id: seeker.id,
        }
    }

    fn draft(title: &str) -> JobDraft {
        JobDraft {
            title: title.into(),
            company: "Acme".into(),
            location: "Remote".into(),
            job_type: Some("Full-time".into()),
            ..JobDraft::default()
        }
    }

    #[tokio::test]
    async fn create_requires_an_existing_recruiter() {
        let f = fixture().await;
        assert!(matches!(
            f.service.create(draft("Dev"), None).await,
            Err(Error::BadRequest(_))
        ));
        assert!(matches!(
            f.service.create(draft("Dev"), Some(404)).await,
            Err(Error::BadRequest(_))
        ));

        let job = f
            .service
            .create(draft("Dev"), Some(f.recruiter_id))
            .await
            .unwrap();
        assert_eq!(job.posted_date, time::today());
        assert_eq!(job.recruiter_id, f.recruiter_id);
    }

    #[tokio::test]
    async fn update_keeps_owner_and_missing_posted_date() {
        let f = fixture().await;
        let job = f
            .service
            .create(draft("Dev"), Some(f.recruiter_id))
            .await
            .unwrap();

        let updated = f
            .service
            .update(
                job.id,
                JobUpdate {
                    title: "Senior Dev".into(),
                    company: "Acme".into(),
                    location: "Lisbon".into(),
                    ..JobUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Senior Dev");
        assert_eq!(updated.recruiter_id, f.recruiter_id);
        assert_eq!(updated.posted_date, job.posted_date);
        assert!(updated.job_type.is_none());

        let err = f.service.update(999, JobUpdate::default()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn plain_delete_points_to_force_delete_when_referenced() {
        let f = fixture().await;
        let job = f
            .service
            .create(draft("Dev"), Some(f.recruiter_id))
            .await
            .unwrap();
        f.repos
            .saved_jobs
            .insert(job.id, f.seeker_id, time::now())
            .await
            .unwrap();

        match f.service.delete(job.id).await {
            Err(Error::Conflict(msg)) => assert!(msg.contains("force delete")),
            other => panic!("expected conflict, got {:?}", other),
        }
        assert!(f.service.get(job.id).await.is_ok());
    }

    #[tokio::test]
    async fn plain_delete_of_unreferenced_job() {
        let f = fixture().await;
        let job = f
            .service
            .create(draft("Dev"), Some(f.recruiter_id))
            .await
            .unwrap();
        f.service.delete(job.id).await.unwrap();
        assert!(f.service.get(job.id).await.unwrap_err().is_not_found());
        assert!(f.service.delete(job.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn force_delete_removes_dependents() {
        let f = fixture().await;
        let job = f
            .service
            .create(draft("Dev"), Some(f.recruiter_id))
            .await
            .unwrap();
        f.repos
            .applications
            .insert(NewApplication {
                job_id: job.id,
                seeker_id: f.seeker_id,
                status: ApplicationStatus::Pending,
                applied_date: time::now(),
                resume_url: None,
                cover_letter: None,
            })
            .await
            .unwrap();
        f.repos
            .saved_jobs
            .insert(job.id, f.seeker_id, time::now())
            .await
            .unwrap();

        let summary = f.service.force_delete(job.id).await.unwrap();
        assert_eq!(summary.applications_removed, 1);
        assert_eq!(summary.saved_jobs_removed, 1);
        assert_eq!(f.repos.applications.count_by_job_id(job.id).await.unwrap(), 0);
        assert!(f.repos.saved_jobs.find_by_job_id(job.id).await.unwrap().is_empty());
        assert!(f.service.get(job.id).await.unwrap_err().is_not_found());

        assert!(f
            .service
            .force_delete(job.id)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn search_filters_and_paginates() {
        let f = fixture().await;
        for title in ["Rust Engineer", "Go Engineer", "Rust Intern"] {
            f.service
                .create(draft(title), Some(f.recruiter_id))
                .await
                .unwrap();
        }

        let page = f
            .service
            .search(JobSearch {
                search: Some("rust".into()),
                per_page: Some(1),
                ..JobSearch::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 1);

        let second = f
            .service
            .search(JobSearch {
                search: Some("rust".into()),
                page: Some(2),
                per_page: Some(1),
                ..JobSearch::default()
            })
            .await
            .unwrap();
        assert_ne!(page.items[0].id, second.items[0].id);
    }

    #[tokio::test]
    async fn search_far_past_the_end_is_empty() {
        let f = fixture().await;
        f.service
            .create(draft("Rust Engineer"), Some(f.recruiter_id))
            .await
            .unwrap();

        let page = f
            .service
            .search(JobSearch {
                page: Some(i64::MAX),
                per_page: Some(100),
                ..JobSearch::default()
            })
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 1);
        assert_eq!(page.page, i64::MAX);
    }
}
