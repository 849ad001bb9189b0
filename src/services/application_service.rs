use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus, NewApplication};
use crate::models::job::Job;
use crate::models::seeker::Seeker;
use crate::projection::{self, ApplicationContext, ApplicationView, RecruiterApplicationRow};
use crate::repository::{
    ApplicationRepository, JobRepository, RecruiterRepository, Repositories, SeekerRepository,
};
use crate::services::{resolve_rejected_insert, Recheck};
use crate::storage::FileStorage;
use crate::utils::time;

const ALREADY_APPLIED: &str = "You have already applied for this job";

#[derive(Debug, Clone, Default)]
pub struct ApplicationDraft {
    pub job_id: i64,
    pub seeker_id: i64,
    pub resume_url: Option<String>,
    pub cover_letter: Option<String>,
}

#[derive(Clone)]
pub struct ApplicationService {
    applications: Arc<dyn ApplicationRepository>,
    jobs: Arc<dyn JobRepository>,
    seekers: Arc<dyn SeekerRepository>,
    recruiters: Arc<dyn RecruiterRepository>,
    files: Arc<dyn FileStorage>,
}

impl ApplicationService {
    pub fn new(repos: &Repositories, files: Arc<dyn FileStorage>) -> Self {
        Self {
            applications: repos.applications.clone(),
            jobs: repos.jobs.clone(),
            seekers: repos.seekers.clone(),
            recruiters: repos.recruiters.clone(),
            files,
        }
    }

    /// Resolves both sides of the pair and rejects a repeat application.
    async fn ensure_can_apply(&self, job_id: i64, seeker_id: i64) -> Result<(Job, Seeker)> {
        let job = self
            .jobs
            .find_by_id(job_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Job not found with id: {}", job_id)))?;
        let seeker = self
            .seekers
            .find_by_id(seeker_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Seeker not found with id: {}", seeker_id)))?;
        if self
            .applications
            .exists_by_job_id_and_seeker_id(job_id, seeker_id)
            .await?
        {
            return Err(Error::Conflict(ALREADY_APPLIED.to_string()));
        }
        Ok((job, seeker))
    }

    async fn recheck(&self, job_id: i64, seeker_id: i64) -> Result<Recheck> {
        if self
            .applications
            .exists_by_job_id_and_seeker_id(job_id, seeker_id)
            .await?
        {
            return Ok(Recheck::Duplicate);
        }
        if self.jobs.find_by_id(job_id).await?.is_none() {
            return Ok(Recheck::Missing(Error::NotFound(format!(
                "Job not found with id: {}",
                job_id
            ))));
        }
        if self.seekers.find_by_id(seeker_id).await?.is_none() {
            return Ok(Recheck::Missing(Error::NotFound(format!(
                "Seeker not found with id: {}",
                seeker_id
            ))));
        }
        Ok(Recheck::Unexplained)
    }

    async fn insert_checked(
        &self,
        draft: ApplicationDraft,
        job: Job,
        seeker: Seeker,
    ) -> Result<ApplicationView> {
        let (job_id, seeker_id) = (draft.job_id, draft.seeker_id);
        let new_application = NewApplication {
            job_id,
            seeker_id,
            status: ApplicationStatus::Pending,
            applied_date: time::now(),
            resume_url: draft.resume_url,
            cover_letter: draft.cover_letter.filter(|c| !c.trim().is_empty()),
        };

        let application = match self.applications.insert(new_application).await {
            Ok(application) => application,
            Err(err) if err.is_conflict() => {
                let recheck = self.recheck(job_id, seeker_id).await;
                return Err(resolve_rejected_insert(err, recheck, ALREADY_APPLIED));
            }
            Err(err) => return Err(err),
        };

        tracing::info!(
            application_id = application.id,
            job_id,
            seeker_id,
            "application submitted"
        );
        ApplicationContext::new(vec![job], vec![seeker], vec![]).view(application)
    }

    pub async fn create(&self, draft: ApplicationDraft) -> Result<ApplicationView> {
        let (job, seeker) = self.ensure_can_apply(draft.job_id, draft.seeker_id).await?;
        self.insert_checked(draft, job, seeker).await
    }

    /// Validates the pair before any bytes are written, then stores the
    /// resume and records the application with its path. A resume whose
    /// application is rejected after all is removed again.
    pub async fn submit_with_resume(
        &self,
        job_id: i64,
        seeker_id: i64,
        data: &[u8],
        file_name: &str,
        cover_letter: Option<String>,
    ) -> Result<ApplicationView> {
        let (job, seeker) = self.ensure_can_apply(job_id, seeker_id).await?;
        let resume_url = self.files.store(data, file_name).await?;
        let draft = ApplicationDraft {
            job_id,
            seeker_id,
            resume_url: Some(resume_url.clone()),
            cover_letter,
        };
        match self.insert_checked(draft, job, seeker).await {
            Ok(view) => Ok(view),
            Err(err) => {
                if let Err(cleanup) = self.files.remove(&resume_url).await {
                    tracing::warn!(
                        error = %cleanup,
                        resume_url = %resume_url,
                        "resume of rejected application left on disk"
                    );
                }
                Err(err)
            }
        }
    }

    pub async fn upload_resume(&self, data: &[u8], file_name: &str) -> Result<String> {
        self.files.store(data, file_name).await
    }

    /// Any status may follow any other.
    pub async fn update_status(&self, application_id: i64, status: &str) -> Result<Application> {
        let status: ApplicationStatus = status.parse()?;
        let application = self
            .applications
            .update_status(application_id, status)
            .await?
            .ok_or_else(|| not_found(application_id))?;
        tracing::info!(application_id, status = %status, "application status changed");
        Ok(application)
    }

    pub async fn delete(&self, application_id: i64) -> Result<()> {
        if self.applications.delete_by_id(application_id).await? == 0 {
            return Err(not_found(application_id));
        }
        tracing::info!(application_id, "application deleted");
        Ok(())
    }

    pub async fn get(&self, application_id: i64) -> Result<ApplicationView> {
        let application = self
            .applications
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| not_found(application_id))?;
        let mut views = self.resolve(vec![application], true).await?;
        views.pop().ok_or_else(|| not_found(application_id))
    }

    pub async fn has_applied(&self, job_id: i64, seeker_id: i64) -> Result<bool> {
        self.applications
            .exists_by_job_id_and_seeker_id(job_id, seeker_id)
            .await
    }

    pub async fn by_recruiter(&self, recruiter_id: i64) -> Result<Vec<ApplicationView>> {
        let applications = self.applications.find_by_recruiter_id(recruiter_id).await?;
        self.resolve(applications, true).await
    }

    pub async fn by_recruiter_with_details(
        &self,
        recruiter_id: i64,
    ) -> Result<Vec<RecruiterApplicationRow>> {
        let applications = self.applications.find_by_recruiter_id(recruiter_id).await?;
        let ctx = self.context_for(&applications, false).await?;
        applications
            .into_iter()
            .map(|a| ctx.dashboard_row(a))
            .collect()
    }

    pub async fn by_job(&self, job_id: i64, status: Option<&str>) -> Result<Vec<ApplicationView>> {
        let applications = match status {
            Some(status) => {
                self.applications
                    .find_by_job_id_and_status(job_id, status.parse()?)
                    .await?
            }
            None => self.applications.find_by_job_id(job_id).await?,
        };
        self.resolve(applications, true).await
    }

    pub async fn by_seeker(&self, seeker_id: i64) -> Result<Vec<ApplicationView>> {
        let applications = self.applications.find_by_seeker_id(seeker_id).await?;
        self.resolve(applications, false).await
    }

    pub async fn by_status(&self, status: &str) -> Result<Vec<ApplicationView>> {
        let applications = self.applications.find_by_status(status.parse()?).await?;
        self.resolve(applications, true).await
    }

    pub async fn count_by_job(&self, job_id: i64) -> Result<i64> {
        self.applications.count_by_job_id(job_id).await
    }

    pub async fn count_by_recruiter_and_status(
        &self,
        recruiter_id: i64,
        status: &str,
    ) -> Result<i64> {
        self.applications
            .count_by_recruiter_id_and_status(recruiter_id, status.parse()?)
            .await
    }

    async fn context_for(
        &self,
        applications: &[Application],
        with_recruiters: bool,
    ) -> Result<ApplicationContext> {
        let job_ids = projection::distinct_ids(applications.iter().map(|a| a.job_id));
        let seeker_ids = projection::distinct_ids(applications.iter().map(|a| a.seeker_id));
        let jobs = self.jobs.find_by_ids(&job_ids).await?;
        let seekers = self.seekers.find_by_ids(&seeker_ids).await?;
        let recruiters = if with_recruiters {
            let ids = projection::distinct_ids(jobs.iter().map(|j| j.recruiter_id));
            self.recruiters.find_by_ids(&ids).await?
        } else {
            Vec::new()
        };
        Ok(ApplicationContext::new(jobs, seekers, recruiters))
    }

    async fn resolve(
        &self,
        applications: Vec<Application>,
        with_recruiters: bool,
    ) -> Result<Vec<ApplicationView>> {
        if applications.is_empty() {
            return Ok(Vec::new());
        }
        let ctx = self.context_for(&applications, with_recruiters).await?;
        ctx.views(applications)
    }
}

fn not_found(application_id: i64) -> Error {
    Error::NotFound(format!("Application not found with id: {}", application_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::NewJob;
    use crate::models::recruiter::NewRecruiter;
    use crate::models::seeker::NewSeeker;
    use crate::repository::{MockApplicationRepository, MockJobRepository};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records what it was asked to store and remove.
    #[derive(Default)]
    struct RecordingStorage {
        stored: Mutex<Vec<String>>,
        removed: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl FileStorage for RecordingStorage {
        async fn store(&self, _data: &[u8], original_name: &str) -> Result<String> {
            self.stored.lock().unwrap().push(original_name.to_string());
            Ok(format!("/uploads/resumes/test_{}", original_name))
        }

        async fn remove(&self, url: &str) -> Result<()> {
            self.removed.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    struct Fixture {
        repos: Repositories,
        service: ApplicationService,
        files: Arc<RecordingStorage>,
        recruiter_id: i64,
        seeker_id: i64,
        job_id: i64,
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
        let job = repos
            .jobs
            .insert(NewJob {
                recruiter_id: recruiter.id,
                title: "Platform Engineer".into(),
                company: "Acme".into(),
                location: "Remote".into(),
                description: None,
                salary_range: None,
                job_type: None,
                experience_level: None,
                posted_date: time::today(),
            })
            .await
            .unwrap();
        let files = Arc::new(RecordingStorage::default());
        Fixture {
            service: ApplicationService::new(&repos, files.clone()),
            repos,
            files,
            recruiter_id: recruiter.id,
            seeker_id: seeker.id,
            job_id: job.id,
        }
    }

    fn draft(f: &Fixture) -> ApplicationDraft {
        ApplicationDraft {
            job_id: f.job_id,
            seeker_id: f.seeker_id,
            resume_url: Some("/uploads/resumes/abc.pdf".into()),
            cover_letter: None,
        }
    }

    #[tokio::test]
    async fn new_application_is_pending_with_job_and_seeker() {
        let f = fixture().await;
        let view = f.service.create(draft(&f)).await.unwrap();
        assert_eq!(view.status, ApplicationStatus::Pending);
        assert_eq!(view.job.id, f.job_id);
        assert_eq!(view.seeker.id, f.seeker_id);
        assert_eq!(view.resume_url.as_deref(), Some("/uploads/resumes/abc.pdf"));
        assert!(f.service.has_applied(f.job_id, f.seeker_id).await.unwrap());
    }

    #[tokio::test]
    async fn applying_twice_conflicts() {
        let f = fixture().await;
        f.service.create(draft(&f)).await.unwrap();
        let err = f.service.create(draft(&f)).await.unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(f.service.count_by_job(f.job_id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unknown_job_or_seeker_is_not_found() {
        let f = fixture().await;
        let mut d = draft(&f);
        d.job_id = 999;
        assert!(f.service.create(d).await.unwrap_err().is_not_found());
        let mut d = draft(&f);
        d.seeker_id = 999;
        assert!(f.service.create(d).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn status_transitions_are_unrestricted() {
        let f = fixture().await;
        let view = f.service.create(draft(&f)).await.unwrap();

        for status in ["accepted", "REJECTED", "Pending", "withdrawn", "ACCEPTED"] {
            let updated = f.service.update_status(view.id, status).await.unwrap();
            assert_eq!(updated.status.as_str(), status.to_uppercase());
        }

        assert!(matches!(
            f.service.update_status(view.id, "HIRED").await,
            Err(Error::BadRequest(_))
        ));
        assert!(f
            .service
            .update_status(999, "ACCEPTED")
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn recruiter_queries_attach_owner() {
        let f = fixture().await;
        let view = f.service.create(draft(&f)).await.unwrap();
        f.service.update_status(view.id, "ACCEPTED").await.unwrap();

        let views = f.service.by_recruiter(f.recruiter_id).await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(
            views[0].recruiter.as_ref().map(|r| r.id),
            Some(f.recruiter_id)
        );

        let rows = f
            .service
            .by_recruiter_with_details(f.recruiter_id)
            .await
            .unwrap();
        assert_eq!(rows[0].seeker_name, "Sam");
        assert_eq!(rows[0].job_title, "Platform Engineer");

        assert_eq!(
            f.service
                .count_by_recruiter_and_status(f.recruiter_id, "accepted")
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            f.service
                .by_job(f.job_id, Some("PENDING"))
                .await
                .unwrap()
                .len(),
            0
        );
        assert_eq!(f.service.by_status("ACCEPTED").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn resume_is_not_stored_for_a_rejected_pair() {
        let f = fixture().await;
        f.service.create(draft(&f)).await.unwrap();

        let err = f
            .service
            .submit_with_resume(f.job_id, f.seeker_id, b"%PDF", "cv.pdf", None)
            .await
            .unwrap_err();
        assert!(err.is_conflict());
        assert!(f.files.stored.lock().unwrap().is_empty());
        assert!(f.files.removed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn submit_with_resume_records_path() {
        let f = fixture().await;
        let view = f
            .service
            .submit_with_resume(
                f.job_id,
                f.seeker_id,
                b"%PDF",
                "cv.pdf",
                Some("Hello".into()),
            )
            .await
            .unwrap();
        assert_eq!(view.resume_url.as_deref(), Some("/uploads/resumes/test_cv.pdf"));
        assert_eq!(view.cover_letter.as_deref(), Some("Hello"));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let f = fixture().await;
        let view = f.service.create(draft(&f)).await.unwrap();
        f.service.delete(view.id).await.unwrap();
        assert!(f.service.get(view.id).await.unwrap_err().is_not_found());
        assert!(f.service.delete(view.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn late_unique_violation_becomes_already_applied() {
        let mut f = fixture().await;

        let mut mock = MockApplicationRepository::new();
        let mut exists_calls = 0;
        mock.expect_exists_by_job_id_and_seeker_id()
            .times(2)
            .returning(move |_, _| {
                exists_calls += 1;
                // Absent at pre-check, present once the competing insert won.
                Ok(exists_calls > 1)
            });
        mock.expect_insert().times(1).returning(|_| {
            Err(Error::Conflict(
                "duplicate key violates applications_job_id_seeker_id_key".into(),
            ))
        });
        f.repos.applications = Arc::new(mock);
        let service = ApplicationService::new(&f.repos, f.files.clone());

        match service.create(draft(&f)).await {
            Err(Error::Conflict(msg)) => assert_eq!(msg, ALREADY_APPLIED),
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn late_violation_for_vanished_job_is_not_found() {
        let mut f = fixture().await;
        let job = f.repos.jobs.find_by_id(f.job_id).await.unwrap().unwrap();

        let mut jobs = MockJobRepository::new();
        let mut lookups = 0;
        jobs.expect_find_by_id().times(2).returning(move |_| {
            lookups += 1;
            // Present at pre-check, gone once the insert hit the foreign key.
            Ok((lookups == 1).then(|| job.clone()))
        });
        let mut applications = MockApplicationRepository::new();
        applications
            .expect_exists_by_job_id_and_seeker_id()
            .returning(|_, _| Ok(false));
        applications.expect_insert().times(1).returning(|_| {
            Err(Error::Conflict(
                "insert violates foreign key applications_job_id_fkey".into(),
            ))
        });
        f.repos.jobs = Arc::new(jobs);
        f.repos.applications = Arc::new(applications);
        let service = ApplicationService::new(&f.repos, f.files.clone());

        let err = service.create(draft(&f)).await.unwrap_err();
        assert!(err.is_not_found(), "got {:?}", err);
    }

    #[tokio::test]
    async fn concurrent_applications_admit_exactly_one() {
        let f = fixture().await;

        let attempts: Vec<_> = (0..8)
            .map(|_| {
                let service = f.service.clone();
                let d = draft(&f);
                tokio::spawn(async move { service.create(d).await })
            })
            .collect();

        let mut admitted = 0;
        for attempt in attempts {
            match attempt.await.unwrap() {
                Ok(_) => admitted += 1,
                Err(err) => assert!(err.is_conflict(), "got {:?}", err),
            }
        }
        assert_eq!(admitted, 1);
        assert_eq!(f.service.count_by_job(f.job_id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn resume_is_removed_when_the_insert_loses() {
        let mut f = fixture().await;

        let mut mock = MockApplicationRepository::new();
        let mut exists_calls = 0;
        mock.expect_exists_by_job_id_and_seeker_id()
            .returning(move |_, _| {
                exists_calls += 1;
                Ok(exists_calls > 1)
            });
        mock.expect_insert().times(1).returning(|_| {
            Err(Error::Conflict(
                "duplicate key violates applications_job_id_seeker_id_key".into(),
            ))
        });
        f.repos.applications = Arc::new(mock);
        let service = ApplicationService::new(&f.repos, f.files.clone());

        let err = service
            .submit_with_resume(f.job_id, f.seeker_id, b"%PDF", "cv.pdf", None)
            .await
            .unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(*f.files.stored.lock().unwrap(), vec!["cv.pdf".to_string()]);
        assert_eq!(
            *f.files.removed.lock().unwrap(),
            vec!["/uploads/resumes/test_cv.pdf".to_string()]
        );
    }
}
