//! Persistence interfaces consumed by the services.
//!
//! Each entity gets its own trait so services depend only on what they use.
//! Deletes report the number of rows removed and are no-ops on missing keys.
//! Store-level uniqueness and foreign-key violations surface as
//! [`Error::Conflict`](crate::error::Error::Conflict).

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::Result;
use crate::models::application::{Application, ApplicationStatus, NewApplication};
use crate::models::job::{Job, JobFilter, NewJob};
use crate::models::profile::{Profile, ProfileFields, RecruiterProfile, RecruiterProfileFields};
use crate::models::recruiter::{NewRecruiter, Recruiter};
use crate::models::saved_job::SavedJob;
use crate::models::seeker::{NewSeeker, Seeker};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecruiterRepository: Send + Sync {
    async fn insert(&self, recruiter: NewRecruiter) -> Result<Recruiter>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Recruiter>>;
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Recruiter>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Recruiter>>;
    async fn find_all(&self) -> Result<Vec<Recruiter>>;
    async fn update(&self, recruiter: &Recruiter) -> Result<Recruiter>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeekerRepository: Send + Sync {
    async fn insert(&self, seeker: NewSeeker) -> Result<Seeker>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Seeker>>;
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Seeker>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Seeker>>;
    async fn find_all(&self) -> Result<Vec<Seeker>>;
    async fn update(&self, seeker: &Seeker) -> Result<Seeker>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn insert(&self, job: NewJob) -> Result<Job>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Job>>;
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Job>>;
    async fn find_all(&self) -> Result<Vec<Job>>;
    async fn find_by_recruiter_id(&self, recruiter_id: i64) -> Result<Vec<Job>>;
    /// Returns one page of matching jobs, newest posted first, and the total match count.
    async fn search(&self, filter: &JobFilter) -> Result<(Vec<Job>, i64)>;
    async fn update(&self, job: &Job) -> Result<Job>;
    /// Plain delete. Fails with a conflict while applications reference the job.
    async fn delete_by_id(&self, id: i64) -> Result<u64>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn insert(&self, application: NewApplication) -> Result<Application>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Application>>;
    async fn find_by_job_id(&self, job_id: i64) -> Result<Vec<Application>>;
    async fn find_by_job_id_and_status(
        &self,
        job_id: i64,
        status: ApplicationStatus,
    ) -> Result<Vec<Application>>;
    async fn find_by_seeker_id(&self, seeker_id: i64) -> Result<Vec<Application>>;
    async fn find_by_recruiter_id(&self, recruiter_id: i64) -> Result<Vec<Application>>;
    async fn find_by_status(&self, status: ApplicationStatus) -> Result<Vec<Application>>;
    async fn find_by_job_id_and_seeker_id(
        &self,
        job_id: i64,
        seeker_id: i64,
    ) -> Result<Option<Application>>;
    async fn exists_by_job_id_and_seeker_id(&self, job_id: i64, seeker_id: i64) -> Result<bool>;
    async fn count_by_job_id(&self, job_id: i64) -> Result<i64>;
    async fn count_by_seeker_id(&self, seeker_id: i64) -> Result<i64>;
    async fn count_by_recruiter_id_and_status(
        &self,
        recruiter_id: i64,
        status: ApplicationStatus,
    ) -> Result<i64>;
    async fn update_status(
        &self,
        id: i64,
        status: ApplicationStatus,
    ) -> Result<Option<Application>>;
    async fn delete_by_id(&self, id: i64) -> Result<u64>;
    async fn delete_by_job_id(&self, job_id: i64) -> Result<u64>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SavedJobRepository: Send + Sync {
    /// Inserts only while the job exists; a missing job is `NotFound`.
    async fn insert(
        &self,
        job_id: i64,
        seeker_id: i64,
        saved_date: DateTime<Utc>,
    ) -> Result<SavedJob>;
    async fn exists_by_job_id_and_seeker_id(&self, job_id: i64, seeker_id: i64) -> Result<bool>;
    /// Newest first.
    async fn find_by_seeker_id(&self, seeker_id: i64) -> Result<Vec<SavedJob>>;
    async fn find_by_job_id(&self, job_id: i64) -> Result<Vec<SavedJob>>;
    async fn count_by_seeker_id(&self, seeker_id: i64) -> Result<i64>;
    async fn delete_by_job_id_and_seeker_id(&self, job_id: i64, seeker_id: i64) -> Result<u64>;
    async fn delete_by_job_id(&self, job_id: i64) -> Result<u64>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn insert(&self, seeker_id: i64, fields: ProfileFields) -> Result<Profile>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Profile>>;
    async fn find_by_seeker_id(&self, seeker_id: i64) -> Result<Option<Profile>>;
    async fn exists_by_seeker_id(&self, seeker_id: i64) -> Result<bool>;
    async fn find_all(&self) -> Result<Vec<Profile>>;
    async fn update(&self, id: i64, fields: ProfileFields) -> Result<Option<Profile>>;
    async fn delete_by_id(&self, id: i64) -> Result<u64>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecruiterProfileRepository: Send + Sync {
    async fn insert(
        &self,
        recruiter_id: i64,
        fields: RecruiterProfileFields,
    ) -> Result<RecruiterProfile>;
    async fn find_by_recruiter_id(&self, recruiter_id: i64) -> Result<Option<RecruiterProfile>>;
    async fn exists_by_recruiter_id(&self, recruiter_id: i64) -> Result<bool>;
    async fn update_by_recruiter_id(
        &self,
        recruiter_id: i64,
        fields: RecruiterProfileFields,
    ) -> Result<Option<RecruiterProfile>>;
    async fn delete_by_recruiter_id(&self, recruiter_id: i64) -> Result<u64>;
}

/// Opens write transactions spanning several tables.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn WriteTx>>;
}

/// Deletes that must land together. Dropping the transaction without
/// calling [`WriteTx::commit`] rolls every step back.
#[async_trait]
pub trait WriteTx: Send {
    /// Locks the job row until commit. Returns false when it does not exist.
    async fn lock_job(&mut self, job_id: i64) -> Result<bool>;
    async fn job_ids_by_recruiter(&mut self, recruiter_id: i64) -> Result<Vec<i64>>;
    async fn delete_saved_jobs_by_job(&mut self, job_id: i64) -> Result<u64>;
    async fn delete_applications_by_job(&mut self, job_id: i64) -> Result<u64>;
    async fn delete_job(&mut self, job_id: i64) -> Result<u64>;
    async fn delete_saved_jobs_by_seeker(&mut self, seeker_id: i64) -> Result<u64>;
    async fn delete_applications_by_seeker(&mut self, seeker_id: i64) -> Result<u64>;
    async fn delete_profile_by_seeker(&mut self, seeker_id: i64) -> Result<u64>;
    async fn delete_seeker(&mut self, seeker_id: i64) -> Result<u64>;
    async fn delete_recruiter_profile(&mut self, recruiter_id: i64) -> Result<u64>;
    async fn delete_recruiter(&mut self, recruiter_id: i64) -> Result<u64>;
    async fn commit(self: Box<Self>) -> Result<()>;
}

/// Every repository the services need, behind trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub recruiters: Arc<dyn RecruiterRepository>,
    pub seekers: Arc<dyn SeekerRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
    pub saved_jobs: Arc<dyn SavedJobRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub recruiter_profiles: Arc<dyn RecruiterProfileRepository>,
    pub unit_of_work: Arc<dyn UnitOfWork>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self::from_store(Arc::new(postgres::PgStore::new(pool)))
    }

    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(memory::MemoryStore::new()))
    }

    fn from_store<S>(store: Arc<S>) -> Self
    where
        S: RecruiterRepository
            + SeekerRepository
            + JobRepository
            + ApplicationRepository
            + SavedJobRepository
            + ProfileRepository
            + RecruiterProfileRepository
            + UnitOfWork
            + 'static,
    {
        Self {
            recruiters: store.clone(),
            seekers: store.clone(),
            jobs: store.clone(),
            applications: store.clone(),
            saved_jobs: store.clone(),
            profiles: store.clone(),
            recruiter_profiles: store.clone(),
            unit_of_work: store,
        }
    }
}
