//! Id-indexed in-memory store.
//!
//! Every table lives behind one lock, which makes each call atomic and lets a
//! [`WriteTx`] hold the whole store until it commits. Unique keys and foreign
//! keys mirror the SQL schema in `migrations/`, including the absence of a
//! foreign key from `saved_jobs.job_id` to `jobs`. Bookmark inserts still
//! require the job to exist at insert time, as the guarded SQL insert does.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{
    ApplicationRepository, JobRepository, ProfileRepository, RecruiterProfileRepository,
    RecruiterRepository, SavedJobRepository, SeekerRepository, UnitOfWork, WriteTx,
};
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus, NewApplication};
use crate::models::job::{Job, JobFilter, NewJob};
use crate::models::profile::{Profile, ProfileFields, RecruiterProfile, RecruiterProfileFields};
use crate::models::recruiter::{NewRecruiter, Recruiter};
use crate::models::saved_job::SavedJob;
use crate::models::seeker::{NewSeeker, Seeker};
use crate::utils::time;

#[derive(Debug, Clone, Default)]
struct Sequences {
    recruiters: i64,
    seekers: i64,
    jobs: i64,
    applications: i64,
    saved_jobs: i64,
    profiles: i64,
    recruiter_profiles: i64,
}

fn next(seq: &mut i64) -> i64 {
    *seq += 1;
    *seq
}

#[derive(Debug, Clone, Default)]
struct Tables {
    seq: Sequences,
    recruiters: BTreeMap<i64, Recruiter>,
    seekers: BTreeMap<i64, Seeker>,
    jobs: BTreeMap<i64, Job>,
    applications: BTreeMap<i64, Application>,
    saved_jobs: BTreeMap<i64, SavedJob>,
    profiles: BTreeMap<i64, Profile>,
    recruiter_profiles: BTreeMap<i64, RecruiterProfile>,
}

fn unique_violation(constraint: &str) -> Error {
    Error::Conflict(format!("duplicate key violates {}", constraint))
}

fn fk_violation(constraint: &str) -> Error {
    Error::Conflict(format!(
        "row is still referenced or references a missing row ({})",
        constraint
    ))
}

impl Tables {
    fn applications_where(&self, pred: impl Fn(&Application) -> bool) -> Vec<Application> {
        let mut rows: Vec<Application> = self
            .applications
            .values()
            .filter(|a| pred(a))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.applied_date.cmp(&a.applied_date).then(b.id.cmp(&a.id)));
        rows
    }

    fn job_ids_owned_by(&self, recruiter_id: i64) -> Vec<i64> {
        self.jobs
            .values()
            .filter(|j| j.recruiter_id == recruiter_id)
            .map(|j| j.id)
            .collect()
    }

    fn delete_saved_jobs_by_job(&mut self, job_id: i64) -> u64 {
        let before = self.saved_jobs.len();
        self.saved_jobs.retain(|_, s| s.job_id != job_id);
        (before - self.saved_jobs.len()) as u64
    }

    fn delete_applications_by_job(&mut self, job_id: i64) -> u64 {
        let before = self.applications.len();
        self.applications.retain(|_, a| a.job_id != job_id);
        (before - self.applications.len()) as u64
    }

    fn delete_job(&mut self, job_id: i64) -> Result<u64> {
        if !self.jobs.contains_key(&job_id) {
            return Ok(0);
        }
        if self.applications.values().any(|a| a.job_id == job_id) {
            return Err(fk_violation("applications_job_id_fkey"));
        }
        self.jobs.remove(&job_id);
        Ok(1)
    }

    fn delete_seeker(&mut self, seeker_id: i64) -> Result<u64> {
        if !self.seekers.contains_key(&seeker_id) {
            return Ok(0);
        }
        if self.applications.values().any(|a| a.seeker_id == seeker_id) {
            return Err(fk_violation("applications_seeker_id_fkey"));
        }
        if self.saved_jobs.values().any(|s| s.seeker_id == seeker_id) {
            return Err(fk_violation("saved_jobs_seeker_id_fkey"));
        }
        if self.profiles.values().any(|p| p.seeker_id == seeker_id) {
            return Err(fk_violation("profiles_seeker_id_fkey"));
        }
        self.seekers.remove(&seeker_id);
        Ok(1)
    }

    fn delete_recruiter(&mut self, recruiter_id: i64) -> Result<u64> {
        if !self.recruiters.contains_key(&recruiter_id) {
            return Ok(0);
        }
        if self.jobs.values().any(|j| j.recruiter_id == recruiter_id) {
            return Err(fk_violation("jobs_recruiter_id_fkey"));
        }
        if self
            .recruiter_profiles
            .values()
            .any(|p| p.recruiter_id == recruiter_id)
        {
            return Err(fk_violation("recruiter_profiles_recruiter_id_fkey"));
        }
        self.recruiters.remove(&recruiter_id);
        Ok(1)
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecruiterRepository for MemoryStore {
    async fn insert(&self, recruiter: NewRecruiter) -> Result<Recruiter> {
        let mut t = self.tables.lock().await;
        if t.recruiters.values().any(|r| r.email == recruiter.email) {
            return Err(unique_violation("recruiters_email_key"));
        }
        let row = Recruiter {
            id: next(&mut t.seq.recruiters),
            name: recruiter.name,
            email: recruiter.email,
            password_hash: recruiter.password_hash,
            created_at: time::now(),
        };
        t.recruiters.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Recruiter>> {
        Ok(self.tables.lock().await.recruiters.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Recruiter>> {
        let t = self.tables.lock().await;
        Ok(ids
            .iter()
            .filter_map(|id| t.recruiters.get(id).cloned())
            .collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Recruiter>> {
        let t = self.tables.lock().await;
        Ok(t.recruiters.values().find(|r| r.email == email).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Recruiter>> {
        Ok(self.tables.lock().await.recruiters.values().cloned().collect())
    }

    async fn update(&self, recruiter: &Recruiter) -> Result<Recruiter> {
        let mut t = self.tables.lock().await;
        if t
            .recruiters
            .values()
            .any(|r| r.id != recruiter.id && r.email == recruiter.email)
        {
            return Err(unique_violation("recruiters_email_key"));
        }
        let row = t
            .recruiters
            .get_mut(&recruiter.id)
            .ok_or_else(|| Error::NotFound("Resource not found".to_string()))?;
        row.name = recruiter.name.clone();
        row.email = recruiter.email.clone();
        row.password_hash = recruiter.password_hash.clone();
        Ok(row.clone())
    }
}

#[async_trait]
impl SeekerRepository for MemoryStore {
    async fn insert(&self, seeker: NewSeeker) -> Result<Seeker> {
        let mut t = self.tables.lock().await;
        if t.seekers.values().any(|s| s.email == seeker.email) {
            return Err(unique_violation("seekers_email_key"));
        }
        let row = Seeker {
            id: next(&mut t.seq.seekers),
            name: seeker.name,
            email: seeker.email,
            password_hash: seeker.password_hash,
            created_at: time::now(),
        };
        t.seekers.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Seeker>> {
        Ok(self.tables.lock().await.seekers.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Seeker>> {
        let t = self.tables.lock().await;
        Ok(ids.iter().filter_map(|id| t.seekers.get(id).cloned()).collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Seeker>> {
        let t = self.tables.lock().await;
        Ok(t.seekers.values().find(|s| s.email == email).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Seeker>> {
        Ok(self.tables.lock().await.seekers.values().cloned().collect())
    }

    async fn update(&self, seeker: &Seeker) -> Result<Seeker> {
        let mut t = self.tables.lock().await;
        if t
            .seekers
            .values()
            .any(|s| s.id != seeker.id && s.email == seeker.email)
        {
            return Err(unique_violation("seekers_email_key"));
        }
        let row = t
            .seekers
            .get_mut(&seeker.id)
            .ok_or_else(|| Error::NotFound("Resource not found".to_string()))?;
        row.name = seeker.name.clone();
        row.email = seeker.email.clone();
        row.password_hash = seeker.password_hash.clone();
        Ok(row.clone())
    }
}

#[async_trait]
impl JobRepository for MemoryStore {
    async fn insert(&self, job: NewJob) -> Result<Job> {
        let mut t = self.tables.lock().await;
        if !t.recruiters.contains_key(&job.recruiter_id) {
            return Err(fk_violation("jobs_recruiter_id_fkey"));
        }
        let row = Job {
            id: next(&mut t.seq.jobs),
            recruiter_id: job.recruiter_id,
            title: job.title,
            company: job.company,
            location: job.location,
            description: job.description,
            salary_range: job.salary_range,
            job_type: job.job_type,
            experience_level: job.experience_level,
            posted_date: job.posted_date,
            created_at: time::now(),
        };
        t.jobs.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Job>> {
        Ok(self.tables.lock().await.jobs.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Job>> {
        let t = self.tables.lock().await;
        Ok(ids.iter().filter_map(|id| t.jobs.get(id).cloned()).collect())
    }

    async fn find_all(&self) -> Result<Vec<Job>> {
        Ok(self.tables.lock().await.jobs.values().cloned().collect())
    }

    async fn find_by_recruiter_id(&self, recruiter_id: i64) -> Result<Vec<Job>> {
        let t = self.tables.lock().await;
        Ok(t.jobs
            .values()
            .filter(|j| j.recruiter_id == recruiter_id)
            .cloned()
            .collect())
    }

    async fn search(&self, filter: &JobFilter) -> Result<(Vec<Job>, i64)> {
        let t = self.tables.lock().await;
        let mut hits: Vec<Job> = t
            .jobs
            .values()
            .filter(|j| filter.matches(j))
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.posted_date.cmp(&a.posted_date).then(b.id.cmp(&a.id)));
        let total = hits.len() as i64;
        let page = hits
            .into_iter()
            .skip(usize::try_from(filter.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(filter.limit).unwrap_or(0))
            .collect();
        Ok((page, total))
    }

    async fn update(&self, job: &Job) -> Result<Job> {
        let mut t = self.tables.lock().await;
        let row = t
            .jobs
            .get_mut(&job.id)
            .ok_or_else(|| Error::NotFound("Resource not found".to_string()))?;
        row.title = job.title.clone();
        row.company = job.company.clone();
        row.location = job.location.clone();
        row.description = job.description.clone();
        row.salary_range = job.salary_range.clone();
        row.job_type = job.job_type.clone();
        row.experience_level = job.experience_level.clone();
        row.posted_date = job.posted_date;
        Ok(row.clone())
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64> {
        self.tables.lock().await.delete_job(id)
    }
}

#[async_trait]
impl ApplicationRepository for MemoryStore {
    async fn insert(&self, application: NewApplication) -> Result<Application> {
        let mut t = self.tables.lock().await;
        if !t.jobs.contains_key(&application.job_id) {
            return Err(fk_violation("applications_job_id_fkey"));
        }
        if !t.seekers.contains_key(&application.seeker_id) {
            return Err(fk_violation("applications_seeker_id_fkey"));
        }
        if t.applications.values().any(|a| {
            a.job_id == application.job_id && a.seeker_id == application.seeker_id
        }) {
            return Err(unique_violation("applications_job_id_seeker_id_key"));
        }
        let row = Application {
            id: next(&mut t.seq.applications),
            job_id: application.job_id,
            seeker_id: application.seeker_id,
            status: application.status,
            applied_date: application.applied_date,
            resume_url: application.resume_url,
            cover_letter: application.cover_letter,
        };
        t.applications.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Application>> {
        Ok(self.tables.lock().await.applications.get(&id).cloned())
    }

    async fn find_by_job_id(&self, job_id: i64) -> Result<Vec<Application>> {
        let t = self.tables.lock().await;
        Ok(t.applications_where(|a| a.job_id == job_id))
    }

    async fn find_by_job_id_and_status(
        &self,
        job_id: i64,
        status: ApplicationStatus,
    ) -> Result<Vec<Application>> {
        let t = self.tables.lock().await;
        Ok(t.applications_where(|a| a.job_id == job_id && a.status == status))
    }

    async fn find_by_seeker_id(&self, seeker_id: i64) -> Result<Vec<Application>> {
        let t = self.tables.lock().await;
        Ok(t.applications_where(|a| a.seeker_id == seeker_id))
    }

    async fn find_by_recruiter_id(&self, recruiter_id: i64) -> Result<Vec<Application>> {
        let t = self.tables.lock().await;
        let owned = t.job_ids_owned_by(recruiter_id);
        Ok(t.applications_where(|a| owned.contains(&a.job_id)))
    }

    async fn find_by_status(&self, status: ApplicationStatus) -> Result<Vec<Application>> {
        let t = self.tables.lock().await;
        Ok(t.applications_where(|a| a.status == status))
    }

    async fn find_by_job_id_and_seeker_id(
        &self,
        job_id: i64,
        seeker_id: i64,
    ) -> Result<Option<Application>> {
        let t = self.tables.lock().await;
        Ok(t
            .applications
            .values()
            .find(|a| a.job_id == job_id && a.seeker_id == seeker_id)
            .cloned())
    }

    async fn exists_by_job_id_and_seeker_id(&self, job_id: i64, seeker_id: i64) -> Result<bool> {
        let t = self.tables.lock().await;
        Ok(t
            .applications
            .values()
            .any(|a| a.job_id == job_id && a.seeker_id == seeker_id))
    }

    async fn count_by_job_id(&self, job_id: i64) -> Result<i64> {
        let t = self.tables.lock().await;
        Ok(t.applications.values().filter(|a| a.job_id == job_id).count() as i64)
    }

    async fn count_by_seeker_id(&self, seeker_id: i64) -> Result<i64> {
        let t = self.tables.lock().await;
        Ok(t
            .applications
            .values()
            .filter(|a| a.seeker_id == seeker_id)
            .count() as i64)
    }

    async fn count_by_recruiter_id_and_status(
        &self,
        recruiter_id: i64,
        status: ApplicationStatus,
    ) -> Result<i64> {
        let t = self.tables.lock().await;
        let owned = t.job_ids_owned_by(recruiter_id);
        Ok(t
            .applications
            .values()
            .filter(|a| a.status == status && owned.contains(&a.job_id))
            .count() as i64)
    }

    async fn update_status(
        &self,
        id: i64,
        status: ApplicationStatus,
    ) -> Result<Option<Application>> {
        let mut t = self.tables.lock().await;
        Ok(t.applications.get_mut(&id).map(|a| {
            a.status = status;
            a.clone()
        }))
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64> {
        let mut t = self.tables.lock().await;
        Ok(t.applications.remove(&id).map_or(0, |_| 1))
    }

    async fn delete_by_job_id(&self, job_id: i64) -> Result<u64> {
        Ok(self.tables.lock().await.delete_applications_by_job(job_id))
    }
}

#[async_trait]
impl SavedJobRepository for MemoryStore {
    async fn insert(
        &self,
        job_id: i64,
        seeker_id: i64,
        saved_date: DateTime<Utc>,
    ) -> Result<SavedJob> {
        let mut t = self.tables.lock().await;
        if !t.jobs.contains_key(&job_id) {
            return Err(Error::NotFound(format!("Job not found with id: {}", job_id)));
        }
        if !t.seekers.contains_key(&seeker_id) {
            return Err(fk_violation("saved_jobs_seeker_id_fkey"));
        }
        if t
            .saved_jobs
            .values()
            .any(|s| s.job_id == job_id && s.seeker_id == seeker_id)
        {
            return Err(unique_violation("saved_jobs_job_id_seeker_id_key"));
        }
        let row = SavedJob {
            id: next(&mut t.seq.saved_jobs),
            job_id,
            seeker_id,
            saved_date,
        };
        t.saved_jobs.insert(row.id, row.clone());
        Ok(row)
    }

    async fn exists_by_job_id_and_seeker_id(&self, job_id: i64, seeker_id: i64) -> Result<bool> {
        let t = self.tables.lock().await;
        Ok(t
            .saved_jobs
            .values()
            .any(|s| s.job_id == job_id && s.seeker_id == seeker_id))
    }

    async fn find_by_seeker_id(&self, seeker_id: i64) -> Result<Vec<SavedJob>> {
        let t = self.tables.lock().await;
        let mut rows: Vec<SavedJob> = t
            .saved_jobs
            .values()
            .filter(|s| s.seeker_id == seeker_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.saved_date.cmp(&a.saved_date).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn find_by_job_id(&self, job_id: i64) -> Result<Vec<SavedJob>> {
        let t = self.tables.lock().await;
        Ok(t.saved_jobs
            .values()
            .filter(|s| s.job_id == job_id)
            .cloned()
            .collect())
    }

    async fn count_by_seeker_id(&self, seeker_id: i64) -> Result<i64> {
        let t = self.tables.lock().await;
        Ok(t.saved_jobs
            .values()
            .filter(|s| s.seeker_id == seeker_id)
            .count() as i64)
    }

    async fn delete_by_job_id_and_seeker_id(&self, job_id: i64, seeker_id: i64) -> Result<u64> {
        let mut t = self.tables.lock().await;
        let before = t.saved_jobs.len();
        t.saved_jobs
            .retain(|_, s| !(s.job_id == job_id && s.seeker_id == seeker_id));
        Ok((before - t.saved_jobs.len()) as u64)
    }

    async fn delete_by_job_id(&self, job_id: i64) -> Result<u64> {
        Ok(self.tables.lock().await.delete_saved_jobs_by_job(job_id))
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn insert(&self, seeker_id: i64, fields: ProfileFields) -> Result<Profile> {
        let mut t = self.tables.lock().await;
        if !t.seekers.contains_key(&seeker_id) {
            return Err(fk_violation("profiles_seeker_id_fkey"));
        }
        if t.profiles.values().any(|p| p.seeker_id == seeker_id) {
            return Err(unique_violation("profiles_seeker_id_key"));
        }
        let now = time::now();
        let mut row = Profile {
            id: next(&mut t.seq.profiles),
            seeker_id,
            profile_picture: None,
            profile_headline: None,
            location: None,
            employment: None,
            skills: None,
            education: None,
            experience_level: None,
            availability: None,
            phone_number: None,
            created_at: now,
            updated_at: now,
        };
        row.apply(fields, now);
        t.profiles.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Profile>> {
        Ok(self.tables.lock().await.profiles.get(&id).cloned())
    }

    async fn find_by_seeker_id(&self, seeker_id: i64) -> Result<Option<Profile>> {
        let t = self.tables.lock().await;
        Ok(t.profiles.values().find(|p| p.seeker_id == seeker_id).cloned())
    }

    async fn exists_by_seeker_id(&self, seeker_id: i64) -> Result<bool> {
        let t = self.tables.lock().await;
        Ok(t.profiles.values().any(|p| p.seeker_id == seeker_id))
    }

    async fn find_all(&self) -> Result<Vec<Profile>> {
        Ok(self.tables.lock().await.profiles.values().cloned().collect())
    }

    async fn update(&self, id: i64, fields: ProfileFields) -> Result<Option<Profile>> {
        let mut t = self.tables.lock().await;
        Ok(t.profiles.get_mut(&id).map(|p| {
            p.apply(fields, time::now());
            p.clone()
        }))
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64> {
        let mut t = self.tables.lock().await;
        Ok(t.profiles.remove(&id).map_or(0, |_| 1))
    }
}

#[async_trait]
impl RecruiterProfileRepository for MemoryStore {
    async fn insert(
        &self,
        recruiter_id: i64,
        fields: RecruiterProfileFields,
    ) -> Result<RecruiterProfile> {
        let mut t = self.tables.lock().await;
        if !t.recruiters.contains_key(&recruiter_id) {
            return Err(fk_violation("recruiter_profiles_recruiter_id_fkey"));
        }
        if t
            .recruiter_profiles
            .values()
            .any(|p| p.recruiter_id == recruiter_id)
        {
            return Err(unique_violation("recruiter_profiles_recruiter_id_key"));
        }
        let now = time::now();
        let mut row = RecruiterProfile {
            id: next(&mut t.seq.recruiter_profiles),
            recruiter_id,
            name: None,
            email: None,
            phone_number: None,
            position: None,
            company_name: None,
            company_description: None,
            linkedin_profile: None,
            website: None,
            created_at: now,
            updated_at: now,
        };
        row.apply(fields, now);
        t.recruiter_profiles.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_recruiter_id(&self, recruiter_id: i64) -> Result<Option<RecruiterProfile>> {
        let t = self.tables.lock().await;
        Ok(t
            .recruiter_profiles
            .values()
            .find(|p| p.recruiter_id == recruiter_id)
            .cloned())
    }

    async fn exists_by_recruiter_id(&self, recruiter_id: i64) -> Result<bool> {
        let t = self.tables.lock().await;
        Ok(t
            .recruiter_profiles
            .values()
            .any(|p| p.recruiter_id == recruiter_id))
    }

    async fn update_by_recruiter_id(
        &self,
        recruiter_id: i64,
        fields: RecruiterProfileFields,
    ) -> Result<Option<RecruiterProfile>> {
        let mut t = self.tables.lock().await;
        Ok(t
            .recruiter_profiles
            .values_mut()
            .find(|p| p.recruiter_id == recruiter_id)
            .map(|p| {
                p.apply(fields, time::now());
                p.clone()
            }))
    }

    async fn delete_by_recruiter_id(&self, recruiter_id: i64) -> Result<u64> {
        let mut t = self.tables.lock().await;
        let before = t.recruiter_profiles.len();
        t.recruiter_profiles
            .retain(|_, p| p.recruiter_id != recruiter_id);
        Ok((before - t.recruiter_profiles.len()) as u64)
    }
}

/// Holds the store lock until commit. On drop without commit the snapshot
/// taken at `begin` is written back.
struct MemoryTx {
    tables: OwnedMutexGuard<Tables>,
    snapshot: Option<Tables>,
}

impl Drop for MemoryTx {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            *self.tables = snapshot;
        }
    }
}

#[async_trait]
impl UnitOfWork for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn WriteTx>> {
        let tables = self.tables.clone().lock_owned().await;
        let snapshot = Some(tables.clone());
        Ok(Box::new(MemoryTx { tables, snapshot }))
    }
}

#[async_trait]
impl WriteTx for MemoryTx {
    async fn lock_job(&mut self, job_id: i64) -> Result<bool> {
        Ok(self.tables.jobs.contains_key(&job_id))
    }

    async fn job_ids_by_recruiter(&mut self, recruiter_id: i64) -> Result<Vec<i64>> {
        Ok(self.tables.job_ids_owned_by(recruiter_id))
    }

    async fn delete_saved_jobs_by_job(&mut self, job_id: i64) -> Result<u64> {
        Ok(self.tables.delete_saved_jobs_by_job(job_id))
    }

    async fn delete_applications_by_job(&mut self, job_id: i64) -> Result<u64> {
        Ok(self.tables.delete_applications_by_job(job_id))
    }

    async fn delete_job(&mut self, job_id: i64) -> Result<u64> {
        self.tables.delete_job(job_id)
    }

    async fn delete_saved_jobs_by_seeker(&mut self, seeker_id: i64) -> Result<u64> {
        let before = self.tables.saved_jobs.len();
        self.tables.saved_jobs.retain(|_, s| s.seeker_id != seeker_id);
        Ok((before - self.tables.saved_jobs.len()) as u64)
    }

    async fn delete_applications_by_seeker(&mut self, seeker_id: i64) -> Result<u64> {
        let before = self.tables.applications.len();
        self.tables
            .applications
            .retain(|_, a| a.seeker_id != seeker_id);
        Ok((before - self.tables.applications.len()) as u64)
    }

    async fn delete_profile_by_seeker(&mut self, seeker_id: i64) -> Result<u64> {
        let before = self.tables.profiles.len();
        self.tables.profiles.retain(|_, p| p.seeker_id != seeker_id);
        Ok((before - self.tables.profiles.len()) as u64)
    }

    async fn delete_seeker(&mut self, seeker_id: i64) -> Result<u64> {
        self.tables.delete_seeker(seeker_id)
    }

    async fn delete_recruiter_profile(&mut self, recruiter_id: i64) -> Result<u64> {
        let before = self.tables.recruiter_profiles.len();
        self.tables
            .recruiter_profiles
            .retain(|_, p| p.recruiter_id != recruiter_id);
        Ok((before - self.tables.recruiter_profiles.len()) as u64)
    }

    async fn delete_recruiter(&mut self, recruiter_id: i64) -> Result<u64> {
        self.tables.delete_recruiter(recruiter_id)
    }

    async fn commit(mut self: Box<Self>) -> Result<()> {
        self.snapshot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed(store: &MemoryStore) -> (Recruiter, Seeker, Job) {
        let recruiter = RecruiterRepository::insert(
            store,
            NewRecruiter {
                name: "Rita".into(),
                email: "rita@example.com".into(),
                password_hash: "x".into(),
            },
        )
        .await
        .unwrap();
        let seeker = SeekerRepository::insert(
            store,
            NewSeeker {
                name: "Sam".into(),
                email: "sam@example.com".into(),
                password_hash: "x".into(),
            },
        )
        .await
        .unwrap();
        let job = JobRepository::insert(
            store,
            NewJob {
                recruiter_id: recruiter.id,
                title: "Rust Engineer".into(),
                company: "Acme".into(),
                location: "Remote".into(),
                description: None,
                salary_range: None,
                job_type: None,
                experience_level: None,
                posted_date: time::today(),
            },
        )
        .await
        .unwrap();
        (recruiter, seeker, job)
    }

    #[tokio::test]
    async fn rollback_on_drop_restores_rows() {
        let store = MemoryStore::new();
        let (_, seeker, job) = seed(&store).await;
        SavedJobRepository::insert(&store, job.id, seeker.id, time::now())
            .await
            .unwrap();

        {
            let mut tx = store.begin().await.unwrap();
            assert_eq!(tx.delete_saved_jobs_by_job(job.id).await.unwrap(), 1);
            assert_eq!(tx.delete_job(job.id).await.unwrap(), 1);
        }

        assert!(JobRepository::find_by_id(&store, job.id)
            .await
            .unwrap()
            .is_some());
        assert_eq!(
            SavedJobRepository::count_by_seeker_id(&store, seeker.id)
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn commit_keeps_changes() {
        let store = MemoryStore::new();
        let (_, seeker, job) = seed(&store).await;
        SavedJobRepository::insert(&store, job.id, seeker.id, time::now())
            .await
            .unwrap();

        let mut tx = store.begin().await.unwrap();
        tx.delete_saved_jobs_by_job(job.id).await.unwrap();
        tx.delete_job(job.id).await.unwrap();
        tx.commit().await.unwrap();

        assert!(JobRepository::find_by_id(&store, job.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn job_with_applications_cannot_be_deleted_plainly() {
        let store = MemoryStore::new();
        let (_, seeker, job) = seed(&store).await;
        ApplicationRepository::insert(
            &store,
            NewApplication {
                job_id: job.id,
                seeker_id: seeker.id,
                status: ApplicationStatus::Pending,
                applied_date: time::now(),
                resume_url: None,
                cover_letter: None,
            },
        )
        .await
        .unwrap();

        let err = JobRepository::delete_by_id(&store, job.id).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn bookmark_insert_requires_live_job() {
        let store = MemoryStore::new();
        let (_, seeker, job) = seed(&store).await;
        JobRepository::delete_by_id(&store, job.id).await.unwrap();

        let err = SavedJobRepository::insert(&store, job.id, seeker.id, time::now())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            SavedJobRepository::count_by_seeker_id(&store, seeker.id)
                .await
                .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let (_, seeker, job) = seed(&store).await;
        let first = SavedJobRepository::insert(&store, job.id, seeker.id, time::now())
            .await
            .unwrap();
        SavedJobRepository::delete_by_job_id(&store, job.id)
            .await
            .unwrap();
        let second = SavedJobRepository::insert(&store, job.id, seeker.id, time::now())
            .await
            .unwrap();
        assert!(second.id > first.id);
    }
}
