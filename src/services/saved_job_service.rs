use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::saved_job::SavedJob;
use crate::projection::{self, SavedJobWithDetails};
use crate::repository::{
    JobRepository, Repositories, SavedJobRepository, SeekerRepository, WriteTx,
};
use crate::services::{resolve_rejected_insert, Recheck};
use crate::utils::time;

const ALREADY_SAVED: &str = "Job already saved";

#[derive(Clone)]
pub struct SavedJobService {
    saved_jobs: Arc<dyn SavedJobRepository>,
    jobs: Arc<dyn JobRepository>,
    seekers: Arc<dyn SeekerRepository>,
}

impl SavedJobService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            saved_jobs: repos.saved_jobs.clone(),
            jobs: repos.jobs.clone(),
            seekers: repos.seekers.clone(),
        }
    }

    pub async fn save(&self, job_id: i64, seeker_id: i64) -> Result<SavedJob> {
        if self.jobs.find_by_id(job_id).await?.is_none() {
            return Err(Error::NotFound(format!("Job not found with id: {}", job_id)));
        }
        if self.seekers.find_by_id(seeker_id).await?.is_none() {
            return Err(Error::NotFound(format!(
                "Seeker not found with id: {}",
                seeker_id
            )));
        }
        if self
            .saved_jobs
            .exists_by_job_id_and_seeker_id(job_id, seeker_id)
            .await?
        {
            return Err(Error::Conflict(ALREADY_SAVED.to_string()));
        }

        match self.saved_jobs.insert(job_id, seeker_id, time::now()).await {
            Ok(saved) => {
                tracing::info!(job_id, seeker_id, saved_job_id = saved.id, "job saved");
                Ok(saved)
            }
            Err(err) if err.is_conflict() => {
                let recheck = self.recheck(job_id, seeker_id).await;
                Err(resolve_rejected_insert(err, recheck, ALREADY_SAVED))
            }
            Err(err) => Err(err),
        }
    }

    async fn recheck(&self, job_id: i64, seeker_id: i64) -> Result<Recheck> {
        if self
            .saved_jobs
            .exists_by_job_id_and_seeker_id(job_id, seeker_id)
            .await?
        {
            return Ok(Recheck::Duplicate);
        }
        if self.seekers.find_by_id(seeker_id).await?.is_none() {
            return Ok(Recheck::Missing(Error::NotFound(format!(
                "Seeker not found with id: {}",
                seeker_id
            ))));
        }
        if self.jobs.find_by_id(job_id).await?.is_none() {
            return Ok(Recheck::Missing(Error::NotFound(format!(
                "Job not found with id: {}",
                job_id
            ))));
        }
        Ok(Recheck::Unexplained)
    }

    pub async fn unsave(&self, job_id: i64, seeker_id: i64) -> Result<()> {
        let removed = self
            .saved_jobs
            .delete_by_job_id_and_seeker_id(job_id, seeker_id)
            .await?;
        if removed == 0 {
            return Err(Error::NotFound("Job not saved".into()));
        }
        tracing::info!(job_id, seeker_id, "job unsaved");
        Ok(())
    }

    /// Removes every listed bookmark that exists and skips the rest.
    /// Returns how many were removed.
    pub async fn unsave_many(&self, seeker_id: i64, job_ids: &[i64]) -> Result<u64> {
        let mut removed = 0;
        for job_id in projection::distinct_ids(job_ids.iter().copied()) {
            removed += self
                .saved_jobs
                .delete_by_job_id_and_seeker_id(job_id, seeker_id)
                .await?;
        }
        tracing::info!(seeker_id, requested = job_ids.len(), removed, "bulk unsave");
        Ok(removed)
    }

    pub async fn is_saved(&self, job_id: i64, seeker_id: i64) -> Result<bool> {
        self.saved_jobs
            .exists_by_job_id_and_seeker_id(job_id, seeker_id)
            .await
    }

    pub async fn count_for_seeker(&self, seeker_id: i64) -> Result<i64> {
        self.saved_jobs.count_by_seeker_id(seeker_id).await
    }

    pub async fn list_for_job(&self, job_id: i64) -> Result<Vec<SavedJob>> {
        self.saved_jobs.find_by_job_id(job_id).await
    }

    pub async fn list_for_seeker(&self, seeker_id: i64) -> Result<Vec<SavedJob>> {
        self.saved_jobs.find_by_seeker_id(seeker_id).await
    }

    pub async fn list_with_job_details(&self, seeker_id: i64) -> Result<Vec<SavedJobWithDetails>> {
        let saved = self.saved_jobs.find_by_seeker_id(seeker_id).await?;
        let ids = projection::distinct_ids(saved.iter().map(|s| s.job_id));
        let jobs = self.jobs.find_by_ids(&ids).await?;
        Ok(projection::saved_jobs_with_details(&saved, jobs))
    }

    pub async fn delete_all_for_job(&self, job_id: i64) -> Result<u64> {
        let removed = self.saved_jobs.delete_by_job_id(job_id).await?;
        tracing::info!(job_id, removed, "saved jobs cleared for job");
        Ok(removed)
    }

    /// Same as [`SavedJobService::delete_all_for_job`] but inside the
    /// caller's transaction.
    pub async fn delete_all_for_job_in(tx: &mut dyn WriteTx, job_id: i64) -> Result<u64> {
        tx.delete_saved_jobs_by_job(job_id).await
    }
}
