//! Postgres-backed repositories. Queries are built at runtime with
//! `sqlx::query_as::<_, T>` so the crate builds without a live database.

mod accounts;
mod applications;
mod jobs;
mod profiles;
mod saved_jobs;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::{UnitOfWork, WriteTx};
use crate::error::Result;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub struct PgWriteTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl UnitOfWork for PgStore {
    async fn begin(&self) -> Result<Box<dyn WriteTx>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgWriteTx { tx }))
    }
}

impl PgWriteTx {
    async fn delete_where(&mut self, sql: &str, key: i64) -> Result<u64> {
        let res = sqlx::query(sql).bind(key).execute(&mut *self.tx).await?;
        Ok(res.rows_affected())
    }
}

#[async_trait]
impl WriteTx for PgWriteTx {
    async fn lock_job(&mut self, job_id: i64) -> Result<bool> {
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM jobs WHERE id = $1 FOR UPDATE")
            .bind(job_id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(id.is_some())
    }

    async fn job_ids_by_recruiter(&mut self, recruiter_id: i64) -> Result<Vec<i64>> {
        // Row locks keep concurrent applications off these jobs until commit.
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM jobs WHERE recruiter_id = $1 ORDER BY id FOR UPDATE",
        )
        .bind(recruiter_id)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(ids)
    }

    async fn delete_saved_jobs_by_job(&mut self, job_id: i64) -> Result<u64> {
        self.delete_where("DELETE FROM saved_jobs WHERE job_id = $1", job_id)
            .await
    }

    async fn delete_applications_by_job(&mut self, job_id: i64) -> Result<u64> {
        self.delete_where("DELETE FROM applications WHERE job_id = $1", job_id)
            .await
    }

    async fn delete_job(&mut self, job_id: i64) -> Result<u64> {
        self.delete_where("DELETE FROM jobs WHERE id = $1", job_id)
            .await
    }

    async fn delete_saved_jobs_by_seeker(&mut self, seeker_id: i64) -> Result<u64> {
        self.delete_where("DELETE FROM saved_jobs WHERE seeker_id = $1", seeker_id)
            .await
    }

    async fn delete_applications_by_seeker(&mut self, seeker_id: i64) -> Result<u64> {
        self.delete_where("DELETE FROM applications WHERE seeker_id = $1", seeker_id)
            .await
    }

    async fn delete_profile_by_seeker(&mut self, seeker_id: i64) -> Result<u64> {
        self.delete_where("DELETE FROM profiles WHERE seeker_id = $1", seeker_id)
            .await
    }

    async fn delete_seeker(&mut self, seeker_id: i64) -> Result<u64> {
        self.delete_where("DELETE FROM seekers WHERE id = $1", seeker_id)
            .await
    }

    async fn delete_recruiter_profile(&mut self, recruiter_id: i64) -> Result<u64> {
        self.delete_where(
            "DELETE FROM recruiter_profiles WHERE recruiter_id = $1",
            recruiter_id,
        )
        .await
    }

    async fn delete_recruiter(&mut self, recruiter_id: i64) -> Result<u64> {
        self.delete_where("DELETE FROM recruiters WHERE id = $1", recruiter_id)
            .await
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let PgWriteTx { tx } = *self;
        tx.commit().await?;
        Ok(())
    }
}
