use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::PgStore;
use crate::error::{Error, Result};
use crate::models::saved_job::SavedJob;
use crate::repository::SavedJobRepository;

#[async_trait]
impl SavedJobRepository for PgStore {
    async fn insert(
        &self,
        job_id: i64,
        seeker_id: i64,
        saved_date: DateTime<Utc>,
    ) -> Result<SavedJob> {
        // KEY SHARE holds off a concurrent job delete until this insert
        // commits; a job already deleted yields no row.
        let row = sqlx::query_as::<_, SavedJob>(
            r#"
            INSERT INTO saved_jobs (job_id, seeker_id, saved_date)
            SELECT $1, $2, $3
            WHERE EXISTS (SELECT 1 FROM jobs WHERE id = $1 FOR KEY SHARE)
            RETURNING id, job_id, seeker_id, saved_date
            "#,
        )
        .bind(job_id)
        .bind(seeker_id)
        .bind(saved_date)
        .fetch_optional(&self.pool)
        .await?;
        row.ok_or_else(|| Error::NotFound(format!("Job not found with id: {}", job_id)))
    }

    async fn exists_by_job_id_and_seeker_id(&self, job_id: i64, seeker_id: i64) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM saved_jobs WHERE job_id = $1 AND seeker_id = $2)",
        )
        .bind(job_id)
        .bind(seeker_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn find_by_seeker_id(&self, seeker_id: i64) -> Result<Vec<SavedJob>> {
        let rows = sqlx::query_as::<_, SavedJob>(
            r#"
            SELECT id, job_id, seeker_id, saved_date
            FROM saved_jobs
            WHERE seeker_id = $1
            ORDER BY saved_date DESC, id DESC
            "#,
        )
        .bind(seeker_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_job_id(&self, job_id: i64) -> Result<Vec<SavedJob>> {
        let rows = sqlx::query_as::<_, SavedJob>(
            "SELECT id, job_id, seeker_id, saved_date FROM saved_jobs WHERE job_id = $1 ORDER BY id",
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn count_by_seeker_id(&self, seeker_id: i64) -> Result<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM saved_jobs WHERE seeker_id = $1")
                .bind(seeker_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn delete_by_job_id_and_seeker_id(&self, job_id: i64, seeker_id: i64) -> Result<u64> {
        let res = sqlx::query("DELETE FROM saved_jobs WHERE job_id = $1 AND seeker_id = $2")
            .bind(job_id)
            .bind(seeker_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn delete_by_job_id(&self, job_id: i64) -> Result<u64> {
        let res = sqlx::query("DELETE FROM saved_jobs WHERE job_id = $1")
            .bind(job_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}
