use async_trait::async_trait;

use super::PgStore;
use crate::error::Result;
use crate::models::application::{Application, ApplicationRow, ApplicationStatus, NewApplication};
use crate::repository::ApplicationRepository;

const APPLICATION_COLUMNS: &str =
    "id, job_id, seeker_id, status, applied_date, resume_url, cover_letter";

fn into_applications(rows: Vec<ApplicationRow>) -> Result<Vec<Application>> {
    rows.into_iter().map(Application::try_from).collect()
}

impl PgStore {
    async fn applications_where(&self, condition: &str, key: i64) -> Result<Vec<Application>> {
        let sql = format!(
            "SELECT {} FROM applications WHERE {} ORDER BY applied_date DESC, id DESC",
            APPLICATION_COLUMNS, condition
        );
        let rows = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(key)
            .fetch_all(&self.pool)
            .await?;
        into_applications(rows)
    }
}

#[async_trait]
impl ApplicationRepository for PgStore {
    async fn insert(&self, application: NewApplication) -> Result<Application> {
        let sql = format!(
            "INSERT INTO applications (job_id, seeker_id, status, applied_date, resume_url, cover_letter) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            APPLICATION_COLUMNS
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(application.job_id)
            .bind(application.seeker_id)
            .bind(application.status.as_str())
            .bind(application.applied_date)
            .bind(&application.resume_url)
            .bind(&application.cover_letter)
            .fetch_one(&self.pool)
            .await?;
        row.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Application>> {
        let sql = format!("SELECT {} FROM applications WHERE id = $1", APPLICATION_COLUMNS);
        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Application::try_from).transpose()
    }

    async fn find_by_job_id(&self, job_id: i64) -> Result<Vec<Application>> {
        self.applications_where("job_id = $1", job_id).await
    }

    async fn find_by_job_id_and_status(
        &self,
        job_id: i64,
        status: ApplicationStatus,
    ) -> Result<Vec<Application>> {
        let sql = format!(
            "SELECT {} FROM applications WHERE job_id = $1 AND status = $2 \
             ORDER BY applied_date DESC, id DESC",
            APPLICATION_COLUMNS
        );
        let rows = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(job_id)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await?;
        into_applications(rows)
    }

    async fn find_by_seeker_id(&self, seeker_id: i64) -> Result<Vec<Application>> {
        self.applications_where("seeker_id = $1", seeker_id).await
    }

    async fn find_by_recruiter_id(&self, recruiter_id: i64) -> Result<Vec<Application>> {
        self.applications_where(
            "job_id IN (SELECT id FROM jobs WHERE recruiter_id = $1)",
            recruiter_id,
        )
        .await
    }

    async fn find_by_status(&self, status: ApplicationStatus) -> Result<Vec<Application>> {
        let sql = format!(
            "SELECT {} FROM applications WHERE status = $1 ORDER BY applied_date DESC, id DESC",
            APPLICATION_COLUMNS
        );
        let rows = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await?;
        into_applications(rows)
    }

    async fn find_by_job_id_and_seeker_id(
        &self,
        job_id: i64,
        seeker_id: i64,
    ) -> Result<Option<Application>> {
        let sql = format!(
            "SELECT {} FROM applications WHERE job_id = $1 AND seeker_id = $2",
            APPLICATION_COLUMNS
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(job_id)
            .bind(seeker_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Application::try_from).transpose()
    }

    async fn exists_by_job_id_and_seeker_id(&self, job_id: i64, seeker_id: i64) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM applications WHERE job_id = $1 AND seeker_id = $2)",
        )
        .bind(job_id)
        .bind(seeker_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn count_by_job_id(&self, job_id: i64) -> Result<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM applications WHERE job_id = $1")
                .bind(job_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn count_by_seeker_id(&self, seeker_id: i64) -> Result<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM applications WHERE seeker_id = $1")
                .bind(seeker_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn count_by_recruiter_id_and_status(
        &self,
        recruiter_id: i64,
        status: ApplicationStatus,
    ) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            WHERE j.recruiter_id = $1 AND a.status = $2
            "#,
        )
        .bind(recruiter_id)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn update_status(
        &self,
        id: i64,
        status: ApplicationStatus,
    ) -> Result<Option<Application>> {
        let sql = format!(
            "UPDATE applications SET status = $2 WHERE id = $1 RETURNING {}",
            APPLICATION_COLUMNS
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.map(Application::try_from).transpose()
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64> {
        let res = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn delete_by_job_id(&self, job_id: i64) -> Result<u64> {
        let res = sqlx::query("DELETE FROM applications WHERE job_id = $1")
            .bind(job_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}
