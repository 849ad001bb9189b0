use async_trait::async_trait;

use super::PgStore;
use crate::error::{Error, Result};
use crate::models::recruiter::{NewRecruiter, Recruiter};
use crate::models::seeker::{NewSeeker, Seeker};
use crate::repository::{RecruiterRepository, SeekerRepository};

const ACCOUNT_COLUMNS: &str = "id, name, email, password_hash, created_at";

#[async_trait]
impl RecruiterRepository for PgStore {
    async fn insert(&self, recruiter: NewRecruiter) -> Result<Recruiter> {
        let sql = format!(
            "INSERT INTO recruiters (name, email, password_hash) VALUES ($1, $2, $3) RETURNING {}",
            ACCOUNT_COLUMNS
        );
        let row = sqlx::query_as::<_, Recruiter>(&sql)
            .bind(&recruiter.name)
            .bind(&recruiter.email)
            .bind(&recruiter.password_hash)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Recruiter>> {
        let sql = format!("SELECT {} FROM recruiters WHERE id = $1", ACCOUNT_COLUMNS);
        let row = sqlx::query_as::<_, Recruiter>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Recruiter>> {
        let sql = format!(
            "SELECT {} FROM recruiters WHERE id = ANY($1) ORDER BY id",
            ACCOUNT_COLUMNS
        );
        let rows = sqlx::query_as::<_, Recruiter>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Recruiter>> {
        let sql = format!("SELECT {} FROM recruiters WHERE email = $1", ACCOUNT_COLUMNS);
        let row = sqlx::query_as::<_, Recruiter>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_all(&self) -> Result<Vec<Recruiter>> {
        let sql = format!("SELECT {} FROM recruiters ORDER BY id", ACCOUNT_COLUMNS);
        let rows = sqlx::query_as::<_, Recruiter>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update(&self, recruiter: &Recruiter) -> Result<Recruiter> {
        let sql = format!(
            "UPDATE recruiters SET name = $2, email = $3, password_hash = $4 WHERE id = $1 RETURNING {}",
            ACCOUNT_COLUMNS
        );
        sqlx::query_as::<_, Recruiter>(&sql)
            .bind(recruiter.id)
            .bind(&recruiter.name)
            .bind(&recruiter.email)
            .bind(&recruiter.password_hash)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Resource not found".to_string()))
    }
}

#[async_trait]
impl SeekerRepository for PgStore {
    async fn insert(&self, seeker: NewSeeker) -> Result<Seeker> {
        let sql = format!(
            "INSERT INTO seekers (name, email, password_hash) VALUES ($1, $2, $3) RETURNING {}",
            ACCOUNT_COLUMNS
        );
        let row = sqlx::query_as::<_, Seeker>(&sql)
            .bind(&seeker.name)
            .bind(&seeker.email)
            .bind(&seeker.password_hash)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Seeker>> {
        let sql = format!("SELECT {} FROM seekers WHERE id = $1", ACCOUNT_COLUMNS);
        let row = sqlx::query_as::<_, Seeker>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Seeker>> {
        let sql = format!(
            "SELECT {} FROM seekers WHERE id = ANY($1) ORDER BY id",
            ACCOUNT_COLUMNS
        );
        let rows = sqlx::query_as::<_, Seeker>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Seeker>> {
        let sql = format!("SELECT {} FROM seekers WHERE email = $1", ACCOUNT_COLUMNS);
        let row = sqlx::query_as::<_, Seeker>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_all(&self) -> Result<Vec<Seeker>> {
        let sql = format!("SELECT {} FROM seekers ORDER BY id", ACCOUNT_COLUMNS);
        let rows = sqlx::query_as::<_, Seeker>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update(&self, seeker: &Seeker) -> Result<Seeker> {
        let sql = format!(
            "UPDATE seekers SET name = $2, email = $3, password_hash = $4 WHERE id = $1 RETURNING {}",
            ACCOUNT_COLUMNS
        );
        sqlx::query_as::<_, Seeker>(&sql)
            .bind(seeker.id)
            .bind(&seeker.name)
            .bind(&seeker.email)
            .bind(&seeker.password_hash)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Resource not found".to_string()))
    }
}
