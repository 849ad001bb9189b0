use async_trait::async_trait;

use super::PgStore;
use crate::error::{Error, Result};
use crate::models::job::{Job, JobFilter, NewJob};
use crate::repository::JobRepository;

const JOB_COLUMNS: &str = "id, recruiter_id, title, company, location, description, \
     salary_range, job_type, experience_level, posted_date, created_at";

/// Builds the WHERE clause for a job search. Returns the clause and the
/// values to bind, in placeholder order.
fn search_clause(filter: &JobFilter) -> (String, Vec<String>) {
    let mut filters = Vec::new();
    let mut args: Vec<String> = Vec::new();

    if let Some(search) = &filter.search {
        let n = args.len() + 1;
        filters.push(format!(
            "(title ILIKE ${n} OR company ILIKE ${n} OR description ILIKE ${n})"
        ));
        args.push(format!("%{}%", search));
    }
    if let Some(location) = &filter.location {
        filters.push(format!("location ILIKE ${}", args.len() + 1));
        args.push(format!("%{}%", location));
    }
    if let Some(job_type) = &filter.job_type {
        filters.push(format!("LOWER(job_type) = LOWER(${})", args.len() + 1));
        args.push(job_type.clone());
    }
    if let Some(level) = &filter.experience_level {
        filters.push(format!("LOWER(experience_level) = LOWER(${})", args.len() + 1));
        args.push(level.clone());
    }

    let where_clause = if filters.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", filters.join(" AND "))
    };
    (where_clause, args)
}

#[async_trait]
impl JobRepository for PgStore {
    async fn insert(&self, job: NewJob) -> Result<Job> {
        let sql = format!(
            "INSERT INTO jobs (recruiter_id, title, company, location, description, salary_range, \
             job_type, experience_level, posted_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {}",
            JOB_COLUMNS
        );
        let row = sqlx::query_as::<_, Job>(&sql)
            .bind(job.recruiter_id)
            .bind(&job.title)
            .bind(&job.company)
            .bind(&job.location)
            .bind(&job.description)
            .bind(&job.salary_range)
            .bind(&job.job_type)
            .bind(&job.experience_level)
            .bind(job.posted_date)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Job>> {
        let sql = format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS);
        let row = sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Job>> {
        let sql = format!(
            "SELECT {} FROM jobs WHERE id = ANY($1) ORDER BY id",
            JOB_COLUMNS
        );
        let rows = sqlx::query_as::<_, Job>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_all(&self) -> Result<Vec<Job>> {
        let sql = format!("SELECT {} FROM jobs ORDER BY id", JOB_COLUMNS);
        let rows = sqlx::query_as::<_, Job>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find_by_recruiter_id(&self, recruiter_id: i64) -> Result<Vec<Job>> {
        let sql = format!(
            "SELECT {} FROM jobs WHERE recruiter_id = $1 ORDER BY id",
            JOB_COLUMNS
        );
        let rows = sqlx::query_as::<_, Job>(&sql)
            .bind(recruiter_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn search(&self, filter: &JobFilter) -> Result<(Vec<Job>, i64)> {
        let (where_clause, args) = search_clause(filter);

        let items_query = format!(
            "SELECT {} FROM jobs {} ORDER BY posted_date DESC, id DESC LIMIT ${} OFFSET ${}",
            JOB_COLUMNS,
            where_clause,
            args.len() + 1,
            args.len() + 2
        );
        let total_query = format!("SELECT COUNT(*) FROM jobs {}", where_clause);

        let mut items_statement = sqlx::query_as::<_, Job>(&items_query);
        for value in &args {
            items_statement = items_statement.bind(value);
        }
        let items = items_statement
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(&self.pool)
            .await?;

        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        for value in &args {
            total_statement = total_statement.bind(value);
        }
        let total = total_statement.fetch_one(&self.pool).await?;

        Ok((items, total))
    }

    async fn update(&self, job: &Job) -> Result<Job> {
        let sql = format!(
            "UPDATE jobs SET title = $2, company = $3, location = $4, description = $5, \
             salary_range = $6, job_type = $7, experience_level = $8, posted_date = $9 \
             WHERE id = $1 RETURNING {}",
            JOB_COLUMNS
        );
        sqlx::query_as::<_, Job>(&sql)
            .bind(job.id)
            .bind(&job.title)
            .bind(&job.company)
            .bind(&job.location)
            .bind(&job.description)
            .bind(&job.salary_range)
            .bind(&job.job_type)
            .bind(&job.experience_level)
            .bind(job.posted_date)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Resource not found".to_string()))
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64> {
        let res = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_has_no_where_clause() {
        let (clause, args) = search_clause(&JobFilter::default());
        assert!(clause.is_empty());
        assert!(args.is_empty());
    }

    #[test]
    fn placeholders_follow_bind_order() {
        let filter = JobFilter {
            search: Some("rust".into()),
            job_type: Some("Full-time".into()),
            ..JobFilter::default()
        };
        let (clause, args) = search_clause(&filter);
        assert_eq!(
            clause,
            "WHERE (title ILIKE $1 OR company ILIKE $1 OR description ILIKE $1) AND LOWER(job_type) = LOWER($2)"
        );
        assert_eq!(args, vec!["%rust%".to_string(), "Full-time".to_string()]);
    }
}
