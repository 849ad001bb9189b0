use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SavedJob {
    pub id: i64,
    pub job_id: i64,
    pub seeker_id: i64,
    pub saved_date: DateTime<Utc>,
}
