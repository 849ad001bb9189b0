use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveJobPayload {
    #[validate(range(min = 1))]
    pub job_id: i64,
    #[validate(range(min = 1))]
    pub seeker_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsSavedResponse {
    pub is_saved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovedResponse {
    pub removed: u64,
}
