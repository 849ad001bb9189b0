pub mod account_dto;
pub mod application_dto;
pub mod job_dto;
pub mod profile_dto;
pub mod saved_job_dto;

use serde::{Deserialize, Serialize};

/// Plain confirmation body for operations with nothing else to return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: i64,
}
