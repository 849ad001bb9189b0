use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::recruiter::Recruiter;
use crate::models::seeker::Seeker;
use crate::services::recruiter_service::RecruiterUpdate;
use crate::services::seeker_service::SeekerUpdate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupPayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SigninPayload {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateRecruiterPayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1))]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateSeekerPayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    /// Blank keeps the current password.
    pub password: Option<String>,
}

/// Account as returned to clients; never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<Recruiter> for AccountResponse {
    fn from(value: Recruiter) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            created_at: value.created_at,
        }
    }
}

impl From<Seeker> for AccountResponse {
    fn from(value: Seeker) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            created_at: value.created_at,
        }
    }
}

impl From<UpdateRecruiterPayload> for RecruiterUpdate {
    fn from(value: UpdateRecruiterPayload) -> Self {
        Self {
            name: value.name,
            email: value.email,
            password: value.password,
        }
    }
}

impl From<UpdateSeekerPayload> for SeekerUpdate {
    fn from(value: UpdateSeekerPayload) -> Self {
        Self {
            name: value.name,
            password: value.password,
        }
    }
}
