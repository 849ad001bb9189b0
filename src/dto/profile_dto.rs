use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::profile::{ProfileFields, RecruiterProfileFields};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProfilePayload {
    #[validate(range(min = 1))]
    pub seeker_id: i64,
    #[serde(flatten)]
    #[validate(nested)]
    pub fields: ProfilePayload,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ProfilePayload {
    pub profile_picture: Option<String>,
    pub profile_headline: Option<String>,
    pub location: Option<String>,
    pub employment: Option<String>,
    pub skills: Option<String>,
    pub education: Option<String>,
    pub experience_level: Option<String>,
    pub availability: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RecruiterProfilePayload {
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub position: Option<String>,
    pub company_name: Option<String>,
    pub company_description: Option<String>,
    #[validate(url)]
    pub linkedin_profile: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
}

impl From<ProfilePayload> for ProfileFields {
    fn from(value: ProfilePayload) -> Self {
        Self {
            profile_picture: value.profile_picture,
            profile_headline: value.profile_headline,
            location: value.location,
            employment: value.employment,
            skills: value.skills,
            education: value.education,
            experience_level: value.experience_level,
            availability: value.availability,
            phone_number: value.phone_number,
        }
    }
}

impl From<RecruiterProfilePayload> for RecruiterProfileFields {
    fn from(value: RecruiterProfilePayload) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone_number: value.phone_number,
            position: value.position,
            company_name: value.company_name,
            company_description: value.company_description,
            linkedin_profile: value.linkedin_profile,
            website: value.website,
        }
    }
}
