use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: i64,
    pub seeker_id: i64,
    pub profile_picture: Option<String>,
    pub profile_headline: Option<String>,
    pub location: Option<String>,
    pub employment: Option<String>,
    pub skills: Option<String>,
    pub education: Option<String>,
    pub experience_level: Option<String>,
    pub availability: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Every editable profile attribute. Updates overwrite all of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileFields {
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

impl Profile {
    pub fn apply(&mut self, fields: ProfileFields, now: DateTime<Utc>) {
        self.profile_picture = fields.profile_picture;
        self.profile_headline = fields.profile_headline;
        self.location = fields.location;
        self.employment = fields.employment;
        self.skills = fields.skills;
        self.education = fields.education;
        self.experience_level = fields.experience_level;
        self.availability = fields.availability;
        self.phone_number = fields.phone_number;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RecruiterProfile {
    pub id: i64,
    pub recruiter_id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub position: Option<String>,
    pub company_name: Option<String>,
    pub company_description: Option<String>,
    pub linkedin_profile: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecruiterProfileFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub position: Option<String>,
    pub company_name: Option<String>,
    pub company_description: Option<String>,
    pub linkedin_profile: Option<String>,
    pub website: Option<String>,
}

impl RecruiterProfile {
    pub fn apply(&mut self, fields: RecruiterProfileFields, now: DateTime<Utc>) {
        self.name = fields.name;
        self.email = fields.email;
        self.phone_number = fields.phone_number;
        self.position = fields.position;
        self.company_name = fields.company_name;
        self.company_description = fields.company_description;
        self.linkedin_profile = fields.linkedin_profile;
        self.website = fields.website;
        self.updated_at = now;
    }
}
