use async_trait::async_trait;

use super::PgStore;
use crate::error::Result;
use crate::models::profile::{Profile, ProfileFields, RecruiterProfile, RecruiterProfileFields};
use crate::repository::{ProfileRepository, RecruiterProfileRepository};
use crate::utils::time;

const PROFILE_COLUMNS: &str = "id, seeker_id, profile_picture, profile_headline, location, \
     employment, skills, education, experience_level, availability, phone_number, \
     created_at, updated_at";

const RECRUITER_PROFILE_COLUMNS: &str = "id, recruiter_id, name, email, phone_number, position, \
     company_name, company_description, linkedin_profile, website, created_at, updated_at";

#[async_trait]
impl ProfileRepository for PgStore {
    async fn insert(&self, seeker_id: i64, fields: ProfileFields) -> Result<Profile> {
        let now = time::now();
        let sql = format!(
            "INSERT INTO profiles (seeker_id, profile_picture, profile_headline, location, \
             employment, skills, education, experience_level, availability, phone_number, \
             created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11) RETURNING {}",
            PROFILE_COLUMNS
        );
        let row = sqlx::query_as::<_, Profile>(&sql)
            .bind(seeker_id)
            .bind(&fields.profile_picture)
            .bind(&fields.profile_headline)
            .bind(&fields.location)
            .bind(&fields.employment)
            .bind(&fields.skills)
            .bind(&fields.education)
            .bind(&fields.experience_level)
            .bind(&fields.availability)
            .bind(&fields.phone_number)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Profile>> {
        let sql = format!("SELECT {} FROM profiles WHERE id = $1", PROFILE_COLUMNS);
        let row = sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_seeker_id(&self, seeker_id: i64) -> Result<Option<Profile>> {
        let sql = format!("SELECT {} FROM profiles WHERE seeker_id = $1", PROFILE_COLUMNS);
        let row = sqlx::query_as::<_, Profile>(&sql)
            .bind(seeker_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn exists_by_seeker_id(&self, seeker_id: i64) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM profiles WHERE seeker_id = $1)",
        )
        .bind(seeker_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn find_all(&self) -> Result<Vec<Profile>> {
        let sql = format!("SELECT {} FROM profiles ORDER BY id", PROFILE_COLUMNS);
        let rows = sqlx::query_as::<_, Profile>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update(&self, id: i64, fields: ProfileFields) -> Result<Option<Profile>> {
        let sql = format!(
            "UPDATE profiles SET profile_picture = $2, profile_headline = $3, location = $4, \
             employment = $5, skills = $6, education = $7, experience_level = $8, \
             availability = $9, phone_number = $10, updated_at = $11 \
             WHERE id = $1 RETURNING {}",
            PROFILE_COLUMNS
        );
        let row = sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .bind(&fields.profile_picture)
            .bind(&fields.profile_headline)
            .bind(&fields.location)
            .bind(&fields.employment)
            .bind(&fields.skills)
            .bind(&fields.education)
            .bind(&fields.experience_level)
            .bind(&fields.availability)
            .bind(&fields.phone_number)
            .bind(time::now())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64> {
        let res = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}

#[async_trait]
impl RecruiterProfileRepository for PgStore {
    async fn insert(
        &self,
        recruiter_id: i64,
        fields: RecruiterProfileFields,
    ) -> Result<RecruiterProfile> {
        let now = time::now();
        let sql = format!(
            "INSERT INTO recruiter_profiles (recruiter_id, name, email, phone_number, position, \
             company_name, company_description, linkedin_profile, website, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10) RETURNING {}",
            RECRUITER_PROFILE_COLUMNS
        );
        let row = sqlx::query_as::<_, RecruiterProfile>(&sql)
            .bind(recruiter_id)
            .bind(&fields.name)
            .bind(&fields.email)
            .bind(&fields.phone_number)
            .bind(&fields.position)
            .bind(&fields.company_name)
            .bind(&fields.company_description)
            .bind(&fields.linkedin_profile)
            .bind(&fields.website)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_recruiter_id(&self, recruiter_id: i64) -> Result<Option<RecruiterProfile>> {
        let sql = format!(
            "SELECT {} FROM recruiter_profiles WHERE recruiter_id = $1",
            RECRUITER_PROFILE_COLUMNS
        );
        let row = sqlx::query_as::<_, RecruiterProfile>(&sql)
            .bind(recruiter_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn exists_by_recruiter_id(&self, recruiter_id: i64) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM recruiter_profiles WHERE recruiter_id = $1)",
        )
        .bind(recruiter_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn update_by_recruiter_id(
        &self,
        recruiter_id: i64,
        fields: RecruiterProfileFields,
    ) -> Result<Option<RecruiterProfile>> {
        let sql = format!(
            "UPDATE recruiter_profiles SET name = $2, email = $3, phone_number = $4, \
             position = $5, company_name = $6, company_description = $7, \
             linkedin_profile = $8, website = $9, updated_at = $10 \
             WHERE recruiter_id = $1 RETURNING {}",
            RECRUITER_PROFILE_COLUMNS
        );
        let row = sqlx::query_as::<_, RecruiterProfile>(&sql)
            .bind(recruiter_id)
            .bind(&fields.name)
            .bind(&fields.email)
            .bind(&fields.phone_number)
            .bind(&fields.position)
            .bind(&fields.company_name)
            .bind(&fields.company_description)
            .bind(&fields.linkedin_profile)
            .bind(&fields.website)
            .bind(time::now())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_by_recruiter_id(&self, recruiter_id: i64) -> Result<u64> {
        let res = sqlx::query("DELETE FROM recruiter_profiles WHERE recruiter_id = $1")
            .bind(recruiter_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}
