use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::profile::{RecruiterProfile, RecruiterProfileFields};
use crate::repository::{RecruiterProfileRepository, RecruiterRepository, Repositories};
use crate::services::{resolve_rejected_insert, Recheck};

const PROFILE_EXISTS: &str = "Profile already exists for this recruiter";

#[derive(Clone)]
pub struct RecruiterProfileService {
    profiles: Arc<dyn RecruiterProfileRepository>,
    recruiters: Arc<dyn RecruiterRepository>,
}

fn profile_not_found(recruiter_id: i64) -> Error {
    Error::NotFound(format!("Profile not found for recruiter: {}", recruiter_id))
}

impl RecruiterProfileService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            profiles: repos.recruiter_profiles.clone(),
            recruiters: repos.recruiters.clone(),
        }
    }

    pub async fn get_by_recruiter(&self, recruiter_id: i64) -> Result<RecruiterProfile> {
        self.profiles
            .find_by_recruiter_id(recruiter_id)
            .await?
            .ok_or_else(|| profile_not_found(recruiter_id))
    }

    pub async fn exists(&self, recruiter_id: i64) -> Result<bool> {
        self.profiles.exists_by_recruiter_id(recruiter_id).await
    }

    pub async fn create(
        &self,
        recruiter_id: i64,
        fields: RecruiterProfileFields,
    ) -> Result<RecruiterProfile> {
        if self.recruiters.find_by_id(recruiter_id).await?.is_none() {
            return Err(recruiter_not_found(recruiter_id));
        }
        if self.profiles.exists_by_recruiter_id(recruiter_id).await? {
            return Err(Error::Conflict(PROFILE_EXISTS.to_string()));
        }

        match self.profiles.insert(recruiter_id, fields).await {
            Ok(profile) => {
                tracing::info!(recruiter_id, "recruiter profile created");
                Ok(profile)
            }
            Err(err) if err.is_conflict() => {
                let recheck = self.recheck(recruiter_id).await;
                Err(resolve_rejected_insert(err, recheck, PROFILE_EXISTS))
            }
            Err(err) => Err(err),
        }
    }

    async fn recheck(&self, recruiter_id: i64) -> Result<Recheck> {
        if self.profiles.exists_by_recruiter_id(recruiter_id).await? {
            return Ok(Recheck::Duplicate);
        }
        if self.recruiters.find_by_id(recruiter_id).await?.is_none() {
            return Ok(Recheck::Missing(recruiter_not_found(recruiter_id)));
        }
        Ok(Recheck::Unexplained)
    }

    /// Overwrites the profile, creating it on first use.
    pub async fn upsert(
        &self,
        recruiter_id: i64,
        fields: RecruiterProfileFields,
    ) -> Result<RecruiterProfile> {
        if let Some(profile) = self
            .profiles
            .update_by_recruiter_id(recruiter_id, fields.clone())
            .await?
        {
            tracing::info!(recruiter_id, "recruiter profile updated");
            return Ok(profile);
        }
        self.create(recruiter_id, fields).await
    }

    pub async fn delete(&self, recruiter_id: i64) -> Result<()> {
        if self.profiles.delete_by_recruiter_id(recruiter_id).await? == 0 {
            return Err(profile_not_found(recruiter_id));
        }
        tracing::info!(recruiter_id, "recruiter profile deleted");
        Ok(())
    }
}

fn recruiter_not_found(recruiter_id: i64) -> Error {
    Error::NotFound(format!("Recruiter not found with id: {}", recruiter_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::recruiter::NewRecruiter;

    async fn setup() -> (RecruiterProfileService, i64) {
        let repos = Repositories::in_memory();
        let recruiter = repos
            .recruiters
            .insert(NewRecruiter {
                name: "Rita".into(),
                email: "rita@example.com".into(),
                password_hash: "x".into(),
            })
            .await
            .unwrap();
        (RecruiterProfileService::new(&repos), recruiter.id)
    }

    #[tokio::test]
    async fn upsert_creates_then_updates() {
        let (svc, recruiter_id) = setup().await;
        assert!(!svc.exists(recruiter_id).await.unwrap());

        let created = svc
            .upsert(
                recruiter_id,
                RecruiterProfileFields {
                    company_name: Some("Acme".into()),
                    ..RecruiterProfileFields::default()
                },
            )
            .await
            .unwrap();
        let updated = svc
            .upsert(
                recruiter_id,
                RecruiterProfileFields {
                    company_name: Some("Acme Corp".into()),
                    website: Some("https://acme.test".into()),
                    ..RecruiterProfileFields::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(created.id, updated.id);
        assert_eq!(updated.company_name.as_deref(), Some("Acme Corp"));
    }

    #[tokio::test]
    async fn create_checks_recruiter_and_uniqueness() {
        let (svc, recruiter_id) = setup().await;
        assert!(svc
            .create(999, RecruiterProfileFields::default())
            .await
            .unwrap_err()
            .is_not_found());
        svc.create(recruiter_id, RecruiterProfileFields::default())
            .await
            .unwrap();
        assert!(svc
            .create(recruiter_id, RecruiterProfileFields::default())
            .await
            .unwrap_err()
            .is_conflict());
    }

    #[tokio::test]
    async fn delete_without_profile_is_not_found() {
        let (svc, recruiter_id) = setup().await;
        assert!(svc.delete(recruiter_id).await.unwrap_err().is_not_found());
        assert!(svc
            .get_by_recruiter(recruiter_id)
            .await
            .unwrap_err()
            .is_not_found());
    }
}
