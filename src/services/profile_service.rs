use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::profile::{Profile, ProfileFields};
use crate::repository::{ProfileRepository, Repositories, SeekerRepository};
use crate::services::{resolve_rejected_insert, Recheck};

const PROFILE_EXISTS: &str = "Profile already exists for this seeker";

#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
    seekers: Arc<dyn SeekerRepository>,
}

impl ProfileService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            profiles: repos.profiles.clone(),
            seekers: repos.seekers.clone(),
        }
    }

    pub async fn get_by_seeker(&self, seeker_id: i64) -> Result<Profile> {
        self.profiles
            .find_by_seeker_id(seeker_id)
            .await?
            .ok_or_else(|| {
                Error::NotFound(format!("Profile not found for seeker: {}", seeker_id))
            })
    }

    pub async fn exists(&self, seeker_id: i64) -> Result<bool> {
        self.profiles.exists_by_seeker_id(seeker_id).await
    }

    pub async fn create(&self, seeker_id: i64, fields: ProfileFields) -> Result<Profile> {
        if self.seekers.find_by_id(seeker_id).await?.is_none() {
            return Err(seeker_not_found(seeker_id));
        }
        if self.profiles.exists_by_seeker_id(seeker_id).await? {
            return Err(Error::Conflict(PROFILE_EXISTS.to_string()));
        }

        match self.profiles.insert(seeker_id, fields).await {
            Ok(profile) => {
                tracing::info!(profile_id = profile.id, seeker_id, "profile created");
                Ok(profile)
            }
            Err(err) if err.is_conflict() => {
                let recheck = self.recheck(seeker_id).await;
                Err(resolve_rejected_insert(err, recheck, PROFILE_EXISTS))
            }
            Err(err) => Err(err),
        }
    }

    async fn recheck(&self, seeker_id: i64) -> Result<Recheck> {
        if self.profiles.exists_by_seeker_id(seeker_id).await? {
            return Ok(Recheck::Duplicate);
        }
        if self.seekers.find_by_id(seeker_id).await?.is_none() {
            return Ok(Recheck::Missing(seeker_not_found(seeker_id)));
        }
        Ok(Recheck::Unexplained)
    }

    pub async fn update(&self, profile_id: i64, fields: ProfileFields) -> Result<Profile> {
        let profile = self
            .profiles
            .update(profile_id, fields)
            .await?
            .ok_or_else(|| {
                Error::NotFound(format!("Profile not found with id: {}", profile_id))
            })?;
        tracing::info!(profile_id, "profile updated");
        Ok(profile)
    }

    pub async fn update_by_seeker(&self, seeker_id: i64, fields: ProfileFields) -> Result<Profile> {
        let profile = self.get_by_seeker(seeker_id).await?;
        self.update(profile.id, fields).await
    }

    pub async fn list(&self) -> Result<Vec<Profile>> {
        self.profiles.find_all().await
    }

    pub async fn delete(&self, profile_id: i64) -> Result<()> {
        if self.profiles.delete_by_id(profile_id).await? == 0 {
            return Err(Error::NotFound(format!(
                "Profile not found with id: {}",
                profile_id
            )));
        }
        tracing::info!(profile_id, "profile deleted");
        Ok(())
    }
}

fn seeker_not_found(seeker_id: i64) -> Error {
    Error::NotFound(format!("Seeker not found with id: {}", seeker_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seeker::NewSeeker;

    async fn setup() -> (ProfileService, i64) {
        let repos = Repositories::in_memory();
        let seeker = repos
            .seekers
            .insert(NewSeeker {
                name: "Sam".into(),
                email: "sam@example.com".into(),
                password_hash: "x".into(),
            })
            .await
            .unwrap();
        (ProfileService::new(&repos), seeker.id)
    }

    fn fields(headline: &str) -> ProfileFields {
        ProfileFields {
            profile_headline: Some(headline.into()),
            skills: Some("rust, sql".into()),
            ..ProfileFields::default()
        }
    }

    #[tokio::test]
    async fn one_profile_per_seeker() {
        let (svc, seeker_id) = setup().await;
        svc.create(seeker_id, fields("Engineer")).await.unwrap();
        assert!(svc.exists(seeker_id).await.unwrap());
        assert!(svc
            .create(seeker_id, fields("Again"))
            .await
            .unwrap_err()
            .is_conflict());
        assert!(svc
            .create(999, fields("Ghost"))
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn update_by_seeker_overwrites_fields() {
        let (svc, seeker_id) = setup().await;
        let created = svc.create(seeker_id, fields("Engineer")).await.unwrap();

        let updated = svc
            .update_by_seeker(
                seeker_id,
                ProfileFields {
                    location: Some("Porto".into()),
                    ..ProfileFields::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.location.as_deref(), Some("Porto"));
        assert!(updated.profile_headline.is_none());
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn missing_profile_is_not_found() {
        let (svc, seeker_id) = setup().await;
        assert!(svc.get_by_seeker(seeker_id).await.unwrap_err().is_not_found());
        assert!(svc
            .update(42, ProfileFields::default())
            .await
            .unwrap_err()
            .is_not_found());
        assert!(svc.delete(42).await.unwrap_err().is_not_found());
    }
}
