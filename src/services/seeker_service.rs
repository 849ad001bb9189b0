use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::seeker::{NewSeeker, Seeker};
use crate::repository::{Repositories, SeekerRepository, UnitOfWork};
use crate::utils::crypto::CredentialVerifier;
use crate::utils::validation::{normalize_email, require_non_empty};

const EMAIL_TAKEN: &str = "Email already registered";

#[derive(Debug, Clone, Default)]
pub struct SeekerUpdate {
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone)]
pub struct SeekerService {
    seekers: Arc<dyn SeekerRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
    credentials: Arc<dyn CredentialVerifier>,
}

fn not_found(id: i64) -> Error {
    Error::NotFound(format!("Seeker not found with id: {}", id))
}

impl SeekerService {
    pub fn new(repos: &Repositories, credentials: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            seekers: repos.seekers.clone(),
            unit_of_work: repos.unit_of_work.clone(),
            credentials,
        }
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<Seeker> {
        let name = require_non_empty("Name", name)?;
        let email = normalize_email(email)?;
        let password = require_non_empty("Password", password)?;

        if self.seekers.find_by_email(&email).await?.is_some() {
            return Err(Error::Conflict(EMAIL_TAKEN.to_string()));
        }

        let password_hash = self.credentials.hash_password(&password)?;
        let seeker = self
            .seekers
            .insert(NewSeeker {
                name,
                email,
                password_hash,
            })
            .await
            .map_err(|err| match err {
                Error::Conflict(_) => Error::Conflict(EMAIL_TAKEN.to_string()),
                other => other,
            })?;

        tracing::info!(seeker_id = seeker.id, "seeker signed up");
        Ok(seeker)
    }

    pub async fn signin(&self, email: &str, password: &str) -> Result<Seeker> {
        let invalid = || Error::Unauthorized("Invalid email or password".into());
        let email = normalize_email(email).map_err(|_| invalid())?;

        let seeker = self
            .seekers
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid)?;
        if !self
            .credentials
            .verify_password(password, &seeker.password_hash)?
        {
            tracing::warn!(seeker_id = seeker.id, "seeker signin rejected");
            return Err(invalid());
        }
        Ok(seeker)
    }

    pub async fn get(&self, id: i64) -> Result<Seeker> {
        self.seekers.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn list(&self) -> Result<Vec<Seeker>> {
        self.seekers.find_all().await
    }

    /// Changes the display name and, when a non-empty one is given, the password.
    pub async fn update(&self, id: i64, update: SeekerUpdate) -> Result<Seeker> {
        let mut seeker = self.get(id).await?;

        if let Some(name) = update.name {
            seeker.name = require_non_empty("Name", &name)?;
        }
        if let Some(password) = update.password.filter(|p| !p.trim().is_empty()) {
            seeker.password_hash = self.credentials.hash_password(&password)?;
        }

        let seeker = self.seekers.update(&seeker).await?;
        tracing::info!(seeker_id = id, "seeker updated");
        Ok(seeker)
    }

    /// Deletes the seeker with their bookmarks, applications and profile
    /// in one transaction.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.get(id).await?;

        let mut tx = self.unit_of_work.begin().await?;
        let saved_jobs_removed = tx.delete_saved_jobs_by_seeker(id).await?;
        let applications_removed = tx.delete_applications_by_seeker(id).await?;
        tx.delete_profile_by_seeker(id).await?;
        if tx.delete_seeker(id).await? == 0 {
            return Err(not_found(id));
        }
        tx.commit().await?;

        tracing::info!(
            seeker_id = id,
            saved_jobs_removed,
            applications_removed,
            "seeker deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::NewJob;
    use crate::models::profile::ProfileFields;
    use crate::models::recruiter::NewRecruiter;
    use crate::utils::crypto::Argon2Credentials;
    use crate::utils::time;

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let repos = Repositories::in_memory();
        let svc = SeekerService::new(&repos, Arc::new(Argon2Credentials));
        svc.signup("Sam", "sam@example.com", "pw").await.unwrap();
        assert!(svc
            .signup("Sam Again", "SAM@example.com", "pw")
            .await
            .unwrap_err()
            .is_conflict());
    }

    #[tokio::test]
    async fn blank_password_keeps_old_one() {
        let repos = Repositories::in_memory();
        let svc = SeekerService::new(&repos, Arc::new(Argon2Credentials));
        let sam = svc.signup("Sam", "sam@example.com", "pw").await.unwrap();

        let updated = svc
            .update(
                sam.id,
                SeekerUpdate {
                    name: Some("Samuel".into()),
                    password: Some("  ".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Samuel");
        assert!(svc.signin("sam@example.com", "pw").await.is_ok());
    }

    #[tokio::test]
    async fn delete_cascades_to_owned_rows() {
        let repos = Repositories::in_memory();
        let svc = SeekerService::new(&repos, Arc::new(Argon2Credentials));
        let sam = svc.signup("Sam", "sam@example.com", "pw").await.unwrap();
        let rita = repos
            .recruiters
            .insert(NewRecruiter {
                name: "Rita".into(),
                email: "rita@example.com".into(),
                password_hash: "x".into(),
            })
            .await
            .unwrap();
        let job = repos
            .jobs
            .insert(NewJob {
                recruiter_id: rita.id,
                title: "Ops".into(),
                company: "Acme".into(),
                location: "Remote".into(),
                description: None,
                salary_range: None,
                job_type: None,
                experience_level: None,
                posted_date: time::today(),
            })
            .await
            .unwrap();
        repos
            .saved_jobs
            .insert(job.id, sam.id, time::now())
            .await
            .unwrap();
        repos
            .profiles
            .insert(sam.id, ProfileFields::default())
            .await
            .unwrap();

        svc.delete(sam.id).await.unwrap();
        assert_eq!(repos.saved_jobs.count_by_seeker_id(sam.id).await.unwrap(), 0);
        assert!(!repos.profiles.exists_by_seeker_id(sam.id).await.unwrap());
        assert!(svc.get(sam.id).await.unwrap_err().is_not_found());
    }
}
