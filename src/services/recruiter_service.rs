use std::sync::Arc;

use crate::config::RecruiterDeletePolicy;
use crate::error::{Error, Result};
use crate::models::recruiter::{NewRecruiter, Recruiter};
use crate::repository::{RecruiterRepository, Repositories, UnitOfWork};
use crate::services::job_service::purge_job;
use crate::utils::crypto::CredentialVerifier;
use crate::utils::validation::{normalize_email, require_non_empty};

const EMAIL_TAKEN: &str = "Email already registered";

#[derive(Debug, Clone, Default)]
pub struct RecruiterUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone)]
pub struct RecruiterService {
    recruiters: Arc<dyn RecruiterRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
    credentials: Arc<dyn CredentialVerifier>,
    delete_policy: RecruiterDeletePolicy,
}

fn not_found(id: i64) -> Error {
    Error::NotFound(format!("Recruiter not found with id: {}", id))
}

impl RecruiterService {
    pub fn new(
        repos: &Repositories,
        credentials: Arc<dyn CredentialVerifier>,
        delete_policy: RecruiterDeletePolicy,
    ) -> Self {
        Self {
            recruiters: repos.recruiters.clone(),
            unit_of_work: repos.unit_of_work.clone(),
            credentials,
            delete_policy,
        }
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<Recruiter> {
        let name = require_non_empty("Name", name)?;
        let email = normalize_email(email)?;
        let password = require_non_empty("Password", password)?;

        if self.recruiters.find_by_email(&email).await?.is_some() {
            return Err(Error::Conflict(EMAIL_TAKEN.to_string()));
        }

        let password_hash = self.credentials.hash_password(&password)?;
        let recruiter = self
            .recruiters
            .insert(NewRecruiter {
                name,
                email,
                password_hash,
            })
            .await
            .map_err(|err| match err {
                Error::Conflict(_) => Error::Conflict(EMAIL_TAKEN.to_string()),
                other => other,
            })?;

        tracing::info!(recruiter_id = recruiter.id, "recruiter signed up");
        Ok(recruiter)
    }

    pub async fn signin(&self, email: &str, password: &str) -> Result<Recruiter> {
        let invalid = || Error::Unauthorized("Invalid email or password".into());
        let email = normalize_email(email).map_err(|_| invalid())?;

        let recruiter = self
            .recruiters
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid)?;
        if !self
            .credentials
            .verify_password(password, &recruiter.password_hash)?
        {
            tracing::warn!(recruiter_id = recruiter.id, "recruiter signin rejected");
            return Err(invalid());
        }
        Ok(recruiter)
    }

    pub async fn get(&self, id: i64) -> Result<Recruiter> {
        self.recruiters
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn list(&self) -> Result<Vec<Recruiter>> {
        self.recruiters.find_all().await
    }

    pub async fn update(&self, id: i64, update: RecruiterUpdate) -> Result<Recruiter> {
        let mut recruiter = self.get(id).await?;

        if let Some(name) = update.name {
            recruiter.name = require_non_empty("Name", &name)?;
        }
        if let Some(email) = update.email {
            let email = normalize_email(&email)?;
            if email != recruiter.email {
                if let Some(other) = self.recruiters.find_by_email(&email).await? {
                    if other.id != id {
                        return Err(Error::Conflict(EMAIL_TAKEN.to_string()));
                    }
                }
                recruiter.email = email;
            }
        }
        if let Some(password) = update.password {
            let password = require_non_empty("Password", &password)?;
            recruiter.password_hash = self.credentials.hash_password(&password)?;
        }

        let recruiter = self
            .recruiters
            .update(&recruiter)
            .await
            .map_err(|err| match err {
                Error::Conflict(_) => Error::Conflict(EMAIL_TAKEN.to_string()),
                other => other,
            })?;
        tracing::info!(recruiter_id = id, "recruiter updated");
        Ok(recruiter)
    }

    /// Removes the recruiter and their company profile. Under
    /// [`RecruiterDeletePolicy::Cascade`] every owned job is force deleted in
    /// the same transaction; under `Restrict` owned jobs block the delete.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.get(id).await?;

        let mut tx = self.unit_of_work.begin().await?;
        let job_ids = tx.job_ids_by_recruiter(id).await?;

        if !job_ids.is_empty() && self.delete_policy == RecruiterDeletePolicy::Restrict {
            return Err(Error::Conflict(format!(
                "Recruiter {} still owns {} job(s); delete them first",
                id,
                job_ids.len()
            )));
        }

        let mut applications_removed = 0;
        for job_id in &job_ids {
            let summary = purge_job(tx.as_mut(), *job_id).await?;
            applications_removed += summary.applications_removed;
        }
        tx.delete_recruiter_profile(id).await?;
        if tx.delete_recruiter(id).await? == 0 {
            return Err(not_found(id));
        }
        tx.commit().await?;

        tracing::info!(
            recruiter_id = id,
            jobs_removed = job_ids.len(),
            applications_removed,
            "recruiter deleted"
        );
        Ok(())
    }
}
