pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod projection;
pub mod repository;
pub mod routes;
pub mod services;
pub mod storage;
pub mod utils;

use std::sync::Arc;

use crate::config::RecruiterDeletePolicy;
use crate::repository::Repositories;
use crate::services::{
    application_service::ApplicationService, job_service::JobService,
    profile_service::ProfileService, recruiter_profile_service::RecruiterProfileService,
    recruiter_service::RecruiterService, saved_job_service::SavedJobService,
    seeker_service::SeekerService,
};
use crate::storage::FileStorage;
use crate::utils::crypto::CredentialVerifier;

#[derive(Clone)]
pub struct AppState {
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub saved_job_service: SavedJobService,
    pub recruiter_service: RecruiterService,
    pub seeker_service: SeekerService,
    pub profile_service: ProfileService,
    pub recruiter_profile_service: RecruiterProfileService,
}

impl AppState {
    pub fn new(
        repos: Repositories,
        files: Arc<dyn FileStorage>,
        credentials: Arc<dyn CredentialVerifier>,
        delete_policy: RecruiterDeletePolicy,
    ) -> Self {
        let job_service = JobService::new(&repos);
        let application_service = ApplicationService::new(&repos, files);
        let saved_job_service = SavedJobService::new(&repos);
        let recruiter_service = RecruiterService::new(&repos, credentials.clone(), delete_policy);
        let seeker_service = SeekerService::new(&repos, credentials);
        let profile_service = ProfileService::new(&repos);
        let recruiter_profile_service = RecruiterProfileService::new(&repos);

        Self {
            job_service,
            application_service,
            saved_job_service,
            recruiter_service,
            seeker_service,
            profile_service,
            recruiter_profile_service,
        }
    }
}
