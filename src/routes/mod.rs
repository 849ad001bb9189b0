pub mod application;
pub mod health;
pub mod job;
pub mod profile;
pub mod recruiter;
pub mod recruiter_profile;
pub mod saved_job;
pub mod seeker;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::AppState;

/// Every API route, bound to `state`. Transport layers (CORS, tracing, body
/// limit, static uploads) are added by the binary.
pub fn router(state: AppState) -> Router {
    let accounts = Router::new()
        .route("/api/recruiters", get(recruiter::list_recruiters))
        .route("/api/recruiters/signup", post(recruiter::signup))
        .route("/api/recruiters/signin", post(recruiter::signin))
        .route(
            "/api/recruiters/:id",
            get(recruiter::get_recruiter)
                .put(recruiter::update_recruiter)
                .delete(recruiter::delete_recruiter),
        )
        .route(
            "/api/recruiters/:id/profile",
            get(recruiter_profile::get_profile)
                .post(recruiter_profile::create_profile)
                .put(recruiter_profile::upsert_profile)
                .delete(recruiter_profile::delete_profile),
        )
        .route(
            "/api/recruiters/:id/profile/exists",
            get(recruiter_profile::profile_exists),
        )
        .route("/api/seekers", get(seeker::list_seekers))
        .route("/api/seekers/signup", post(seeker::signup))
        .route("/api/seekers/signin", post(seeker::signin))
        .route(
            "/api/seekers/:id",
            get(seeker::get_seeker)
                .put(seeker::update_seeker)
                .delete(seeker::delete_seeker),
        );

    let jobs = Router::new()
        .route("/api/jobs", get(job::search_jobs).post(job::create_job))
        .route("/api/jobs/all", get(job::list_jobs))
        .route(
            "/api/jobs/:id",
            get(job::get_job).put(job::update_job).delete(job::delete_job),
        )
        .route("/api/jobs/:id/force", delete(job::force_delete_job))
        .route(
            "/api/jobs/recruiter/:recruiter_id",
            get(job::jobs_by_recruiter),
        );

    let applications = Router::new()
        .route("/api/applications", post(application::create_application))
        .route(
            "/api/applications/upload",
            post(application::submit_with_resume),
        )
        .route(
            "/api/applications/upload-resume",
            post(application::upload_resume),
        )
        .route(
            "/api/applications/:id",
            get(application::get_application).delete(application::delete_application),
        )
        .route(
            "/api/applications/:id/status",
            put(application::update_status),
        )
        .route(
            "/api/applications/recruiter/:recruiter_id",
            get(application::by_recruiter),
        )
        .route(
            "/api/applications/recruiter/:recruiter_id/details",
            get(application::by_recruiter_with_details),
        )
        .route(
            "/api/applications/recruiter/:recruiter_id/count",
            get(application::count_by_recruiter),
        )
        .route("/api/applications/job/:job_id", get(application::by_job))
        .route(
            "/api/applications/job/:job_id/count",
            get(application::count_by_job),
        )
        .route(
            "/api/applications/seeker/:seeker_id",
            get(application::by_seeker),
        )
        .route(
            "/api/applications/status/:status",
            get(application::by_status),
        )
        .route(
            "/api/applications/check/:job_id/:seeker_id",
            get(application::has_applied),
        );

    let saved_jobs = Router::new()
        .route("/api/saved-jobs", post(saved_job::save_job))
        .route(
            "/api/saved-jobs/seeker/:seeker_id",
            get(saved_job::list_for_seeker).delete(saved_job::unsave_many),
        )
        .route(
            "/api/saved-jobs/seeker/:seeker_id/count",
            get(saved_job::count_for_seeker),
        )
        .route(
            "/api/saved-jobs/job/:job_id",
            delete(saved_job::delete_all_for_job),
        )
        .route(
            "/api/saved-jobs/job/:job_id/seekers",
            get(saved_job::list_for_job),
        )
        .route(
            "/api/saved-jobs/job/:job_id/seeker/:seeker_id",
            get(saved_job::is_saved).delete(saved_job::unsave_job),
        );

    let profiles = Router::new()
        .route(
            "/api/profiles",
            get(profile::list_profiles).post(profile::create_profile),
        )
        .route(
            "/api/profiles/seeker/:seeker_id",
            get(profile::get_by_seeker).put(profile::update_by_seeker),
        )
        .route(
            "/api/profiles/check/:seeker_id",
            get(profile::profile_exists),
        )
        .route(
            "/api/profiles/:profile_id",
            put(profile::update_profile).delete(profile::delete_profile),
        );

    Router::new()
        .route("/health", get(health::health))
        .merge(accounts)
        .merge(jobs)
        .merge(applications)
        .merge(saved_jobs)
        .merge(profiles)
        .with_state(state)
}
