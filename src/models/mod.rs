pub mod application;
pub mod job;
pub mod profile;
pub mod recruiter;
pub mod saved_job;
pub mod seeker;
