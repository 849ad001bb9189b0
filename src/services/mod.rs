pub mod application_service;
pub mod job_service;
pub mod profile_service;
pub mod recruiter_profile_service;
pub mod recruiter_service;
pub mod saved_job_service;
pub mod seeker_service;

use crate::error::{Error, Result};

/// What a single re-read of the store found after it rejected an insert
/// with a constraint violation.
pub(crate) enum Recheck {
    /// The row we tried to create already exists.
    Duplicate,
    /// A referenced row disappeared; carries the error to report.
    Missing(Error),
    Unexplained,
}

/// Turns a store-level constraint violation into the error the caller would
/// have seen had the pre-check run after the competing write. No retry.
pub(crate) fn resolve_rejected_insert(
    err: Error,
    recheck: Result<Recheck>,
    duplicate_message: &str,
) -> Error {
    match recheck {
        Ok(Recheck::Duplicate) => {
            tracing::warn!(error = %err, "insert lost a race to a concurrent duplicate");
            Error::Conflict(duplicate_message.to_string())
        }
        Ok(Recheck::Missing(missing)) => {
            tracing::warn!(error = %err, "insert referenced a row deleted concurrently");
            missing
        }
        Ok(Recheck::Unexplained) => {
            tracing::error!(error = %err, "store rejected insert for an unknown reason");
            Error::Storage(err.to_string())
        }
        Err(recheck_err) => recheck_err,
    }
}

/// Page arithmetic shared by paginated listings.
pub(crate) fn page_window(page: Option<i64>, per_page: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(20).clamp(1, 100);
    // Far-out pages saturate to an offset past any table instead of overflowing.
    let offset = (page - 1).saturating_mul(per_page);
    (page, per_page, offset)
}
