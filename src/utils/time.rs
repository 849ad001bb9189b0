use chrono::{DateTime, NaiveDate, SubsecRound, Utc};

/// Current time at the microsecond precision Postgres keeps, so values read
/// back from the store compare equal to the ones written.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
