use chrono::{DateTime, Duration, NaiveDate, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn minutes_before(instant: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    instant - Duration::minutes(minutes)
}

pub fn days_before(instant: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    instant - Duration::days(days)
}

/// UTC calendar day of an instant.
pub fn day_of(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}
