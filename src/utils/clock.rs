use chrono::{DateTime, Local, NaiveDate, Utc};

/// Represents an entity responsible for providing dates across application. This allows stores
/// and aggregations to be tested against a fixed moment.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn time(&self) -> DateTime<Utc>;

    /// Calendar date in the user's local timezone. Used for "today", "this month" and similar
    /// comparisons against record dates.
    fn today(&self) -> NaiveDate;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
