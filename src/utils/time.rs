use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};

const RECORD_DATE_FORMAT: &str = "%Y-%m-%d";

/// This is the standard way of converting a record date to a string in lifeledger.
pub fn format_record_date(date: NaiveDate) -> String {
    date.format(RECORD_DATE_FORMAT).to_string()
}

/// Parses a stored record date. Besides plain `YYYY-MM-DD`, timestamps such as
/// `2024-03-01T07:30` or RFC 3339 values are accepted and truncated to their date.
pub fn parse_record_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, RECORD_DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Some(date_time.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|v| v.date())
}

/// Weeks start on Saturday.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    // Monday is 0, so Saturday is 5.
    let offset = (date.weekday().num_days_from_monday() + 2) % 7;
    date - Duration::days(offset as i64)
}

pub fn same_week(date: NaiveDate, reference: NaiveDate) -> bool {
    let start = week_start(reference);
    date >= start && date < start + Duration::days(7)
}

/// Calendar month/year equality, not a rolling 30 day window.
pub fn same_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}
