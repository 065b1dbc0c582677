use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Returns the current time in the configured business timezone.
pub fn now_in_timezone(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}

/// Returns today's date in the configured business timezone.
pub fn today_local(tz: &Tz) -> NaiveDate {
    now_in_timezone(tz).date_naive()
}

/// Parses a time-of-day string in `HH:mm` or `HH:mm:ss` format.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

/// Parses an ISO `YYYY-MM-DD` calendar date.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Anchors a local time-of-day to a calendar day in the business timezone and
/// returns the epoch timestamp in milliseconds. Returns None when the local
/// datetime does not exist in that timezone (DST gap).
pub fn local_timestamp_millis(date: NaiveDate, time: NaiveTime, tz: &Tz) -> Option<i64> {
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.timestamp_millis())
}
