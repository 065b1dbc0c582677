use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::utils::time;

/// One punch record as stored externally. Every field may be missing or
/// malformed; rows are validated at the ingestion boundary and never cross
/// into the reconstruction engine unparsed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEvent {
    pub date: String,
    pub time: String,
    pub status: String,
    pub employee_name: String,
    pub store_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    CheckIn,
    CheckOut,
}

impl EventKind {
    /// Parses the external status string, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "check-in" => Some(EventKind::CheckIn),
            "check-out" => Some(EventKind::CheckOut),
            _ => None,
        }
    }
}

/// A validated punch event with its local time-of-day resolved to an epoch
/// timestamp within the business timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    pub timestamp_millis: i64,
    pub kind: EventKind,
    pub time: String,
    pub store_name: String,
}

impl RawEvent {
    /// Parse-and-validate boundary for punch rows. Returns the calendar day
    /// key plus the typed event, or None on any structural mismatch (missing
    /// date, unrecognized status, unparsable time).
    pub fn parse(&self, tz: &Tz) -> Option<(NaiveDate, AttendanceEvent)> {
        let date = time::parse_iso_date(&self.date)?;
        let kind = EventKind::parse(&self.status)?;
        let time_of_day = time::parse_time_of_day(&self.time)?;
        let timestamp_millis = time::local_timestamp_millis(date, time_of_day, tz)?;

        Some((
            date,
            AttendanceEvent {
                timestamp_millis,
                kind,
                time: self.time.trim().to_string(),
                store_name: self.store_name.trim().to_string(),
            },
        ))
    }
}
