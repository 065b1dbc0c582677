use serde::{Deserialize, Serialize};

use crate::models::session::Session;

/// Day classification with strict precedence: presence overrides leave, which
/// overrides the weekly day off, which overrides absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Present,
    Leave,
    #[serde(rename = "day-off")]
    DayOff,
    Absent,
}

/// The classifier's output for one calendar date in the requested range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayReport {
    pub date_iso: String,
    pub day_of_week: String,
    pub status: DayStatus,
    pub leave_type: Option<String>,
    pub sessions: Vec<Session>,
    pub store_count: usize,
    pub first_check_in_time: String,
    pub last_check_out_time: String,
    pub total_working_hours: String,
}

/// Day reports bucketed by `YYYY-MM`; one report page is one month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthGroup {
    pub month: String,
    pub days: Vec<DayReport>,
}
