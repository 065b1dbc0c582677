use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    Approved,
    Scheduled,
    #[serde(other)]
    Other,
}

impl LeaveStatus {
    /// Parses the external status string; anything unrecognized maps to Other.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "approved" => LeaveStatus::Approved,
            "scheduled" => LeaveStatus::Scheduled,
            _ => LeaveStatus::Other,
        }
    }
}

/// An employee leave span as recorded externally. Every calendar date in
/// `[start_date, end_date]` inclusive maps to `leave_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRecord {
    pub employee_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: LeaveStatus,
    pub leave_type: String,
}

impl LeaveRecord {
    /// Only approved and scheduled leaves contribute to day classification.
    pub fn counts_for_report(&self) -> bool {
        matches!(self.status, LeaveStatus::Approved | LeaveStatus::Scheduled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leave_status_parse_maps_unknown_to_other() {
        assert_eq!(LeaveStatus::parse("approved"), LeaveStatus::Approved);
        assert_eq!(LeaveStatus::parse("Scheduled"), LeaveStatus::Scheduled);
        assert_eq!(LeaveStatus::parse("rejected"), LeaveStatus::Other);
        assert_eq!(LeaveStatus::parse(""), LeaveStatus::Other);
    }

    #[test]
    fn only_approved_and_scheduled_count() {
        let mut record = LeaveRecord {
            employee_id: "emp-1".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            status: LeaveStatus::Approved,
            leave_type: "sick".into(),
        };
        assert!(record.counts_for_report());
        record.status = LeaveStatus::Scheduled;
        assert!(record.counts_for_report());
        record.status = LeaveStatus::Other;
        assert!(!record.counts_for_report());
    }
}
