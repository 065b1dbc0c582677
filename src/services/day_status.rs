//! Day-status classification.
//!
//! Assigns exactly one status per requested calendar date with strict
//! precedence: present (any session) > leave (approved/scheduled span
//! covering the date) > day-off (weekly rest day) > absent.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};

use crate::models::day_report::{DayReport, DayStatus};
use crate::models::employee::Employee;
use crate::models::leave::LeaveRecord;
use crate::models::session::Session;

/// English and Thai weekday names, indexed by the UTC weekday (0 = Sunday).
pub const WEEKDAY_NAMES: [(&str, &str); 7] = [
    ("sunday", "อาทิตย์"),
    ("monday", "จันทร์"),
    ("tuesday", "อังคาร"),
    ("wednesday", "พุธ"),
    ("thursday", "พฤหัสบดี"),
    ("friday", "ศุกร์"),
    ("saturday", "เสาร์"),
];

/// UTC weekday index of a calendar date, 0 = Sunday. Deliberately independent
/// of the business timezone: dates are UTC calendar keys.
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

/// Thai weekday name for a date.
pub fn thai_day_name(date: NaiveDate) -> &'static str {
    WEEKDAY_NAMES[weekday_index(date)].1
}

/// Whether the date falls on the employee's configured weekly rest day.
/// The configured name is matched case-insensitively in English or Thai.
pub fn matches_day_off(date: NaiveDate, day_off: &str) -> bool {
    let (english, thai) = WEEKDAY_NAMES[weekday_index(date)];
    let day_off = day_off.trim();
    day_off.eq_ignore_ascii_case(english) || day_off == thai
}

/// Builds the date to leave-type map by expanding each approved/scheduled
/// record's inclusive span. Later records overwrite earlier ones for the same
/// date (last wins, no conflict error).
pub fn build_leave_map(leaves: &[LeaveRecord]) -> HashMap<NaiveDate, String> {
    let mut map = HashMap::new();
    for leave in leaves.iter().filter(|l| l.counts_for_report()) {
        let mut cursor = leave.start_date;
        while cursor <= leave.end_date {
            map.insert(cursor, leave.leave_type.clone());
            let Some(next) = cursor.succ_opt() else { break };
            cursor = next;
        }
    }
    map
}

/// Formats total working minutes as `"H ชม."` for whole hours, otherwise
/// `"H:MM ชม."`.
pub fn format_working_hours(total_minutes: i64) -> String {
    let total_minutes = total_minutes.max(0);
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if minutes == 0 {
        format!("{} ชม.", hours)
    } else {
        format!("{}:{:02} ชม.", hours, minutes)
    }
}

/// Classifies every requested date and computes its per-day rollups.
pub fn classify_days(
    dates: &[NaiveDate],
    sessions_by_day: &BTreeMap<NaiveDate, Vec<Session>>,
    leave_map: &HashMap<NaiveDate, String>,
    employee: &Employee,
) -> Vec<DayReport> {
    dates
        .iter()
        .map(|&date| classify_day(date, sessions_by_day.get(&date), leave_map, employee))
        .collect()
}

fn classify_day(
    date: NaiveDate,
    sessions: Option<&Vec<Session>>,
    leave_map: &HashMap<NaiveDate, String>,
    employee: &Employee,
) -> DayReport {
    let sessions = sessions.cloned().unwrap_or_default();
    let leave_type = leave_map.get(&date).cloned();

    let status = if !sessions.is_empty() {
        DayStatus::Present
    } else if leave_type.is_some() {
        DayStatus::Leave
    } else if employee
        .regular_day_off
        .as_deref()
        .is_some_and(|day_off| matches_day_off(date, day_off))
    {
        DayStatus::DayOff
    } else {
        DayStatus::Absent
    };

    let rollup = DayRollup::from_sessions(&sessions);

    DayReport {
        date_iso: date.format("%Y-%m-%d").to_string(),
        day_of_week: thai_day_name(date).to_string(),
        // A leave that was checked in over still reports as present, but the
        // leave type is kept for display.
        status,
        leave_type,
        sessions,
        store_count: rollup.store_count,
        first_check_in_time: rollup.first_check_in_time,
        last_check_out_time: rollup.last_check_out_time,
        total_working_hours: format_working_hours(rollup.total_minutes),
    }
}

struct DayRollup {
    store_count: usize,
    first_check_in_time: String,
    last_check_out_time: String,
    total_minutes: i64,
}

impl DayRollup {
    fn from_sessions(sessions: &[Session]) -> Self {
        // Sessions arrive in chronological check-in order.
        let first_check_in_time = sessions
            .first()
            .map(|s| s.check_in_time.clone())
            .unwrap_or_default();

        let last_check_out_time = sessions
            .iter()
            .filter(|s| s.is_closed())
            .max_by_key(|s| s.check_out_timestamp)
            .map(|s| s.check_out_time.clone())
            .unwrap_or_default();

        // Out-of-order checkouts contribute zero minutes but the session
        // still counts toward the store tally.
        let total_minutes: i64 = sessions
            .iter()
            .filter_map(Session::duration_millis)
            .map(|millis| millis / 60_000)
            .sum();

        let mut stores: Vec<&str> = sessions.iter().map(|s| s.store_name.as_str()).collect();
        stores.sort_unstable();
        stores.dedup();

        Self {
            store_count: stores.len(),
            first_check_in_time,
            last_check_out_time,
            total_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::leave::LeaveStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee(day_off: Option<&str>) -> Employee {
        Employee {
            id: "emp-1".into(),
            name: "Somchai".into(),
            regular_day_off: day_off.map(str::to_string),
        }
    }

    fn session(check_in: &str, check_in_ts: i64, check_out: &str, check_out_ts: i64) -> Session {
        Session {
            store_name: "Store A".into(),
            store_province: None,
            check_in_time: check_in.into(),
            check_out_time: check_out.into(),
            check_in_timestamp: check_in_ts,
            check_out_timestamp: check_out_ts,
        }
    }

    fn leave(start: NaiveDate, end: NaiveDate, status: LeaveStatus, kind: &str) -> LeaveRecord {
        LeaveRecord {
            employee_id: "emp-1".into(),
            start_date: start,
            end_date: end,
            status,
            leave_type: kind.into(),
        }
    }

    #[test]
    fn presence_overrides_leave() {
        let day = date(2024, 1, 10);
        let mut sessions_by_day = BTreeMap::new();
        sessions_by_day.insert(day, vec![session("08:00", 1_000, "17:00", 2_000)]);
        let leave_map = build_leave_map(&[leave(day, day, LeaveStatus::Approved, "sick")]);

        let reports = classify_days(&[day], &sessions_by_day, &leave_map, &employee(None));
        assert_eq!(reports[0].status, DayStatus::Present);
        // The leave type stays visible even though presence wins.
        assert_eq!(reports[0].leave_type.as_deref(), Some("sick"));
    }

    #[test]
    fn leave_overrides_day_off() {
        // 2024-01-07 is a Sunday.
        let day = date(2024, 1, 7);
        let leave_map = build_leave_map(&[leave(day, day, LeaveStatus::Scheduled, "annual")]);
        let reports = classify_days(
            &[day],
            &BTreeMap::new(),
            &leave_map,
            &employee(Some("Sunday")),
        );
        assert_eq!(reports[0].status, DayStatus::Leave);
    }

    #[test]
    fn monday_without_attendance_is_absent_sunday_is_day_off() {
        // 2024-01-01 is a Monday.
        let monday = date(2024, 1, 1);
        let reports = classify_days(
            &[monday],
            &BTreeMap::new(),
            &HashMap::new(),
            &employee(Some("Sunday")),
        );
        assert_eq!(reports[0].status, DayStatus::Absent);

        let sunday = date(2024, 1, 7);
        let reports = classify_days(
            &[sunday],
            &BTreeMap::new(),
            &HashMap::new(),
            &employee(Some("Sunday")),
        );
        assert_eq!(reports[0].status, DayStatus::DayOff);
    }

    #[test]
    fn day_off_matches_thai_name_and_any_case() {
        let sunday = date(2024, 1, 7);
        assert!(matches_day_off(sunday, "อาทิตย์"));
        assert!(matches_day_off(sunday, "SUNDAY"));
        assert!(matches_day_off(sunday, " sunday "));
        assert!(!matches_day_off(sunday, "จันทร์"));
    }

    #[test]
    fn pending_leave_does_not_classify() {
        let day = date(2024, 1, 10);
        let leave_map = build_leave_map(&[leave(day, day, LeaveStatus::Other, "annual")]);
        assert!(leave_map.is_empty());
    }

    #[test]
    fn later_leave_record_wins_per_date() {
        let start = date(2024, 1, 1);
        let end = date(2024, 1, 3);
        let leaves = vec![
            leave(start, end, LeaveStatus::Approved, "annual"),
            leave(date(2024, 1, 2), date(2024, 1, 2), LeaveStatus::Scheduled, "sick"),
        ];
        let map = build_leave_map(&leaves);
        assert_eq!(map[&date(2024, 1, 1)], "annual");
        assert_eq!(map[&date(2024, 1, 2)], "sick");
        assert_eq!(map[&date(2024, 1, 3)], "annual");
    }

    #[test]
    fn rollups_for_multi_session_day() {
        let day = date(2024, 1, 10);
        let mut sessions_by_day = BTreeMap::new();
        sessions_by_day.insert(
            day,
            vec![
                session("08:00", 1_000, "12:00", 1_000 + 4 * 3_600_000),
                session("13:00", 10_000_000, "17:30", 10_000_000 + 16_200_000),
            ],
        );
        let reports = classify_days(&[day], &sessions_by_day, &HashMap::new(), &employee(None));
        let report = &reports[0];
        assert_eq!(report.first_check_in_time, "08:00");
        assert_eq!(report.last_check_out_time, "17:30");
        assert_eq!(report.store_count, 1);
        // 4h + 4.5h
        assert_eq!(report.total_working_hours, "8:30 ชม.");
    }

    #[test]
    fn unclosed_sessions_contribute_zero_minutes() {
        // Two dangling check-ins on one day.
        let day = date(2024, 1, 10);
        let mut sessions_by_day = BTreeMap::new();
        sessions_by_day.insert(
            day,
            vec![
                session("08:00", 1_000, "", 0),
                Session {
                    store_name: "Store B".into(),
                    ..session("09:00", 2_000, "", 0)
                },
            ],
        );
        let reports = classify_days(&[day], &sessions_by_day, &HashMap::new(), &employee(None));
        let report = &reports[0];
        assert_eq!(report.status, DayStatus::Present);
        assert_eq!(report.sessions.len(), 2);
        assert_eq!(report.total_working_hours, "0 ชม.");
        assert_eq!(report.last_check_out_time, "");
        assert_eq!(report.store_count, 2);
    }

    #[test]
    fn negative_duration_session_counts_for_stores_not_hours() {
        let day = date(2024, 1, 10);
        let mut sessions_by_day = BTreeMap::new();
        sessions_by_day.insert(day, vec![session("17:00", 5_000_000, "08:00", 1_000)]);
        let reports = classify_days(&[day], &sessions_by_day, &HashMap::new(), &employee(None));
        let report = &reports[0];
        assert_eq!(report.total_working_hours, "0 ชม.");
        assert_eq!(report.store_count, 1);
        assert_eq!(report.status, DayStatus::Present);
    }

    #[test]
    fn format_working_hours_variants() {
        assert_eq!(format_working_hours(0), "0 ชม.");
        assert_eq!(format_working_hours(60), "1 ชม.");
        assert_eq!(format_working_hours(90), "1:30 ชม.");
        assert_eq!(format_working_hours(510), "8:30 ชม.");
        assert_eq!(format_working_hours(-30), "0 ชม.");
    }

    #[test]
    fn thai_day_names_follow_utc_weekday() {
        assert_eq!(thai_day_name(date(2024, 1, 7)), "อาทิตย์");
        assert_eq!(thai_day_name(date(2024, 1, 8)), "จันทร์");
        assert_eq!(thai_day_name(date(2024, 1, 13)), "เสาร์");
    }
}
