//! Session reconstruction engine.
//!
//! Converts raw punch rows into ordered work sessions per calendar day.
//! The walk is a left-fold over the time-sorted events carrying an explicit
//! open/completed accumulator: a check-in closes any previously open session
//! unclosed before opening a new one (consecutive check-ins are a defined
//! edge case, not an error), a check-out closes the open session or is
//! dropped when none exists, and a dangling open session at end of day is
//! emitted with empty checkout fields. Every check-in therefore produces
//! exactly one session.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::models::event::{AttendanceEvent, EventKind, RawEvent};
use crate::models::session::Session;

/// Employee and optional store filter applied before parsing.
#[derive(Debug, Clone, Copy)]
pub struct SessionFilter<'a> {
    pub employee_name: &'a str,
    pub store_name: Option<&'a str>,
}

impl<'a> SessionFilter<'a> {
    fn matches(&self, row: &RawEvent) -> bool {
        if row.employee_name.trim() != self.employee_name.trim() {
            return false;
        }
        match self.store_name {
            Some(store) => row.store_name.trim() == store.trim(),
            None => true,
        }
    }
}

/// Filters and parses raw rows into per-day event lists. Rows failing the
/// filter or the parse boundary are discarded by policy, never reported as
/// errors.
pub fn group_events_by_day(
    rows: &[RawEvent],
    filter: &SessionFilter<'_>,
    tz: &Tz,
) -> BTreeMap<NaiveDate, Vec<AttendanceEvent>> {
    let mut by_day: BTreeMap<NaiveDate, Vec<AttendanceEvent>> = BTreeMap::new();
    for row in rows {
        if !filter.matches(row) {
            continue;
        }
        if let Some((date, event)) = row.parse(tz) {
            by_day.entry(date).or_default().push(event);
        }
    }
    by_day
}

#[derive(Default)]
struct SessionAccumulator {
    open: Option<Session>,
    completed: Vec<Session>,
}

impl SessionAccumulator {
    fn apply(mut self, event: &AttendanceEvent, provinces: &HashMap<String, String>) -> Self {
        match event.kind {
            EventKind::CheckIn => {
                // Consecutive check-in without an intervening check-out:
                // close the previous session with an empty checkout.
                if let Some(open) = self.open.take() {
                    self.completed.push(open);
                }
                self.open = Some(Session::open(
                    event.store_name.clone(),
                    provinces.get(&event.store_name).cloned(),
                    event.time.clone(),
                    event.timestamp_millis,
                ));
            }
            EventKind::CheckOut => match self.open.take() {
                Some(mut open) => {
                    open.check_out_time = event.time.clone();
                    open.check_out_timestamp = event.timestamp_millis;
                    self.completed.push(open);
                }
                // Checkout with no prior check-in has no session to attach to.
                None => {}
            },
        }
        self
    }

    fn finish(mut self) -> Vec<Session> {
        if let Some(open) = self.open.take() {
            self.completed.push(open);
        }
        self.completed
    }
}

/// Reconstructs the ordered session list for one calendar day. The input
/// order is irrelevant: events are sorted by timestamp before the walk.
pub fn reconstruct_sessions(
    events: &[AttendanceEvent],
    provinces: &HashMap<String, String>,
) -> Vec<Session> {
    let mut sorted: Vec<&AttendanceEvent> = events.iter().collect();
    sorted.sort_by_key(|event| event.timestamp_millis);

    sorted
        .into_iter()
        .fold(SessionAccumulator::default(), |acc, event| {
            acc.apply(event, provinces)
        })
        .finish()
}

/// Full reconstruction for a report request: raw rows in, sessions per day out.
pub fn sessions_by_day(
    rows: &[RawEvent],
    filter: &SessionFilter<'_>,
    provinces: &HashMap<String, String>,
    tz: &Tz,
) -> BTreeMap<NaiveDate, Vec<Session>> {
    group_events_by_day(rows, filter, tz)
        .into_iter()
        .map(|(date, events)| (date, reconstruct_sessions(&events, provinces)))
        .collect()
}
