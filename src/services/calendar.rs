//! Date-range normalization for report queries.
//!
//! Turns raw range strings (`YYYY-MM-DD:YYYY-MM-DD` or a single date) into a
//! canonical, deduplicated, sorted list of calendar dates plus localized
//! human-readable labels. Dates are expanded day by day in UTC; time-of-day
//! values elsewhere in the pipeline are interpreted in the business timezone.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::utils::time;

/// Thai month names, indexed by `month - 1`.
pub const THAI_MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

/// Month/year/day query parameters used when no explicit ranges are supplied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RangeFallback {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

/// One inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Parses `YYYY-MM-DD:YYYY-MM-DD` or a single `YYYY-MM-DD`. Returns None
    /// for anything malformed, including a reversed range.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        match raw.split_once(':') {
            Some((start, end)) => {
                let start = time::parse_iso_date(start)?;
                let end = time::parse_iso_date(end)?;
                if start > end {
                    return None;
                }
                Some(Self { start, end })
            }
            None => time::parse_iso_date(raw).map(Self::single),
        }
    }

    /// Every date in `[start, end]` inclusive, ascending.
    pub fn days(&self) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        let mut cursor = self.start;
        while cursor <= self.end {
            days.push(cursor);
            cursor += Duration::days(1);
        }
        days
    }

    /// The canonical query string this range re-parses from.
    pub fn as_query(&self) -> String {
        if self.start == self.end {
            self.start.format("%Y-%m-%d").to_string()
        } else {
            format!(
                "{}:{}",
                self.start.format("%Y-%m-%d"),
                self.end.format("%Y-%m-%d")
            )
        }
    }

    /// Localized label: same-day, same-month, same-year and cross-year forms.
    pub fn label(&self) -> String {
        let (start, end) = (self.start, self.end);
        let start_month = THAI_MONTHS[start.month0() as usize];
        let end_month = THAI_MONTHS[end.month0() as usize];

        if start == end {
            format!("{} {} {}", start.day(), start_month, start.year())
        } else if start.year() == end.year() && start.month() == end.month() {
            format!("{}-{} {} {}", start.day(), end.day(), start_month, start.year())
        } else if start.year() == end.year() {
            format!(
                "{} {} - {} {} {}",
                start.day(),
                start_month,
                end.day(),
                end_month,
                start.year()
            )
        } else {
            format!(
                "{} {} {} - {} {} {}",
                start.day(),
                start_month,
                start.year(),
                end.day(),
                end_month,
                end.year()
            )
        }
    }
}

/// Canonical output of range normalization.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedRanges {
    /// Distinct calendar dates covering the union of all ranges, ascending.
    pub dates: Vec<NaiveDate>,
    pub ranges: Vec<DateRange>,
    pub summary: String,
}

impl NormalizedRanges {
    pub fn labels(&self) -> Vec<String> {
        self.ranges.iter().map(DateRange::label).collect()
    }

    pub fn range_queries(&self) -> Vec<String> {
        self.ranges.iter().map(DateRange::as_query).collect()
    }

    /// First and last covered date.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.dates.first(), self.dates.last()) {
            (Some(first), Some(last)) => Some((*first, *last)),
            _ => None,
        }
    }
}

/// Normalizes the requested ranges. Malformed range strings are silently
/// dropped; when nothing parses, falls back to the month/year/day parameters
/// or to the full current month. Idempotent: feeding the canonical range
/// queries back in reproduces the same output.
pub fn normalize_ranges(
    raw: &[String],
    fallback: &RangeFallback,
    today: NaiveDate,
) -> NormalizedRanges {
    let mut ranges: Vec<DateRange> = raw.iter().filter_map(|s| DateRange::parse(s)).collect();

    if ranges.is_empty() {
        ranges.push(fallback_range(fallback, today));
    }

    let dates: BTreeSet<NaiveDate> = ranges.iter().flat_map(DateRange::days).collect();
    let summary = ranges
        .iter()
        .map(DateRange::label)
        .collect::<Vec<_>>()
        .join(", ");

    NormalizedRanges {
        dates: dates.into_iter().collect(),
        ranges,
        summary,
    }
}

fn fallback_range(fallback: &RangeFallback, today: NaiveDate) -> DateRange {
    let year = fallback.year.unwrap_or_else(|| today.year());
    let month = fallback
        .month
        .filter(|m| (1..=12).contains(m))
        .unwrap_or_else(|| today.month());

    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        // Out-of-range year parameter; fall back to the current month.
        return month_range(today.year(), today.month());
    };
    let last = last_day_of_month(first);

    if let Some(day) = fallback.day {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return DateRange::single(date);
        }
    }

    DateRange {
        start: first,
        end: last,
    }
}

fn month_range(year: i32, month: u32) -> DateRange {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid current month");
    DateRange {
        start: first,
        end: last_day_of_month(first),
    }
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    let (next_year, next_month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("valid next month")
        .pred_opt()
        .expect("month has a last day")
}
