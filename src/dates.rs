use chrono::{Datelike, NaiveDate};

use crate::models::Entry;

pub fn parse_iso(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Calendar days in a month, leap-aware: first day of the next month minus
/// one day. Returns 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if !(1..=12).contains(&month) {
        return 0;
    }
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

/// First and last day of the month as zero-padded ISO strings.
pub fn month_bounds(year: i32, month: u32) -> (String, String) {
    let first = format!("{year:04}-{month:02}-01");
    let last = format!("{year:04}-{month:02}-{:02}", days_in_month(year, month));
    (first, last)
}

/// Inclusive containment: `start <= day <= end`. Valid as a string comparison
/// because all dates are zero-padded ISO.
pub fn overlaps_day(entry: &Entry, day_iso: &str) -> bool {
    entry.start.as_str() <= day_iso && day_iso <= entry.end.as_str()
}

pub fn overlaps_month(entry: &Entry, year: i32, month: u32) -> bool {
    let (first, last) = month_bounds(year, month);
    !(entry.end < first || entry.start > last)
}

/// Inclusive day count of the entry clipped to the month. Whole-day
/// arithmetic on `NaiveDate`, so no clock or timezone is involved. Returns 0
/// when the clipped range inverts or a date fails to parse.
pub fn days_within_month(entry: &Entry, year: i32, month: u32) -> i64 {
    let (first, last) = month_bounds(year, month);
    let (Some(month_start), Some(month_end)) = (parse_iso(&first), parse_iso(&last)) else {
        return 0;
    };
    let (Some(start), Some(end)) = (parse_iso(&entry.start), parse_iso(&entry.end)) else {
        return 0;
    };
    let clipped_start = start.max(month_start);
    let clipped_end = end.min(month_end);
    let span = (clipped_end - clipped_start).num_days();
    if span < 0 { 0 } else { span + 1 }
}
