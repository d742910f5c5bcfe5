//! Calendar month projection.
//!
//! # Responsibility
//! - Report which days of a month carry an entry (day markers).
//! - Provide Monday-first layout helpers for month grids.
//!
//! # Invariants
//! - Membership is a pure set over the snapshot; layout conventions never
//!   change which days are members.

use crate::model::entry::Entry;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// Returns the set of days within `(year, month)` that have an entry.
pub fn calendar_membership(entries: &[Entry], year: i32, month: u32) -> BTreeSet<NaiveDate> {
    entries
        .iter()
        .map(|entry| entry.day)
        .filter(|day| day.year() == year && day.month() == month)
        .collect()
}

/// Number of leading blank cells when laying out `(year, month)` in a
/// Monday-first week grid (Spanish calendar convention).
///
/// Returns 0 for months starting on Monday, 6 for Sunday. An invalid
/// month yields 0 rather than an error; callers pass UI-validated input.
pub fn leading_blank_cells(year: i32, month: u32) -> u32 {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(first) => first.weekday().num_days_from_monday(),
        None => 0,
    }
}

/// Number of days in `(year, month)`, or 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match next_month {
        Some(next) => next.signed_duration_since(first).num_days() as u32,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::{calendar_membership, days_in_month, leading_blank_cells};
    use crate::model::entry::Entry;
    use chrono::NaiveDate;

    fn entry(y: i32, m: u32, d: u32) -> Entry {
        Entry::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn membership_keeps_only_days_inside_the_month() {
        let entries = vec![entry(2026, 1, 5), entry(2026, 1, 31), entry(2026, 2, 1)];
        let days = calendar_membership(&entries, 2026, 1);
        assert_eq!(days.len(), 2);
        assert!(days.contains(&NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()));
        assert!(!days.contains(&NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
    }

    #[test]
    fn leading_blanks_use_monday_first_weeks() {
        // 2026-01-01 is a Thursday: Mon Tue Wed blank.
        assert_eq!(leading_blank_cells(2026, 1), 3);
        // 2026-06-01 is a Monday.
        assert_eq!(leading_blank_cells(2026, 6), 0);
        // 2026-02-01 is a Sunday, the last Monday-first column.
        assert_eq!(leading_blank_cells(2026, 2), 6);
    }

    #[test]
    fn days_in_month_handles_leap_years_and_december() {
        assert_eq!(days_in_month(2026, 2), 28);
        assert_eq!(days_in_month(2028, 2), 29);
        assert_eq!(days_in_month(2026, 12), 31);
        assert_eq!(days_in_month(2026, 13), 0);
    }
}
