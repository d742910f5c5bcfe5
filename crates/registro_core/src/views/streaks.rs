//! Writing streak statistics.
//!
//! # Responsibility
//! - Compute day-count and streak aggregates over an entry snapshot.
//!
//! # Invariants
//! - Streaks are runs of consecutive calendar days, each with an entry.
//! - The current streak counts backward from `today` inclusively and is
//!   zero when today has no entry.

use crate::model::entry::Entry;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeSet;

/// Aggregated writing statistics for the stats screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreakStats {
    /// Distinct days with an entry across all history.
    pub total_days: u32,
    /// Distinct days with an entry in `today`'s month.
    pub days_this_month: u32,
    /// Consecutive days with an entry ending at `today`.
    pub current_streak: u32,
    /// Longest run of consecutive days with an entry across all history.
    pub max_streak: u32,
}

/// Computes streak statistics over the given entries.
///
/// `today` is passed explicitly so callers (and tests) control the clock.
pub fn writing_streaks(entries: &[Entry], today: NaiveDate) -> StreakStats {
    let days: BTreeSet<NaiveDate> = entries.iter().map(|entry| entry.day).collect();

    let days_this_month = days
        .iter()
        .filter(|day| day.year() == today.year() && day.month() == today.month())
        .count() as u32;

    let mut current_streak = 0;
    let mut cursor = today;
    while days.contains(&cursor) {
        current_streak += 1;
        cursor = cursor - Duration::days(1);
    }

    let mut max_streak = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;
    for &day in &days {
        run = match previous {
            Some(prev) if day - prev == Duration::days(1) => run + 1,
            _ => 1,
        };
        max_streak = max_streak.max(run);
        previous = Some(day);
    }

    StreakStats {
        total_days: days.len() as u32,
        days_this_month,
        current_streak,
        max_streak,
    }
}

#[cfg(test)]
mod tests {
    use super::writing_streaks;
    use crate::model::entry::Entry;
    use chrono::NaiveDate;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn entries(days: &[(u32, u32)]) -> Vec<Entry> {
        days.iter().map(|&(m, d)| Entry::new(day(m, d))).collect()
    }

    #[test]
    fn empty_journal_has_zero_everything() {
        let stats = writing_streaks(&[], day(1, 5));
        assert_eq!(stats.total_days, 0);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.max_streak, 0);
    }

    #[test]
    fn gap_before_today_limits_current_streak() {
        // Jan 1-3 written, Jan 4 missing, today is Jan 5 with an entry.
        let entries = entries(&[(1, 1), (1, 2), (1, 3), (1, 5)]);
        let stats = writing_streaks(&entries, day(1, 5));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.max_streak, 3);
        assert_eq!(stats.total_days, 4);
    }

    #[test]
    fn current_streak_is_zero_when_today_is_unwritten() {
        let entries = entries(&[(1, 1), (1, 2), (1, 3)]);
        let stats = writing_streaks(&entries, day(1, 5));
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.max_streak, 3);
    }

    #[test]
    fn current_streak_crosses_month_boundaries() {
        let entries = entries(&[(1, 30), (1, 31), (2, 1)]);
        let stats = writing_streaks(&entries, day(2, 1));
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.days_this_month, 1);
    }

    #[test]
    fn single_day_counts_as_a_run_of_one() {
        let entries = entries(&[(1, 10)]);
        let stats = writing_streaks(&entries, day(1, 12));
        assert_eq!(stats.max_streak, 1);
        assert_eq!(stats.total_days, 1);
    }

    #[test]
    fn this_month_counts_only_todays_month() {
        let entries = entries(&[(1, 5), (1, 20), (2, 3)]);
        let stats = writing_streaks(&entries, day(1, 31));
        assert_eq!(stats.days_this_month, 2);
        assert_eq!(stats.total_days, 3);
    }
}
