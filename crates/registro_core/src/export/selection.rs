//! Export selection filter.
//!
//! # Responsibility
//! - Compute the entry subset handed to the composers from a scope and an
//!   only-with-content flag.
//!
//! # Invariants
//! - A reversed custom range is swapped via min/max, never an error.
//! - The upper bound is inclusive of its entire day.
//! - The result is sorted by day ascending.

use crate::model::entry::Entry;
use chrono::{Duration, NaiveDate};

/// Date-range filter applied before composing export output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    /// The whole journal.
    All,
    /// The 7 days ending at `today`, inclusive.
    Last7Days,
    /// The 30 days ending at `today`, inclusive.
    Last30Days,
    /// An inclusive date range; bounds may arrive in either order.
    Custom { from: NaiveDate, to: NaiveDate },
}

/// Options shared by both composers and the selection filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub scope: ExportScope,
    /// Render tag lines, and let tags count as content.
    pub include_tags: bool,
    /// Drop entries without visible content before composing.
    pub only_with_content: bool,
}

/// Computes the subset of entries passed to the composers.
pub fn select_entries(entries: &[Entry], options: &ExportOptions, today: NaiveDate) -> Vec<Entry> {
    let bounds = scope_bounds(options.scope, today);
    let mut selected: Vec<Entry> = entries
        .iter()
        .filter(|entry| match bounds {
            Some((from, to)) => from <= entry.day && entry.day <= to,
            None => true,
        })
        .filter(|entry| !options.only_with_content || entry.has_content(options.include_tags))
        .cloned()
        .collect();
    selected.sort_by_key(|entry| entry.day);
    selected
}

/// Resolves a scope to inclusive day bounds; `None` means unbounded.
fn scope_bounds(scope: ExportScope, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    match scope {
        ExportScope::All => None,
        ExportScope::Last7Days => Some((today - Duration::days(6), today)),
        ExportScope::Last30Days => Some((today - Duration::days(29), today)),
        ExportScope::Custom { from, to } => Some((from.min(to), from.max(to))),
    }
}
