//! Derived, non-persisted views over journal snapshots.
//!
//! # Responsibility
//! - Project `(entries, tags)` snapshots into display-ready aggregates.
//!
//! # Invariants
//! - Every function here is pure: no store access, no mutation, safe to
//!   recompute on every read.

pub mod calendar;
pub mod streaks;
pub mod tag_index;
