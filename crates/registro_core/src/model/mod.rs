//! Journal domain model.
//!
//! # Responsibility
//! - Define the canonical entry record and tag normalization rules.
//! - Keep one shape shared by repository, derived views and exporters.
//!
//! # Invariants
//! - Every entry is identified by a stable `EntryId`.
//! - An entry's `tags` hold normalized names only, in attachment order.

pub mod entry;
pub mod tag;
