//! Journal entry domain model.
//!
//! # Responsibility
//! - Define the one-record-per-day entry shape used across the core.
//! - Provide day normalization and content inspection helpers.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another entry.
//! - `day` has date-only granularity; time-of-day never reaches storage.
//! - `tags` contains normalized names only, no duplicates, attachment order.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for every journal entry.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EntryId = Uuid;

/// Number of free-text fields on an entry.
pub const TEXT_FIELD_COUNT: usize = 6;

/// One journal record for exactly one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Stable global ID used for linking and auditing.
    pub uuid: EntryId,
    /// Calendar day this entry belongs to. Unique across the journal.
    pub day: NaiveDate,
    /// What was done today.
    pub done: String,
    /// What crossed the mind today.
    pub thought: String,
    /// What was read / watched / listened to.
    pub consumed: String,
    /// Work or creative output.
    pub work: String,
    /// One-word mood.
    pub mood: String,
    /// A loose note.
    pub note: String,
    /// Normalized tag names in attachment order.
    pub tags: Vec<String>,
}

impl Entry {
    /// Creates an empty entry for the given day with a generated stable ID.
    pub fn new(day: NaiveDate) -> Self {
        Self::with_id(Uuid::new_v4(), day)
    }

    /// Creates an empty entry with a caller-provided stable ID.
    ///
    /// Used by persistence read-back paths where identity already exists.
    pub fn with_id(uuid: EntryId, day: NaiveDate) -> Self {
        Self {
            uuid,
            day,
            done: String::new(),
            thought: String::new(),
            consumed: String::new(),
            work: String::new(),
            mood: String::new(),
            note: String::new(),
            tags: Vec::new(),
        }
    }

    /// Returns the six free-text fields in canonical order:
    /// done, thought, consumed, work, mood, note.
    pub fn text_fields(&self) -> [&str; TEXT_FIELD_COUNT] {
        [
            self.done.as_str(),
            self.thought.as_str(),
            self.consumed.as_str(),
            self.work.as_str(),
            self.mood.as_str(),
            self.note.as_str(),
        ]
    }

    /// Returns whether this entry carries any visible content.
    ///
    /// True when at least one text field is non-blank after trimming, or
    /// when `count_tags` is set and at least one tag is attached.
    pub fn has_content(&self, count_tags: bool) -> bool {
        self.text_fields()
            .iter()
            .any(|field| !field.trim().is_empty())
            || (count_tags && !self.tags.is_empty())
    }
}

/// Truncates a date-time to its calendar day.
///
/// Day-uniqueness is defined over this normalization; callers holding a
/// full timestamp must pass it through here before any store operation.
pub fn normalize_day(moment: NaiveDateTime) -> NaiveDate {
    moment.date()
}
