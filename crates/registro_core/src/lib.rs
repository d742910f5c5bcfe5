//! Core domain logic for the Registro journal.
//! This crate is the single source of truth for business invariants:
//! one entry per calendar day, normalized unique tags, eager orphan
//! cleanup, and deterministic export composition.

pub mod db;
pub mod export;
pub mod locale;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod views;

pub use export::layout::{compose_paginated, DrawOp, FontKind, Page, PageGeometry, TextOp};
pub use export::selection::{select_entries, ExportOptions, ExportScope};
pub use export::{CancelToken, ExportError};
pub use locale::LocaleConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{normalize_day, Entry, EntryId};
pub use model::tag::normalize as normalize_tag;
pub use repo::journal_repo::{
    JournalRepository, RepoError, RepoResult, SqliteJournalRepository,
};
pub use service::journal_service::{ExportRequest, JournalService, JournalServiceError};
pub use views::streaks::{writing_streaks, StreakStats};
pub use views::tag_index::{alphabetic_index, tag_frequency, IndexBucket, TagCount};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
