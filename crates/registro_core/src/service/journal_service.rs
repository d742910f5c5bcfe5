//! Journal use-case service.
//!
//! # Responsibility
//! - Expose the full UI boundary: entry lifecycle, raw tag input, derived
//!   views and export generation, all over plain values.
//!
//! # Invariants
//! - Raw tag input never reaches the repository; it is normalized and
//!   de-duplicated here first.
//! - Opening a day can never fail with "not found"; the entry is created
//!   on demand.
//! - A failed export leaves previously generated artifacts unchanged.

use crate::export::layout::{compose_paginated, PageGeometry};
use crate::export::selection::{select_entries, ExportOptions};
use crate::export::writer::{sanitize_file_name, write_atomic};
use crate::export::{markdown, pdf, CancelToken, ExportError};
use crate::locale::LocaleConfig;
use crate::model::entry::{Entry, EntryId};
use crate::model::tag::{normalize, split_tag_input};
use crate::repo::journal_repo::{JournalRepository, RepoError, RepoResult};
use crate::views::calendar::calendar_membership;
use crate::views::streaks::{writing_streaks, StreakStats};
use crate::views::tag_index::{alphabetic_index, tag_frequency, IndexBucket, TagCount};
use chrono::NaiveDate;
use log::info;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Service error for journal use-cases.
#[derive(Debug)]
pub enum JournalServiceError {
    /// Target entry does not exist.
    EntryNotFound(EntryId),
    /// Persistence-layer failure; in-memory state is unchanged.
    Repo(RepoError),
    /// Export composition or materialization failure.
    Export(ExportError),
}

impl Display for JournalServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EntryNotFound(id) => write!(f, "entry not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "{err}"),
        }
    }
}

impl Error for JournalServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EntryNotFound(_) => None,
            Self::Repo(err) => Some(err),
            Self::Export(err) => Some(err),
        }
    }
}

impl From<RepoError> for JournalServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::EntryNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<ExportError> for JournalServiceError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

/// Parameters shared by both export entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// Document title, first line of the artifact.
    pub title: String,
    /// Optional subtitle; blank is omitted.
    pub subtitle: String,
    /// Scope and content filters.
    pub options: ExportOptions,
    /// Reference day for relative scopes, passed in by the caller.
    pub today: NaiveDate,
}

/// Journal service facade over repository implementations.
pub struct JournalService<R: JournalRepository> {
    repo: R,
}

impl<R: JournalRepository> JournalService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the entry for `day`, or `None` without creating one.
    pub fn find_entry_by_day(&self, day: NaiveDate) -> RepoResult<Option<Entry>> {
        self.repo.find_entry_by_day(day)
    }

    /// Returns the entry for `day`, creating an empty one if absent.
    ///
    /// Navigation into a day's editor goes through here so the UI can
    /// never land on a missing entry.
    pub fn get_or_create_entry_for_day(
        &mut self,
        day: NaiveDate,
    ) -> Result<Entry, JournalServiceError> {
        Ok(self.repo.get_or_create_entry_for_day(day)?)
    }

    /// Persists edits to the six free-text fields.
    pub fn update_entry(&self, entry: &Entry) -> Result<(), JournalServiceError> {
        self.repo.update_entry_fields(entry)?;
        Ok(())
    }

    /// Deletes one entry; orphaned tags disappear with it.
    pub fn delete_entry(&mut self, id: EntryId) -> Result<(), JournalServiceError> {
        self.repo.delete_entry(id)?;
        Ok(())
    }

    /// Applies comma-separated raw tag input to an entry.
    ///
    /// Pieces are normalized, empties dropped, duplicates within the input
    /// collapsed to their first occurrence. Returns the refreshed entry.
    pub fn apply_tags_input(
        &mut self,
        id: EntryId,
        input: &str,
    ) -> Result<Entry, JournalServiceError> {
        let names = split_tag_input(input);
        self.repo.apply_tags(id, &names)?;
        self.read_back(id)
    }

    /// Detaches one tag (raw name accepted) from an entry.
    ///
    /// Detaching a tag that is not attached is a no-op. Returns the
    /// refreshed entry.
    pub fn detach_tag(&mut self, id: EntryId, raw_name: &str) -> Result<Entry, JournalServiceError> {
        let name = normalize(raw_name);
        self.repo.detach_tag(id, &name)?;
        self.read_back(id)
    }

    /// Lists all entries sorted by day ascending.
    pub fn list_entries(&self) -> RepoResult<Vec<Entry>> {
        self.repo.list_entries()
    }

    /// Lists the entries carrying the given tag (raw name accepted).
    pub fn entries_with_tag(&self, raw_name: &str) -> RepoResult<Vec<Entry>> {
        self.repo.entries_with_tag(&normalize(raw_name))
    }

    /// Lists all known tag names ascending.
    pub fn list_tags(&self) -> RepoResult<Vec<String>> {
        self.repo.list_tags()
    }

    /// Tag frequency index over the current snapshot.
    pub fn tag_frequency(&self) -> RepoResult<Vec<TagCount>> {
        Ok(tag_frequency(&self.repo.list_entries()?))
    }

    /// Book-style A-Z index over the current snapshot.
    pub fn alphabetic_index(&self) -> RepoResult<Vec<IndexBucket>> {
        Ok(alphabetic_index(&tag_frequency(&self.repo.list_entries()?)))
    }

    /// Days of `(year, month)` that have an entry.
    pub fn calendar_membership(&self, year: i32, month: u32) -> RepoResult<BTreeSet<NaiveDate>> {
        Ok(calendar_membership(&self.repo.list_entries()?, year, month))
    }

    /// Streak statistics relative to the caller-supplied `today`.
    pub fn writing_streaks(&self, today: NaiveDate) -> RepoResult<StreakStats> {
        Ok(writing_streaks(&self.repo.list_entries()?, today))
    }

    /// Generates the Markdown artifact at `dir/<sanitized stem>.md`.
    pub fn export_markdown(
        &self,
        dir: &Path,
        file_stem: &str,
        request: &ExportRequest,
        locale: &LocaleConfig,
    ) -> Result<PathBuf, JournalServiceError> {
        let selected = self.selected_entries(request)?;
        let document = markdown::compose(
            &request.title,
            &request.subtitle,
            &selected,
            request.options.include_tags,
            locale,
        );

        let path = dir.join(format!("{}.md", sanitize_file_name(file_stem)));
        write_atomic(&path, document.as_bytes())?;
        info!(
            "event=export module=service status=ok format=md entries={} path={}",
            selected.len(),
            path.display()
        );
        Ok(path)
    }

    /// Generates the PDF artifact at `dir/<sanitized stem>.pdf`.
    ///
    /// Cancellation through `cancel` surfaces as `ExportError::Cancelled`
    /// and leaves the destination untouched.
    pub fn export_pdf(
        &self,
        dir: &Path,
        file_stem: &str,
        request: &ExportRequest,
        locale: &LocaleConfig,
        geometry: &PageGeometry,
        cancel: &CancelToken,
    ) -> Result<PathBuf, JournalServiceError> {
        let selected = self.selected_entries(request)?;
        let pages = compose_paginated(
            &request.title,
            &request.subtitle,
            &selected,
            request.options.include_tags,
            geometry,
            locale,
            cancel,
        )?;
        let bytes = pdf::render(&pages, geometry);

        let path = dir.join(format!("{}.pdf", sanitize_file_name(file_stem)));
        write_atomic(&path, &bytes)?;
        info!(
            "event=export module=service status=ok format=pdf entries={} pages={} path={}",
            selected.len(),
            pages.len(),
            path.display()
        );
        Ok(path)
    }

    fn selected_entries(&self, request: &ExportRequest) -> Result<Vec<Entry>, JournalServiceError> {
        let entries = self.repo.list_entries()?;
        Ok(select_entries(&entries, &request.options, request.today))
    }

    fn read_back(&self, id: EntryId) -> Result<Entry, JournalServiceError> {
        self.repo
            .get_entry(id)?
            .ok_or(JournalServiceError::EntryNotFound(id))
    }
}
