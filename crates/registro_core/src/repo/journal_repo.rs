//! Entry/tag repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide entry persistence APIs with upsert-by-day semantics.
//! - Own the entry<->tag link lifecycle, including eager orphan cleanup.
//!
//! # Invariants
//! - At most one row exists in `entries` per calendar day.
//! - Tag names reach SQL already normalized; the repository never persists
//!   a raw tag name.
//! - Every mutation that can reduce a tag's reference count ends with an
//!   orphan sweep inside the same transaction.

use crate::db::DbError;
use crate::model::entry::{Entry, EntryId};
use chrono::NaiveDate;
use log::{debug, info};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ENTRY_SELECT_SQL: &str = "SELECT
    uuid,
    day,
    done,
    thought,
    consumed,
    work,
    mood,
    note
FROM entries";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for journal persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(EntryId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "entry not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted entry data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for journal entry and tag operations.
///
/// Tag name arguments must already be normalized (`model::tag::normalize`);
/// the service layer owns raw-input handling.
pub trait JournalRepository {
    /// Returns one entry by stable ID.
    fn get_entry(&self, id: EntryId) -> RepoResult<Option<Entry>>;
    /// Returns the entry for the given day, if present.
    fn find_entry_by_day(&self, day: NaiveDate) -> RepoResult<Option<Entry>>;
    /// Returns the entry for the given day, creating an empty one if absent.
    fn get_or_create_entry_for_day(&mut self, day: NaiveDate) -> RepoResult<Entry>;
    /// Replaces the six free-text fields of an existing entry.
    fn update_entry_fields(&self, entry: &Entry) -> RepoResult<()>;
    /// Deletes one entry, its tag links, and any tags left orphaned.
    fn delete_entry(&mut self, id: EntryId) -> RepoResult<()>;
    /// Attaches tags to an entry in the given order, creating unknown tags
    /// lazily. Re-attaching an already-attached tag is a no-op.
    fn apply_tags(&mut self, id: EntryId, names: &[String]) -> RepoResult<()>;
    /// Removes one entry<->tag link; a missing link is a no-op.
    fn detach_tag(&mut self, id: EntryId, name: &str) -> RepoResult<()>;
    /// Lists all entries sorted by day ascending.
    fn list_entries(&self) -> RepoResult<Vec<Entry>>;
    /// Lists entries carrying the given tag, sorted by day ascending.
    fn entries_with_tag(&self, name: &str) -> RepoResult<Vec<Entry>>;
    /// Returns all known tag names sorted ascending.
    fn list_tags(&self) -> RepoResult<Vec<String>>;
}

/// SQLite-backed journal repository.
pub struct SqliteJournalRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteJournalRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl JournalRepository for SqliteJournalRepository<'_> {
    fn get_entry(&self, id: EntryId) -> RepoResult<Option<Entry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            let mut entry = parse_entry_row(row)?;
            entry.tags = load_tags_for_entry(self.conn, entry.uuid)?;
            return Ok(Some(entry));
        }
        Ok(None)
    }

    fn find_entry_by_day(&self, day: NaiveDate) -> RepoResult<Option<Entry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} WHERE day = ?1;"))?;
        let mut rows = stmt.query([day_to_db(day)])?;
        if let Some(row) = rows.next()? {
            let mut entry = parse_entry_row(row)?;
            entry.tags = load_tags_for_entry(self.conn, entry.uuid)?;
            return Ok(Some(entry));
        }
        Ok(None)
    }

    fn get_or_create_entry_for_day(&mut self, day: NaiveDate) -> RepoResult<Entry> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing = {
            let mut stmt = tx.prepare(&format!("{ENTRY_SELECT_SQL} WHERE day = ?1;"))?;
            let mut rows = stmt.query([day_to_db(day)])?;
            match rows.next()? {
                Some(row) => Some(parse_entry_row(row)?),
                None => None,
            }
        };

        if let Some(mut entry) = existing {
            entry.tags = load_tags_for_entry(&tx, entry.uuid)?;
            tx.commit()?;
            return Ok(entry);
        }

        let entry = Entry::new(day);
        tx.execute(
            "INSERT INTO entries (uuid, day) VALUES (?1, ?2);",
            params![entry.uuid.to_string(), day_to_db(day)],
        )?;
        tx.commit()?;

        info!(
            "event=entry_create module=repo status=ok day={}",
            day_to_db(day)
        );
        Ok(entry)
    }

    fn update_entry_fields(&self, entry: &Entry) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE entries
             SET
                done = ?2,
                thought = ?3,
                consumed = ?4,
                work = ?5,
                mood = ?6,
                note = ?7,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![
                entry.uuid.to_string(),
                entry.done.as_str(),
                entry.thought.as_str(),
                entry.consumed.as_str(),
                entry.work.as_str(),
                entry.mood.as_str(),
                entry.note.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(entry.uuid));
        }

        Ok(())
    }

    fn delete_entry(&mut self, id: EntryId) -> RepoResult<()> {
        let id_text = id.to_string();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            "DELETE FROM entry_tags WHERE entry_uuid = ?1;",
            [id_text.as_str()],
        )?;
        let changed = tx.execute("DELETE FROM entries WHERE uuid = ?1;", [id_text.as_str()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        sweep_orphan_tags(&tx)?;
        tx.commit()?;

        info!("event=entry_delete module=repo status=ok id={id}");
        Ok(())
    }

    fn apply_tags(&mut self, id: EntryId, names: &[String]) -> RepoResult<()> {
        let id_text = id.to_string();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !entry_exists_in_tx(&tx, id_text.as_str())? {
            return Err(RepoError::NotFound(id));
        }

        for name in names {
            tx.execute(
                "INSERT OR IGNORE INTO tags (name) VALUES (?1);",
                [name.as_str()],
            )?;
            // The primary key on (entry_uuid, tag_id) makes re-attachment
            // a no-op via OR IGNORE; position keeps attachment order.
            tx.execute(
                "INSERT OR IGNORE INTO entry_tags (entry_uuid, tag_id, position)
                 SELECT
                    ?1,
                    id,
                    (SELECT COALESCE(MAX(position), -1) + 1
                     FROM entry_tags
                     WHERE entry_uuid = ?1)
                 FROM tags
                 WHERE name = ?2;",
                params![id_text.as_str(), name.as_str()],
            )?;
        }

        sweep_orphan_tags(&tx)?;
        tx.commit()?;
        Ok(())
    }

    fn detach_tag(&mut self, id: EntryId, name: &str) -> RepoResult<()> {
        let id_text = id.to_string();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !entry_exists_in_tx(&tx, id_text.as_str())? {
            return Err(RepoError::NotFound(id));
        }

        tx.execute(
            "DELETE FROM entry_tags
             WHERE entry_uuid = ?1
               AND tag_id = (SELECT id FROM tags WHERE name = ?2);",
            params![id_text.as_str(), name],
        )?;

        sweep_orphan_tags(&tx)?;
        tx.commit()?;
        Ok(())
    }

    fn list_entries(&self) -> RepoResult<Vec<Entry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} ORDER BY day ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            let mut entry = parse_entry_row(row)?;
            entry.tags = load_tags_for_entry(self.conn, entry.uuid)?;
            entries.push(entry);
        }
        Ok(entries)
    }

    fn entries_with_tag(&self, name: &str) -> RepoResult<Vec<Entry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ENTRY_SELECT_SQL}
             WHERE EXISTS (
                SELECT 1
                FROM entry_tags et
                INNER JOIN tags t ON t.id = et.tag_id
                WHERE et.entry_uuid = entries.uuid
                  AND t.name = ?1
             )
             ORDER BY day ASC;"
        ))?;
        let mut rows = stmt.query([name])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            let mut entry = parse_entry_row(row)?;
            entry.tags = load_tags_for_entry(self.conn, entry.uuid)?;
            entries.push(entry);
        }
        Ok(entries)
    }

    fn list_tags(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT name FROM tags ORDER BY name ASC;")?;
        let mut rows = stmt.query([])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(row.get::<_, String>("name")?);
        }
        Ok(tags)
    }
}

/// Deletes every tag with zero remaining entry links.
///
/// Must run inside the transaction of the triggering mutation so readers
/// never observe an orphaned tag.
fn sweep_orphan_tags(tx: &Transaction<'_>) -> RepoResult<usize> {
    let removed = tx.execute(
        "DELETE FROM tags
         WHERE id NOT IN (SELECT DISTINCT tag_id FROM entry_tags);",
        [],
    )?;
    if removed > 0 {
        debug!("event=tag_sweep module=repo status=ok removed={removed}");
    }
    Ok(removed)
}

fn day_to_db(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

fn parse_day(value: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| RepoError::InvalidData(format!("invalid day value `{value}` in entries.day")))
}

fn parse_uuid(value: &str) -> RepoResult<EntryId> {
    Uuid::parse_str(value).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{value}` in entries.uuid"))
    })
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<Entry> {
    let uuid_text: String = row.get("uuid")?;
    let day_text: String = row.get("day")?;

    let mut entry = Entry::with_id(parse_uuid(&uuid_text)?, parse_day(&day_text)?);
    entry.done = row.get("done")?;
    entry.thought = row.get("thought")?;
    entry.consumed = row.get("consumed")?;
    entry.work = row.get("work")?;
    entry.mood = row.get("mood")?;
    entry.note = row.get("note")?;
    Ok(entry)
}

fn load_tags_for_entry(conn: &Connection, id: EntryId) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT t.name
         FROM entry_tags et
         INNER JOIN tags t ON t.id = et.tag_id
         WHERE et.entry_uuid = ?1
         ORDER BY et.position ASC;",
    )?;
    let mut rows = stmt.query([id.to_string()])?;
    let mut tags = Vec::new();
    while let Some(row) = rows.next()? {
        tags.push(row.get::<_, String>(0)?);
    }
    Ok(tags)
}

fn entry_exists_in_tx(tx: &Transaction<'_>, uuid: &str) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM entries WHERE uuid = ?1);",
        [uuid],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
