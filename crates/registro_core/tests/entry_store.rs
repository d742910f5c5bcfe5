use chrono::NaiveDate;
use registro_core::db::open_db_in_memory;
use registro_core::{
    JournalService, JournalServiceError, SqliteJournalRepository,
};
use uuid::Uuid;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
}

#[test]
fn get_or_create_is_upsert_by_day() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteJournalRepository::new(&mut conn);
    let mut service = JournalService::new(repo);

    let first = service.get_or_create_entry_for_day(day(5)).unwrap();
    let second = service.get_or_create_entry_for_day(day(5)).unwrap();
    assert_eq!(first.uuid, second.uuid);

    let row_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(row_count, 1);
}

#[test]
fn created_entry_starts_empty() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteJournalRepository::new(&mut conn);
    let mut service = JournalService::new(repo);

    let entry = service.get_or_create_entry_for_day(day(7)).unwrap();
    assert_eq!(entry.day, day(7));
    assert!(entry.text_fields().iter().all(|field| field.is_empty()));
    assert!(entry.tags.is_empty());
}

#[test]
fn find_entry_by_day_returns_none_without_creating() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteJournalRepository::new(&mut conn);
    let service = JournalService::new(repo);

    assert!(service.find_entry_by_day(day(9)).unwrap().is_none());

    let row_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(row_count, 0);
}

#[test]
fn field_edits_survive_read_back() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteJournalRepository::new(&mut conn);
    let mut service = JournalService::new(repo);

    let mut entry = service.get_or_create_entry_for_day(day(5)).unwrap();
    entry.done = "paseo largo".to_string();
    entry.mood = "sereno".to_string();
    service.update_entry(&entry).unwrap();

    let loaded = service.find_entry_by_day(day(5)).unwrap().unwrap();
    assert_eq!(loaded.done, "paseo largo");
    assert_eq!(loaded.mood, "sereno");
    assert_eq!(loaded.thought, "");
}

#[test]
fn delete_removes_entry_and_day_becomes_free() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteJournalRepository::new(&mut conn);
    let mut service = JournalService::new(repo);

    let entry = service.get_or_create_entry_for_day(day(5)).unwrap();
    service.delete_entry(entry.uuid).unwrap();

    assert!(service.find_entry_by_day(day(5)).unwrap().is_none());

    // The day can be reopened with a fresh identity.
    let reopened = service.get_or_create_entry_for_day(day(5)).unwrap();
    assert_ne!(reopened.uuid, entry.uuid);
}

#[test]
fn operations_on_missing_entries_surface_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteJournalRepository::new(&mut conn);
    let mut service = JournalService::new(repo);

    let ghost = Uuid::new_v4();
    let err = service.delete_entry(ghost).unwrap_err();
    assert!(matches!(err, JournalServiceError::EntryNotFound(id) if id == ghost));

    let err = service.apply_tags_input(ghost, "poesía").unwrap_err();
    assert!(matches!(err, JournalServiceError::EntryNotFound(_)));
}

#[test]
fn list_entries_is_sorted_by_day_ascending() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteJournalRepository::new(&mut conn);
    let mut service = JournalService::new(repo);

    service.get_or_create_entry_for_day(day(20)).unwrap();
    service.get_or_create_entry_for_day(day(3)).unwrap();
    service.get_or_create_entry_for_day(day(11)).unwrap();

    let listed = service.list_entries().unwrap();
    let days: Vec<NaiveDate> = listed.iter().map(|entry| entry.day).collect();
    assert_eq!(days, vec![day(3), day(11), day(20)]);
}
