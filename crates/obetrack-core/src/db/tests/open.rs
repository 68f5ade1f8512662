use crate::db::*;
use tempfile::tempdir;

#[test]
fn test_database_open_creates_tables() {
    let dir = tempdir().unwrap();
    let db = Database::open(&dir.path().join("obetrack.db")).unwrap();

    let count: i64 = db
        .conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table'",
            [],
            |row: &rusqlite::Row| row.get(0),
        )
        .unwrap();

    assert_eq!(count, TABLES.len() as i64);
    assert_eq!(db.get_schema_version().unwrap(), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_reopen_keeps_data() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("obetrack.db");

    {
        let db = Database::open(&path).unwrap();
        db.create_program("CS", "Computer Science").unwrap();
    }

    let db = Database::open(&path).unwrap();
    assert_eq!(db.count_rows("programs").unwrap(), 1);
    assert_eq!(db.list_programs().unwrap()[0].code, "CS");
}

#[test]
fn test_newer_schema_version_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("obetrack.db");

    {
        let db = Database::open(&path).unwrap();
        db.conn
            .execute(
                "UPDATE meta SET value = '99' WHERE key = 'schema_version'",
                [],
            )
            .unwrap();
    }

    let err = Database::open(&path).unwrap_err();
    assert!(err.to_string().contains("schema version 99"));
}

#[test]
fn test_count_rows_rejects_unknown_table() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.count_rows("sqlite_master").is_err());
    assert_eq!(db.count_rows("grades").unwrap(), 0);
}

#[test]
fn test_foreign_keys_are_enforced() {
    let db = Database::open_in_memory().unwrap();
    let result = db.conn.execute(
        "INSERT INTO learning_outcomes (course_id, code, description) VALUES (42, 'LO1', '')",
        [],
    );
    assert!(result.is_err());
}
