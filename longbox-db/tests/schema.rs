use longbox_db::{DbError, create_schema, open_database, open_memory};

#[test]
fn open_database_refuses_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = open_database(&dir.path().join("absent.sqlite")).unwrap_err();
    assert!(matches!(err, DbError::Missing(_)));
}

#[test]
fn open_database_opens_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.sqlite");

    let conn = rusqlite::Connection::open(&path).unwrap();
    create_schema(&conn).unwrap();
    drop(conn);

    let conn = open_database(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM series", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn create_schema_is_idempotent() {
    let conn = open_memory().unwrap();
    create_schema(&conn).unwrap();
    create_schema(&conn).unwrap();
}
