use grocery_core::db::migrations::latest_version;
use grocery_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(
        column_names(&conn, "todo_table"),
        ["id", "name", "quantity", "created_at", "is_done"]
    );
}

#[test]
fn reopening_file_database_keeps_schema_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grocery.sqlite3");

    let conn = open_db(&path).unwrap();
    conn.execute(
        "INSERT INTO todo_table (name, quantity, created_at) VALUES ('Milk', '2L', 1);",
        [],
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM todo_table;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn is_done_defaults_to_false_and_rejects_other_values() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO todo_table (name, quantity, created_at) VALUES ('Tea', '1 box', 1);",
        [],
    )
    .unwrap();
    let is_done: i64 = conn
        .query_row("SELECT is_done FROM todo_table;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(is_done, 0);

    let err = conn.execute(
        "INSERT INTO todo_table (name, quantity, created_at, is_done) VALUES ('Tea', '1', 1, 2);",
        [],
    );
    assert!(err.is_err());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn column_names(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table});"))
        .unwrap();
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    names
}
