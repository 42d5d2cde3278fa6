use catalogo_core::db::migrations::latest_version;
use catalogo_core::db::{open_db, open_db_in_memory, with_db, DbError, DbResult};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_the_schema() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "produtos");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dados.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "produtos");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
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

#[test]
fn with_db_commits_before_close() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dados.db");

    with_db::<_, DbError>(&path, |conn| {
        conn.execute(
            "INSERT INTO produtos (nome, preco, estoque) VALUES (?1, ?2, ?3);",
            rusqlite::params!["Mouse", 49.90, 10],
        )?;
        Ok(())
    })
    .unwrap();

    // A second scoped connection must observe the row persisted by the first.
    let count: i64 = with_db::<_, DbError>(&path, |conn| {
        let count = conn.query_row("SELECT COUNT(*) FROM produtos;", [], |row| row.get(0))?;
        Ok(count)
    })
    .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn with_db_propagates_the_operation_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dados.db");

    let result: DbResult<()> = with_db(&path, |conn| {
        conn.execute("INSERT INTO no_such_table (x) VALUES (1);", [])?;
        Ok(())
    });

    assert!(matches!(result, Err(DbError::Sqlite(_))));
}

#[test]
fn with_db_failure_does_not_block_later_operations() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dados.db");

    let _ = with_db::<(), DbError>(&path, |conn| {
        conn.execute("INSERT INTO no_such_table (x) VALUES (1);", [])?;
        Ok(())
    });

    // The failed scope must have released the connection.
    with_db::<_, DbError>(&path, |conn| {
        conn.execute(
            "INSERT INTO produtos (nome, preco, estoque) VALUES ('Cabo', 9.90, 0);",
            [],
        )?;
        Ok(())
    })
    .unwrap();
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "expected table `{table_name}` to exist");
}
