//! Connection bootstrap and scoped acquisition for the catalog store.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas and apply schema bootstrap before use.
//! - Scope a connection to one logical operation with guaranteed close.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` and schema fully applied.
//! - `with_db` closes the connection on every exit path, including when the
//!   wrapped operation fails.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a SQLite database file and applies pending schema steps.
///
/// # Side effects
/// - Creates the file on first use.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    bootstrap("file", || Connection::open(path))
}

/// Opens an in-memory SQLite database and applies pending schema steps.
///
/// Each call yields an independent empty store; used by schema tests.
pub fn open_db_in_memory() -> DbResult<Connection> {
    bootstrap("memory", Connection::open_in_memory)
}

/// Runs one logical operation against a scoped connection.
///
/// Opens a fresh connection, yields it to `op`, and closes it on every exit
/// path. Connections run in autocommit mode, so each completed statement is
/// durable before close. A close failure is surfaced only when the operation
/// itself succeeded; an operation error always wins.
pub fn with_db<T, E>(
    path: impl AsRef<Path>,
    op: impl FnOnce(&mut Connection) -> Result<T, E>,
) -> Result<T, E>
where
    E: From<DbError>,
{
    let mut conn = open_db(path)?;
    let result = op(&mut conn);
    match (result, conn.close()) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err((_conn, err))) => Err(E::from(DbError::Sqlite(err))),
        (Err(err), _) => Err(err),
    }
}

fn bootstrap(
    mode: &str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    let result = open().map_err(DbError::from).and_then(|mut conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        apply_migrations(&mut conn)?;
        Ok(conn)
    });

    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        ),
    }

    result
}
