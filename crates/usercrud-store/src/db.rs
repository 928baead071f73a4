//! Database connection management
//!
//! Opens the single SQLite handle used for a process run. The handle is an
//! owned `rusqlite::Connection`; dropping it releases the file or the
//! in-memory database.

use crate::errors::{connection_error, Result};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// Path that selects a process-local, non-persistent database
pub const IN_MEMORY: &str = ":memory:";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a database and verify it is usable
///
/// `None` or [`IN_MEMORY`] open an in-memory database. Any other path is
/// opened as a file, created if absent.
///
/// # Errors
/// Returns a `Connection` error if the driver cannot open the target or the
/// liveness check fails. No handle is returned in that case.
pub fn open(path: Option<&Path>) -> Result<Connection> {
    let conn = match path {
        None => {
            tracing::warn!("database path not set, using in-memory database");
            Connection::open_in_memory()
        }
        Some(p) if p == Path::new(IN_MEMORY) => Connection::open_in_memory(),
        Some(p) => Connection::open(p),
    }
    .map_err(|e| connection_error("open", e))?;

    configure(&conn)?;
    ping(&conn)?;

    tracing::debug!(path = ?path, "database opened");
    Ok(conn)
}

/// Open an in-memory SQLite database (for testing)
///
/// # Errors
/// See [`open`].
pub fn open_in_memory() -> Result<Connection> {
    open(Some(Path::new(IN_MEMORY)))
}

/// Configure a connection with the settings every handle uses
///
/// # Errors
/// Returns a `Connection` error if a pragma cannot be applied.
pub fn configure(conn: &Connection) -> Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT)
        .map_err(|e| connection_error("configure", e))?;

    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|e| connection_error("configure", e))?;

    Ok(())
}

/// Liveness check
///
/// Reads the schema table so that unreadable or non-database files fail
/// here rather than on the first repository call.
///
/// # Errors
/// Returns a `Connection` error when the database cannot be read.
pub fn ping(conn: &Connection) -> Result<()> {
    conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
        row.get::<_, i64>(0)
    })
    .map(|_| ())
    .map_err(|e| connection_error("ping", e))
}

/// Close the handle, surfacing errors that a plain drop would swallow
///
/// # Errors
/// Returns a `Connection` error if SQLite refuses to close.
pub fn close(conn: Connection) -> Result<()> {
    conn.close().map_err(|(_, e)| connection_error("close", e))
}
