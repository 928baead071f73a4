//! Schema runner
//!
//! Executes DDL against an open handle and owns the lifecycle logging for it.

use crate::errors::{migration_error, Result};
use crate::migrations::embedded::get_migrations;
use rusqlite::Connection;
use usercrud_core::{log_op_end, log_op_error, log_op_start};

/// Execute a DDL string once
///
/// Idempotency comes from the DDL itself (`IF NOT EXISTS`).
///
/// # Errors
/// Returns a `Migration` error if any statement fails.
pub fn apply_schema(conn: &Connection, ddl: &str) -> Result<()> {
    apply_named(conn, "adhoc", ddl)
}

/// Apply every embedded schema statement in order
///
/// # Errors
/// Returns a `Migration` error naming the first statement that fails.
pub fn apply_migrations(conn: &Connection) -> Result<()> {
    for migration in get_migrations() {
        apply_named(conn, migration.id, migration.sql)?;
    }
    Ok(())
}

fn apply_named(conn: &Connection, migration_id: &str, ddl: &str) -> Result<()> {
    log_op_start!("apply_schema", migration_id = migration_id);
    let start = std::time::Instant::now();

    conn.execute_batch(ddl)
        .map_err(|e| {
            let err = migration_error(migration_id, &e.to_string());
            log_op_error!(
                "apply_schema",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            err
        })?;

    log_op_end!(
        "apply_schema",
        duration_ms = start.elapsed().as_millis() as u64,
        migration_id = migration_id
    );
    Ok(())
}
