//! Seed importer orchestration
//!
//! Imports a parsed seed into the `users` table inside one transaction.
//! Passwords are hashed before the transaction opens so the write lock is
//! held only for the inserts.

use crate::errors::{from_rusqlite, Result};
use crate::interrupt::{ensure_active, InterruptGuard};
use crate::repo::sqlite_repo::insert_row;
use crate::seed::format_v0::SeedV0;
use crate::seed::{compute_seed_digest, parse_seed_file, parse_seed_str};
use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use usercrud_core::password::PasswordHasher;
use usercrud_core::{log_op_end, log_op_error, log_op_start};
use usercrud_core_types::RequestContext;

const OP: &str = "seed_import";

/// Outcome of a committed seed import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Canonical digest of the imported seed
    pub digest: String,
    /// Rows written
    pub inserted: usize,
}

/// Import a seed file into the database
///
/// All users are inserted or none are: a duplicate email against existing
/// rows, a cancellation or any other failure rolls the whole seed back.
///
/// # Errors
/// `InvalidInput` for unreadable or invalid seeds, `Duplicate` when an
/// email already exists, `Cancelled` when the context stops being active.
pub fn import_seed(
    ctx: &RequestContext,
    path: &Path,
    conn: &mut Connection,
    hasher: &PasswordHasher,
) -> Result<SeedReport> {
    log_op_start!(
        OP,
        request_id = ctx.request_id.as_str(),
        path = %path.display()
    );
    let start = Instant::now();

    let result = parse_seed_file(path).and_then(|seed| apply_seed(ctx, &seed, conn, hasher));
    finish(ctx, start, result)
}

/// Import a seed given as YAML text
///
/// # Errors
/// See [`import_seed`].
pub fn import_seed_str(
    ctx: &RequestContext,
    content: &str,
    conn: &mut Connection,
    hasher: &PasswordHasher,
) -> Result<SeedReport> {
    log_op_start!(OP, request_id = ctx.request_id.as_str());
    let start = Instant::now();

    let result = parse_seed_str(content).and_then(|seed| apply_seed(ctx, &seed, conn, hasher));
    finish(ctx, start, result)
}

fn apply_seed(
    ctx: &RequestContext,
    seed: &SeedV0,
    conn: &mut Connection,
    hasher: &PasswordHasher,
) -> Result<SeedReport> {
    let digest = compute_seed_digest(seed)?;

    let mut hashed = Vec::with_capacity(seed.users.len());
    for user in &seed.users {
        ensure_active(ctx, OP)?;
        hashed.push((user.to_new_user(), hasher.hash(&user.password)?));
    }
    ensure_active(ctx, OP)?;

    let tx = conn.transaction().map_err(from_rusqlite)?;
    {
        let _guard = InterruptGuard::install(&tx, ctx);
        for (user, password_hash) in &hashed {
            insert_row(&tx, user, password_hash)?;
        }
    }
    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(digest = %digest, rows = hashed.len(), "seed committed");
    Ok(SeedReport {
        digest,
        inserted: hashed.len(),
    })
}

fn finish(ctx: &RequestContext, start: Instant, result: Result<SeedReport>) -> Result<SeedReport> {
    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(report) => {
            log_op_end!(
                OP,
                duration_ms = duration_ms,
                request_id = ctx.request_id.as_str(),
                rows = report.inserted
            );
            Ok(report)
        }
        Err(err) => {
            let err = err.with_request_id(ctx.request_id.clone());
            log_op_error!(
                OP,
                err.clone(),
                duration_ms = duration_ms,
                request_id = ctx.request_id.as_str()
            );
            Err(err)
        }
    }
}
