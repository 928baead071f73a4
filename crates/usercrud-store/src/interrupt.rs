//! Context-driven statement interruption
//!
//! SQLite calls a progress handler every few virtual machine instructions.
//! While an [`InterruptGuard`] is alive the handler aborts the running
//! statement as soon as the request context is cancelled or its deadline
//! passes. SQLite rolls back the interrupted statement, so an interrupted
//! write leaves no trace.

use crate::errors::{cancelled, Result};
use rusqlite::Connection;
use std::panic::AssertUnwindSafe;
use std::time::Instant;
use usercrud_core_types::RequestContext;

/// VM instructions between two checks of the context
const CHECK_EVERY_OPS: i32 = 100;

/// Fail fast when the context is already inactive
///
/// # Errors
/// Returns a `Cancelled` error.
pub fn ensure_active(ctx: &RequestContext, op: &str) -> Result<()> {
    if ctx.is_active() {
        Ok(())
    } else {
        Err(cancelled(ctx, op))
    }
}

/// Keeps the context's progress handler installed on a connection
///
/// The handler is removed when the guard drops.
pub struct InterruptGuard<'c> {
    conn: &'c Connection,
}

impl<'c> InterruptGuard<'c> {
    pub fn install(conn: &'c Connection, ctx: &RequestContext) -> Self {
        // read-only use of the token inside the handler
        let token = AssertUnwindSafe(ctx.cancel_token().clone());
        let deadline = ctx.deadline();
        conn.progress_handler(
            CHECK_EVERY_OPS,
            Some(move || {
                token.is_cancelled() || deadline.is_some_and(|d| Instant::now() >= d)
            }),
        );
        Self { conn }
    }
}

impl Drop for InterruptGuard<'_> {
    fn drop(&mut self) {
        self.conn.progress_handler(0, None::<fn() -> bool>);
    }
}
