//! Error handling for usercrud-store
//!
//! Wraps usercrud-core ExError with store-specific helpers that classify
//! rusqlite failures into the canonical kinds.

use rusqlite::ffi;
use rusqlite::ErrorCode;
use usercrud_core::errors::{ExError, ExErrorKind, UserError};
use usercrud_core_types::{Interruption, RequestContext};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Storage could not be opened, pinged or closed
pub fn connection_error(op: &str, err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Connection)
        .with_op(op.to_string())
        .with_message(err.to_string())
}

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Migration)
        .with_op("apply_schema")
        .with_entity_id(migration_id.to_string())
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// The request context stopped being active before or during `op`
pub fn cancelled(ctx: &RequestContext, op: &str) -> ExError {
    let reason = match ctx.interruption() {
        Some(Interruption::DeadlineExceeded) => "deadline exceeded",
        _ => "operation cancelled",
    };
    ExError::new(ExErrorKind::Cancelled)
        .with_op(op.to_string())
        .with_request_id(ctx.request_id.clone())
        .with_message(reason)
}

/// Create a seed validation error
pub fn seed_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("seed_parse")
        .with_message(reason.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// True when the driver rejected a write because of a UNIQUE constraint
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// True when a progress handler interrupted the statement
pub fn is_interrupted(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::OperationInterrupted
    )
}

/// Create a database error from rusqlite::Error
///
/// Interrupted statements become `Cancelled`, unique violations become
/// `Duplicate`, everything else is `Persistence`.
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    let kind = if is_interrupted(&err) {
        ExErrorKind::Cancelled
    } else if is_unique_violation(&err) {
        ExErrorKind::Duplicate
    } else {
        ExErrorKind::Persistence
    };
    ExError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Classify a failed write of the row owning `email`
pub fn write_error(err: rusqlite::Error, email: &str) -> ExError {
    if is_unique_violation(&err) {
        UserError::DuplicateEmail {
            email: email.to_string(),
        }
        .into()
    } else {
        from_rusqlite(err)
    }
}
