//! Schema application
//!
//! Provides:
//! - The embedded `users` DDL
//! - Idempotent application through `CREATE TABLE IF NOT EXISTS`
//!
//! No version table is kept; every statement is safe to re-run on each start.

mod embedded;
mod runner;

pub use embedded::{get_migrations, Migration, USERS_SCHEMA};
pub use runner::{apply_migrations, apply_schema};
