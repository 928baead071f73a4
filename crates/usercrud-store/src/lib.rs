//! usercrud Store - persistence layer over an embedded SQLite database
//!
//! Provides:
//! - Connection management with liveness checks
//! - The `users` schema and its idempotent application
//! - The `UserRepository` contract and its SQLite implementation
//! - Seed Format v0 parser and transactional importer
//! - Context-driven cancellation of running statements

pub mod db;
pub mod errors;
pub mod interrupt;
pub mod migrations;
pub mod repo;
pub mod seed;

// Re-export key types
pub use errors::Result;
pub use repo::{SqliteUserRepo, UserRepository};
