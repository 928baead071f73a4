//! Repository layer for the `users` table
//!
//! Callers depend on the [`UserRepository`] trait; [`SqliteUserRepo`] is the
//! SQLite-backed implementation over an explicitly passed handle.

pub mod sqlite_repo;
pub mod user_repository;

pub use sqlite_repo::SqliteUserRepo;
pub use user_repository::UserRepository;
