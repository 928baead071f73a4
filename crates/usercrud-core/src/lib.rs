//! usercrud Core - domain layer for the users store
//!
//! This crate provides:
//! - The `User` model and its insert/update inputs
//! - Input validation rules applied before any write
//! - Argon2id password hashing and verification
//! - The canonical error facility (`ExError`, `ExErrorKind`, `UserError`)
//! - The structured logging facility and lifecycle macros

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod password;
pub mod rules;

/// Shared context, redaction and schema types
pub use usercrud_core_types as types;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, Result, UserError};
pub use model::{NewUser, User, UserUpdate, DEFAULT_ROLE};
pub use password::{verify_password, HashCost, PasswordHasher};
