//! Embedded SQL schema
//!
//! Statements are embedded at compile time using include_str!

/// DDL of the `users` table
pub const USERS_SCHEMA: &str = include_str!("../../migrations/001_users.sql");

/// Migration metadata
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// Get all embedded schema statements in order
pub fn get_migrations() -> Vec<Migration> {
    vec![Migration {
        id: "001_users",
        sql: USERS_SCHEMA,
    }]
}
