use serde::{Deserialize, Serialize};
use usercrud_core_types::Sensitive;

/// Role assigned when an insert does not name one
pub const DEFAULT_ROLE: &str = "USER";

/// User - a row of the `users` table as read back from storage
///
/// `password_hash` is only populated by single-row reads; list results
/// never carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Storage-assigned identifier, immutable once assigned
    pub id: i64,

    pub name: String,

    pub role: String,

    /// Unique across all users
    pub email: String,

    pub age: Option<i64>,

    /// Argon2id PHC string, never the plaintext
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

/// Input for creating a user
///
/// The plaintext password is passed separately so it can stay inside a
/// `Sensitive` wrapper until it is hashed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,

    /// Falls back to [`DEFAULT_ROLE`] when absent
    #[serde(default)]
    pub role: Option<String>,

    pub email: String,

    #[serde(default)]
    pub age: Option<i64>,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
            email: email.into(),
            age: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_age(mut self, age: i64) -> Self {
        self.age = Some(age);
        self
    }

    /// Role that will be written for this user
    pub fn effective_role(&self) -> &str {
        self.role.as_deref().unwrap_or(DEFAULT_ROLE)
    }
}

/// Replacement values for every mutable column of a user
///
/// A `password` of `None` keeps the stored hash; `Some` is re-hashed
/// before it is written.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub name: String,
    pub role: String,
    pub email: String,
    pub age: Option<i64>,
    pub password: Option<Sensitive<String>>,
}

impl UserUpdate {
    /// Start an update from the current state of a user
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            role: user.role.clone(),
            email: user.email.clone(),
            age: user.age,
            password: None,
        }
    }

    pub fn with_password(mut self, password: impl Into<Sensitive<String>>) -> Self {
        self.password = Some(password.into());
        self
    }
}
