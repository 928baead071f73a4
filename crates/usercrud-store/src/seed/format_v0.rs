//! Seed Format v0 schema
//!
//! ```yaml
//! schema_version: 0
//! users:
//!   - name: Ada
//!     email: ada@example.com
//!     role: ADMIN      # optional
//!     age: 36          # optional
//!     password: s3cret
//! ```

use serde::{Deserialize, Deserializer};
use usercrud_core::model::NewUser;
use usercrud_core_types::Sensitive;

/// Top-level seed file structure
#[derive(Debug, Deserialize)]
pub struct SeedV0 {
    /// Must be 0 for this format
    pub schema_version: u32,

    #[serde(default)]
    pub users: Vec<SeedUser>,
}

/// One user entry
#[derive(Debug, Deserialize)]
pub struct SeedUser {
    pub name: String,

    #[serde(default)]
    pub role: Option<String>,

    pub email: String,

    #[serde(default)]
    pub age: Option<i64>,

    /// Plaintext, hashed on import
    #[serde(deserialize_with = "deserialize_sensitive")]
    pub password: Sensitive<String>,
}

impl SeedUser {
    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            name: self.name.clone(),
            role: self.role.clone(),
            email: self.email.clone(),
            age: self.age,
        }
    }
}

fn deserialize_sensitive<'de, D>(deserializer: D) -> Result<Sensitive<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Sensitive::new)
}
