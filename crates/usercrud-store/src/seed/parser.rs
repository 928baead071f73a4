//! Seed parser with validation
//!
//! Parses YAML and validates schema version, user fields and email
//! uniqueness within the seed.

use crate::errors::{io_error, seed_validation, Result};
use crate::seed::format_v0::SeedV0;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use usercrud_core::rules::{validate_new_user, validate_password};

/// Parse a seed file from a path
///
/// # Errors
///
/// `Io` when the file cannot be read, with the path as entity id.
/// Otherwise the same errors as [`parse_seed_str`].
pub fn parse_seed_file(path: &Path) -> Result<SeedV0> {
    let content = fs::read_to_string(path)
        .map_err(|e| io_error("seed_parse", e).with_entity_id(path.display().to_string()))?;

    parse_seed_str(&content)
}

/// Parse a seed from a string
///
/// # Errors
///
/// `InvalidInput` when the YAML is malformed, the schema version is not 0,
/// a user fails field validation or two users share an email.
pub fn parse_seed_str(content: &str) -> Result<SeedV0> {
    let seed: SeedV0 = serde_yaml::from_str(content)
        .map_err(|e| seed_validation(&format!("YAML parse error: {}", e)))?;

    validate_seed(&seed)?;

    Ok(seed)
}

fn validate_seed(seed: &SeedV0) -> Result<()> {
    if seed.schema_version != 0 {
        return Err(seed_validation(&format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    let mut emails = HashSet::new();
    for (index, user) in seed.users.iter().enumerate() {
        validate_new_user(&user.to_new_user())
            .and_then(|()| validate_password(&user.password))
            .map_err(|e| seed_validation(&format!("users[{}]: {}", index, e)))?;

        if !emails.insert(user.email.as_str()) {
            return Err(seed_validation(&format!(
                "Duplicate email {} in seed",
                user.email
            )));
        }
    }

    Ok(())
}
