//! Seed digest canonicalization
//!
//! Computes stable SHA256 digests of seeds so a report can name exactly
//! what was imported. Plaintext passwords never enter the digest.

use crate::errors::Result;
use crate::seed::format_v0::SeedV0;
use serde::Serialize;
use sha2::{Digest, Sha256};
use usercrud_core::{ExError, ExErrorKind, DEFAULT_ROLE};

#[derive(Debug, Serialize)]
struct CanonicalSeed<'a> {
    schema_version: u32,
    users: Vec<CanonicalUser<'a>>,
}

#[derive(Debug, Serialize)]
struct CanonicalUser<'a> {
    email: &'a str,
    name: &'a str,
    role: &'a str,
    age: Option<i64>,
}

/// Compute a stable digest for a seed
///
/// Returns the SHA256 hex digest of the canonical JSON form, with users
/// sorted by email and the default role filled in.
///
/// # Errors
/// Returns a `Serialization` error if the canonical form cannot be encoded.
pub fn compute_seed_digest(seed: &SeedV0) -> Result<String> {
    let mut users: Vec<CanonicalUser<'_>> = seed
        .users
        .iter()
        .map(|u| CanonicalUser {
            email: &u.email,
            name: &u.name,
            role: u.role.as_deref().unwrap_or(DEFAULT_ROLE),
            age: u.age,
        })
        .collect();
    users.sort_by(|a, b| a.email.cmp(b.email));

    let canonical = CanonicalSeed {
        schema_version: seed.schema_version,
        users,
    };

    let json = serde_json::to_string(&canonical).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("compute_seed_digest")
            .with_message(e.to_string())
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::parser::parse_seed_str;

    const SEED: &str = r#"
schema_version: 0
users:
  - name: Ada
    email: ada@example.com
    password: one
  - name: Bob
    email: bob@example.com
    role: ADMIN
    age: 40
    password: two
"#;

    #[test]
    fn test_seed_digest_stable() {
        let digest1 = compute_seed_digest(&parse_seed_str(SEED).unwrap()).unwrap();
        let digest2 = compute_seed_digest(&parse_seed_str(SEED).unwrap()).unwrap();

        assert_eq!(digest1, digest2);
        assert_eq!(digest1.len(), 64); // SHA256 is 64 hex chars
    }

    #[test]
    fn test_seed_digest_order_independent() {
        let reordered = r#"
schema_version: 0
users:
  - name: Bob
    email: bob@example.com
    role: ADMIN
    age: 40
    password: two
  - name: Ada
    email: ada@example.com
    password: one
"#;
        let a = compute_seed_digest(&parse_seed_str(SEED).unwrap()).unwrap();
        let b = compute_seed_digest(&parse_seed_str(reordered).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_digest_ignores_passwords() {
        let other_passwords = SEED.replace("password: one", "password: changed");
        let a = compute_seed_digest(&parse_seed_str(SEED).unwrap()).unwrap();
        let b = compute_seed_digest(&parse_seed_str(&other_passwords).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_explicit_default_role_matches_implicit() {
        let explicit = SEED.replace(
            "    email: ada@example.com\n",
            "    email: ada@example.com\n    role: USER\n",
        );
        let a = compute_seed_digest(&parse_seed_str(SEED).unwrap()).unwrap();
        let b = compute_seed_digest(&parse_seed_str(&explicit).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_digest_changes_with_content() {
        let renamed = SEED.replace("name: Ada", "name: Ada L.");
        let a = compute_seed_digest(&parse_seed_str(SEED).unwrap()).unwrap();
        let b = compute_seed_digest(&parse_seed_str(&renamed).unwrap()).unwrap();
        assert_ne!(a, b);
    }
}
