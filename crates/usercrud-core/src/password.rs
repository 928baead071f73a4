//! Password hashing
//!
//! Passwords are hashed with Argon2id and a random per-password salt before
//! they reach storage. The PHC string output embeds algorithm, cost and salt,
//! so verification needs nothing but the stored hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as PasswordHashError, PasswordHash, PasswordHasher as _, PasswordVerifier as _,
    SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use usercrud_core_types::Sensitive;

use crate::errors::{Result, UserError};

/// Argon2 cost factors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory in KiB
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Salted, slow one-way password hasher
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: HashCost,
    params: Params,
}

impl PasswordHasher {
    /// Build a hasher with the given cost
    ///
    /// # Errors
    /// Returns `UserError::Hashing` when argon2 rejects the parameters
    /// (e.g. memory below `8 * parallelism` KiB).
    pub fn new(cost: HashCost) -> Result<Self> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| UserError::Hashing {
                message: format!("invalid argon2 parameters: {}", e),
            })?;
        Ok(Self { cost, params })
    }

    pub fn cost(&self) -> HashCost {
        self.cost
    }

    /// Hash a plaintext password into a PHC string
    ///
    /// # Errors
    /// Returns `UserError::Hashing` if argon2 fails.
    pub fn hash(&self, plaintext: &Sensitive<String>) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());

        argon2
            .hash_password(plaintext.expose().as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(hashing_error)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: HashCost::default(),
            params: Params::default(),
        }
    }
}

/// Check a plaintext candidate against a stored PHC string
///
/// Returns `Ok(false)` on mismatch.
///
/// # Errors
/// Returns `UserError::Hashing` when the stored value is not a valid hash.
pub fn verify_password(plaintext: &str, phc: &str) -> Result<bool> {
    let parsed = PasswordHash::new(phc).map_err(hashing_error)?;

    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(e) => Err(hashing_error(e)),
    }
}

/// True when `value` parses as a PHC hash string
pub fn is_password_hash(value: &str) -> bool {
    PasswordHash::new(value).is_ok()
}

fn hashing_error(err: PasswordHashError) -> UserError {
    UserError::Hashing {
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::new(HashCost {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = fast_hasher().hash(&"secret".into()).unwrap();
        assert_ne!(hash, "secret");
        assert!(hash.starts_with("$argon2id$"));
        assert!(is_password_hash(&hash));
    }

    #[test]
    fn test_verify_round_trip() {
        let hash = fast_hasher().hash(&"secret".into()).unwrap();
        assert!(verify_password("secret", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_salt_differs_per_hash() {
        let hasher = fast_hasher();
        let a = hasher.hash(&"secret".into()).unwrap();
        let b = hasher.hash(&"secret".into()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_rejects_invalid_cost() {
        let result = PasswordHasher::new(HashCost {
            memory_kib: 1,
            iterations: 1,
            parallelism: 1,
        });
        assert!(matches!(result, Err(UserError::Hashing { .. })));
    }

    #[test]
    fn test_verify_malformed_hash_is_error() {
        assert!(verify_password("secret", "plaintext-in-db").is_err());
        assert!(!is_password_hash("plaintext-in-db"));
    }

    #[test]
    fn test_default_cost_matches_argon2_defaults() {
        let hasher = PasswordHasher::default();
        assert_eq!(hasher.cost().memory_kib, Params::DEFAULT_M_COST);
        assert_eq!(hasher.cost().iterations, Params::DEFAULT_T_COST);
    }
}
