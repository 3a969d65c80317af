//! Password hashing and verification.
//!
//! Wraps bcrypt with the application's cost factor. Hashing embeds a
//! per-call salt, so two hashes of the same password never match; a wrong
//! password is reported as `Ok(false)`, not as an error.

use crate::errors::ServiceResult;
use bcrypt::{DEFAULT_COST, hash, verify};

/// Salted adaptive one-way hashing of user credentials.
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    cost: u32,
}

impl CredentialHasher {
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Hashes a plaintext password for storage.
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if hashing itself fails; never
    /// because of the password's content.
    pub fn hash(&self, password: &str) -> ServiceResult<String> {
        hash(password, self.cost)
            .map_err(|e| anyhow::Error::new(e).context("Password hashing failed").into())
    }

    /// Verifies a plaintext password against a stored hash using the salt
    /// embedded in the hash.
    ///
    /// # Returns
    /// `true` if the password matches, `false` otherwise
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` only if the stored hash is
    /// malformed; that is a data fault, not a caller fault.
    pub fn verify(&self, password: &str, stored_hash: &str) -> ServiceResult<bool> {
        verify(password, stored_hash).map_err(|e| {
            anyhow::Error::new(e)
                .context("Password verification failed")
                .into()
        })
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ServiceError;

    #[test]
    fn test_hash_verify_round_trip() {
        let hasher = CredentialHasher::new();
        let stored = hasher.hash("secret1").unwrap();

        assert!(hasher.verify("secret1", &stored).unwrap());
        assert!(!hasher.verify("secret2", &stored).unwrap());
    }

    #[test]
    fn test_hashes_differ_per_call() {
        let hasher = CredentialHasher::new();
        let first = hasher.hash("same password").unwrap();
        let second = hasher.hash("same password").unwrap();

        // Per-call salt: same input, different stored hashes
        assert_ne!(first, second);
        assert!(hasher.verify("same password", &first).unwrap());
        assert!(hasher.verify("same password", &second).unwrap());
    }

    #[test]
    fn test_malformed_stored_hash_is_internal_error() {
        let hasher = CredentialHasher::new();
        match hasher.verify("secret1", "not-a-bcrypt-hash") {
            Err(ServiceError::Internal { .. }) => {}
            other => panic!("expected Internal, got {:?}", other),
        }
    }

    #[test]
    fn test_hash_is_not_the_plaintext() {
        let hasher = CredentialHasher::new();
        let stored = hasher.hash("secret1").unwrap();
        assert_ne!(stored, "secret1");
        assert!(!stored.contains("secret1"));
    }
}
