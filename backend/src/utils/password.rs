//! Password hashing and verification.
//!
//! Thin wrappers over bcrypt. Hashing failure is an internal error; a wrong
//! password is simply `false` from [`verify_password`].

use crate::errors::ServiceError;
use bcrypt::{DEFAULT_COST, hash, verify};

/// Hashes a plaintext password with a per-hash salt.
pub fn hash_password(plain: &str) -> Result<String, ServiceError> {
    hash(plain, DEFAULT_COST)
        .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {e}")))
}

/// Compares a plaintext password against a stored hash.
pub fn verify_password(plain: &str, hashed: &str) -> Result<bool, ServiceError> {
    verify(plain, hashed)
        .map_err(|e| ServiceError::internal_error(format!("Password verification failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hashed = hash_password("pw123456").unwrap();
        assert_ne!(hashed, "pw123456");
        assert!(verify_password("pw123456", &hashed).unwrap());
        assert!(!verify_password("wrong", &hashed).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("pw123456").unwrap();
        let b = hash_password("pw123456").unwrap();
        assert_ne!(a, b);
    }
}
