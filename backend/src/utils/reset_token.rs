//! Password-reset token generation and hashing.
//!
//! The secret is handed to the user by email; only its sha-256 digest is ever
//! stored, so a database leak does not expose usable reset tokens.

use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

/// A freshly generated reset token: the secret to email and the digest to
/// persist.
#[derive(Debug)]
pub struct ResetToken {
    pub secret: String,
    pub token_hash: String,
}

impl ResetToken {
    /// Generates a new high-entropy reset token from the OS RNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        let secret = hex::encode(bytes);
        let token_hash = Self::hash_secret(&secret);

        ResetToken { secret, token_hash }
    }

    /// Recomputes the stored digest for a presented secret.
    pub fn hash_secret(secret: &str) -> String {
        hex::encode(Sha256::digest(secret.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_64_char_hex_secret() {
        let token = ResetToken::generate();
        assert_eq!(token.secret.len(), 64);
        assert!(token.secret.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn digest_matches_presented_secret() {
        let token = ResetToken::generate();
        assert_eq!(ResetToken::hash_secret(&token.secret), token.token_hash);
    }

    #[test]
    fn tokens_are_unique() {
        let a = ResetToken::generate();
        let b = ResetToken::generate();
        assert_ne!(a.secret, b.secret);
        assert_ne!(a.token_hash, b.token_hash);
    }
}
