//! JWT token utilities for authentication and authorization.
//!
//! Provides secure token creation, validation, and claims management for
//! stateless session tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// JWT claims structure for session tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Account ID
    pub sub: String,
    /// Account display name
    pub name: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

impl Claims {
    pub fn account_id(&self) -> &str {
        &self.sub
    }

    pub fn issued_at(&self) -> i64 {
        self.iat as i64
    }
}

/// Signs and verifies session tokens with a shared secret.
///
/// Keys are built once at construction; the issuer is cheap to clone and is
/// shared through the application state.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in_seconds: u64,
}

impl TokenIssuer {
    /// Creates a new issuer. Fails only on misconfiguration.
    pub fn new(secret: &str, expires_in_seconds: u64) -> Result<Self, ServiceError> {
        if secret.is_empty() {
            return Err(ServiceError::internal_error(
                "Token signing secret is not configured",
            ));
        }

        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Ok(TokenIssuer {
            encoding_key,
            decoding_key,
            validation,
            expires_in_seconds,
        })
    }

    /// Issues a signed session token for the given account.
    pub fn issue(&self, account_id: &str, name: &str) -> Result<String, ServiceError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expires_in_seconds as i64);

        let claims = Claims {
            sub: account_id.to_string(),
            name: name.to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {e}")))
    }

    /// Validates and decodes a session token.
    pub fn verify(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    ServiceError::unauthorized("Token has expired, please log in again")
                }
                _ => ServiceError::unauthorized("Invalid authentication token"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret", 3600).unwrap()
    }

    #[test]
    fn rejects_empty_secret() {
        assert!(TokenIssuer::new("", 3600).is_err());
    }

    #[test]
    fn issues_and_verifies_round_trip() {
        let issuer = issuer();
        let token = issuer.issue("acct-1", "Alice").unwrap();
        let claims = issuer.verify(&token).unwrap();

        assert_eq!(claims.sub, "acct-1");
        assert_eq!(claims.name, "Alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let other = TokenIssuer::new("other-secret", 3600).unwrap();
        let token = other.issue("acct-1", "Alice").unwrap();

        let err = issuer().verify(&token).unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized { .. }));
    }

    #[test]
    fn rejects_tampered_token() {
        let issuer = issuer();
        let mut token = issuer.issue("acct-1", "Alice").unwrap();
        token.push('x');
        assert!(issuer.verify(&token).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let now = Utc::now();
        let claims = Claims {
            sub: "acct-1".into(),
            name: "Alice".into(),
            exp: (now - Duration::hours(1)).timestamp() as usize,
            iat: (now - Duration::hours(2)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let err = issuer().verify(&token).unwrap_err();
        match err {
            ServiceError::Unauthorized { message } => assert!(message.contains("expired")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
