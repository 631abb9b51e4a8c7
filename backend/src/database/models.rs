//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. Note that these may differ from API-specific models:
//! the password hash and reset-token fields never leave the server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Account role, stored as lowercase TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub password_changed_at: DateTime<Utc>,
    pub reset_token_hash: Option<String>,
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// True when the account's password was changed after the given
    /// token-issuance timestamp (seconds since epoch).
    pub fn password_changed_after(&self, issued_at: i64) -> bool {
        self.password_changed_at.timestamp() > issued_at
    }
}

/// Data required to insert a new account row.
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn role_round_trips_through_str() {
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::Admin.to_string(), "admin");
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn password_changed_after_compares_seconds() {
        let changed_at = Utc::now();
        let account = Account {
            id: "a".into(),
            name: "A".into(),
            email: "a@x.com".into(),
            password_hash: "h".into(),
            role: Role::User,
            password_changed_at: changed_at,
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: changed_at,
            updated_at: changed_at,
        };

        let before = (changed_at - Duration::seconds(10)).timestamp();
        let after = (changed_at + Duration::seconds(10)).timestamp();
        assert!(account.password_changed_after(before));
        assert!(!account.password_changed_after(after));
        // Same second counts as not-changed so a token issued right after
        // a reset stays valid.
        assert!(!account.password_changed_after(changed_at.timestamp()));
    }
}
