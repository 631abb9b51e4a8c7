//! Database repository for account management operations.
//!
//! Provides CRUD operations for accounts, including the reset-token columns.
//! Password and reset-token writes are single UPDATE statements so the store's
//! per-row atomicity keeps the credential state consistent.

use crate::database::models::{Account, CreateAccount};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

const ACCOUNT_COLUMNS: &str = "id, name, email, password_hash, role, password_changed_at, \
     reset_token_hash, reset_token_expires_at, created_at, updated_at";

pub struct AccountRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AccountRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        // Shared SQLite connection pool
        Self { pool }
    }

    /// Inserts a new account and returns the stored row.
    pub async fn create_account(&self, create: CreateAccount) -> Result<Account> {
        let id = Uuid::now_v7().to_string();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO accounts \
             (id, name, email, password_hash, role, password_changed_at, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&create.name)
        .bind(&create.email)
        .bind(&create.password_hash)
        .bind(create.role)
        .bind(now)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await?;

        Ok(Account {
            id,
            name: create.name,
            email: create.email,
            password_hash: create.password_hash,
            role: create.role,
            password_changed_at: now,
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves an account by its ID.
    pub async fn get_account_by_id(&self, id: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }

    /// Retrieves an account by its (normalized) email.
    pub async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }

    /// Checks whether an account with this email already exists.
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE email = ?")
                .bind(email)
                .fetch_one(self.pool)
                .await?;

        Ok(count > 0)
    }

    /// Retrieves an account holding the given reset-token digest.
    ///
    /// Expiry is checked by the caller so an expired token can be reported
    /// distinctly from an unknown one.
    pub async fn get_account_by_reset_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE reset_token_hash = ?"
        ))
        .bind(token_hash)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }

    /// Stores a reset-token digest and its expiry, replacing any prior token.
    pub async fn set_reset_token(
        &self,
        id: &str,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            "UPDATE accounts SET reset_token_hash = ?, reset_token_expires_at = ?, \
             updated_at = ? WHERE id = ?",
        )
        .bind(token_hash)
        .bind(expires_at)
        .bind(Utc::now())
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Clears the reset-token fields, e.g. after a failed email send.
    pub async fn clear_reset_token(&self, id: &str) -> Result<()> {
        sqlx::query(
            "UPDATE accounts SET reset_token_hash = NULL, reset_token_expires_at = NULL, \
             updated_at = ? WHERE id = ?",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Writes a new password hash, stamps the change time, and clears any
    /// outstanding reset token in the same statement.
    pub async fn update_password(&self, id: &str, password_hash: &str) -> Result<()> {
        let now = Utc::now();

        sqlx::query(
            "UPDATE accounts SET password_hash = ?, password_changed_at = ?, \
             reset_token_hash = NULL, reset_token_expires_at = NULL, updated_at = ? \
             WHERE id = ?",
        )
        .bind(password_hash)
        .bind(now)
        .bind(now)
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Lists accounts ordered by creation time, newest first.
    pub async fn list_accounts(&self, limit: u64, offset: u64) -> Result<Vec<Account>> {
        let accounts = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY created_at DESC LIMIT ? OFFSET ?"
        ))
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(accounts)
    }

    /// Total number of accounts.
    pub async fn count_accounts(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(self.pool)
            .await?;

        Ok(count as u64)
    }
}
