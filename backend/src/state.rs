//! Shared application state.
//!
//! Everything the handlers and middleware need is built once at startup and
//! passed down as an axum `Extension`: the connection pool, the loaded
//! configuration, the token issuer, and the optional mailer.

use crate::config::Config;
use crate::errors::{ServiceError, ServiceResult};
use crate::services::email_service::{EmailService, Mailer};
use crate::utils::jwt::TokenIssuer;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub token_issuer: TokenIssuer,
    pub mailer: Option<Arc<dyn Mailer>>,
}

impl AppState {
    /// Builds the application state. Fails only on misconfiguration
    /// (e.g. an empty signing secret).
    pub fn new(
        pool: SqlitePool,
        config: Config,
        mailer: Option<Arc<dyn Mailer>>,
    ) -> ServiceResult<Self> {
        let token_issuer = TokenIssuer::new(&config.jwt_secret, config.jwt_expires_in_seconds)?;

        Ok(AppState {
            pool,
            config,
            token_issuer,
            mailer,
        })
    }

    /// Returns the mailer or an external-service error when SMTP is not
    /// configured.
    pub fn mailer(&self) -> ServiceResult<&Arc<dyn Mailer>> {
        self.mailer
            .as_ref()
            .ok_or_else(|| ServiceError::external_service("Email service is not configured"))
    }
}

/// Builds the production SMTP mailer from the optional email configuration.
///
/// Returns `None` (with a warning) when SMTP is not configured; the service
/// still starts, but forgot-password requests will fail.
pub fn build_mailer(config: &Config) -> Option<Arc<dyn Mailer>> {
    match config.email_config() {
        Some(email_config) => match EmailService::new(email_config) {
            Ok(service) => {
                tracing::info!("Email service initialized successfully");
                Some(Arc::new(service))
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to initialize email service: {}. Password-reset emails will be disabled.",
                    e
                );
                None
            }
        },
        None => {
            tracing::warn!(
                "Email configuration not found. Password-reset emails will be disabled."
            );
            None
        }
    }
}
