//! Core business logic for the authentication system.

use crate::auth::models::*;
use crate::database::models::{Account, CreateAccount, Role};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::account_repository::AccountRepository;
use crate::state::AppState;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::reset_token::ResetToken;
use chrono::{Duration, Utc};
use validator::Validate;

/// Authentication service handling signup, login, and the password lifecycle.
pub struct AuthService<'a> {
    state: &'a AppState,
    repo: AccountRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance borrowing the shared state.
    pub fn new(state: &'a AppState) -> Self {
        AuthService {
            state,
            repo: AccountRepository::new(&state.pool),
        }
    }

    /// Register a new account and log it in.
    pub async fn signup(&self, request: SignupRequest) -> ServiceResult<AuthResponse> {
        validate_payload(&request)?;

        if request.password != request.password_confirm {
            return Err(ServiceError::validation("Passwords do not match"));
        }

        let email = normalize_email(&request.email);

        if self.repo.email_exists(&email).await? {
            return Err(ServiceError::already_exists("Account", &email));
        }

        let password_hash = hash_password(&request.password)?;

        let account = self
            .repo
            .create_account(CreateAccount {
                name: request.name.trim().to_string(),
                email,
                password_hash,
                role: Role::User,
            })
            .await?;

        let token = self.state.token_issuer.issue(&account.id, &account.name)?;

        Ok(AuthResponse {
            account: AccountInfo::from(&account),
            token,
        })
    }

    /// Authenticate an account and issue a session token.
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        validate_payload(&request)?;

        let email = normalize_email(&request.email);

        let account = self
            .repo
            .get_account_by_email(&email)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account", &email))?;

        if !verify_password(&request.password, &account.password_hash)? {
            return Err(ServiceError::invalid_credentials(
                "Wrong email or password, please try again",
            ));
        }

        let token = self.state.token_issuer.issue(&account.id, &account.name)?;

        Ok(AuthResponse {
            account: AccountInfo::from(&account),
            token,
        })
    }

    /// Generate a reset token, store its digest, and email the secret.
    ///
    /// A new request overwrites any previously issued token. If the email
    /// cannot be sent the token is cleared again so no unusable token
    /// lingers on the account.
    pub async fn forgot_password(&self, request: ForgotPasswordRequest) -> ServiceResult<()> {
        validate_payload(&request)?;

        let email = normalize_email(&request.email);

        let account = self
            .repo
            .get_account_by_email(&email)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account", &email))?;

        let reset_token = ResetToken::generate();
        let valid_minutes = self.state.config.reset_token_expires_in_minutes;
        let expires_at = Utc::now() + Duration::minutes(valid_minutes);

        self.repo
            .set_reset_token(&account.id, &reset_token.token_hash, expires_at)
            .await?;

        let send_result = match self.state.mailer() {
            Ok(mailer) => {
                mailer
                    .send_password_reset(&account.email, &reset_token.secret, valid_minutes)
                    .await
            }
            Err(e) => Err(e),
        };

        if let Err(e) = send_result {
            tracing::warn!("Failed to send password reset email: {}", e);
            self.repo.clear_reset_token(&account.id).await?;
            return Err(ServiceError::external_service(
                "Failed to send the password reset email",
            ));
        }

        Ok(())
    }

    /// Consume a reset token and set a new password.
    pub async fn reset_password(
        &self,
        secret: &str,
        request: ResetPasswordRequest,
    ) -> ServiceResult<TokenResponse> {
        validate_payload(&request)?;

        if request.password != request.password_confirm {
            return Err(ServiceError::validation("Passwords do not match"));
        }

        let token_hash = ResetToken::hash_secret(secret);

        let account = self
            .repo
            .get_account_by_reset_token_hash(&token_hash)
            .await?
            .ok_or_else(|| ServiceError::not_found("Reset token", &token_hash[..12]))?;

        match account.reset_token_expires_at {
            Some(expires_at) if expires_at > Utc::now() => {}
            _ => {
                return Err(ServiceError::token_expired(
                    "The reset token has expired, please request a new one",
                ));
            }
        }

        let password_hash = hash_password(&request.password)?;

        // Single UPDATE: new password, change timestamp, cleared token fields.
        self.repo.update_password(&account.id, &password_hash).await?;

        let token = self.state.token_issuer.issue(&account.id, &account.name)?;

        Ok(TokenResponse { token })
    }

    /// Change the password of an authenticated account.
    pub async fn update_password(
        &self,
        account: &Account,
        request: UpdatePasswordRequest,
    ) -> ServiceResult<TokenResponse> {
        validate_payload(&request)?;

        if !verify_password(&request.current_password, &account.password_hash)? {
            return Err(ServiceError::invalid_credentials(
                "Wrong password, please try again",
            ));
        }

        if request.new_password != request.password_confirm {
            return Err(ServiceError::validation("Passwords do not match"));
        }

        let password_hash = hash_password(&request.new_password)?;
        self.repo.update_password(&account.id, &password_hash).await?;

        let token = self.state.token_issuer.issue(&account.id, &account.name)?;

        Ok(TokenResponse { token })
    }
}

/// Runs the validator derive and folds field errors into one message.
fn validate_payload<T: Validate>(payload: &T) -> ServiceResult<()> {
    if let Err(validation_errors) = payload.validate() {
        let error_messages: Vec<String> = validation_errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    format!(
                        "{}: {}",
                        field,
                        error.message.as_ref().unwrap_or(&"Invalid value".into())
                    )
                })
            })
            .collect();
        return Err(ServiceError::validation(error_messages.join(", ")));
    }

    Ok(())
}

/// Emails are stored and looked up trimmed and lowercased.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
