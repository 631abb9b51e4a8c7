//! Data structures for authentication-related entities.
//!
//! This module defines request and response payloads for the authentication
//! flow. Request fields default to empty strings so that missing JSON fields
//! surface as validation errors rather than deserialization failures.

use crate::database::models::{Account, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Signup request payload
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Must be a valid email"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[serde(default, rename = "passwordConfirm")]
    #[validate(length(min = 1, message = "Password confirmation is required"))]
    pub password_confirm: String,
}

/// Login request payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Forgot-password request payload
#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    #[validate(email(message = "Must be a valid email"))]
    pub email: String,
}

/// Reset-password request payload (the token travels in the URL path)
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[serde(default, rename = "passwordConfirm")]
    #[validate(length(min = 1, message = "Password confirmation is required"))]
    pub password_confirm: String,
}

/// Authenticated password-change request payload
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    #[serde(default, rename = "currentPassword")]
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[serde(default, rename = "newPassword")]
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,

    #[serde(default, rename = "passwordConfirm")]
    #[validate(length(min = 1, message = "Password confirmation is required"))]
    pub password_confirm: String,
}

/// Public view of an account, safe to return to clients
#[derive(Debug, Serialize)]
pub struct AccountInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountInfo {
    fn from(account: &Account) -> Self {
        AccountInfo {
            id: account.id.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role,
            created_at: account.created_at,
        }
    }
}

/// Response for signup and login: the account plus a fresh session token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub account: AccountInfo,
    pub token: String,
}

/// Response carrying only a fresh session token
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
