//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for signup, login, and the
//! password lifecycle, parse request data, and interact with the
//! `auth::service` for core business logic.

use crate::api::common::{ApiResponse, service_error_to_http};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::database::models::Account;
use crate::state::AppState;
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::Json as ResponseJson,
};

/// Handle account registration
#[axum::debug_handler]
pub async fn signup(
    Extension(state): Extension<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<AuthResponse>>), (StatusCode, String)> {
    let auth_service = AuthService::new(&state);

    match auth_service.signup(payload).await {
        Ok(response) => Ok((
            StatusCode::CREATED,
            ResponseJson(ApiResponse::success(response, "Account created successfully")),
        )),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(state): Extension<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<AuthResponse>>), (StatusCode, String)> {
    let auth_service = AuthService::new(&state);

    match auth_service.login(payload).await {
        Ok(response) => Ok((
            StatusCode::CREATED,
            ResponseJson(ApiResponse::success(response, "Logged in successfully")),
        )),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle forgot-password request: emails a one-time reset link
#[axum::debug_handler]
pub async fn forgot_password(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<ResponseJson<ApiResponse<()>>, (StatusCode, String)> {
    let auth_service = AuthService::new(&state);

    match auth_service.forgot_password(payload).await {
        Ok(()) => Ok(ResponseJson(ApiResponse::success(
            (),
            "Your password reset URL was sent to your email",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle reset-password request carrying the emailed secret in the path
#[axum::debug_handler]
pub async fn reset_password(
    Extension(state): Extension<AppState>,
    Path(token): Path<String>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<TokenResponse>>), (StatusCode, String)> {
    let auth_service = AuthService::new(&state);

    match auth_service.reset_password(&token, payload).await {
        Ok(response) => Ok((
            StatusCode::CREATED,
            ResponseJson(ApiResponse::success(response, "Password reset successfully")),
        )),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle authenticated password change
#[axum::debug_handler]
pub async fn update_password(
    Extension(state): Extension<AppState>,
    Extension(account): Extension<Account>,
    Json(payload): Json<UpdatePasswordRequest>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<TokenResponse>>), (StatusCode, String)> {
    let auth_service = AuthService::new(&state);

    match auth_service.update_password(&account, payload).await {
        Ok(response) => Ok((
            StatusCode::CREATED,
            ResponseJson(ApiResponse::success(response, "Password updated successfully")),
        )),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Get current account information from the resolved token
#[axum::debug_handler]
pub async fn me(
    Extension(account): Extension<Account>,
) -> Result<ResponseJson<ApiResponse<AccountInfo>>, (StatusCode, String)> {
    Ok(ResponseJson(ApiResponse::ok(AccountInfo::from(&account))))
}
