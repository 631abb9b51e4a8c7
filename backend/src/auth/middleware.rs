//! Middleware for protecting authenticated routes and handling authorization.
//!
//! This module contains the access guard that validates bearer tokens,
//! resolves the owning account, and rejects tokens issued before the last
//! password change, plus the secondary role gate for admin-only routes.

use crate::api::common::service_error_to_http;
use crate::database::models::{Account, Role};
use crate::errors::ServiceError;
use crate::repositories::account_repository::AccountRepository;
use crate::state::AppState;
use axum::{
    extract::{Extension, Request},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// Access guard: verifies the bearer token, loads the account, and rejects
/// stale tokens. On success the claims and the resolved account are attached
/// to the request extensions for downstream handlers.
pub async fn require_account(
    Extension(state): Extension<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return Err(service_error_to_http(ServiceError::unauthorized(
                "Missing authentication token",
            )));
        }
    };

    let claims = state
        .token_issuer
        .verify(token)
        .map_err(service_error_to_http)?;

    let repo = AccountRepository::new(&state.pool);
    let account = repo
        .get_account_by_id(claims.account_id())
        .await
        .map_err(|e| service_error_to_http(ServiceError::from(e)))?
        .ok_or_else(|| {
            service_error_to_http(ServiceError::not_found("Account", claims.account_id()))
        })?;

    // Tokens issued before the last password change are rejected.
    if account.password_changed_after(claims.issued_at()) {
        return Err(service_error_to_http(ServiceError::unauthorized(
            "Password was changed recently, please log in again",
        )));
    }

    request.extensions_mut().insert(claims);
    request.extensions_mut().insert(account);
    Ok(next.run(request).await)
}

/// Role gate: rejects requests whose resolved account is not in the allowed
/// set. Must run after [`require_account`].
pub async fn require_role(
    allowed: &[Role],
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let role = request
        .extensions()
        .get::<Account>()
        .map(|account| account.role)
        .ok_or_else(|| {
            service_error_to_http(ServiceError::unauthorized("Missing authentication token"))
        })?;

    if !allowed.contains(&role) {
        return Err(service_error_to_http(ServiceError::permission_denied(
            "You do not have permission to perform this action",
        )));
    }

    Ok(next.run(request).await)
}

/// Admin-only gate used by the account listing routes.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, (StatusCode, String)> {
    require_role(&[Role::Admin], request, next).await
}
