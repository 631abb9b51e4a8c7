//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle signup, login, and the password lifecycle, and are
//! designed to be integrated into the main Axum router.

use crate::auth::handlers::*;
use crate::auth::middleware::*;
use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/forgotPassword", patch(forgot_password))
        .route("/resetPassword/{token}", post(reset_password))
        .route(
            "/updateMyPassword",
            patch(update_password).layer(middleware::from_fn(require_account)),
        )
        .route("/me", get(me).layer(middleware::from_fn(require_account)))
}
