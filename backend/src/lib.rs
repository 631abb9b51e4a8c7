//! UserGate backend library.
//!
//! Exposes the application modules and the router builder so the binary and
//! the integration tests share one construction path.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod state;
pub mod utils;

use crate::api::common::ApiResponse;
use crate::state::AppState;
use axum::{Extension, Router, response::Json, routing::get};

/// Builds the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .nest(
            "/api/v1/",
            auth::routes::auth_router().merge(api::account::routes::account_router()),
        )
        .layer(Extension(state))
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "UserGate Backend",
            "version": "0.1.0"
        }),
        "Welcome to the UserGate API",
    ))
}
