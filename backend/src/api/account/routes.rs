//! Defines the HTTP routes for the admin-only account endpoints.

use crate::api::account::handlers::list_accounts;
use crate::auth::middleware::{require_account, require_admin};
use axum::{Router, middleware, routing::get};

/// Creates the account router. The guard runs first, then the role gate.
pub fn account_router() -> Router {
    Router::new().route(
        "/",
        get(list_accounts)
            .layer(middleware::from_fn(require_admin))
            .layer(middleware::from_fn(require_account)),
    )
}
