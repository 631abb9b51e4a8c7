//! Admin-only account endpoints.

pub mod handlers;
pub mod routes;
