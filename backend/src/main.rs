//! Main entry point for the UserGate backend.
//!
//! This file initializes the Axum web server, sets up the database connection
//! and migrations, and builds the application state. It orchestrates the
//! application's startup and defines its overall structure.

use tracing::info;
use tracing_subscriber::fmt::init;
use usergate::config::Config;
use usergate::database::Database;
use usergate::state::{AppState, build_mailer};

#[tokio::main]
async fn main() {
    init();

    let config = Config::from_env().unwrap();
    let db = Database::new(&config).await.unwrap();
    db.run_migrations().await.unwrap();

    let mailer = build_mailer(&config);
    let state = AppState::new(db.pool().clone(), config.clone(), mailer).unwrap();

    let app = usergate::app(state);

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await.unwrap();

    info!("Starting UserGate server on port {}", config.server_port);
    axum::serve(listener, app).await.unwrap();
}
