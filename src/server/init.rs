/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP
 * server: configuration loading, identity client construction, database
 * loading, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Load configuration from the environment
 * 2. Construct the HTTP identity provider client
 * 3. Load the optional database pool and run migrations
 * 4. Assemble the router with the route gate layered on top
 *
 * Missing services degrade rather than abort: without a database the
 * server still gates routes and serves pages, and provisioning-dependent
 * endpoints answer 503.
 */

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use crate::auth::identity::IdentityProvider;
use crate::auth::provider::HttpIdentityProvider;
use crate::routes::router::create_router;
use crate::server::config::{load_database, ServerConfig};
use crate::server::state::AppState;

/// Create and configure the Axum application from the environment.
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing Roost auth server");

    let config = Arc::new(ServerConfig::from_env());
    let identity: Arc<dyn IdentityProvider> = Arc::new(HttpIdentityProvider::new(&config));
    let db_pool = load_database().await;

    create_app_with(identity, db_pool, config)
}

/// Assemble the application from explicit parts.
///
/// Used directly by tests to substitute a fake identity provider or an
/// isolated database pool.
pub fn create_app_with(
    identity: Arc<dyn IdentityProvider>,
    db_pool: Option<PgPool>,
    config: Arc<ServerConfig>,
) -> Router<()> {
    let app_state = AppState {
        identity,
        db_pool,
        config,
    };

    tracing::info!("Router configured");
    create_router(app_state)
}
