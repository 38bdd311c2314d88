/**
 * Application State
 *
 * This module defines the application state structure and implements the
 * `FromRef` traits for Axum state extraction.
 *
 * The identity provider client lives here as `Arc<dyn IdentityProvider>`
 * and is injected into every handler and middleware call. There is no
 * module-level client; tests substitute an in-memory fake by building
 * the state with a different implementation.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::identity::IdentityProvider;
use crate::server::config::ServerConfig;

/// Application state shared by all handlers.
///
/// # Fields
///
/// * `identity` - the identity provider client (real or fake)
/// * `db_pool` - optional PostgreSQL pool; `None` when the database is
///   not configured, in which case provisioning-dependent handlers
///   answer 503
/// * `config` - environment-driven server configuration
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    pub db_pool: Option<PgPool>,
    pub config: Arc<ServerConfig>,
}

/// Allow handlers to extract the identity client directly.
impl FromRef<AppState> for Arc<dyn IdentityProvider> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.identity.clone()
    }
}

/// Allow handlers to extract the optional database pool directly.
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

/// Allow handlers to extract the configuration directly.
impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
