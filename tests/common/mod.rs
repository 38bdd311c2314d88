//! Common test utilities and helpers
//!
//! This module provides shared utilities for the integration tests:
//! - Database test fixture (skipped when DATABASE_URL is unset)
//! - In-memory fake identity provider with single-use codes
//! - Application and cookie helpers

#![allow(dead_code)]

pub mod database;
pub mod fake_identity;

use std::sync::Arc;

use roost::server::{create_app_with, ServerConfig};
use sqlx::PgPool;

use fake_identity::FakeIdentityProvider;

/// Server configuration pointing at nothing real; fine for tests that
/// run against the fake identity provider.
pub fn test_config() -> Arc<ServerConfig> {
    Arc::new(ServerConfig {
        identity_url: "http://identity.test".to_string(),
        identity_public_key: "test-public-key".to_string(),
        public_base_url: "http://localhost:3000".to_string(),
    })
}

/// Build the application with a fake identity provider and an optional
/// database pool.
pub fn test_app(identity: Arc<FakeIdentityProvider>, db_pool: Option<PgPool>) -> axum::Router<()> {
    create_app_with(identity, db_pool, test_config())
}

/// Cookie header value presenting a session's token pair.
pub fn session_cookie_header(access_token: &str, refresh_token: &str) -> String {
    format!(
        "{}={}; {}={}",
        roost::auth::cookies::ACCESS_TOKEN_COOKIE,
        access_token,
        roost::auth::cookies::REFRESH_TOKEN_COOKIE,
        refresh_token,
    )
}
