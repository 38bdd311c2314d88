/**
 * Server Configuration
 *
 * This module handles loading server configuration from the environment,
 * including the identity service endpoint and the optional PostgreSQL
 * connection.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables, with local-dev
 * defaults where that is safe.
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent server startup. If
 * the database is unavailable the pool is `None` and handlers that need
 * it answer 503 instead.
 */

use sqlx::PgPool;

/// Environment-driven server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the identity service's auth API.
    pub identity_url: String,
    /// Public (anon) API key sent with every identity service request.
    pub identity_public_key: String,
    /// Externally visible base URL of this server, used to build the
    /// OAuth callback redirect target.
    pub public_base_url: String,
}

impl ServerConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        let identity_url = std::env::var("IDENTITY_URL").unwrap_or_else(|_| {
            tracing::warn!("IDENTITY_URL not set, defaulting to http://localhost:9999");
            "http://localhost:9999".to_string()
        });

        let identity_public_key = std::env::var("IDENTITY_PUBLIC_KEY").unwrap_or_else(|_| {
            tracing::warn!("IDENTITY_PUBLIC_KEY not set, identity requests will be unauthenticated");
            String::new()
        });

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        Self {
            identity_url,
            identity_public_key,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Database configuration result.
///
/// Contains the connection pool if successfully configured, or `None`
/// if the database is not available.
pub type DatabaseConfig = Option<PgPool>;

/// Load and initialize the database connection pool.
///
/// Reads `DATABASE_URL`, connects, and runs migrations. Returns `None`
/// on any failure so the server can still start; handlers that need the
/// database degrade to 503 instead of the whole process refusing to boot.
pub async fn load_database() -> DatabaseConfig {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set. Provisioning will be disabled.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Provisioning will be disabled.");
            return None;
        }
    };

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed");
        }
        Err(e) => {
            // Migrations may already have been applied by another instance.
            tracing::error!("Failed to run database migrations: {:?}", e);
            tracing::warn!("Continuing without migrations");
        }
    }

    Some(pool)
}
