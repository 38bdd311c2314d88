//! Database test fixtures and utilities
//!
//! Provides a Postgres-backed fixture for provisioning tests. Tests that
//! need it call [`TestDatabase::maybe_new`] and return early when no
//! database is configured, so the suite stays green on machines without
//! Postgres.

use sqlx::PgPool;

/// Test database fixture.
///
/// Connects with `DATABASE_URL`, runs migrations, and truncates the auth
/// tables so each test starts clean.
pub struct TestDatabase {
    pool: PgPool,
}

impl TestDatabase {
    /// Create the fixture, or `None` when `DATABASE_URL` is not set or
    /// the database is unreachable.
    pub async fn maybe_new() -> Option<Self> {
        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("skipping: DATABASE_URL not set");
                return None;
            }
        };

        let pool = match PgPool::connect(&database_url).await {
            Ok(pool) => pool,
            Err(e) => {
                eprintln!("skipping: failed to connect to test database: {e}");
                return None;
            }
        };

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("failed to run migrations");

        let db = Self { pool };
        db.cleanup().await.expect("failed to clean test database");
        Some(db)
    }

    /// Get the database pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Remove all test data while preserving the schema.
    pub async fn cleanup(&self) -> Result<(), sqlx::Error> {
        sqlx::query("TRUNCATE TABLE profiles, landlords, tenants CASCADE")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
