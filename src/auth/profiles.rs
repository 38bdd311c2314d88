/**
 * Profile and Role-Record Database Operations
 *
 * This module handles the application-owned rows behind an identity:
 * the profile (authoritative role) and the role-specific landlord or
 * tenant record.
 *
 * All writes are upserts keyed on the identity id, so concurrent
 * duplicate provisioning attempts converge on the storage layer instead
 * of racing into duplicate rows.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgExecutor;
use uuid::Uuid;

use crate::auth::identity::Role;

/// Profile row. `role` is stored as lowercase text and is the single
/// source of truth for authorization once provisioning has run.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Landlord row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Landlord {
    pub id: Uuid,
    pub company_name: Option<String>,
    pub verification_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tenant row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tenant {
    pub id: Uuid,
    pub background_check_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Get a profile by identity id.
pub async fn get_profile_by_id<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        r#"
        SELECT id, first_name, last_name, phone, role, created_at, updated_at
        FROM profiles
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Upsert a profile keyed by identity id.
///
/// A true upsert: on conflict every field is overwritten with the same
/// deterministic values, so repeated invocations converge to the same
/// state.
pub async fn upsert_profile<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    role: Role,
    first_name: Option<&str>,
    last_name: Option<&str>,
    phone: Option<&str>,
) -> Result<(), sqlx::Error> {
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO profiles (id, first_name, last_name, phone, role, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        ON CONFLICT (id) DO UPDATE SET
            first_name = EXCLUDED.first_name,
            last_name = EXCLUDED.last_name,
            phone = EXCLUDED.phone,
            role = EXCLUDED.role,
            updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(id)
    .bind(first_name)
    .bind(last_name)
    .bind(phone)
    .bind(role.as_str())
    .bind(now)
    .execute(executor)
    .await?;

    Ok(())
}

/// Upsert a landlord row keyed by identity id.
///
/// `verification_status` defaults to `pending` only on first insert. The
/// conflict arm deliberately leaves it alone: a verified landlord who
/// signs in again must stay verified.
pub async fn upsert_landlord<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    company_name: Option<&str>,
) -> Result<(), sqlx::Error> {
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO landlords (id, company_name, verification_status, created_at, updated_at)
        VALUES ($1, $2, 'pending', $3, $3)
        ON CONFLICT (id) DO UPDATE SET
            company_name = EXCLUDED.company_name,
            updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(id)
    .bind(company_name)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(())
}

/// Upsert a tenant row keyed by identity id.
///
/// `background_check_status` behaves like the landlord verification
/// status: defaulted on insert, preserved on conflict.
pub async fn upsert_tenant<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<(), sqlx::Error> {
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO tenants (id, background_check_status, created_at, updated_at)
        VALUES ($1, 'pending', $2, $2)
        ON CONFLICT (id) DO UPDATE SET
            updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(id)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(())
}

/// Get a landlord row by identity id.
pub async fn get_landlord_by_id<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<Landlord>, sqlx::Error> {
    sqlx::query_as::<_, Landlord>(
        r#"
        SELECT id, company_name, verification_status, created_at, updated_at
        FROM landlords
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Get a tenant row by identity id.
pub async fn get_tenant_by_id<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<Tenant>, sqlx::Error> {
    sqlx::query_as::<_, Tenant>(
        r#"
        SELECT id, background_check_status, created_at, updated_at
        FROM tenants
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}
