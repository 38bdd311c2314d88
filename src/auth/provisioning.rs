/**
 * Role Provisioning
 *
 * Given a freshly authenticated identity and an effective role, guarantee
 * that the profile and the role-specific record both exist, without
 * duplicating or corrupting existing data.
 *
 * Both writes run in one database transaction, so an abort cannot leave
 * a profile without its role record. The upserts themselves are keyed on
 * the identity id, which makes concurrent duplicate provisioning (two
 * tabs finishing sign-up at once) converge at the storage layer.
 *
 * Role conflicts are the caller's problem: the login and callback flows
 * reject a requested role that contradicts the recorded one before this
 * module runs. `provision` only provisions.
 */

use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::identity::{Identity, Role};
use crate::auth::profiles;
use crate::error::ProvisioningError;

/// The role already recorded on this identity's profile, if any.
///
/// This is the authoritative role. A client-supplied role is only a
/// proposal for first-time provisioning and must never override it.
pub async fn recorded_role(pool: &PgPool, id: Uuid) -> Result<Option<Role>, sqlx::Error> {
    let profile = profiles::get_profile_by_id(pool, id).await?;
    Ok(profile.and_then(|p| p.role.parse().ok()))
}

/// Decide the effective role for a sign-in, rejecting conflicts.
///
/// Precedence: recorded profile role, then the role the request asked
/// for, then the role hint in the identity metadata, then tenant. An
/// explicit requested role that contradicts the recorded one is a
/// conflict and comes back as `Err(recorded)` so the caller can reject
/// the sign-in before anything is written.
pub fn effective_role(
    recorded: Option<Role>,
    requested: Option<Role>,
    metadata_hint: Option<Role>,
) -> Result<Role, Role> {
    match (recorded, requested) {
        (Some(recorded), Some(requested)) if recorded != requested => Err(recorded),
        (Some(recorded), _) => Ok(recorded),
        (None, requested) => Ok(requested.or(metadata_hint).unwrap_or(Role::Tenant)),
    }
}

/// Ensure the profile and role record exist for `identity` with `role`.
///
/// Idempotent: repeated calls converge to the same state, and role-record
/// status fields set after first provisioning survive later calls.
///
/// # Errors
///
/// * `ProfileWriteFailed` - the profile upsert (or opening the
///   transaction) failed
/// * `RoleRecordWriteFailed` - the landlord/tenant upsert or the commit
///   failed
pub async fn provision(
    pool: &PgPool,
    identity: &Identity,
    role: Role,
) -> Result<(), ProvisioningError> {
    let metadata = &identity.user_metadata;

    let mut tx = pool
        .begin()
        .await
        .map_err(ProvisioningError::ProfileWriteFailed)?;

    profiles::upsert_profile(
        &mut *tx,
        identity.id,
        role,
        metadata.first_name.as_deref(),
        metadata.last_name.as_deref(),
        metadata.phone.as_deref(),
    )
    .await
    .map_err(ProvisioningError::ProfileWriteFailed)?;

    match role {
        Role::Landlord => {
            profiles::upsert_landlord(&mut *tx, identity.id, metadata.company.as_deref())
                .await
                .map_err(ProvisioningError::RoleRecordWriteFailed)?;
        }
        Role::Tenant => {
            profiles::upsert_tenant(&mut *tx, identity.id)
                .await
                .map_err(ProvisioningError::RoleRecordWriteFailed)?;
        }
    }

    tx.commit()
        .await
        .map_err(ProvisioningError::RoleRecordWriteFailed)?;

    tracing::info!(user_id = %identity.id, role = %role, "identity provisioned");
    Ok(())
}
