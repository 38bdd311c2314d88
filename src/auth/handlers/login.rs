/**
 * Login Handler
 *
 * This module implements the password sign-in handler for
 * POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Authenticate against the identity provider (the provider owns
 *    password verification; this service never sees a hash)
 * 2. Write the provider-issued token pair as session cookies
 * 3. Load the recorded profile role and reject a mismatched sign-in
 *    before anything is written
 * 4. Return the identity and its role
 *
 * # Security
 *
 * - Invalid credentials return 401 with no detail (no enumeration)
 * - Role mismatch is rejected before any data write occurs
 * - Tokens travel only in http-only cookies, never in the JSON body
 */

use axum::{extract::State, response::Json};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::handlers::types::{LoginRequest, SessionResponse, UserResponse};
use crate::auth::provisioning::{effective_role, recorded_role};
use crate::auth::session::{establish_session, AuthEvent};
use crate::error::AuthFlowError;
use crate::server::state::AppState;

/// Login handler.
///
/// # Errors
///
/// * `401 Unauthorized` - credentials rejected by the identity provider
/// * `403 Forbidden` - the account's recorded role conflicts with the
///   requested one, or the account has no profile (sign-up incomplete)
/// * `503 Service Unavailable` - database not configured
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), AuthFlowError> {
    let pool = state
        .db_pool
        .clone()
        .ok_or_else(|| AuthFlowError::Unavailable("database not configured".to_string()))?;

    tracing::info!(email = %request.email, "login request");

    let event = AuthEvent::Password {
        email: request.email,
        password: request.password,
    };
    let (jar, identity) = establish_session(state.identity.as_ref(), jar, event).await?;

    let recorded = recorded_role(&pool, identity.id)
        .await
        .map_err(|e| AuthFlowError::Unexpected(e.to_string()))?;

    // Login never provisions. An account without a profile never finished
    // sign-up, and pretending otherwise would break every downstream
    // authorization check that reads the profile role.
    if recorded.is_none() {
        tracing::warn!(user_id = %identity.id, "login without a provisioned profile");
        return Err(AuthFlowError::ProfileMissing);
    }

    let role = effective_role(recorded, request.role, identity.user_metadata.role)
        .map_err(|recorded| AuthFlowError::RoleMismatch { recorded })?;

    tracing::info!(user_id = %identity.id, role = %role, "login successful");

    let user = UserResponse::from_identity(&identity, role);
    Ok((jar, Json(SessionResponse { user })))
}
