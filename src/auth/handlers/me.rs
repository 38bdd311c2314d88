/**
 * Current User Handler
 *
 * GET /api/auth/me resolves the session behind the request's cookies and
 * returns the identity together with its recorded profile role. This is
 * what the dashboard shell calls to decide which navigation to render.
 *
 * If the provider rotated tokens while resolving, the fresh pair is
 * written back as cookies on this response.
 */

use axum::{extract::State, response::Json};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::cookies;
use crate::auth::handlers::types::{SessionResponse, UserResponse};
use crate::auth::provisioning::recorded_role;
use crate::error::AuthFlowError;
use crate::server::state::AppState;

/// Current user handler.
///
/// # Errors
///
/// * `401 Unauthorized` - no cookies, or the tokens resolve to no session
/// * `403 Forbidden` - session is live but the account has no profile
/// * `503 Service Unavailable` - database not configured
pub async fn get_me(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<SessionResponse>), AuthFlowError> {
    let Some((access_token, refresh_token)) = cookies::read_tokens(&jar) else {
        return Err(AuthFlowError::SessionRequired);
    };

    let resolved = state
        .identity
        .resolve_session(&access_token, refresh_token.as_deref())
        .await?
        .ok_or(AuthFlowError::SessionRequired)?;

    let jar = if resolved.rotated {
        cookies::write_session(jar, &resolved.session)
    } else {
        jar
    };

    let pool = state
        .db_pool
        .as_ref()
        .ok_or_else(|| AuthFlowError::Unavailable("database not configured".to_string()))?;

    let identity = resolved.session.user;
    let role = recorded_role(pool, identity.id)
        .await
        .map_err(|e| AuthFlowError::Unexpected(e.to_string()))?
        .ok_or(AuthFlowError::ProfileMissing)?;

    let user = UserResponse::from_identity(&identity, role);
    Ok((jar, Json(SessionResponse { user })))
}
