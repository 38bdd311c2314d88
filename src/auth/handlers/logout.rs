/**
 * Logout Handler
 *
 * POST /api/auth/logout revokes the provider session (best effort) and
 * clears the session cookies. Clearing the cookies is what actually ends
 * the browser session, so provider failures are logged and ignored.
 */

use axum::{extract::State, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::cookies;
use crate::server::state::AppState;

/// Logout handler.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    if let Some((access_token, _)) = cookies::read_tokens(&jar) {
        if let Err(e) = state.identity.sign_out(&access_token).await {
            tracing::warn!(error = %e, "provider sign-out failed, clearing cookies anyway");
        }
    }

    tracing::info!("session cookies cleared");
    (cookies::clear_session(jar), StatusCode::NO_CONTENT)
}
