/**
 * Authentication Route Configuration
 *
 * This module registers the authentication endpoints:
 *
 * ## Browser flows
 * - `GET /auth/callback` - OAuth/code-exchange landing point
 * - `GET /auth/confirm` - email-confirmation deep link
 * - `GET /auth/sign-in/{provider}` - social sign-in initiation
 *
 * ## JSON API
 * - `POST /api/auth/signup` - registration
 * - `POST /api/auth/login` - password login
 * - `POST /api/auth/logout` - session teardown
 * - `POST /api/auth/resend` - re-send confirmation email
 * - `GET  /api/auth/me` - current identity and role
 *
 * All of these manage sessions themselves, so the route gate treats
 * them as public.
 */

use axum::Router;

use crate::auth::handlers::{
    auth_callback, auth_confirm, get_me, login, logout, oauth_sign_in, resend_confirmation, signup,
};
use crate::server::state::AppState;

/// Add the authentication routes to the router.
pub fn configure_auth_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Browser-facing flows
        .route("/auth/callback", axum::routing::get(auth_callback))
        .route("/auth/confirm", axum::routing::get(auth_confirm))
        .route("/auth/sign-in/{provider}", axum::routing::get(oauth_sign_in))
        // JSON API
        .route("/api/auth/signup", axum::routing::post(signup))
        .route("/api/auth/login", axum::routing::post(login))
        .route("/api/auth/logout", axum::routing::post(logout))
        .route("/api/auth/resend", axum::routing::post(resend_confirmation))
        .route("/api/auth/me", axum::routing::get(get_me))
}
