/**
 * Route Gate Middleware
 *
 * This middleware runs on every request and enforces the route partition:
 *
 * - **public** routes pass through for everyone
 * - **auth-only** routes (login, signup) bounce signed-in users to the
 *   dashboard
 * - **protected** routes (everything else) bounce anonymous users to the
 *   login page, preserving the requested path in `redirectTo`
 *
 * Session resolution is delegated to the identity provider client using
 * the request's cookies. If the provider rotates tokens while resolving,
 * the fresh pair is written onto the response. If resolution fails
 * outright (network, provider outage), the gate fails closed: redirect
 * to login and clear both session cookies so a corrupt session cannot
 * loop.
 *
 * The gate reads cookies and writes cookies. It never touches business
 * data.
 */

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::cookies;
use crate::auth::identity::ResolvedSession;
use crate::server::state::AppState;

/// Routes that do not require a session.
const PUBLIC_ROUTES: &[&str] = &[
    "/",
    "/login",
    "/signup",
    "/forgot-password",
    "/verify-email",
];

/// Routes that only make sense for anonymous visitors.
const AUTH_ROUTES: &[&str] = &["/login", "/signup"];

/// Prefixes that bypass session gating entirely. `/auth/` covers the
/// callback, the confirmation deep link, and social sign-in initiation;
/// `/api/auth/` endpoints manage sessions themselves; `/api/public/` is
/// the whitelisted public API surface.
const PUBLIC_PREFIXES: &[&str] = &["/auth/", "/api/auth/", "/api/public/"];

/// Static assets are outside the gate's matcher.
const ASSET_PREFIXES: &[&str] = &["/static/", "/favicon.ico"];

/// Classification of a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// No session required.
    Public,
    /// Public, but a signed-in user gets redirected to the dashboard.
    AuthOnly,
    /// Session required.
    Protected,
}

/// Classify a request path into exactly one class.
pub fn classify(path: &str) -> RouteClass {
    if AUTH_ROUTES.contains(&path) {
        return RouteClass::AuthOnly;
    }
    if PUBLIC_ROUTES.contains(&path) {
        return RouteClass::Public;
    }
    if PUBLIC_PREFIXES
        .iter()
        .chain(ASSET_PREFIXES.iter())
        .any(|prefix| path.starts_with(prefix))
    {
        return RouteClass::Public;
    }
    RouteClass::Protected
}

/// Route gate middleware.
pub async fn route_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let class = classify(&path);

    // Resolve the session first, whatever the class: rotation must be
    // able to happen on any request that presents cookies.
    let resolved = match cookies::read_tokens(&jar) {
        None => None,
        Some((access_token, refresh_token)) => {
            match state
                .identity
                .resolve_session(&access_token, refresh_token.as_deref())
                .await
            {
                Ok(resolved) => resolved,
                Err(e) => {
                    tracing::error!(error = %e, path = %path, "session resolution failed");
                    return fail_closed(jar);
                }
            }
        }
    };

    match (class, resolved) {
        (RouteClass::AuthOnly, Some(resolved)) => {
            let jar = forward_rotation(jar, &resolved);
            (jar, Redirect::to("/dashboard")).into_response()
        }
        (RouteClass::Protected, None) => {
            let redirect_to = urlencoding::encode(&path);
            Redirect::to(&format!("/login?redirectTo={redirect_to}")).into_response()
        }
        (_, Some(resolved)) => {
            let jar = forward_rotation(jar, &resolved);
            let response = next.run(request).await;
            (jar, response).into_response()
        }
        (_, None) => next.run(request).await,
    }
}

/// Rewrite the session cookies only when the provider rotated tokens.
fn forward_rotation(jar: CookieJar, resolved: &ResolvedSession) -> CookieJar {
    if resolved.rotated {
        tracing::debug!("forwarding rotated session cookies");
        cookies::write_session(jar, &resolved.session)
    } else {
        jar
    }
}

/// Redirect to login and clear the session cookies.
fn fail_closed(jar: CookieJar) -> Response {
    let jar = cookies::clear_session(jar);
    (jar, Redirect::to("/login")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_routes() {
        assert_eq!(classify("/"), RouteClass::Public);
        assert_eq!(classify("/forgot-password"), RouteClass::Public);
        assert_eq!(classify("/verify-email"), RouteClass::Public);
    }

    #[test]
    fn test_auth_only_routes() {
        assert_eq!(classify("/login"), RouteClass::AuthOnly);
        assert_eq!(classify("/signup"), RouteClass::AuthOnly);
    }

    #[test]
    fn test_auth_flow_prefixes_are_public() {
        assert_eq!(classify("/auth/callback"), RouteClass::Public);
        assert_eq!(classify("/auth/confirm"), RouteClass::Public);
        assert_eq!(classify("/auth/sign-in/google"), RouteClass::Public);
        assert_eq!(classify("/api/auth/login"), RouteClass::Public);
        assert_eq!(classify("/api/public/listings"), RouteClass::Public);
    }

    #[test]
    fn test_assets_are_public() {
        assert_eq!(classify("/static/app.css"), RouteClass::Public);
        assert_eq!(classify("/favicon.ico"), RouteClass::Public);
    }

    #[test]
    fn test_everything_else_is_protected() {
        assert_eq!(classify("/dashboard"), RouteClass::Protected);
        assert_eq!(classify("/dashboard/properties"), RouteClass::Protected);
        assert_eq!(classify("/api/leases"), RouteClass::Protected);
        // Prefix match must not leak onto sibling paths.
        assert_eq!(classify("/authors"), RouteClass::Protected);
        assert_eq!(classify("/loginx"), RouteClass::Protected);
    }
}
