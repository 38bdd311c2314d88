/**
 * Session Cookie Handling
 *
 * The session is carried in two root-scoped cookies, one per token.
 * Everything here operates on the request's `CookieJar`; returning the
 * jar from a handler attaches the mutations to the outgoing response,
 * so cookie changes are always bound to the concrete request/response
 * pair being processed.
 */

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::auth::identity::AuthSession;

/// Cookie carrying the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "roost-access-token";
/// Cookie carrying the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "roost-refresh-token";

/// Bounds how long an idle browser can come back and still rotate its
/// refresh token into a fresh session.
const REFRESH_TOKEN_TTL_DAYS: i64 = 30;
/// Fallback when the provider does not report an access token lifetime.
const DEFAULT_ACCESS_TTL_SECONDS: i64 = 3600;

fn session_cookie(name: &str, value: &str, max_age: Duration) -> Cookie<'static> {
    Cookie::build((name.to_string(), value.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .build()
}

fn removal_cookie(name: &str) -> Cookie<'static> {
    Cookie::build((name.to_string(), ""))
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

/// Write both session cookies for a provider-issued session.
pub fn write_session(jar: CookieJar, session: &AuthSession) -> CookieJar {
    let access_ttl = Duration::seconds(
        session
            .expires_in
            .unwrap_or(DEFAULT_ACCESS_TTL_SECONDS)
            .max(0),
    );
    jar.add(session_cookie(
        ACCESS_TOKEN_COOKIE,
        &session.access_token,
        access_ttl,
    ))
    .add(session_cookie(
        REFRESH_TOKEN_COOKIE,
        &session.refresh_token,
        Duration::days(REFRESH_TOKEN_TTL_DAYS),
    ))
}

/// Clear both session cookies.
pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.add(removal_cookie(ACCESS_TOKEN_COOKIE))
        .add(removal_cookie(REFRESH_TOKEN_COOKIE))
}

/// Read the token pair off a request, if present.
///
/// A refresh token without an access token is useless on its own, so the
/// access token decides whether a session is being presented at all.
pub fn read_tokens(jar: &CookieJar) -> Option<(String, Option<String>)> {
    let access = jar
        .get(ACCESS_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())?;
    let refresh = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty());
    Some((access, refresh))
}
