//! Route gate integration tests
//!
//! Exercises the public/auth-only/protected partition end to end against
//! the assembled router, with an in-memory identity provider. No database
//! is needed: the gate only resolves sessions, it never touches rows.

mod common;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use std::sync::Arc;

use common::fake_identity::{identity_with_role, FakeIdentityProvider};
use common::{session_cookie_header, test_app};
use roost::auth::cookies::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};

fn server_with(identity: Arc<FakeIdentityProvider>) -> TestServer {
    TestServer::new(test_app(identity, None)).unwrap()
}

fn cookie_header(value: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("cookie"),
        HeaderValue::from_str(value).unwrap(),
    )
}

fn location(response: &axum_test::TestResponse) -> String {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn set_cookies(response: &axum_test::TestResponse) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(|v| v.to_string())
        .collect()
}

#[tokio::test]
async fn test_anonymous_public_route_passes_through() {
    let server = server_with(Arc::new(FakeIdentityProvider::new()));

    let response = server.get("/login").await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_anonymous_landing_passes_through() {
    let server = server_with(Arc::new(FakeIdentityProvider::new()));

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_anonymous_protected_route_redirects_to_login() {
    let server = server_with(Arc::new(FakeIdentityProvider::new()));

    let response = server.get("/dashboard/properties").await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/login?redirectTo=%2Fdashboard%2Fproperties"
    );
}

#[tokio::test]
async fn test_signed_in_auth_route_redirects_to_dashboard() {
    let identity = Arc::new(FakeIdentityProvider::new());
    let session = identity.issue_session(identity_with_role("ada@example.com", None));
    let server = server_with(identity);

    let (name, value) = cookie_header(&session_cookie_header(
        &session.access_token,
        &session.refresh_token,
    ));
    let response = server.get("/signup").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_signed_in_protected_route_passes_through() {
    let identity = Arc::new(FakeIdentityProvider::new());
    let session = identity.issue_session(identity_with_role("ada@example.com", None));
    let server = server_with(identity);

    let (name, value) = cookie_header(&session_cookie_header(
        &session.access_token,
        &session.refresh_token,
    ));
    let response = server.get("/dashboard").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    // No rotation happened, so no cookie noise on the response.
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn test_expired_access_token_rotates_cookies_on_passthrough() {
    let identity = Arc::new(FakeIdentityProvider::new());
    let session = identity.issue_session(identity_with_role("ada@example.com", None));
    identity.expire_access_token(&session.access_token);
    let server = server_with(identity);

    let (name, value) = cookie_header(&session_cookie_header(
        &session.access_token,
        &session.refresh_token,
    ));
    let response = server.get("/dashboard").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let cookies = set_cookies(&response);
    let access = cookies
        .iter()
        .find(|c| c.starts_with(ACCESS_TOKEN_COOKIE))
        .expect("rotated access token cookie");
    assert!(!access.contains(&session.access_token));
    assert!(cookies.iter().any(|c| c.starts_with(REFRESH_TOKEN_COOKIE)));
}

#[tokio::test]
async fn test_provider_outage_fails_closed_and_clears_cookies() {
    let identity = Arc::new(FakeIdentityProvider::new());
    let session = identity.issue_session(identity_with_role("ada@example.com", None));
    identity.fail_resolution(true);
    let server = server_with(identity);

    let (name, value) = cookie_header(&session_cookie_header(
        &session.access_token,
        &session.refresh_token,
    ));
    let response = server.get("/dashboard").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    let cookies = set_cookies(&response);
    assert!(cookies
        .iter()
        .any(|c| c.starts_with(ACCESS_TOKEN_COOKIE) && c.contains("Max-Age=0")));
    assert!(cookies
        .iter()
        .any(|c| c.starts_with(REFRESH_TOKEN_COOKIE) && c.contains("Max-Age=0")));
}

#[tokio::test]
async fn test_garbage_cookies_on_protected_route_redirect_to_login() {
    let server = server_with(Arc::new(FakeIdentityProvider::new()));

    let (name, value) = cookie_header(&session_cookie_header("garbage", "garbage"));
    let response = server.get("/dashboard").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?redirectTo=%2Fdashboard");
}

#[tokio::test]
async fn test_public_api_prefix_is_not_gated() {
    let server = server_with(Arc::new(FakeIdentityProvider::new()));

    // Nothing is mounted there, so the fallback answers; the point is
    // that the gate does not redirect to login.
    let response = server.get("/api/public/listings").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "404 Not Found");
}
