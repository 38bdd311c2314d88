/**
 * Error Conversion
 *
 * This module provides conversion implementations for authentication errors,
 * allowing them to be converted to HTTP responses.
 *
 * # Two response shapes
 *
 * JSON API handlers (login, signup, me, ...) return `AuthFlowError` directly
 * and get a status code plus a JSON body:
 *
 * ```json
 * {
 *   "error": "invalid email or password",
 *   "status": 401
 * }
 * ```
 *
 * Browser-facing flows (the OAuth callback, the email-confirmation deep link,
 * the route gate) instead redirect back to the login page with a short error
 * code in the query string, via `login_error_redirect`.
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::error::types::{AuthFlowError, ProviderError};

/// Redirect to the login page with an error code in the query string.
///
/// Used by redirect-based flows where a JSON error body would never be
/// seen by anyone.
pub fn login_error_redirect(code: &str) -> Response {
    let encoded = urlencoding::encode(code);
    Redirect::to(&format!("/login?error={encoded}")).into_response()
}

impl AuthFlowError {
    /// HTTP status code for the JSON API representation of this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Auth(ProviderError::InvalidCredentials)
            | Self::Auth(ProviderError::ExchangeFailed(_))
            | Self::Auth(ProviderError::TokensRejected) => StatusCode::UNAUTHORIZED,
            Self::Auth(ProviderError::RateLimited) => StatusCode::TOO_MANY_REQUESTS,
            Self::Auth(ProviderError::Rejected(_)) => StatusCode::BAD_REQUEST,
            Self::Auth(ProviderError::Service(_)) => StatusCode::BAD_GATEWAY,
            Self::NoUserInSession | Self::SessionRequired => StatusCode::UNAUTHORIZED,
            Self::MissingCode => StatusCode::BAD_REQUEST,
            Self::RoleMismatch { .. } | Self::ProfileMissing => StatusCode::FORBIDDEN,
            Self::Provisioning(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthFlowError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "auth flow error");
        } else {
            tracing::warn!(error = %self, "auth flow rejected");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
