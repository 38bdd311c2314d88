/**
 * Authentication Error Types
 *
 * This module defines the error taxonomy for the authentication core.
 *
 * # Error Categories
 *
 * ## Provider Errors
 *
 * The external identity service rejected or failed a request:
 * - Invalid credentials on password sign-in
 * - Invalid, expired, or already-consumed authorization codes
 * - Rate limiting on sign-up
 * - Network or 5xx failures reaching the service
 *
 * ## Provisioning Errors
 *
 * Writing the profile or role-specific record failed. These are kept
 * distinguishable so the product can tell the user to restart sign-up
 * rather than re-enter a password.
 *
 * ## Flow Errors
 *
 * `AuthFlowError` is the top-level type returned by handlers and the
 * route gate. Anything unexpected fails closed: the user is sent back
 * to the login page and session cookies are cleared.
 */

use thiserror::Error;

use crate::auth::identity::Role;

/// Errors reported by the external identity service client.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Password sign-in rejected. Deliberately carries no detail so the
    /// response cannot distinguish unknown email from wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Authorization code exchange failed. Codes are single use, so a
    /// replayed code lands here as well.
    #[error("code exchange failed: {0}")]
    ExchangeFailed(String),

    /// Session tokens from a confirmation deep link were not accepted.
    #[error("session tokens rejected")]
    TokensRejected,

    /// The identity service is rate limiting this client.
    #[error("too many attempts, please try again in a few minutes")]
    RateLimited,

    /// The identity service rejected the request with a user-facing reason
    /// (for example, an already-registered email on sign-up).
    #[error("{0}")]
    Rejected(String),

    /// Network failure or 5xx from the identity service.
    #[error("identity service error: {0}")]
    Service(String),
}

/// Errors from the role bootstrapper's database writes.
#[derive(Debug, Error)]
pub enum ProvisioningError {
    /// The profile upsert failed. The user must not proceed to the
    /// authenticated area: every downstream authorization check reads
    /// the profile role.
    #[error("profile write failed: {0}")]
    ProfileWriteFailed(#[source] sqlx::Error),

    /// The landlord or tenant upsert failed.
    #[error("role record write failed: {0}")]
    RoleRecordWriteFailed(#[source] sqlx::Error),
}

/// Top-level error type for the authentication flow.
///
/// JSON API handlers return this directly (see the `IntoResponse`
/// implementation in `conversion`). Redirect-based flows map it to a
/// login redirect via [`redirect_code`](AuthFlowError::redirect_code).
#[derive(Debug, Error)]
pub enum AuthFlowError {
    /// The identity provider rejected credentials, a code, or tokens.
    #[error(transparent)]
    Auth(#[from] ProviderError),

    /// The provider reported success but the session carried no principal.
    #[error("no user in session")]
    NoUserInSession,

    /// The OAuth callback was reached without an authorization code.
    #[error("missing authorization code")]
    MissingCode,

    /// A session is required but none was presented or resolvable.
    #[error("not signed in")]
    SessionRequired,

    /// The account already has a recorded role that conflicts with the
    /// role this sign-in asked for. Rejected before any write happens.
    #[error("this account is registered as a {recorded}")]
    RoleMismatch {
        /// The authoritative role stored on the profile.
        recorded: Role,
    },

    /// The account has no profile yet. Sign-up was never completed.
    #[error("no profile found for this account")]
    ProfileMissing,

    /// Profile or role-record provisioning failed.
    #[error(transparent)]
    Provisioning(#[from] ProvisioningError),

    /// A required service is not configured (for example, no database).
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Anything else. Always fails closed.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AuthFlowError {
    /// Short, URL-safe error code used in `/login?error=...` redirects.
    ///
    /// Provider rejections surface their human-readable message so the
    /// login page can display it; internal failures map to fixed codes.
    pub fn redirect_code(&self) -> String {
        match self {
            Self::Auth(err) => err.to_string(),
            Self::NoUserInSession => "no_user".to_string(),
            Self::MissingCode => "missing_code".to_string(),
            Self::SessionRequired => "session_required".to_string(),
            Self::RoleMismatch { .. } => "role_mismatch".to_string(),
            Self::ProfileMissing => "profile_missing".to_string(),
            Self::Provisioning(ProvisioningError::ProfileWriteFailed(_)) => {
                "profile_write_failed".to_string()
            }
            Self::Provisioning(ProvisioningError::RoleRecordWriteFailed(_)) => {
                "role_record_write_failed".to_string()
            }
            Self::Unavailable(_) => "service_unavailable".to_string(),
            Self::Unexpected(_) => "unexpected_error".to_string(),
        }
    }
}
