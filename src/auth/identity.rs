/**
 * Identity Types and Provider Interface
 *
 * This module defines the types that describe an authenticated principal
 * and the narrow interface the rest of the core uses to talk to the
 * external identity service.
 *
 * The identity service owns sign-up, password verification, OAuth code
 * exchange, and token issuance. This application never sees a password
 * hash or mints a token itself; it only transports provider-issued
 * access/refresh tokens in cookies and asks the provider to resolve them.
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ProviderError;

/// Account role. Stored as lowercase text on the profile row, which is the
/// single source of truth for authorization decisions after provisioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tenant,
    Landlord,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Tenant => "tenant",
            Role::Landlord => "landlord",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tenant" => Ok(Role::Tenant),
            "landlord" => Ok(Role::Landlord),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Free-form metadata bag attached to an identity at sign-up time.
///
/// The `role` here is only a hint used during first-time provisioning.
/// Once a profile row exists, its recorded role is authoritative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// The authenticated principal as reported by the identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Unique identity id, assigned by the provider and immutable.
    pub id: Uuid,
    /// Email address the identity signed up with.
    pub email: String,
    /// Metadata captured at sign-up (names, phone, role hint, company).
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// A provider-issued session: token pair plus the identity it belongs to.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds, when the provider reports one.
    pub expires_in: Option<i64>,
    pub user: Identity,
}

/// Result of resolving the tokens presented on a request.
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub session: AuthSession,
    /// True when the access token was expired and the provider issued a
    /// fresh token pair from the refresh token. The caller must then
    /// rewrite the session cookies so the browser picks up the rotation.
    pub rotated: bool,
}

/// Client interface to the external identity service.
///
/// One implementation talks HTTP to the real service
/// ([`HttpIdentityProvider`](crate::auth::provider::HttpIdentityProvider));
/// tests substitute an in-memory fake. Handlers receive it as
/// `Arc<dyn IdentityProvider>` through application state, so nothing in
/// the core holds ambient global client state.
///
/// Timeouts and retries are the provider client's concern. Failures are
/// propagated as-is; the core never retries on its own.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new identity. The provider sends a confirmation email;
    /// the returned identity is unconfirmed until the user follows it.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &UserMetadata,
    ) -> Result<Identity, ProviderError>;

    /// Password sign-in. Fails with `InvalidCredentials` on mismatch.
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ProviderError>;

    /// Build the provider's authorization URL for a social sign-in
    /// redirect. `extra_params` are forwarded verbatim in the query
    /// string and come back on the callback.
    fn authorize_url(
        &self,
        provider: &str,
        redirect_to: &str,
        extra_params: &[(String, String)],
    ) -> String;

    /// Exchange a single-use authorization code for a session. A replayed
    /// code fails with `ExchangeFailed`.
    async fn exchange_code_for_session(&self, code: &str) -> Result<AuthSession, ProviderError>;

    /// Resolve the session behind an access/refresh token pair.
    ///
    /// Returns `Ok(None)` when the tokens do not correspond to a live
    /// session (expired and unrefreshable, revoked, or garbage). Returns
    /// `Err` only for provider or transport failures; callers treat that
    /// as "no valid session" and fail closed.
    async fn resolve_session(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> Result<Option<ResolvedSession>, ProviderError>;

    /// Fetch the identity behind an access token.
    async fn get_user(&self, access_token: &str) -> Result<Identity, ProviderError>;

    /// Re-send the sign-up confirmation email.
    async fn resend_confirmation(&self, email: &str) -> Result<(), ProviderError>;

    /// Revoke the session behind an access token. Best effort; clearing
    /// the session cookies is what actually ends the browser session.
    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!("tenant".parse::<Role>().unwrap(), Role::Tenant);
        assert_eq!("landlord".parse::<Role>().unwrap(), Role::Landlord);
        assert_eq!(Role::Landlord.as_str(), "landlord");
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Tenant).unwrap(), "\"tenant\"");
        let role: Role = serde_json::from_str("\"landlord\"").unwrap();
        assert_eq!(role, Role::Landlord);
    }

    #[test]
    fn test_metadata_defaults_when_fields_missing() {
        let metadata: UserMetadata = serde_json::from_str("{}").unwrap();
        assert_eq!(metadata, UserMetadata::default());
        assert!(metadata.role.is_none());
    }

    #[test]
    fn test_metadata_partial_deserialization() {
        let metadata: UserMetadata =
            serde_json::from_str(r#"{"first_name":"Ada","role":"landlord","company":"Roost LLC"}"#)
                .unwrap();
        assert_eq!(metadata.first_name.as_deref(), Some("Ada"));
        assert_eq!(metadata.role, Some(Role::Landlord));
        assert_eq!(metadata.company.as_deref(), Some("Roost LLC"));
        assert!(metadata.phone.is_none());
    }

    #[test]
    fn test_identity_tolerates_missing_metadata() {
        let identity: Identity = serde_json::from_str(
            r#"{"id":"3fa85f64-5717-4562-b3fc-2c963f66afa6","email":"ada@example.com"}"#,
        )
        .unwrap();
        assert_eq!(identity.email, "ada@example.com");
        assert!(identity.user_metadata.role.is_none());
    }
}
