/**
 * Authentication Handler Types
 *
 * Request and response types shared across the authentication handlers.
 */

use serde::{Deserialize, Serialize};

use crate::auth::identity::{Identity, Role};

/// Sign up request.
#[derive(Deserialize, Serialize, Debug)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Plaintext password, forwarded to the identity provider. Never stored.
    pub password: String,
    /// Company name; only meaningful for landlords.
    #[serde(default)]
    pub company: Option<String>,
    /// Role this account wants. A proposal, not a promise: once a profile
    /// exists its recorded role wins.
    #[serde(default)]
    pub role: Option<Role>,
}

/// Login request.
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// The account type tab the user signed in under, if any.
    #[serde(default)]
    pub role: Option<Role>,
}

/// Resend-confirmation request.
#[derive(Deserialize, Serialize, Debug)]
pub struct ResendRequest {
    pub email: String,
}

/// User info returned by login and `me` (no tokens; those live in cookies).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UserResponse {
    pub fn from_identity(identity: &Identity, role: Role) -> Self {
        Self {
            id: identity.id.to_string(),
            email: identity.email.clone(),
            role,
            first_name: identity.user_metadata.first_name.clone(),
            last_name: identity.user_metadata.last_name.clone(),
        }
    }
}

/// Session response returned once cookies have been written.
#[derive(Serialize, Deserialize, Debug)]
pub struct SessionResponse {
    pub user: UserResponse,
}

/// Signup response. The session does not exist yet; the user must follow
/// the confirmation email first.
#[derive(Serialize, Deserialize, Debug)]
pub struct SignupResponse {
    /// Address the confirmation email was sent to, so the client can
    /// route to the verify-email page.
    pub email: String,
    pub confirmation_sent: bool,
}

/// Resend-confirmation response.
#[derive(Serialize, Deserialize, Debug)]
pub struct ResendResponse {
    pub sent: bool,
}
