/**
 * Session Materialization
 *
 * Converts an authentication event into a durable, cookie-backed session
 * on the outgoing response and surfaces the resolved identity to the
 * caller.
 *
 * # Events
 *
 * - Password credentials (the login form)
 * - A single-use authorization code (the OAuth callback)
 * - An already-issued token pair (the email-confirmation deep link)
 *
 * In every case the provider issues the session; this module's job is to
 * guarantee the tokens land on the HTTP response as cookies rather than
 * staying in memory, and that the session actually carries a principal.
 */

use axum_extra::extract::cookie::CookieJar;

use crate::auth::cookies;
use crate::auth::identity::{AuthSession, Identity, IdentityProvider};
use crate::error::{AuthFlowError, ProviderError};

/// An authentication event that can be materialized into a session.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    /// Email + password from the login form.
    Password { email: String, password: String },
    /// Single-use authorization code from the OAuth callback.
    Code { code: String },
    /// Provider-issued tokens from an email-confirmation deep link.
    Tokens {
        access_token: String,
        refresh_token: Option<String>,
    },
}

/// Resolve `event` into a session, write its cookies onto `jar`, and
/// return the identity it belongs to.
///
/// # Errors
///
/// - `InvalidCredentials` for a rejected password event
/// - `ExchangeFailed` for an invalid, expired, or replayed code (codes
///   are single use by provider contract; a replay fails, it never
///   silently re-succeeds)
/// - `TokensRejected` for a dead deep-link token pair
/// - `NoUserInSession` when the provider reports success but the session
///   carries no principal
pub async fn establish_session(
    provider: &dyn IdentityProvider,
    jar: CookieJar,
    event: AuthEvent,
) -> Result<(CookieJar, Identity), AuthFlowError> {
    let session = match event {
        AuthEvent::Password { email, password } => {
            provider.sign_in_with_password(&email, &password).await?
        }
        AuthEvent::Code { code } => provider.exchange_code_for_session(&code).await?,
        AuthEvent::Tokens {
            access_token,
            refresh_token,
        } => resolve_token_event(provider, &access_token, refresh_token.as_deref()).await?,
    };

    if session.user.id.is_nil() {
        return Err(AuthFlowError::NoUserInSession);
    }

    tracing::info!(user_id = %session.user.id, "session established");

    let jar = cookies::write_session(jar, &session);
    let identity = session.user;
    Ok((jar, identity))
}

async fn resolve_token_event(
    provider: &dyn IdentityProvider,
    access_token: &str,
    refresh_token: Option<&str>,
) -> Result<AuthSession, ProviderError> {
    let resolved = provider
        .resolve_session(access_token, refresh_token)
        .await?
        .ok_or(ProviderError::TokensRejected)?;
    Ok(resolved.session)
}
