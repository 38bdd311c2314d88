//! In-memory identity provider for tests.
//!
//! Behaves like the real service where it matters for the flows under
//! test: password accounts, single-use authorization codes, access
//! tokens that can be expired to force a refresh rotation, and a switch
//! to simulate a provider outage.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use roost::auth::identity::{
    AuthSession, Identity, IdentityProvider, ResolvedSession, Role, UserMetadata,
};
use roost::error::ProviderError;

#[derive(Default)]
struct Inner {
    /// email -> (password, identity)
    passwords: HashMap<String, (String, Identity)>,
    /// live authorization codes
    codes: HashMap<String, Identity>,
    /// codes that have already been exchanged
    consumed_codes: HashSet<String>,
    /// access token -> identity
    sessions: HashMap<String, Identity>,
    /// access tokens that no longer validate
    expired: HashSet<String>,
    /// refresh token -> identity
    refresh_tokens: HashMap<String, Identity>,
    /// next token/code suffix
    counter: u64,
    /// when set, resolve_session fails like a provider outage
    fail_resolution: bool,
}

/// Substitutable in-memory `IdentityProvider`.
#[derive(Default)]
pub struct FakeIdentityProvider {
    inner: Mutex<Inner>,
}

/// Build a test identity with a role hint in its metadata.
pub fn identity_with_role(email: &str, role: Option<Role>) -> Identity {
    Identity {
        id: Uuid::new_v4(),
        email: email.to_string(),
        user_metadata: UserMetadata {
            first_name: Some("Test".to_string()),
            last_name: Some("User".to_string()),
            phone: Some("555-0100".to_string()),
            role,
            company: None,
        },
    }
}

impl FakeIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a password account.
    pub fn add_password_user(&self, identity: Identity, password: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .passwords
            .insert(identity.email.clone(), (password.to_string(), identity));
    }

    /// Issue a single-use authorization code for an identity.
    pub fn issue_code(&self, identity: Identity) -> String {
        let mut inner = self.inner.lock().unwrap();
        inner.counter += 1;
        let code = format!("code-{}", inner.counter);
        inner.codes.insert(code.clone(), identity);
        code
    }

    /// Issue a live session for an identity and return its token pair.
    pub fn issue_session(&self, identity: Identity) -> AuthSession {
        let mut inner = self.inner.lock().unwrap();
        Self::mint_session(&mut inner, identity)
    }

    /// Expire an access token, leaving its refresh token valid. The next
    /// resolution rotates the pair.
    pub fn expire_access_token(&self, access_token: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.expired.insert(access_token.to_string());
    }

    /// Make session resolution fail like a provider outage.
    pub fn fail_resolution(&self, fail: bool) {
        self.inner.lock().unwrap().fail_resolution = fail;
    }

    fn mint_session(inner: &mut Inner, identity: Identity) -> AuthSession {
        inner.counter += 1;
        let access_token = format!("access-{}", inner.counter);
        let refresh_token = format!("refresh-{}", inner.counter);
        inner
            .sessions
            .insert(access_token.clone(), identity.clone());
        inner
            .refresh_tokens
            .insert(refresh_token.clone(), identity.clone());
        AuthSession {
            access_token,
            refresh_token,
            expires_in: Some(3600),
            user: identity,
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &UserMetadata,
    ) -> Result<Identity, ProviderError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.passwords.contains_key(email) {
            return Err(ProviderError::Rejected(
                "email already registered".to_string(),
            ));
        }
        let identity = Identity {
            id: Uuid::new_v4(),
            email: email.to_string(),
            user_metadata: metadata.clone(),
        };
        inner
            .passwords
            .insert(email.to_string(), (password.to_string(), identity.clone()));
        Ok(identity)
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ProviderError> {
        let mut inner = self.inner.lock().unwrap();
        let identity = match inner.passwords.get(email) {
            Some((stored, identity)) if stored == password => identity.clone(),
            _ => return Err(ProviderError::InvalidCredentials),
        };
        Ok(Self::mint_session(&mut inner, identity))
    }

    fn authorize_url(
        &self,
        provider: &str,
        redirect_to: &str,
        extra_params: &[(String, String)],
    ) -> String {
        let mut url = format!(
            "http://identity.test/authorize?provider={provider}&redirect_to={redirect_to}"
        );
        for (key, value) in extra_params {
            url.push_str(&format!("&{key}={value}"));
        }
        url
    }

    async fn exchange_code_for_session(&self, code: &str) -> Result<AuthSession, ProviderError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.consumed_codes.contains(code) {
            return Err(ProviderError::ExchangeFailed(
                "code has already been used".to_string(),
            ));
        }
        let Some(identity) = inner.codes.remove(code) else {
            return Err(ProviderError::ExchangeFailed("invalid code".to_string()));
        };
        inner.consumed_codes.insert(code.to_string());
        Ok(Self::mint_session(&mut inner, identity))
    }

    async fn resolve_session(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> Result<Option<ResolvedSession>, ProviderError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_resolution {
            return Err(ProviderError::Service("identity service down".to_string()));
        }

        if !inner.expired.contains(access_token) {
            if let Some(identity) = inner.sessions.get(access_token).cloned() {
                return Ok(Some(ResolvedSession {
                    session: AuthSession {
                        access_token: access_token.to_string(),
                        refresh_token: refresh_token.unwrap_or_default().to_string(),
                        expires_in: None,
                        user: identity,
                    },
                    rotated: false,
                }));
            }
        }

        let Some(refresh) = refresh_token else {
            return Ok(None);
        };
        let Some(identity) = inner.refresh_tokens.remove(refresh) else {
            return Ok(None);
        };
        Ok(Some(ResolvedSession {
            session: Self::mint_session(&mut inner, identity),
            rotated: true,
        }))
    }

    async fn get_user(&self, access_token: &str) -> Result<Identity, ProviderError> {
        let inner = self.inner.lock().unwrap();
        inner
            .sessions
            .get(access_token)
            .cloned()
            .ok_or(ProviderError::TokensRejected)
    }

    async fn resend_confirmation(&self, email: &str) -> Result<(), ProviderError> {
        let inner = self.inner.lock().unwrap();
        if inner.passwords.contains_key(email) {
            Ok(())
        } else {
            Err(ProviderError::Rejected("unknown email".to_string()))
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError> {
        let mut inner = self.inner.lock().unwrap();
        inner.sessions.remove(access_token);
        Ok(())
    }
}
