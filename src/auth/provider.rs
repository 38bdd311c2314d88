/**
 * HTTP Identity Provider Client
 *
 * Concrete `IdentityProvider` implementation over the identity service's
 * REST API. The service follows the GoTrue endpoint shape:
 *
 * - `POST /signup` - register, returns the (unconfirmed) identity
 * - `POST /token?grant_type=password` - password sign-in
 * - `POST /token?grant_type=pkce` - authorization code exchange
 * - `POST /token?grant_type=refresh_token` - token rotation
 * - `GET  /user` - identity behind an access token
 * - `POST /resend` - re-send confirmation email
 * - `POST /logout` - revoke a session
 * - `GET  /authorize` - browser redirect target for social sign-in
 *
 * Every request carries the project public key in an `apikey` header.
 * Timeouts are configured on the shared `reqwest::Client`; there is no
 * retry loop here, failures propagate to the caller.
 */

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::identity::{
    AuthSession, Identity, IdentityProvider, ResolvedSession, UserMetadata,
};
use crate::error::ProviderError;
use crate::server::config::ServerConfig;

/// Token grant used on the password sign-in endpoint.
const GRANT_PASSWORD: &str = "password";
/// Token grant used for authorization code exchange.
const GRANT_PKCE: &str = "pkce";
/// Token grant used for transparent session refresh.
const GRANT_REFRESH: &str = "refresh_token";

/// HTTP client for the external identity service.
pub struct HttpIdentityProvider {
    http: reqwest::Client,
    base_url: String,
    public_key: String,
}

/// Wire shape of a token-grant response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: Option<i64>,
    user: WireUser,
}

/// Wire shape of an identity record.
#[derive(Debug, Deserialize)]
struct WireUser {
    id: Uuid,
    email: Option<String>,
    #[serde(default)]
    user_metadata: UserMetadata,
}

impl From<WireUser> for Identity {
    fn from(user: WireUser) -> Self {
        Identity {
            id: user.id,
            email: user.email.unwrap_or_default(),
            user_metadata: user.user_metadata,
        }
    }
}

/// Wire shape of an error body. The service is inconsistent about which
/// field carries the message, so all known spellings are accepted.
#[derive(Debug, Deserialize, Default)]
struct WireError {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl WireError {
    fn message(self) -> String {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
            .unwrap_or_else(|| "unknown identity service error".to_string())
    }
}

impl HttpIdentityProvider {
    pub fn new(config: &ServerConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: config.identity_url.trim_end_matches('/').to_string(),
            public_key: config.identity_public_key.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Read the error message from a non-success response.
    async fn error_message(response: reqwest::Response) -> String {
        response
            .json::<WireError>()
            .await
            .unwrap_or_default()
            .message()
    }

    /// POST to a token-grant endpoint and decode the session.
    async fn token_request(
        &self,
        grant_type: &str,
        body: serde_json::Value,
    ) -> Result<reqwest::Response, ProviderError> {
        self.http
            .post(self.endpoint("/token"))
            .query(&[("grant_type", grant_type)])
            .header("apikey", &self.public_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Service(e.to_string()))
    }

    fn session_from(token: TokenResponse) -> AuthSession {
        AuthSession {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_in: token.expires_in,
            user: token.user.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &UserMetadata,
    ) -> Result<Identity, ProviderError> {
        let response = self
            .http
            .post(self.endpoint("/signup"))
            .header("apikey", &self.public_key)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "data": metadata,
            }))
            .send()
            .await
            .map_err(|e| ProviderError::Service(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let user: WireUser = response
                .json()
                .await
                .map_err(|e| ProviderError::Service(e.to_string()))?;
            return Ok(user.into());
        }
        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimited);
        }
        if status.is_client_error() {
            return Err(ProviderError::Rejected(Self::error_message(response).await));
        }
        Err(ProviderError::Service(Self::error_message(response).await))
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ProviderError> {
        let response = self
            .token_request(
                GRANT_PASSWORD,
                serde_json::json!({ "email": email, "password": password }),
            )
            .await?;

        let status = response.status();
        if status.is_success() {
            let token: TokenResponse = response
                .json()
                .await
                .map_err(|e| ProviderError::Service(e.to_string()))?;
            return Ok(Self::session_from(token));
        }
        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimited);
        }
        if status.is_client_error() {
            // Same error for unknown email and wrong password.
            return Err(ProviderError::InvalidCredentials);
        }
        Err(ProviderError::Service(Self::error_message(response).await))
    }

    fn authorize_url(
        &self,
        provider: &str,
        redirect_to: &str,
        extra_params: &[(String, String)],
    ) -> String {
        let mut url = format!(
            "{}?provider={}&redirect_to={}",
            self.endpoint("/authorize"),
            urlencoding::encode(provider),
            urlencoding::encode(redirect_to),
        );
        for (key, value) in extra_params {
            url.push('&');
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    async fn exchange_code_for_session(&self, code: &str) -> Result<AuthSession, ProviderError> {
        let response = self
            .token_request(GRANT_PKCE, serde_json::json!({ "auth_code": code }))
            .await?;

        let status = response.status();
        if status.is_success() {
            let token: TokenResponse = response
                .json()
                .await
                .map_err(|e| ProviderError::Service(e.to_string()))?;
            return Ok(Self::session_from(token));
        }
        if status.is_client_error() {
            return Err(ProviderError::ExchangeFailed(
                Self::error_message(response).await,
            ));
        }
        Err(ProviderError::Service(Self::error_message(response).await))
    }

    async fn resolve_session(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> Result<Option<ResolvedSession>, ProviderError> {
        let response = self
            .http
            .get(self.endpoint("/user"))
            .header("apikey", &self.public_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ProviderError::Service(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let user: WireUser = response
                .json()
                .await
                .map_err(|e| ProviderError::Service(e.to_string()))?;
            return Ok(Some(ResolvedSession {
                session: AuthSession {
                    access_token: access_token.to_string(),
                    refresh_token: refresh_token.unwrap_or_default().to_string(),
                    expires_in: None,
                    user: user.into(),
                },
                rotated: false,
            }));
        }

        if !status.is_client_error() {
            return Err(ProviderError::Service(Self::error_message(response).await));
        }

        // Access token rejected. Try a refresh grant if we hold a refresh
        // token, so expiry rotates tokens instead of logging the user out.
        let Some(refresh) = refresh_token else {
            return Ok(None);
        };

        let refreshed = self
            .token_request(GRANT_REFRESH, serde_json::json!({ "refresh_token": refresh }))
            .await?;

        let status = refreshed.status();
        if status.is_success() {
            let token: TokenResponse = refreshed
                .json()
                .await
                .map_err(|e| ProviderError::Service(e.to_string()))?;
            return Ok(Some(ResolvedSession {
                session: Self::session_from(token),
                rotated: true,
            }));
        }
        if status.is_client_error() {
            return Ok(None);
        }
        Err(ProviderError::Service(Self::error_message(refreshed).await))
    }

    async fn get_user(&self, access_token: &str) -> Result<Identity, ProviderError> {
        let response = self
            .http
            .get(self.endpoint("/user"))
            .header("apikey", &self.public_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ProviderError::Service(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let user: WireUser = response
                .json()
                .await
                .map_err(|e| ProviderError::Service(e.to_string()))?;
            return Ok(user.into());
        }
        if status.is_client_error() {
            return Err(ProviderError::TokensRejected);
        }
        Err(ProviderError::Service(Self::error_message(response).await))
    }

    async fn resend_confirmation(&self, email: &str) -> Result<(), ProviderError> {
        let response = self
            .http
            .post(self.endpoint("/resend"))
            .header("apikey", &self.public_key)
            .json(&serde_json::json!({ "type": "signup", "email": email }))
            .send()
            .await
            .map_err(|e| ProviderError::Service(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimited);
        }
        if status.is_client_error() {
            return Err(ProviderError::Rejected(Self::error_message(response).await));
        }
        Err(ProviderError::Service(Self::error_message(response).await))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError> {
        let response = self
            .http
            .post(self.endpoint("/logout"))
            .header("apikey", &self.public_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ProviderError::Service(e.to_string()))?;

        if response.status().is_success() || response.status().is_client_error() {
            // An already-dead session is as signed out as it gets.
            return Ok(());
        }
        Err(ProviderError::Service(Self::error_message(response).await))
    }
}
