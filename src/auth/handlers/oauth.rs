/**
 * Social Sign-In Initiation
 *
 * GET /auth/sign-in/{provider} builds the identity service's authorize
 * URL and redirects the browser to it. The requested role rides along as
 * an extra query parameter and comes back on the callback.
 */

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
};
use serde::Deserialize;

use crate::auth::identity::Role;
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OAuthParams {
    pub role: Option<Role>,
}

/// Redirect to the identity provider's authorization endpoint.
pub async fn oauth_sign_in(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(params): Query<OAuthParams>,
) -> Redirect {
    let redirect_to = format!("{}/auth/callback", state.config.public_base_url);

    let mut extra = Vec::new();
    if let Some(role) = params.role {
        extra.push(("role".to_string(), role.as_str().to_string()));
    }

    let url = state.identity.authorize_url(&provider, &redirect_to, &extra);
    tracing::info!(provider = %provider, "starting social sign-in");
    Redirect::to(&url)
}
