/**
 * Email Confirmation Handler
 *
 * This module implements GET /auth/confirm, the deep link in the sign-up
 * confirmation email. The provider has already issued the session; the
 * link carries the token pair, and this handler materializes it into
 * cookies and provisions the profile and role record from the identity
 * metadata captured at sign-up.
 */

use axum::{
    extract::{Query, State},
    response::{Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::auth::provisioning::{effective_role, provision, recorded_role};
use crate::auth::session::{establish_session, AuthEvent};
use crate::error::{login_error_redirect, AuthFlowError};
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConfirmParams {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

/// Email-confirmation deep link handler.
pub async fn auth_confirm(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<ConfirmParams>,
) -> Result<(CookieJar, Redirect), Response> {
    let Some(access_token) = params.access_token else {
        tracing::warn!("confirmation link without tokens");
        return Err(login_error_redirect("missing_token"));
    };

    let event = AuthEvent::Tokens {
        access_token,
        refresh_token: params.refresh_token,
    };
    let (jar, identity) = establish_session(state.identity.as_ref(), jar, event)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "confirmation tokens rejected");
            login_error_redirect(&e.redirect_code())
        })?;

    let Some(pool) = state.db_pool.as_ref() else {
        tracing::error!("confirmation without a configured database");
        return Err(login_error_redirect("service_unavailable"));
    };

    let recorded = recorded_role(pool, identity.id).await.map_err(|e| {
        tracing::error!(error = %e, "profile lookup failed");
        login_error_redirect(&AuthFlowError::Unexpected(e.to_string()).redirect_code())
    })?;

    // The confirmation link carries no role parameter; the hint captured
    // in the sign-up metadata is the proposal here.
    let role = effective_role(recorded, None, identity.user_metadata.role)
        .unwrap_or_else(|recorded| recorded);

    provision(pool, &identity, role).await.map_err(|e| {
        tracing::error!(error = %e, user_id = %identity.id, "provisioning failed");
        login_error_redirect(&AuthFlowError::from(e).redirect_code())
    })?;

    tracing::info!(user_id = %identity.id, role = %role, "email confirmed and provisioned");
    Ok((jar, Redirect::to("/dashboard")))
}
