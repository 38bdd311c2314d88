/**
 * OAuth Callback Handler
 *
 * This module implements GET /auth/callback, the landing point for the
 * identity provider's code redirect.
 *
 * # Flow
 *
 * 1. Surface provider-reported OAuth errors back on the login page
 * 2. Require an authorization code (`missing_code` otherwise, no writes)
 * 3. Exchange the single-use code for a session and write its cookies
 * 4. Resolve the effective role: recorded profile role first, then the
 *    `role` query parameter, then the metadata hint, then tenant
 * 5. Provision the profile and role record
 * 6. Redirect to /dashboard, or back to /login?error=<reason> on any
 *    failure
 *
 * Codes are single use: replaying a callback URL fails the exchange and
 * lands on the login page with the provider's reason.
 */

use axum::{
    extract::{Query, State},
    response::{Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::auth::identity::Role;
use crate::auth::provisioning::{effective_role, provision, recorded_role};
use crate::auth::session::{establish_session, AuthEvent};
use crate::error::{login_error_redirect, AuthFlowError};
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
    pub role: Option<Role>,
}

/// OAuth/code-exchange callback handler.
pub async fn auth_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Redirect), Response> {
    if let Some(error) = &params.error {
        let reason = params.error_description.as_deref().unwrap_or(error);
        tracing::warn!(error = %error, description = %reason, "oauth error on callback");
        return Err(login_error_redirect(reason));
    }

    let Some(code) = params.code else {
        tracing::warn!("callback reached without an authorization code");
        return Err(login_error_redirect(
            &AuthFlowError::MissingCode.redirect_code(),
        ));
    };

    let (jar, identity) =
        establish_session(state.identity.as_ref(), jar, AuthEvent::Code { code })
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "code exchange failed");
                login_error_redirect(&e.redirect_code())
            })?;

    let Some(pool) = state.db_pool.as_ref() else {
        tracing::error!("callback without a configured database");
        return Err(login_error_redirect("service_unavailable"));
    };

    let recorded = recorded_role(pool, identity.id).await.map_err(|e| {
        tracing::error!(error = %e, "profile lookup failed");
        login_error_redirect(&AuthFlowError::Unexpected(e.to_string()).redirect_code())
    })?;

    let role = effective_role(recorded, params.role, identity.user_metadata.role)
        .map_err(|recorded| {
            tracing::warn!(user_id = %identity.id, recorded = %recorded, "role mismatch on callback");
            login_error_redirect(&AuthFlowError::RoleMismatch { recorded }.redirect_code())
        })?;

    provision(pool, &identity, role).await.map_err(|e| {
        tracing::error!(error = %e, user_id = %identity.id, "provisioning failed");
        login_error_redirect(&AuthFlowError::from(e).redirect_code())
    })?;

    tracing::info!(user_id = %identity.id, role = %role, "callback completed");
    Ok((jar, Redirect::to("/dashboard")))
}
