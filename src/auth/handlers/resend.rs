/**
 * Resend Confirmation Handler
 *
 * POST /api/auth/resend re-sends the sign-up confirmation email. Backs
 * the "didn't receive the email?" action on the verify-email page.
 */

use axum::{extract::State, response::Json};

use crate::auth::handlers::types::{ResendRequest, ResendResponse};
use crate::error::AuthFlowError;
use crate::server::state::AppState;

/// Resend-confirmation handler.
///
/// # Errors
///
/// * `400 Bad Request` - the provider rejected the request
/// * `429 Too Many Requests` - provider rate limit
pub async fn resend_confirmation(
    State(state): State<AppState>,
    Json(request): Json<ResendRequest>,
) -> Result<Json<ResendResponse>, AuthFlowError> {
    tracing::info!(email = %request.email, "resending confirmation email");

    state.identity.resend_confirmation(&request.email).await?;

    Ok(Json(ResendResponse { sent: true }))
}
