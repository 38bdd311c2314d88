/**
 * Signup Handler
 *
 * This module implements the registration handler for POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate the form fields
 * 2. Register with the identity provider, attaching names, phone, role,
 *    and company as identity metadata
 * 3. Return the address the confirmation email went to
 *
 * No session and no database rows exist at this point. Provisioning runs
 * when the user comes back through the confirmation deep link or the
 * OAuth callback with a verified identity.
 *
 * # Validation
 *
 * - First name, last name, email, phone, and password are required
 * - Email must contain '@'
 * - Password must be at least 8 characters
 */

use axum::{extract::State, response::Json};

use crate::auth::handlers::types::{SignupRequest, SignupResponse};
use crate::auth::identity::{Role, UserMetadata};
use crate::error::{AuthFlowError, ProviderError};
use crate::server::state::AppState;

fn validate(request: &SignupRequest) -> Result<(), String> {
    if request.first_name.trim().is_empty() {
        return Err("First name is required".to_string());
    }
    if request.last_name.trim().is_empty() {
        return Err("Last name is required".to_string());
    }
    if request.email.trim().is_empty() {
        return Err("Email is required".to_string());
    }
    if !request.email.contains('@') {
        return Err("Invalid email format".to_string());
    }
    if request.phone.trim().is_empty() {
        return Err("Phone number is required".to_string());
    }
    if request.password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    Ok(())
}

/// Sign up handler.
///
/// # Errors
///
/// * `400 Bad Request` - validation failed, or the provider rejected the
///   registration (for example, email already registered)
/// * `429 Too Many Requests` - provider rate limit; the message tells the
///   user to try again in a few minutes
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, AuthFlowError> {
    tracing::info!(email = %request.email, "signup request");

    validate(&request).map_err(|message| AuthFlowError::Auth(ProviderError::Rejected(message)))?;

    let metadata = UserMetadata {
        first_name: Some(request.first_name.trim().to_string()),
        last_name: Some(request.last_name.trim().to_string()),
        phone: Some(request.phone.trim().to_string()),
        role: Some(request.role.unwrap_or(Role::Tenant)),
        company: request.company.filter(|c| !c.trim().is_empty()),
    };

    let identity = state
        .identity
        .sign_up(&request.email, &request.password, &metadata)
        .await?;

    tracing::info!(user_id = %identity.id, "signup accepted, confirmation email pending");

    Ok(Json(SignupResponse {
        email: identity.email,
        confirmation_sent: true,
    }))
}
