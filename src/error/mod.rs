//! Error Module
//!
//! This module defines the error types used by the authentication core.
//! These errors are used in HTTP handlers and middleware and can be
//! converted to HTTP responses.
//!
//! # Architecture
//!
//! The error module is organized into focused submodules:
//!
//! - **`types`** - Error type definitions and constructors
//! - **`conversion`** - Error conversion implementations (IntoResponse, etc.)
//!
//! # Error Types
//!
//! - `ProviderError` - The identity service rejected or failed a request
//! - `ProvisioningError` - Profile or role-record write failure
//! - `AuthFlowError` - Top-level taxonomy for the authentication flow
//!
//! # HTTP Response Conversion
//!
//! `AuthFlowError` implements `IntoResponse`, so JSON API handlers can return
//! it directly. Browser-facing flows (the OAuth callback, the route gate)
//! instead use `login_error_redirect` to send the user back to the login page
//! with a short error code in the query string.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use conversion::login_error_redirect;
pub use types::{AuthFlowError, ProviderError, ProvisioningError};
