//! Authentication Module
//!
//! This module implements the authentication core: identity resolution,
//! session materialization into cookies, and role provisioning.
//!
//! # Architecture
//!
//! The auth module is organized into focused submodules:
//!
//! - **`identity`** - Identity types and the `IdentityProvider` interface
//! - **`provider`** - HTTP client for the external identity service
//! - **`cookies`** - Session cookie reading, writing, and clearing
//! - **`session`** - Session materialization from authentication events
//! - **`profiles`** - Profile and role-record database operations
//! - **`provisioning`** - Role bootstrapping (profile + role record upserts)
//! - **`handlers`** - HTTP handlers for the authentication endpoints
//!
//! # Authentication Flow
//!
//! 1. **Signup**: form → identity provider registration with metadata →
//!    confirmation email
//! 2. **Confirm / OAuth callback**: verified identity → session cookies →
//!    profile and role record provisioned
//! 3. **Login**: password verified by the provider → session cookies →
//!    recorded role checked against the requested one
//! 4. **Every request**: the route gate resolves the cookies back into a
//!    session (see `crate::middleware`)
//!
//! # Security
//!
//! - Passwords and token minting are owned by the external identity
//!   provider; this service only transports provider-issued tokens
//! - Tokens live in http-only, root-scoped cookies
//! - Invalid credentials return 401 with no detail (no enumeration)
//! - The recorded profile role is authoritative; client-supplied roles
//!   only seed first-time provisioning

/// Identity types and the provider interface
pub mod identity;

/// HTTP identity provider client
pub mod provider;

/// Session cookie handling
pub mod cookies;

/// Session materialization
pub mod session;

/// Profile and role-record database operations
pub mod profiles;

/// Role provisioning
pub mod provisioning;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::types::{LoginRequest, SessionResponse, SignupRequest, UserResponse};
pub use identity::{AuthSession, Identity, IdentityProvider, ResolvedSession, Role, UserMetadata};
pub use provider::HttpIdentityProvider;
pub use provisioning::{effective_role, provision, recorded_role};
pub use session::{establish_session, AuthEvent};
