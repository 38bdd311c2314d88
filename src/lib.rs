//! Roost - Authentication Core
//!
//! Roost is a multi-tenant property-rental management application:
//! landlords manage properties, leases, applications, maintenance
//! requests, and payments; tenants apply, pay rent, and file maintenance
//! requests. This crate is its authentication core: an Axum HTTP server
//! that resolves identities, materializes sessions into cookies,
//! provisions role records, and gates every route.
//!
//! # Overview
//!
//! - **Identity resolution**: a narrow client interface over the external
//!   identity service (sign-up, password sign-in, OAuth code exchange,
//!   session resolution with transparent token rotation)
//! - **Session materialization**: authentication events become root-scoped
//!   http-only cookies on the outgoing response
//! - **Role provisioning**: idempotent, transactional upserts of the
//!   profile and the role-specific landlord/tenant record
//! - **Route gating**: per-request enforcement of the
//!   public/auth-only/protected route partition
//!
//! Business pages (dashboards, reports, forms) are out of scope here;
//! they are plain CRUD against the data store once this core has
//! established identity and authorization.
//!
//! # Module Structure
//!
//! - **`auth`** - identity types, provider client, cookies, session
//!   materialization, provisioning, HTTP handlers
//! - **`middleware`** - the route gate
//! - **`routes`** - router assembly
//! - **`server`** - configuration, state, initialization
//! - **`error`** - error taxonomy and response conversion
//!
//! # Usage
//!
//! ```rust,no_run
//! use roost::server::create_app;
//!
//! # async fn example() {
//! let app = create_app().await;
//! // Serve `app` with axum
//! # }
//! ```
//!
//! # Error Handling
//!
//! Fallible operations return `Result` and propagate with `?`. The
//! authentication flow has its own taxonomy (`error::AuthFlowError`)
//! that converts to JSON API responses or login redirects depending on
//! the surface. Anything unexpected fails closed: back to the login
//! page with session cookies cleared.

/// Authentication core: identity, sessions, provisioning, handlers
pub mod auth;

/// Error types and response conversion
pub mod error;

/// HTTP middleware (route gate)
pub mod middleware;

/// Route configuration
pub mod routes;

/// Server setup and configuration
pub mod server;
