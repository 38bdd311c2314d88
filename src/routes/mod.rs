//! Route Configuration
//!
//! Router assembly for the server: page routes, authentication routes,
//! static files, and the route-gate layer.

/// Main router assembly
pub mod router;

/// Authentication route registration
pub mod auth_routes;

/// Placeholder page handlers
pub mod pages;

pub use router::create_router;
