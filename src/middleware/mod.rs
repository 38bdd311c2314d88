//! Middleware Module
//!
//! This module contains the HTTP middleware for the server. The route
//! gate is applied to the whole router and enforces the
//! public/auth-only/protected route partition on every request.

pub mod route_gate;

pub use route_gate::{classify, route_gate, RouteClass};
