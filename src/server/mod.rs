//! Server Module
//!
//! Server initialization, application state, and configuration.
//!
//! - **`config`** - environment configuration and database loading
//! - **`state`** - `AppState` and `FromRef` extractors
//! - **`init`** - application assembly

/// Environment configuration and database loading
pub mod config;

/// Application state
pub mod state;

/// Application assembly
pub mod init;

pub use config::ServerConfig;
pub use init::{create_app, create_app_with};
pub use state::AppState;
