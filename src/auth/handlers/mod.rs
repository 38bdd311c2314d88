//! Authentication HTTP Handlers
//!
//! One submodule per endpoint, plus shared request/response types:
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Handler exports
//! ├── types.rs     - Request/response types
//! ├── signup.rs    - POST /api/auth/signup
//! ├── login.rs     - POST /api/auth/login
//! ├── logout.rs    - POST /api/auth/logout
//! ├── resend.rs    - POST /api/auth/resend
//! ├── me.rs        - GET  /api/auth/me
//! ├── callback.rs  - GET  /auth/callback
//! ├── confirm.rs   - GET  /auth/confirm
//! └── oauth.rs     - GET  /auth/sign-in/{provider}
//! ```

/// Request/response types
pub mod types;

/// User registration handler
pub mod signup;

/// Password login handler
pub mod login;

/// Logout handler
pub mod logout;

/// Resend-confirmation handler
pub mod resend;

/// Current user handler
pub mod me;

/// OAuth/code-exchange callback handler
pub mod callback;

/// Email-confirmation deep link handler
pub mod confirm;

/// Social sign-in initiation handler
pub mod oauth;

// Re-export handlers for route configuration
pub use callback::auth_callback;
pub use confirm::auth_confirm;
pub use login::login;
pub use logout::logout;
pub use me::get_me;
pub use oauth::oauth_sign_in;
pub use resend::resend_confirmation;
pub use signup::signup;
