/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Page routes (landing, auth pages, dashboard placeholders)
 * 2. Authentication routes (browser flows + JSON API)
 * 3. Static file serving under /static
 * 4. Fallback handler (404)
 *
 * The route gate is layered over the whole router, so it runs on every
 * request; static assets and the public API prefix are let through by
 * the gate's own classifier.
 */

use axum::Router;
use tower_http::services::ServeDir;

use crate::middleware::route_gate;
use crate::routes::auth_routes::configure_auth_routes;
use crate::routes::pages;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new()
        .route("/", axum::routing::get(pages::landing))
        .route("/login", axum::routing::get(pages::login_page))
        .route("/signup", axum::routing::get(pages::signup_page))
        .route(
            "/forgot-password",
            axum::routing::get(pages::forgot_password_page),
        )
        .route(
            "/verify-email",
            axum::routing::get(pages::verify_email_page),
        )
        .route("/dashboard", axum::routing::get(pages::dashboard_page))
        .route(
            "/dashboard/{*section}",
            axum::routing::get(pages::dashboard_page),
        );

    // Add authentication routes
    let router = configure_auth_routes(router);

    // Add static file serving
    let router = router.nest_service("/static", ServeDir::new("public"));

    // Fallback handler for 404
    let router = router.fallback(|| async { "404 Not Found" });

    // Gate every request
    let router = router.layer(axum::middleware::from_fn_with_state(
        app_state.clone(),
        route_gate,
    ));

    router.with_state(app_state)
}
