/**
 * Page Handlers
 *
 * Placeholder pages for the routes the gate partitions. The real product
 * pages are rendered by the web frontend; these handlers exist so the
 * route table is complete and the gating behavior is observable.
 */

use axum::response::Html;

pub async fn landing() -> Html<&'static str> {
    Html("<!doctype html><title>Roost</title><h1>Roost</h1>")
}

pub async fn login_page() -> Html<&'static str> {
    Html("<!doctype html><title>Sign in - Roost</title><h1>Sign in</h1>")
}

pub async fn signup_page() -> Html<&'static str> {
    Html("<!doctype html><title>Create account - Roost</title><h1>Create an account</h1>")
}

pub async fn forgot_password_page() -> Html<&'static str> {
    Html("<!doctype html><title>Reset password - Roost</title><h1>Reset your password</h1>")
}

pub async fn verify_email_page() -> Html<&'static str> {
    Html("<!doctype html><title>Check your email - Roost</title><h1>Check your email</h1>")
}

pub async fn dashboard_page() -> Html<&'static str> {
    Html("<!doctype html><title>Dashboard - Roost</title><h1>Dashboard</h1>")
}
