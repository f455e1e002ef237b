//! Web dashboard route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    delete_link, generate_links, links_page, login_page, login_submit, logout, stats_page,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Protected dashboard routes requiring a session.
///
/// Protected via [`crate::web::middleware::web_auth`] (`console_session` cookie).
///
/// # Endpoints
///
/// - `GET  /`                    - Links page with generator and grouped table
/// - `POST /links`               - Bulk-generate links
/// - `POST /links/{code}/delete` - Delete a link
/// - `GET  /stats/{code}`        - Statistics page for one link
/// - `POST /logout`              - End the session
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(links_page))
        .route("/links", post(generate_links))
        .route("/links/{code}/delete", post(delete_link))
        .route("/stats/{code}", get(stats_page))
        .route("/logout", post(logout))
}

/// Login page, shown without a session.
///
/// # Endpoints
///
/// - `GET /login` - Login form
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/login", get(login_page))
}

/// Login form submission, kept separate so it can carry a rate limiter.
///
/// # Endpoints
///
/// - `POST /login` - Authenticate and start a session
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login", post(login_submit))
}
