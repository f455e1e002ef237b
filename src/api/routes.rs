//! API route configuration.
//!
//! All API endpoints require a backend Bearer token via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{links_view_handler, stats_view_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// JSON view routes, protected by Bearer token pass-through.
///
/// # Endpoints
///
/// - `GET /view/links`        - Grouped, filtered links (`?q=&target=`)
/// - `GET /view/stats/{code}` - Totals, status and 7-day series for a link
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/view/links", get(links_view_handler))
        .route("/view/stats/{code}", get(stats_view_handler))
}
