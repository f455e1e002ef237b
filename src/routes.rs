//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`            - Redirect to the dashboard
//! - `GET  /health`      - Liveness and configured backend (public)
//! - `/api/*`            - JSON views (Bearer token passed to the backend)
//! - `/dashboard/*`      - Web UI (cookie session required, except login)
//! - `/static/*`         - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on sign-in and the JSON API
//! - **Authentication** - Bearer token (API) or cookie session (web)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::middleware::web_auth;
use axum::response::Redirect;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// Rate limiting keys on the peer address, so the result must be served
/// with connect info.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, true))
}

/// Builds the router without path normalization.
///
/// `rate_limited = false` drops the per-IP limiters, which need
/// `ConnectInfo` that in-process test servers do not provide.
pub fn router(state: AppState, rate_limited: bool) -> Router {
    let mut api_router = api::routes::protected_routes().route_layer(middleware::from_fn(auth::layer));

    let mut login_router = web::routes::login_routes();

    if rate_limited {
        api_router = api_router.layer(rate_limit::api_layer());
        login_router = login_router.layer(rate_limit::login_layer());
    }

    let web_protected = web::routes::protected_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), web_auth::layer),
    );

    let web_router = Router::new()
        .merge(web_protected)
        .merge(web::routes::public_routes())
        .merge(login_router);

    Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .nest("/dashboard", web_router)
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer())
}
