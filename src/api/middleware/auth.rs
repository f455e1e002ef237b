//! Bearer token pass-through middleware.

use axum::{
    extract::{FromRequestParts, Request},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::error::AppError;

/// Backend access token taken from the `Authorization` header.
///
/// The console does not verify it; the backend does on every call.
#[derive(Debug, Clone)]
pub struct BackendToken(pub String);

/// Requires a Bearer token and exposes it to handlers as [`BackendToken`].
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <access>
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing, malformed or
/// carries an empty token.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/view/links", get(links_view_handler))
///     .route_layer(middleware::from_fn(auth::layer));
/// ```
pub async fn layer(req: Request, next: Next) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let token = token.trim().to_string();
    if token.is_empty() {
        return Err(AppError::unauthorized(
            "Unauthorized",
            serde_json::json!({"reason": "Bearer token is empty"}),
        ));
    }

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(BackendToken(token));

    Ok(next.run(req).await)
}
