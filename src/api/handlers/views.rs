//! JSON renditions of the dashboard views.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use chrono::Utc;

use crate::api::dto::views::LinksViewParams;
use crate::api::middleware::auth::BackendToken;
use crate::domain::view_model::{LinksView, StatsView};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the grouped and filtered links view.
///
/// # Endpoint
///
/// `GET /api/view/links?q=<text>&target=<url>`
///
/// # Response
///
/// ```json
/// {
///   "groups": [
///     {
///       "target_url": "https://example.com",
///       "links": [ ... ],
///       "total_clicks": 12,
///       "most_recent": "2024-01-02T10:00:00Z"
///     }
///   ],
///   "available_targets": ["https://example.com"],
///   "total_links": 3,
///   "total_groups": 1
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized` - backend rejected the token
/// - `502 Bad Gateway` - backend unreachable or failing
pub async fn links_view_handler(
    State(state): State<AppState>,
    Extension(BackendToken(token)): Extension<BackendToken>,
    Query(params): Query<LinksViewParams>,
) -> Result<Json<LinksView>, AppError> {
    let view = state
        .link_service
        .links_view(&token, &params.to_query())
        .await?;

    Ok(Json(view))
}

/// Returns the stats view for one link.
///
/// # Endpoint
///
/// `GET /api/view/stats/{code}`
///
/// `series` always holds seven daily buckets, oldest first, ending on
/// today's UTC date.
///
/// # Errors
///
/// - `400 Bad Request` - malformed code
/// - `401 Unauthorized` - backend rejected the token
/// - `404 Not Found` - unknown code
/// - `502 Bad Gateway` - backend unreachable or failing
pub async fn stats_view_handler(
    State(state): State<AppState>,
    Extension(BackendToken(token)): Extension<BackendToken>,
    Path(code): Path<String>,
) -> Result<Json<StatsView>, AppError> {
    let view = state
        .stats_service
        .stats_view(&token, &code, Utc::now())
        .await?;

    Ok(Json(view))
}
