//! Link statistics page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;

use super::format_time;
use super::notice::{Notice, error_redirect};
use crate::domain::entities::ClickEvent;
use crate::domain::view_model::StatsView;
use crate::state::AppState;
use crate::web::middleware::web_auth::CurrentSession;

pub struct BucketRow {
    pub label: String,
    pub date: String,
    pub count: u64,
    pub x: String,
    pub y: String,
}

pub struct ClickRow {
    pub when: String,
    pub ip: String,
    pub country: String,
    pub referrer: String,
    pub user_agent: String,
}

impl ClickRow {
    fn new(event: &ClickEvent) -> Self {
        let or_dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
        Self {
            when: format_time(event.timestamp),
            ip: or_dash(&event.ip),
            country: or_dash(&event.country),
            referrer: or_dash(&event.referrer),
            user_agent: or_dash(&event.user_agent),
        }
    }
}

/// Template for the link statistics page.
///
/// Renders `templates/stats.html` with:
/// - Totals and link status
/// - 7-day sparkline
/// - Recent click events
#[derive(Template, WebTemplate)]
#[template(path = "stats.html")]
pub struct StatsTemplate {
    pub username: String,
    pub notice: Option<Notice>,
    pub code: String,
    pub short_url: String,
    pub target_url: String,
    pub status: &'static str,
    pub total_clicks: u64,
    pub week_total: u64,
    pub created: String,
    pub expires: String,
    pub view_box: String,
    pub polyline: String,
    pub buckets: Vec<BucketRow>,
    pub recent: Vec<ClickRow>,
}

impl StatsTemplate {
    fn new(current: &CurrentSession, view: &StatsView) -> Self {
        Self {
            username: current.username().to_string(),
            notice: None,
            code: view.link.code.clone(),
            short_url: view.link.short_url.clone(),
            target_url: view.link.target_url.clone(),
            status: view.status,
            total_clicks: view.total_clicks,
            week_total: view.week_total(),
            created: format_time(view.link.created_at),
            expires: view
                .link
                .expires_at
                .map(format_time)
                .unwrap_or_else(|| "Never".to_string()),
            view_box: view.sparkline.view_box(),
            polyline: view.sparkline.polyline(),
            buckets: view
                .series
                .iter()
                .zip(&view.sparkline.points)
                .map(|(bucket, point)| BucketRow {
                    label: point.label.clone(),
                    date: bucket.date.to_string(),
                    count: bucket.count,
                    x: format!("{:.1}", point.x),
                    y: format!("{:.1}", point.y),
                })
                .collect(),
            recent: view.recent_clicks.iter().map(ClickRow::new).collect(),
        }
    }
}

/// Renders the statistics page for a specific link.
///
/// # Endpoint
///
/// `GET /dashboard/stats/{code}`
///
/// The 7-day window ends on today's UTC date. Unknown codes redirect back
/// to the links page with a notice.
pub async fn stats_page(
    State(st): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Path(code): Path<String>,
) -> Response {
    match st
        .stats_service
        .stats_view(current.access_token(), &code, Utc::now())
        .await
    {
        Ok(view) => StatsTemplate::new(&current, &view).into_response(),
        Err(e) => error_redirect(&st, &current, e, "/dashboard").await,
    }
}
