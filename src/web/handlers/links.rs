//! Links page: bulk generator, grouped link table, deletion.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use serde_with::{NoneAsEmptyString, serde_as};

use super::format_time;
use super::notice::{Notice, error_redirect, redirect_with_notice};
use crate::domain::entities::{
    BulkOutcome, BulkRequest, DEFAULT_CODE_LENGTH, DEFAULT_COUNT, LinkRecord, MAX_BULK_LINKS,
    MAX_CODE_LENGTH, MIN_CODE_LENGTH,
};
use crate::domain::view_model::{LinkQuery, LinksView, TargetGroup, TargetSelector};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::middleware::web_auth::CurrentSession;

const DASHBOARD_PATH: &str = "/dashboard";

/// One row of the links table.
pub struct LinkRow {
    pub code: String,
    pub short_url: String,
    pub click_count: u64,
    pub created: String,
    pub expires: String,
    pub status: &'static str,
    pub stats_href: String,
    pub delete_action: String,
}

impl LinkRow {
    fn new(link: &LinkRecord, now: DateTime<Utc>) -> Self {
        Self {
            code: link.code.clone(),
            short_url: link.short_url.clone(),
            click_count: link.click_count,
            created: format_time(link.created_at),
            expires: link.expires_at.map(format_time).unwrap_or_else(|| "Never".to_string()),
            status: link.status_label(now),
            stats_href: format!("/dashboard/stats/{}", link.code),
            delete_action: format!("/dashboard/links/{}/delete", link.code),
        }
    }
}

/// A target URL heading with its links.
pub struct GroupRow {
    pub target_url: String,
    pub link_count: usize,
    pub total_clicks: u64,
    pub most_recent: String,
    pub short_urls: String,
    pub links: Vec<LinkRow>,
}

impl GroupRow {
    fn new(group: &TargetGroup, now: DateTime<Utc>) -> Self {
        Self {
            target_url: group.target_url.clone(),
            link_count: group.link_count(),
            total_clicks: group.total_clicks,
            most_recent: format_time(group.most_recent),
            short_urls: group.short_urls(),
            links: group.links.iter().map(|link| LinkRow::new(link, now)).collect(),
        }
    }
}

pub struct TargetOption {
    pub value: String,
    pub selected: bool,
}

/// The links created by the last generator submission.
pub struct BatchPanel {
    pub target_url: String,
    pub count: usize,
    pub short_urls: String,
    pub partial: bool,
}

impl BatchPanel {
    fn new(outcome: &BulkOutcome) -> Self {
        Self {
            target_url: outcome.target_url().unwrap_or_default().to_string(),
            count: outcome.links.len(),
            short_urls: outcome.short_urls(),
            partial: outcome.partial,
        }
    }
}

/// Values echoed back into the generator form.
pub struct GeneratorValues {
    pub url: String,
    pub count: String,
    pub code_length: String,
    pub expires_at: String,
}

impl Default for GeneratorValues {
    fn default() -> Self {
        Self {
            url: String::new(),
            count: DEFAULT_COUNT.to_string(),
            code_length: DEFAULT_CODE_LENGTH.to_string(),
            expires_at: String::new(),
        }
    }
}

/// Template for the links page.
///
/// Renders `templates/links.html` with:
/// - Bulk generator form and the latest batch
/// - Search box and target dropdown
/// - Links grouped by target URL
#[derive(Template, WebTemplate)]
#[template(path = "links.html")]
pub struct LinksTemplate {
    pub username: String,
    pub notice: Option<Notice>,
    pub query: String,
    pub all_targets_value: &'static str,
    pub target_options: Vec<TargetOption>,
    pub groups: Vec<GroupRow>,
    pub total_links: usize,
    pub total_groups: usize,
    pub visible_links: usize,
    pub empty_message: Option<&'static str>,
    pub generator: GeneratorValues,
    pub batch: Option<BatchPanel>,
    pub max_links: u32,
    pub min_code_length: u32,
    pub max_code_length: u32,
}

impl LinksTemplate {
    fn new(
        current: &CurrentSession,
        view: &LinksView,
        query: &LinkQuery,
        notice: Option<Notice>,
        generator: GeneratorValues,
        batch: Option<BatchPanel>,
        now: DateTime<Utc>,
    ) -> Self {
        let empty_message = if view.is_empty() {
            Some("No links yet. Generate a batch above to get started.")
        } else if view.groups.is_empty() {
            Some("No links match the current filters.")
        } else {
            None
        };

        Self {
            username: current.username().to_string(),
            notice,
            query: query.query.clone(),
            all_targets_value: TargetSelector::ALL_SENTINEL,
            target_options: view
                .available_targets
                .iter()
                .map(|target| TargetOption {
                    value: target.clone(),
                    selected: matches!(
                        &query.target,
                        TargetSelector::Exact(selected) if selected == target
                    ),
                })
                .collect(),
            groups: view.groups.iter().map(|group| GroupRow::new(group, now)).collect(),
            total_links: view.total_links,
            total_groups: view.total_groups,
            visible_links: view.visible_links(),
            empty_message,
            generator,
            batch,
            max_links: MAX_BULK_LINKS,
            min_code_length: MIN_CODE_LENGTH,
            max_code_length: MAX_CODE_LENGTH,
        }
    }

    /// Replaces the empty state for a page rendered without a backend snapshot.
    fn without_snapshot(mut self) -> Self {
        self.empty_message = Some("Links could not be loaded. Try again in a moment.");
        self
    }
}

/// `GET /dashboard` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct LinksParams {
    pub q: Option<String>,
    pub target: Option<String>,
    pub notice: Option<String>,
    pub level: Option<String>,
}

/// Generator form as posted by the browser.
///
/// Empty inputs arrive as empty strings and are treated as absent.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub url: String,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub count: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub code_length: Option<String>,
    /// `datetime-local` value, interpreted as UTC.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub expires_at: Option<String>,
}

impl GenerateForm {
    /// Converts the raw form into a [`BulkRequest`], applying defaults.
    ///
    /// Range checks are left to [`crate::application::services::LinkService::generate`].
    pub fn to_request(&self) -> Result<BulkRequest, AppError> {
        let count = parse_number(self.count.as_deref(), DEFAULT_COUNT, "count")?;
        let code_length =
            parse_number(self.code_length.as_deref(), DEFAULT_CODE_LENGTH, "code_length")?;

        let mut request = BulkRequest::new(self.url.clone(), count, code_length);
        request.expires_at = self.expires_at.as_deref().map(parse_expiry).transpose()?;
        Ok(request)
    }

    fn echo(&self) -> GeneratorValues {
        GeneratorValues {
            url: self.url.clone(),
            count: self.count.clone().unwrap_or_else(|| DEFAULT_COUNT.to_string()),
            code_length: self
                .code_length
                .clone()
                .unwrap_or_else(|| DEFAULT_CODE_LENGTH.to_string()),
            expires_at: self.expires_at.clone().unwrap_or_default(),
        }
    }
}

fn parse_number(raw: Option<&str>, default: u32, field: &str) -> Result<u32, AppError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| {
            AppError::bad_request(
                format!("{} must be a whole number", field.replace('_', " ")),
                json!({ "field": field, "value": value }),
            )
        }),
    }
}

fn parse_expiry(raw: &str) -> Result<DateTime<Utc>, AppError> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            AppError::bad_request(
                "Expiry must be a date and time",
                json!({ "field": "expires_at", "value": raw }),
            )
        })
}

/// Renders the links page from a fresh backend snapshot.
async fn render(
    st: &AppState,
    current: &CurrentSession,
    query: LinkQuery,
    notice: Option<Notice>,
    generator: GeneratorValues,
    batch: Option<BatchPanel>,
    status: StatusCode,
) -> Response {
    let view = match st.link_service.links_view(current.access_token(), &query).await {
        Ok(view) => view,
        Err(e) if e.ends_session() => return error_redirect(st, current, e, DASHBOARD_PATH).await,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load links");
            let empty = LinksView::build(&[], &query);
            let template = LinksTemplate::new(
                current,
                &empty,
                &query,
                Some(Notice::error(e.message())),
                generator,
                batch,
                Utc::now(),
            )
            .without_snapshot();
            return (e.status_code(), template).into_response();
        }
    };

    let template = LinksTemplate::new(current, &view, &query, notice, generator, batch, Utc::now());
    (status, template).into_response()
}

/// Renders the links page.
///
/// # Endpoint
///
/// `GET /dashboard?q=<text>&target=<url>`
///
/// `q` is matched case-insensitively against target URLs, short URLs and
/// codes; `target` restricts the table to one destination (`__all__` or
/// empty for every destination).
pub async fn links_page(
    State(st): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Query(params): Query<LinksParams>,
) -> Response {
    let query = LinkQuery::from_params(params.q.as_deref(), params.target.as_deref());
    let notice = super::notice::NoticeParams {
        notice: params.notice,
        level: params.level,
    }
    .into_notice();

    render(
        &st,
        &current,
        query,
        notice,
        GeneratorValues::default(),
        None,
        StatusCode::OK,
    )
    .await
}

/// Generates a batch of links and shows it above the table.
///
/// # Endpoint
///
/// `POST /dashboard/links` (form: `url`, `count`, `code_length`, `expires_at`)
///
/// The table is re-fetched after generation rather than patched with the
/// returned links. Invalid input re-renders the form with its values kept.
pub async fn generate_links(
    State(st): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Form(form): Form<GenerateForm>,
) -> Response {
    let now = Utc::now();

    let result = match form.to_request() {
        Ok(request) => {
            st.link_service
                .generate(current.access_token(), request, now)
                .await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(outcome) => {
            let notice = if outcome.partial {
                Notice::info(outcome.summary())
            } else {
                Notice::success(outcome.summary())
            };
            render(
                &st,
                &current,
                LinkQuery::default(),
                Some(notice),
                GeneratorValues::default(),
                Some(BatchPanel::new(&outcome)),
                StatusCode::OK,
            )
            .await
        }
        Err(e) if e.ends_session() => error_redirect(&st, &current, e, DASHBOARD_PATH).await,
        Err(e) => {
            render(
                &st,
                &current,
                LinkQuery::default(),
                Some(Notice::error(e.message())),
                form.echo(),
                None,
                e.status_code(),
            )
            .await
        }
    }
}

/// Deletes a link and returns to the links page.
///
/// # Endpoint
///
/// `POST /dashboard/links/{code}/delete`
pub async fn delete_link(
    State(st): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Path(code): Path<String>,
) -> Response {
    match st.link_service.delete(current.access_token(), &code).await {
        Ok(()) => redirect_with_notice(
            DASHBOARD_PATH,
            Some(&Notice::success(format!("Deleted link {code}."))),
        )
        .into_response(),
        Err(e) => error_redirect(&st, &current, e, DASHBOARD_PATH).await,
    }
}
