//! Dismissable notification banners carried across redirects.

use axum::{
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::middleware::web_auth::{CurrentSession, LOGIN_PATH};
use crate::web::session_cookie::clear_session_cookie;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Info => "info",
            NoticeLevel::Error => "error",
        }
    }

    fn parse(raw: &str) -> Self {
        match raw {
            "success" => NoticeLevel::Success,
            "error" => NoticeLevel::Error,
            _ => NoticeLevel::Info,
        }
    }
}

/// A message shown once at the top of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// `?notice=...&level=...` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeParams {
    pub notice: Option<String>,
    pub level: Option<String>,
}

impl NoticeParams {
    pub fn into_notice(self) -> Option<Notice> {
        let message = self.notice.filter(|m| !m.trim().is_empty())?;
        Some(Notice {
            level: NoticeLevel::parse(self.level.as_deref().unwrap_or_default()),
            message,
        })
    }
}

/// Redirects to `path`, carrying `notice` in the query string.
pub fn redirect_with_notice(path: &str, notice: Option<&Notice>) -> Redirect {
    let Some(notice) = notice else {
        return Redirect::to(path);
    };

    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("notice", &notice.message)
        .append_pair("level", notice.level.as_str())
        .finish();
    let separator = if path.contains('?') { '&' } else { '?' };

    Redirect::to(&format!("{path}{separator}{query}"))
}

/// Turns a failed backend call into a redirect with an error banner.
///
/// Errors that mean the credentials are gone end the session, clear the
/// cookie and send the user to the login page instead of `back_to`.
pub async fn error_redirect(
    state: &AppState,
    current: &CurrentSession,
    error: AppError,
    back_to: &str,
) -> Response {
    if !error.ends_session() {
        tracing::debug!(error = %error, "Request failed, redirecting with notice");
        return redirect_with_notice(back_to, Some(&Notice::error(error.message()))).into_response();
    }

    state.auth_service.logout(&current.id).await;
    (
        [(SET_COOKIE, clear_session_cookie(state.session.cookie_secure))],
        redirect_with_notice(
            LOGIN_PATH,
            Some(&Notice::error("Your session has expired. Please sign in again.")),
        ),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::LOCATION;

    fn location(redirect: Redirect) -> String {
        let response = redirect.into_response();
        response.headers()[LOCATION].to_str().unwrap().to_string()
    }

    #[test]
    fn test_redirect_without_notice() {
        assert_eq!(location(redirect_with_notice("/dashboard", None)), "/dashboard");
    }

    #[test]
    fn test_redirect_encodes_notice() {
        let notice = Notice::success("Deleted link abc & co.");

        assert_eq!(
            location(redirect_with_notice("/dashboard", Some(&notice))),
            "/dashboard?notice=Deleted+link+abc+%26+co.&level=success"
        );
    }

    #[test]
    fn test_redirect_appends_to_existing_query() {
        let notice = Notice::error("x");

        assert_eq!(
            location(redirect_with_notice("/dashboard?q=a", Some(&notice))),
            "/dashboard?q=a&notice=x&level=error"
        );
    }

    #[test]
    fn test_notice_params() {
        let params = NoticeParams {
            notice: Some("Signed out.".to_string()),
            level: Some("bogus".to_string()),
        };
        assert_eq!(params.into_notice(), Some(Notice::info("Signed out.")));

        let blank = NoticeParams {
            notice: Some("  ".to_string()),
            level: None,
        };
        assert_eq!(blank.into_notice(), None);
    }
}
