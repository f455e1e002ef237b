//! Login and logout handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Query, State},
    http::{HeaderMap, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;

use super::notice::{Notice, NoticeParams, redirect_with_notice};
use crate::state::AppState;
use crate::web::middleware::web_auth::{CurrentSession, LOGIN_PATH};
use crate::web::session_cookie::{clear_session_cookie, read_session_id, session_cookie};

/// Template for the login page.
///
/// Renders `templates/login.html` with the username/password form and an
/// optional notice (failed sign-in, expired session, signed out).
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {
    notice: Option<Notice>,
    username: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /dashboard/login`
///
/// Visitors who already hold a live session go straight to the dashboard.
pub async fn login_page(
    State(st): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<NoticeParams>,
) -> Response {
    if let Some(id) = read_session_id(&headers)
        && st.auth_service.resolve(&id, Utc::now()).await.is_ok()
    {
        return Redirect::to("/dashboard").into_response();
    }

    LoginTemplate {
        notice: params.into_notice(),
        username: String::new(),
    }
    .into_response()
}

/// Authenticates against the backend and starts a session.
///
/// # Endpoint
///
/// `POST /dashboard/login` (form: `username`, `password`)
///
/// On success sets the `console_session` cookie and redirects to
/// `/dashboard`. On failure re-renders the form with the backend's message
/// and the status of the underlying error.
pub async fn login_submit(State(st): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    match st
        .auth_service
        .login(&form.username, &form.password, Utc::now())
        .await
    {
        Ok((id, _)) => (
            [(
                SET_COOKIE,
                session_cookie(&id, st.session.session_ttl, st.session.cookie_secure),
            )],
            Redirect::to("/dashboard"),
        )
            .into_response(),
        Err(e) => {
            tracing::info!(username = %form.username.trim(), error = %e, "Sign-in failed");
            (
                e.status_code(),
                LoginTemplate {
                    notice: Some(Notice::error(e.message())),
                    username: form.username.trim().to_string(),
                },
            )
                .into_response()
        }
    }
}

/// Ends the session and clears the cookie.
///
/// # Endpoint
///
/// `POST /dashboard/logout`
pub async fn logout(
    State(st): State<AppState>,
    Extension(current): Extension<CurrentSession>,
) -> Response {
    st.auth_service.logout(&current.id).await;

    (
        [(SET_COOKIE, clear_session_cookie(st.session.cookie_secure))],
        redirect_with_notice(LOGIN_PATH, Some(&Notice::info("Signed out."))),
    )
        .into_response()
}
