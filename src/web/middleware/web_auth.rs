//! Cookie-based session middleware for the web dashboard.

use axum::{
    extract::{Request, State},
    http::header::SET_COOKIE,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::domain::entities::Session;
use crate::state::AppState;
use crate::web::handlers::notice::{Notice, redirect_with_notice};
use crate::web::session_cookie::{clear_session_cookie, read_session_id};

pub const LOGIN_PATH: &str = "/dashboard/login";

/// The signed-in user of the current request.
///
/// Inserted into the request extensions by [`layer`]; protected handlers
/// take it with `Extension<CurrentSession>`.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub id: String,
    pub session: Session,
}

impl CurrentSession {
    pub fn access_token(&self) -> &str {
        self.session.access_token()
    }

    pub fn username(&self) -> &str {
        &self.session.username
    }
}

/// Authenticates dashboard requests using the `console_session` cookie.
///
/// # Authentication Flow
///
/// 1. Extract the session id from the `Cookie` header
/// 2. Resolve it via [`crate::application::services::AuthService::resolve`],
///    which refreshes a stale access token
/// 3. On success, attach [`CurrentSession`] and continue to the handler
/// 4. On failure, clear the cookie and redirect to `/dashboard/login`
///
/// Unlike the JSON API, which answers `401 Unauthorized`, this middleware
/// redirects so the browser lands on the login form.
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(id) = read_session_id(req.headers()) else {
        return redirect_with_notice(LOGIN_PATH, None).into_response();
    };

    match st.auth_service.resolve(&id, Utc::now()).await {
        Ok(session) => {
            req.extensions_mut().insert(CurrentSession { id, session });
            next.run(req).await
        }
        Err(e) => (
            [(SET_COOKIE, clear_session_cookie(st.session.cookie_secure))],
            redirect_with_notice(LOGIN_PATH, Some(&Notice::error(e.message()))),
        )
            .into_response(),
    }
}
