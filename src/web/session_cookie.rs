//! The `console_session` cookie.
//!
//! The cookie carries only the opaque session id; backend tokens stay in the
//! server-side [`crate::domain::gateways::SessionStore`].

use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
use chrono::Duration;

use crate::utils::session_id::is_session_id;

pub const SESSION_COOKIE: &str = "console_session";

/// Reads the session id from the `Cookie` header.
///
/// Handles multiple cookies in one header. Values that could not have been
/// issued by the console are ignored.
pub fn read_session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            (name == SESSION_COOKIE && is_session_id(value)).then(|| value.to_string())
        })
}

/// `Set-Cookie` value that stores `id` for `max_age`.
pub fn session_cookie(id: &str, max_age: Duration, secure: bool) -> HeaderValue {
    build(id, max_age.num_seconds().max(0), secure)
}

/// `Set-Cookie` value that deletes the session cookie.
pub fn clear_session_cookie(secure: bool) -> HeaderValue {
    build("", 0, secure)
}

fn build(value: &str, max_age: i64, secure: bool) -> HeaderValue {
    let mut cookie =
        format!("{SESSION_COOKIE}={value}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age}");
    if secure {
        cookie.push_str("; Secure");
    }
    // Session ids are hex, so the value is always a valid header.
    HeaderValue::from_str(&cookie)
        .unwrap_or_else(|_| HeaderValue::from_static("console_session=; Path=/; Max-Age=0"))
}
