//! HTML template rendering handlers for the web dashboard.

mod links;
mod login;
pub mod notice;
mod stats;

use chrono::{DateTime, Utc};

pub use links::{delete_link, generate_links, links_page};
pub use login::{login_page, login_submit, logout};
pub use stats::stats_page;

/// Timestamp format used throughout the dashboard.
pub(crate) fn format_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}
