//! HTTP request handlers for the JSON API.

pub mod health;
pub mod views;

pub use health::health_handler;
pub use views::{links_view_handler, stats_view_handler};
