//! Use cases of the console, built on the domain gateways.

pub mod auth_service;
pub mod link_service;
pub mod stats_service;

pub use auth_service::AuthService;
pub use link_service::LinkService;
pub use stats_service::StatsService;
