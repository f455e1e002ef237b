//! Application layer services.
//!
//! Services coordinate gateway calls, input validation and the view-model
//! core, and give the HTTP handlers and the admin CLI one API to call.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - sign-in, sessions and token refresh
//! - [`services::link_service::LinkService`] - grouped link views, bulk generation, deletion
//! - [`services::stats_service::StatsService`] - per-link click statistics

pub mod services;
