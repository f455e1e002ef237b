//! # Link Console
//!
//! An admin console for a URL-shortening backend, built with Axum and Askama.
//!
//! The console owns no link data. It signs operators in against the
//! backend, keeps their tokens in a server-side session, and turns the
//! backend's flat link list into views: links grouped by destination,
//! filtered by free text and destination, and per-link 7-day click series.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, gateway traits, and the pure view-model builders
//! - **Application Layer** ([`application`]) - Session, link and stats services
//! - **Infrastructure Layer** ([`infrastructure`]) - Backend HTTP client and session storage
//! - **API Layer** ([`api`]) - JSON views, health check, middleware
//! - **Web Layer** ([`web`]) - HTML dashboard
//!
//! ## Quick Start
//!
//! ```bash
//! export BACKEND_URL="http://localhost:8000"
//! cargo run
//! # open http://localhost:3000/dashboard
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, LinkService, StatsService};
    pub use crate::domain::entities::{
        BulkOutcome, BulkRequest, ClickEvent, Credentials, LinkRecord, LinkStats, Session,
    };
    pub use crate::domain::gateways::{LinkGateway, SessionStore};
    pub use crate::domain::view_model::{LinkQuery, LinksView, StatsView, TargetSelector};
    pub use crate::error::AppError;
    pub use crate::state::{AppState, SessionSettings};
}
