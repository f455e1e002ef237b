//! JSON API layer.
//!
//! Exposes the same views the dashboard renders, for scripts and other
//! frontends that hold their own backend token.
//!
//! # Modules
//!
//! - [`dto`] - Request/response serialization types
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Authentication, rate limiting, tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
