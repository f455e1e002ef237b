//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`http`] - REST client for the link backend
//! - [`session`] - session storage

pub mod http;
pub mod session;
