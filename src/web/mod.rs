//! Web dashboard layer for browser-based UI.
//!
//! Server-rendered pages for generating, browsing and inspecting links.
//! Uses Askama templates for server-side rendering.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`middleware`] - Session middleware
//! - [`routes`] - Dashboard route configuration
//! - [`session_cookie`] - The `console_session` cookie

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod session_cookie;
