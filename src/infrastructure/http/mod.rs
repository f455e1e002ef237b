//! HTTP client for the link backend.
//!
//! - [`HttpLinkGateway`] - reqwest implementation of
//!   [`crate::domain::gateways::LinkGateway`]
//! - [`error_body`] - decoding of error responses

pub mod error_body;
mod http_link_gateway;

pub use http_link_gateway::HttpLinkGateway;
