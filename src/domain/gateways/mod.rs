//! Interfaces to the collaborators around the view-model core.
//!
//! - [`LinkGateway`] - the link backend's REST API
//! - [`SessionStore`] - server-side session storage
//!
//! Implementations live in `crate::infrastructure`; mocks are generated by
//! `mockall` under `cfg(test)`.

pub mod link_gateway;
pub mod session_store;

pub use link_gateway::LinkGateway;
pub use session_store::SessionStore;

#[cfg(test)]
pub use link_gateway::MockLinkGateway;
#[cfg(test)]
pub use session_store::MockSessionStore;
