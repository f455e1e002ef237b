//! Helpers shared by the services and the presentation layers.
//!
//! - [`target_url`] - destination URL checks
//! - [`link_code`] - short code validation
//! - [`session_id`] - random session identifiers

pub mod link_code;
pub mod session_id;
pub mod target_url;
