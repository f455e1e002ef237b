//! Core domain entities mirrored from the shortening backend.
//!
//! The console never owns these records: they are read-only snapshots fetched
//! on demand through [`crate::domain::gateways::LinkGateway`] and rebuilt into
//! view-models on every render.
//!
//! # Entity Types
//!
//! - [`LinkRecord`] - One short link and its counters
//! - [`ClickEvent`] - One recorded visit to a short link
//! - [`LinkStats`] - A link together with its recent click events
//! - [`Credentials`] / [`Session`] - Backend bearer tokens held for a signed-in user
//! - [`BulkRequest`] / [`BulkOutcome`] - Bulk generation input and result

pub mod bulk;
pub mod click;
pub mod link;
pub mod session;
pub mod stats;

pub use bulk::{
    BulkOutcome, BulkRequest, DEFAULT_CODE_LENGTH, DEFAULT_COUNT, MAX_BULK_LINKS,
    MAX_CODE_LENGTH, MIN_CODE_LENGTH,
};
pub use click::ClickEvent;
pub use link::LinkRecord;
pub use session::{Credentials, Session};
pub use stats::LinkStats;
