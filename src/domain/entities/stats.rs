//! Per-link statistics as returned by the backend.

use serde::{Deserialize, Serialize};

use super::{ClickEvent, LinkRecord};

/// A link, its lifetime click total and its most recent click events.
///
/// `recent_clicks` is a bounded, newest-first slice chosen by the backend;
/// it is not limited to any particular time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStats {
    pub link: LinkRecord,
    pub total_clicks: u64,
    #[serde(default)]
    pub recent_clicks: Vec<ClickEvent>,
}
