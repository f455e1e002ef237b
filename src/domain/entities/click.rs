//! Click event entity representing a single recorded visit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A click recorded by the backend when a short link was followed.
///
/// All metadata fields are optional: the backend stores whatever the
/// redirect request carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    #[serde(rename = "ts")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub referrer: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl ClickEvent {
    /// Creates an event with no metadata.
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            ip: None,
            user_agent: None,
            referrer: None,
            country: None,
        }
    }
}
