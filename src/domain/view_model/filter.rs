//! Free-text and target filtering over grouped links.

use super::grouping::TargetGroup;

/// Restricts a view to one destination URL, or leaves it unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TargetSelector {
    #[default]
    All,
    Exact(String),
}

impl TargetSelector {
    /// Form value that stands for "every target".
    pub const ALL_SENTINEL: &'static str = "__all__";

    /// Parses a raw form or query-string value.
    ///
    /// Missing, blank and [`Self::ALL_SENTINEL`] values select every target;
    /// anything else is kept verbatim as an exact target URL.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => Self::All,
            Some(value) if value.trim().is_empty() || value == Self::ALL_SENTINEL => Self::All,
            Some(value) => Self::Exact(value.to_string()),
        }
    }

    /// Returns true if a group with `target_url` passes the selector.
    pub fn admits(&self, target_url: &str) -> bool {
        match self {
            Self::All => true,
            Self::Exact(selected) => selected == target_url,
        }
    }

    /// The value to put back into a `<select>` element.
    pub fn as_form_value(&self) -> &str {
        match self {
            Self::All => Self::ALL_SENTINEL,
            Self::Exact(selected) => selected,
        }
    }
}

/// Trims and lower-cases a search query.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Keeps the groups matching `selector` and `query`, preserving their order.
///
/// A group passes when the selector admits its target URL exactly and either
/// the normalized query is empty, the lower-cased target URL contains it, or
/// any of its links has a lower-cased short URL or code containing it. Links
/// inside a kept group are never dropped or reordered.
pub fn filter(groups: &[TargetGroup], query: &str, selector: &TargetSelector) -> Vec<TargetGroup> {
    let needle = normalize_query(query);

    groups
        .iter()
        .filter(|group| selector.admits(&group.target_url))
        .filter(|group| needle.is_empty() || group.matches(&needle))
        .cloned()
        .collect()
}
