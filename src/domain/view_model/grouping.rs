//! Grouping of link records by destination URL.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::domain::entities::LinkRecord;

/// Short links sharing one destination URL.
///
/// Built only from non-empty partitions, so `links` is never empty and
/// `most_recent` is the creation time of `links[0]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetGroup {
    pub target_url: String,
    /// Newest first.
    pub links: Vec<LinkRecord>,
    pub total_clicks: u64,
    pub most_recent: DateTime<Utc>,
}

impl TargetGroup {
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Short URLs of the group joined by newlines, ready to copy.
    pub fn short_urls(&self) -> String {
        self.links
            .iter()
            .map(|link| link.short_url.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `needle` must already be lower-cased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.target_url.to_lowercase().contains(needle)
            || self.links.iter().any(|link| {
                link.short_url.to_lowercase().contains(needle)
                    || link.code.to_lowercase().contains(needle)
            })
    }
}

/// Partitions `links` by exact target URL and orders the result by recency.
///
/// - Target URLs are compared byte for byte: no normalization of scheme,
///   case or trailing slashes.
/// - Inside a group links are ordered by `created_at` descending. Links with
///   equal timestamps keep their input order.
/// - Groups are ordered by `most_recent` descending. Groups with equal
///   `most_recent` keep the order in which their target first appeared.
///
/// An empty input yields an empty output.
pub fn group(links: &[LinkRecord]) -> Vec<TargetGroup> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut partitions: Vec<Vec<&LinkRecord>> = Vec::new();

    for link in links {
        let slot = *slots.entry(link.target_url.as_str()).or_insert_with(|| {
            partitions.push(Vec::new());
            partitions.len() - 1
        });
        partitions[slot].push(link);
    }

    let mut groups: Vec<TargetGroup> = partitions
        .into_iter()
        .filter_map(|mut members| {
            // Vec::sort_by is stable.
            members.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            let first = members.first()?;

            Some(TargetGroup {
                target_url: first.target_url.clone(),
                most_recent: first.created_at,
                total_clicks: members.iter().map(|link| link.click_count).sum(),
                links: members.into_iter().cloned().collect(),
            })
        })
        .collect();

    groups.sort_by(|a, b| b.most_recent.cmp(&a.most_recent));
    groups
}
