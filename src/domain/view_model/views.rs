//! Page-level view models assembled from the grouping, filter and series steps.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::filter::{TargetSelector, filter};
use super::grouping::{TargetGroup, group};
use super::series::{DailyBucket, SERIES_DAYS, build_series};
use super::sparkline::{SPARKLINE_HEIGHT, SPARKLINE_WIDTH, Sparkline};
use crate::domain::entities::{ClickEvent, LinkRecord, LinkStats};

/// Search box and target dropdown state of the links page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkQuery {
    pub query: String,
    pub target: TargetSelector,
}

impl LinkQuery {
    pub fn new(query: impl Into<String>, target: TargetSelector) -> Self {
        Self {
            query: query.into(),
            target,
        }
    }

    /// Builds a query from raw request parameters.
    pub fn from_params(query: Option<&str>, target: Option<&str>) -> Self {
        Self {
            query: query.unwrap_or_default().to_string(),
            target: TargetSelector::parse(target),
        }
    }
}

/// Grouped and filtered links, plus what the page needs to tell
/// "no links yet" apart from "nothing matches".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinksView {
    pub groups: Vec<TargetGroup>,
    /// Targets of the unfiltered grouping, in group order.
    pub available_targets: Vec<String>,
    pub total_links: usize,
    pub total_groups: usize,
}

impl LinksView {
    pub fn build(links: &[LinkRecord], query: &LinkQuery) -> Self {
        let all = group(links);
        let available_targets = all.iter().map(|g| g.target_url.clone()).collect();
        let total_groups = all.len();

        Self {
            groups: filter(&all, &query.query, &query.target),
            available_targets,
            total_links: links.len(),
            total_groups,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_links == 0
    }

    pub fn visible_links(&self) -> usize {
        self.groups.iter().map(TargetGroup::link_count).sum()
    }
}

/// Everything the stats page shows for one link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsView {
    pub link: LinkRecord,
    pub status: &'static str,
    pub total_clicks: u64,
    pub recent_clicks: Vec<ClickEvent>,
    pub series: [DailyBucket; SERIES_DAYS],
    pub sparkline: Sparkline,
}

impl StatsView {
    pub fn build(stats: LinkStats, now: DateTime<Utc>) -> Self {
        let series = build_series(&stats.recent_clicks, now);
        let sparkline = Sparkline::from_buckets(&series, SPARKLINE_WIDTH, SPARKLINE_HEIGHT);

        Self {
            status: stats.link.status_label(now),
            link: stats.link,
            total_clicks: stats.total_clicks,
            recent_clicks: stats.recent_clicks,
            series,
            sparkline,
        }
    }

    pub fn week_total(&self) -> u64 {
        self.series.iter().map(|b| b.count).sum()
    }
}
