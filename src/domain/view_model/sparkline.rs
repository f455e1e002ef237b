//! Polyline geometry for the small click chart.

use serde::Serialize;

use super::series::DailyBucket;

/// Default viewport width of the chart.
pub const SPARKLINE_WIDTH: f64 = 200.0;
/// Default viewport height of the chart.
pub const SPARKLINE_HEIGHT: f64 = 100.0;

/// One plotted bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SparkPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub count: u64,
}

/// Points of a line chart scaled into a `width` x `height` viewport.
///
/// The tallest bucket reaches 5% below the top edge and an empty bucket sits
/// 5% above the bottom edge. A series of zeros is drawn flat at the bottom.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sparkline {
    pub width: f64,
    pub height: f64,
    pub max_count: u64,
    pub points: Vec<SparkPoint>,
}

impl Sparkline {
    pub fn from_buckets(buckets: &[DailyBucket], width: f64, height: f64) -> Self {
        let max_count = buckets.iter().map(|b| b.count).max().unwrap_or(0).max(1);
        let span = buckets.len().saturating_sub(1).max(1) as f64;

        let points = buckets
            .iter()
            .enumerate()
            .map(|(index, bucket)| SparkPoint {
                x: index as f64 / span * width,
                y: height - (bucket.count as f64 / max_count as f64) * height * 0.9 - height * 0.05,
                label: bucket.label(),
                count: bucket.count,
            })
            .collect();

        Self {
            width,
            height,
            max_count,
            points,
        }
    }

    /// Value of an SVG `points` attribute.
    pub fn polyline(&self) -> String {
        self.points
            .iter()
            .map(|p| format!("{:.1},{:.1}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Value of an SVG `viewBox` attribute.
    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}
