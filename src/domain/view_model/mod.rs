//! Pure transformations from backend snapshots to what the console renders.
//!
//! Nothing in here performs I/O or reads the clock; callers pass `now`.

pub mod filter;
pub mod grouping;
pub mod series;
pub mod sparkline;
pub mod views;

pub use filter::{TargetSelector, filter, normalize_query};
pub use grouping::{TargetGroup, group};
pub use series::{DailyBucket, SERIES_DAYS, build_series};
pub use sparkline::{SparkPoint, Sparkline};
pub use views::{LinkQuery, LinksView, StatsView};
