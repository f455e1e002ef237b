//! Properties of the grouping, filtering and series builders, checked over
//! generated link sets.

use chrono::{DateTime, Days, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use link_console::domain::entities::{ClickEvent, LinkRecord};
use link_console::domain::view_model::{
    SERIES_DAYS, TargetGroup, TargetSelector, build_series, filter, group,
};

const SEEDS: u64 = 200;
const TARGETS: &[&str] = &[
    "https://a.com",
    "https://a.com/",
    "https://A.com",
    "https://b.com/path?x=1",
    "http://c.org",
];

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// Random links with colliding timestamps and targets.
fn random_links(rng: &mut StdRng) -> Vec<LinkRecord> {
    let len = rng.random_range(0..25);
    (0..len)
        .map(|i| {
            let target = TARGETS[rng.random_range(0..TARGETS.len())];
            let created_at = epoch() + Duration::hours(rng.random_range(0..10));
            let code = format!("c{i}x{}", rng.random_range(0..100));
            LinkRecord::new(i, &code, format!("https://s.test/{code}"), target, created_at)
                .with_clicks(rng.random_range(0..1000))
        })
        .collect()
}

fn random_query(rng: &mut StdRng) -> String {
    const QUERIES: &[&str] = &["", "  ", "a.com", "B.COM", "c1", "x7", "s.test", "nothing", " HTTP "];
    QUERIES[rng.random_range(0..QUERIES.len())].to_string()
}

fn random_selector(rng: &mut StdRng) -> TargetSelector {
    if rng.random_bool(0.5) {
        TargetSelector::All
    } else {
        TargetSelector::Exact(TARGETS[rng.random_range(0..TARGETS.len())].to_string())
    }
}

fn ids(groups: &[TargetGroup]) -> Vec<i64> {
    groups
        .iter()
        .flat_map(|g| g.links.iter().map(|l| l.id))
        .collect()
}

#[test]
fn test_grouping_partitions_every_link_once() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let links = random_links(&mut rng);

        let groups = group(&links);

        let mut grouped = ids(&groups);
        grouped.sort_unstable();
        let mut input: Vec<i64> = links.iter().map(|l| l.id).collect();
        input.sort_unstable();
        assert_eq!(grouped, input, "seed {seed}");

        let targets: HashSet<&str> = groups.iter().map(|g| g.target_url.as_str()).collect();
        assert_eq!(targets.len(), groups.len(), "seed {seed}: duplicate group");

        for g in &groups {
            assert!(!g.links.is_empty(), "seed {seed}");
            assert!(g.links.iter().all(|l| l.target_url == g.target_url), "seed {seed}");
        }
    }
}

#[test]
fn test_grouping_totals_are_additive() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let links = random_links(&mut rng);

        let groups = group(&links);

        for g in &groups {
            let sum: u64 = g.links.iter().map(|l| l.click_count).sum();
            assert_eq!(g.total_clicks, sum, "seed {seed}");
            let newest = g.links.iter().map(|l| l.created_at).max().unwrap();
            assert_eq!(g.most_recent, newest, "seed {seed}");
        }

        let overall: u64 = groups.iter().map(|g| g.total_clicks).sum();
        assert_eq!(overall, links.iter().map(|l| l.click_count).sum::<u64>());
    }
}

#[test]
fn test_grouping_orders_are_stable_descending_sorts() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let links = random_links(&mut rng);

        let groups = group(&links);

        for pair in groups.windows(2) {
            assert!(pair[0].most_recent >= pair[1].most_recent, "seed {seed}");
        }

        for g in &groups {
            for pair in g.links.windows(2) {
                assert!(pair[0].created_at >= pair[1].created_at, "seed {seed}");
                // Ties keep input order; ids follow input order.
                if pair[0].created_at == pair[1].created_at {
                    assert!(pair[0].id < pair[1].id, "seed {seed}");
                }
            }
        }
    }
}

#[test]
fn test_filter_is_order_preserving_subsequence() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let groups = group(&random_links(&mut rng));
        let query = random_query(&mut rng);
        let selector = random_selector(&mut rng);

        let filtered = filter(&groups, &query, &selector);

        let mut rest = groups.iter();
        for kept in &filtered {
            assert!(
                rest.any(|g| g == kept),
                "seed {seed}: {:?} out of order or altered",
                kept.target_url
            );
        }
    }
}

#[test]
fn test_filter_is_idempotent() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let groups = group(&random_links(&mut rng));
        let query = random_query(&mut rng);
        let selector = random_selector(&mut rng);

        let once = filter(&groups, &query, &selector);
        let twice = filter(&once, &query, &selector);

        assert_eq!(once, twice, "seed {seed}");
    }
}

#[test]
fn test_filter_with_empty_query_and_all_is_identity() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let groups = group(&random_links(&mut rng));

        assert_eq!(filter(&groups, "", &TargetSelector::All), groups, "seed {seed}");
    }
}

#[test]
fn test_filter_exact_selector_is_byte_exact() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let groups = group(&random_links(&mut rng));
        let target = TARGETS[rng.random_range(0..TARGETS.len())];

        let filtered = filter(&groups, "", &TargetSelector::Exact(target.to_string()));

        assert!(filtered.len() <= 1, "seed {seed}");
        assert!(filtered.iter().all(|g| g.target_url == target), "seed {seed}");
    }
}

#[test]
fn test_series_shape_and_sum() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let now = epoch() + Duration::minutes(rng.random_range(0..60 * 24 * 60));
        let events: Vec<ClickEvent> = (0..rng.random_range(0..60))
            .map(|_| ClickEvent::at(now - Duration::minutes(rng.random_range(-600..60 * 24 * 14))))
            .collect();

        let series = build_series(&events, now);

        assert_eq!(series.len(), SERIES_DAYS, "seed {seed}");
        assert_eq!(series[SERIES_DAYS - 1].date, now.date_naive(), "seed {seed}");
        for pair in series.windows(2) {
            assert_eq!(pair[0].date + Days::new(1), pair[1].date, "seed {seed}");
        }

        let first = series[0].date;
        let last = series[SERIES_DAYS - 1].date;
        let in_window = events
            .iter()
            .filter(|e| {
                let day = e.timestamp.date_naive();
                day >= first && day <= last
            })
            .count() as u64;
        let total: u64 = series.iter().map(|b| b.count).sum();
        assert_eq!(total, in_window, "seed {seed}");
    }
}
