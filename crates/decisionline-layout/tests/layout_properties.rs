use chrono::{DateTime, Duration, TimeZone, Utc};
use decisionline_core::{EventType, TimelineEvent};
use decisionline_layout::{
    filter_events, layout_timeline, normalize_factors, FilterCriteria, LayoutConfig, Margin,
};
use proptest::prelude::*;

fn origin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

fn build_events(offsets: &[(i64, usize)]) -> Vec<TimelineEvent> {
    offsets
        .iter()
        .enumerate()
        .map(|(i, &(minutes, kind))| {
            TimelineEvent::new(
                format!("e{i}"),
                EventType::ALL[kind % EventType::ALL.len()],
                origin() + Duration::minutes(minutes),
            )
        })
        .collect()
}

fn input_index(id: &str) -> usize {
    id.trim_start_matches('e').parse().expect("generated id")
}

fn config(threshold: f64, max_levels: usize) -> LayoutConfig {
    LayoutConfig {
        width: 1200.0,
        height: 600.0,
        margin: Margin::uniform(25.0),
        level_height: 40.0,
        max_levels,
        overlap_threshold_px: threshold,
    }
}

proptest! {
    #[test]
    fn layout_is_deterministic(
        offsets in prop::collection::vec((0i64..600, 0usize..4), 1..40),
        threshold in 0.0f64..400.0,
        max_levels in 1usize..7,
    ) {
        let events = build_events(&offsets);
        let cfg = config(threshold, max_levels);
        let first = layout_timeline(&events, &cfg).expect("layout");
        let second = layout_timeline(&events, &cfg).expect("layout");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn x_follows_chronology_and_ties_keep_input_order(
        offsets in prop::collection::vec((0i64..30, 0usize..4), 1..40),
        threshold in 0.0f64..400.0,
    ) {
        let events = build_events(&offsets);
        let nodes = layout_timeline(&events, &config(threshold, 4)).expect("layout");
        prop_assert_eq!(nodes.len(), events.len());

        for pair in nodes.windows(2) {
            prop_assert!(pair[0].event.timestamp <= pair[1].event.timestamp);
            prop_assert!(pair[0].x <= pair[1].x);
            if pair[0].event.timestamp == pair[1].event.timestamp {
                prop_assert!(input_index(pair[0].id.as_str()) < input_index(pair[1].id.as_str()));
            }
        }
        for node in &nodes {
            prop_assert!(node.x.is_finite() && node.y.is_finite());
            prop_assert!(node.x >= 25.0 && node.x <= 1175.0);
        }
    }

    #[test]
    fn close_nodes_are_a_level_apart_unless_overflowed(
        offsets in prop::collection::vec((0i64..240, 0usize..4), 1..50),
        threshold in 0.0f64..500.0,
        max_levels in 1usize..6,
    ) {
        let events = build_events(&offsets);
        let cfg = config(threshold, max_levels);
        let nodes = layout_timeline(&events, &cfg).expect("layout");
        let last = max_levels - 1;

        for node in &nodes {
            prop_assert_eq!(node.y, cfg.level_y(node.level));
        }
        for (i, a) in nodes.iter().enumerate() {
            for b in &nodes[i + 1..] {
                if (a.x - b.x).abs() < threshold {
                    let apart = a.level != b.level;
                    let pinned = a.level == last && b.level == last;
                    prop_assert!(apart || pinned, "{} and {} overlap", a.id, b.id);
                }
            }
        }
    }

    #[test]
    fn percentages_sum_to_hundred(weights in prop::collection::vec(0.0f64..1_000.0, 1..20)) {
        let total: f64 = weights.iter().sum();
        let shares = normalize_factors(&weights);
        let sum: f64 = shares.iter().map(|s| s.percentage).sum();
        if total > 0.0 {
            prop_assert!((sum - 100.0).abs() < 1e-6);
        } else {
            prop_assert_eq!(sum, 0.0);
        }
        for share in &shares {
            prop_assert!(share.start_angle <= share.end_angle);
        }
    }
}

#[test]
fn filtered_subset_lays_out_independently() {
    let events = vec![
        TimelineEvent::new("e1", EventType::Email, origin()).with_title("Invoice draft"),
        TimelineEvent::new("d1", EventType::Decision, origin() + Duration::minutes(1)),
        TimelineEvent::new("e2", EventType::Email, origin() + Duration::minutes(2))
            .with_content("final INVOICE attached"),
    ];
    let criteria = FilterCriteria::default()
        .with_types([EventType::Email])
        .with_search("invoice");
    let subset = filter_events(&events, &criteria);
    let nodes = layout_timeline(&subset, &config(10_000.0, 5)).expect("layout");

    let placed: Vec<(&str, usize, f64)> = nodes
        .iter()
        .map(|n| (n.id.as_str(), n.level, n.x))
        .collect();
    assert_eq!(placed, vec![("e1", 0, 25.0), ("e2", 1, 1175.0)]);
}

#[test]
fn all_zero_weights_do_not_produce_nan() {
    let shares = normalize_factors(&[0.0, 0.0]);
    let pct: Vec<f64> = shares.iter().map(|s| s.percentage).collect();
    assert_eq!(pct, vec![0.0, 0.0]);
}
