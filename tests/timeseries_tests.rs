use mock_dashboard_api::timeseries::{
    aggregate, aggregate_channels, normalize, slice, slice_series, Aggregator, Channels,
    EmptyChannelPolicy, Series, TimePoint, TimeRange,
};

fn series(points: &[(i64, f64)]) -> Series {
    points.iter().copied().map(TimePoint::from).collect()
}

#[test]
fn test_normalize_then_slice_latest_window() {
    let mut s = series(&[(0, 1.0), (60_000, 2.0), (120_000, 3.0)]);
    let now = 1_700_000_000_000;

    normalize(&mut s, now);
    let latest = slice_series(&s, TimeRange::new(now - 60_000, now));

    assert_eq!(latest, series(&[(now - 60_000, 2.0), (now, 3.0)]));
}

#[test]
fn test_slice_membership() {
    let s = series(&[(1, 1.0), (3, 1.0), (5, 1.0), (7, 1.0), (9, 1.0)]);
    let range = TimeRange::new(3, 7);
    let sliced = slice_series(&s, range);

    for point in &s {
        assert_eq!(sliced.contains(point), range.contains(point.timestamp));
    }
}

#[test]
fn test_duplicate_timestamps_are_kept() {
    let s = series(&[(5, 1.0), (5, 2.0), (6, 3.0)]);
    let sliced = slice_series(&s, TimeRange::new(5, 5));
    assert_eq!(sliced.len(), 2);
    assert_eq!(aggregate(&sliced, Aggregator::Sum), Some(3.0));
}

#[test]
fn test_aggregate_examples() {
    let s = series(&[(0, 2.0), (1, 3.0), (2, 5.0)]);

    assert_eq!(aggregate(&[], Aggregator::Sum), Some(0.0));
    assert_eq!(aggregate(&[], Aggregator::Average), Some(0.0));
    assert_eq!(aggregate(&s, Aggregator::Sum), Some(10.0));
    assert_eq!(aggregate(&s, Aggregator::Average), Some(10.0 / 3.0));
}

#[test]
fn test_every_aggregator_on_sliced_channels() {
    let channels = Channels::new()
        .with("cdn", series(&[(0, 1.0), (10, 4.0), (20, 9.0)]))
        .with("p2p", series(&[(0, 2.0), (10, 8.0), (20, 32.0)]));
    let sliced = slice(&channels, TimeRange::new(0, 10));

    let expected = [
        (Aggregator::Sum, 5.0, 10.0),
        (Aggregator::Max, 4.0, 8.0),
        (Aggregator::Min, 1.0, 2.0),
        (Aggregator::Average, 2.5, 5.0),
    ];

    for (agg, cdn, p2p) in expected {
        let totals = aggregate_channels(&sliced, agg, EmptyChannelPolicy::ZeroAll);
        assert_eq!(totals.get("cdn"), Some(&Some(cdn)), "{}", agg);
        assert_eq!(totals.get("p2p"), Some(&Some(p2p)), "{}", agg);
    }
}
