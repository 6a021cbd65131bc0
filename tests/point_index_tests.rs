use chart_engine::data_types::PlotPoint;
use chart_engine::point_index::{PointIndex, FAN_OUT};
use rand::Rng;

fn points(raw: &[(f64, f64)]) -> Vec<PlotPoint> {
    raw.iter().map(|&(x, y)| PlotPoint::new(x, y)).collect()
}

fn ramp(n: usize) -> Vec<PlotPoint> {
    (0..n)
        .map(|i| PlotPoint::new(i as f64, 1.5 * i as f64))
        .collect()
}

#[test]
fn test_build_rejects_empty_input() {
    assert!(
        PointIndex::build(&[]).is_err(),
        "empty series must fail fast"
    );
}

#[test]
fn test_full_data_round_trip_leaf_and_internal() {
    for n in [1, 3, 4, FAN_OUT, FAN_OUT + 1, 45, 500] {
        let data = ramp(n);
        let index = PointIndex::build(&data).unwrap();
        assert_eq!(
            index.full_data(),
            data,
            "round trip must preserve order and content for n={n}"
        );
    }
}

#[test]
fn test_limits_small_series() {
    // Worked example: limits over the open interval (-1, 2.5).
    let data = points(&[(0.0, 1.0), (1.0, 2.0), (2.0, 1.0), (3.0, 3.0)]);
    let index = PointIndex::build(&data).unwrap();
    assert_eq!(index.limits(-1.0, 2.5), Some((1.0, 2.0)));
    assert_eq!(index.limits(-5.0, 10.0), Some((1.0, 3.0)));
    assert_eq!(index.limits(10.0, 20.0), None, "disjoint range has no limits");
}

#[test]
fn test_limits_internal_tree() {
    let data = ramp(45);
    let index = PointIndex::build(&data).unwrap();
    assert_eq!(index.limits(-1.0, 23.0), Some((0.0, 33.0)));
    // Full cover takes the cached fast path and must agree.
    assert_eq!(index.limits(-100.0, 100.0), Some((0.0, 66.0)));
}

#[test]
fn test_limits_monotone_under_range_shrink() {
    let mut rng = rand::rng();
    let data: Vec<PlotPoint> = (0..300)
        .map(|i| PlotPoint::new(i as f64, rng.random_range(-50.0..50.0)))
        .collect();
    let index = PointIndex::build(&data).unwrap();

    let (outer_min, outer_max) = index.limits(10.0, 250.0).unwrap();
    for _ in 0..50 {
        let a = rng.random_range(10.0..120.0);
        let b = rng.random_range(a..250.0);
        if let Some((inner_min, inner_max)) = index.limits(a, b) {
            assert!(
                inner_min >= outer_min && inner_max <= outer_max,
                "sub-range limits [{inner_min}, {inner_max}] escaped [{outer_min}, {outer_max}]"
            );
        }
    }
}

#[test]
fn test_limits_ignore_nan_values() {
    let data = points(&[(0.0, 1.0), (1.0, f64::NAN), (2.0, 5.0)]);
    let index = PointIndex::build(&data).unwrap();
    assert_eq!(index.y_range(), Some((1.0, 5.0)));

    let all_nan = points(&[(0.0, f64::NAN), (1.0, f64::NAN)]);
    let index = PointIndex::build(&all_nan).unwrap();
    assert_eq!(index.y_range(), None, "all-NaN series has no valid range");
    assert_eq!(index.limits(-1.0, 2.0), None);
}

#[test]
fn test_nearest_small_series() {
    let data = points(&[(0.0, 1.0), (1.0, 2.0), (2.0, 1.0), (3.0, 3.0)]);
    let index = PointIndex::build(&data).unwrap();
    assert_eq!(index.nearest(2.4), PlotPoint::new(2.0, 1.0));
    assert_eq!(index.nearest(4.0), PlotPoint::new(3.0, 3.0), "clamps to last");
    assert_eq!(index.nearest(-7.0), PlotPoint::new(0.0, 1.0), "clamps to first");
    // Equal distance resolves to the lower-X point.
    assert_eq!(index.nearest(0.5), PlotPoint::new(0.0, 1.0));
}

#[test]
fn test_nearest_internal_tree() {
    let data = ramp(45);
    let index = PointIndex::build(&data).unwrap();
    assert_eq!(index.nearest(32.8), PlotPoint::new(33.0, 49.5));
    assert_eq!(index.nearest(1000.0), PlotPoint::new(44.0, 66.0));
}

#[test]
fn test_nearest_matches_linear_scan() {
    let mut rng = rand::rng();
    let data = ramp(777);
    let index = PointIndex::build(&data).unwrap();
    for _ in 0..200 {
        let q = rng.random_range(-10.0..790.0);
        let found = index.nearest(q);
        let best = data
            .iter()
            .map(|p| (p.x - q).abs())
            .fold(f64::INFINITY, f64::min);
        assert_eq!(
            (found.x - q).abs(),
            best,
            "nearest({q}) returned a point farther than the best candidate"
        );
    }
}

#[test]
fn test_data_extraction_is_inclusive_and_ordered() {
    let data = ramp(120);
    let index = PointIndex::build(&data).unwrap();
    let slice = index.data(10.0, 30.0);
    assert_eq!(slice.first().map(|p| p.x), Some(10.0));
    assert_eq!(slice.last().map(|p| p.x), Some(30.0));
    assert_eq!(slice.len(), 21);
    for pair in slice.windows(2) {
        assert!(pair[0].x < pair[1].x, "extraction must stay X-ordered");
    }
    assert!(index.data(500.0, 600.0).is_empty());
}
