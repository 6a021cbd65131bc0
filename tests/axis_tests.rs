use chart_engine::axis::value;
use chart_engine::data_types::AxisRange;

#[test]
fn test_axis_range_pan() {
    let mut range = AxisRange::new(100.0, 200.0);
    range.pan(50.0);
    assert_eq!(range.min, 150.0);
    assert_eq!(range.max, 250.0);
    assert_eq!(range.span(), 100.0);
}

#[test]
fn test_axis_range_zoom_center() {
    let mut range = AxisRange::new(100.0, 200.0);
    // Zoom in (factor 0.5) at center (pivot_pct 0.5): new range [125, 175].
    range.zoom_at(150.0, 0.5, 0.5);
    assert_eq!(range.min, 125.0);
    assert_eq!(range.max, 175.0);
    assert_eq!(range.span(), 50.0);
}

#[test]
fn test_axis_range_zoom_edge() {
    let mut range = AxisRange::new(100.0, 200.0);
    // Zoom out (factor 2.0) pinned to the left edge: new range [100, 300].
    range.zoom_at(100.0, 0.0, 2.0);
    assert_eq!(range.min, 100.0);
    assert_eq!(range.max, 300.0);
}

#[test]
fn test_axis_range_clamp() {
    let mut range = AxisRange::new(100.0, 200.0);
    range.min_limit = Some(50.0);
    range.max_limit = Some(250.0);

    range.pan(-20.0); // [80, 180]
    range.clamp();
    assert_eq!(range.min, 80.0);

    range.pan(-40.0); // [40, 140]
    range.clamp();
    assert_eq!(range.min, 50.0);
    assert_eq!(range.max, 150.0, "span should be preserved");

    range.pan(150.0); // [200, 300]
    range.clamp();
    assert_eq!(range.max, 250.0);
    assert_eq!(range.min, 150.0, "span should be preserved");
}

#[test]
fn test_axis_range_zoom_pivot_with_clamping() {
    let mut range = AxisRange::new(100.0, 200.0);
    range.min_limit = Some(0.0);
    range.max_limit = Some(300.0);

    // Zoom out (factor 4.0) at pivot 150.0: virtual range [-50, 350].
    range.zoom_at(150.0, 0.5, 4.0);
    range.clamp();
    assert_eq!(range.min, -50.0, "virtual min should be preserved");
    assert_eq!(range.max, 350.0, "virtual max should be preserved");

    // Rendering still sees the clamped window.
    let (view_min, view_max) = range.clamped_bounds();
    assert_eq!(view_min, 0.0);
    assert_eq!(view_max, 300.0);

    // Zoom back in at the same pivot restores the original window.
    range.zoom_at(150.0, 0.5, 0.25);
    assert_eq!(range.min, 100.0);
    assert_eq!(range.max, 200.0);
}

fn tick_values(domain: (f64, f64)) -> Vec<f64> {
    value::plan(domain).ticks.iter().map(|t| t.value).collect()
}

#[test]
fn test_value_ticks_unit_domain() {
    let values = tick_values((0.0, 10.0));
    assert_eq!(values.len(), 11);
    assert_eq!(values[0], 0.0);
    assert_eq!(values[10], 10.0);
}

#[test]
fn test_value_ticks_cover_domain_and_increase() {
    for domain in [
        (0.0, 10.0),
        (-3.0, 7.0),
        (2.3, 2.4),
        (0.0, 5_000_000.0),
        (-0.004, 0.004),
        (17.0, 94.0),
    ] {
        let values = tick_values(domain);
        assert!(!values.is_empty(), "no ticks for {domain:?}");
        let slack = (domain.1 - domain.0) * 1e-9;
        for v in &values {
            assert!(
                *v >= domain.0 - slack && *v <= domain.1 + slack,
                "tick {v} escaped domain {domain:?}"
            );
        }
        for pair in values.windows(2) {
            assert!(pair[0] < pair[1], "ticks must be strictly increasing");
        }
    }
}

#[test]
fn test_value_step_bands() {
    // Width normalized into [1, 10) then banded to 1 / 0.5 / 0.2 / 0.1.
    assert_eq!(value::tick_step(7.0), 1.0);
    assert_eq!(value::tick_step(5.0), 0.5);
    assert_eq!(value::tick_step(1.3), 0.2);
    assert_eq!(value::tick_step(1.0), 0.1);
    assert_eq!(value::tick_step(70.0), 10.0);
    assert_eq!(value::tick_step(0.5), 0.05);
}

#[test]
fn test_value_degenerate_domain_single_tick() {
    let plan = value::plan((3.0, 3.0));
    assert_eq!(plan.ticks.len(), 1);
    assert_eq!(plan.ticks[0].value, 3.0);
}

#[test]
fn test_value_display_factor_large_domain() {
    let plan = value::plan((0.0, 5_000_000.0));
    assert_eq!(plan.display_factor, 1_000_000.0);
    assert_eq!(plan.axis_suffix.as_deref(), Some("×1e6"));
    // Labels are divided by the factor, one decimal for a scaled width of 5.
    let million = plan
        .ticks
        .iter()
        .find(|t| t.value == 1_000_000.0)
        .expect("expected a tick at 1e6");
    assert_eq!(million.label, "1.0");
}

#[test]
fn test_value_label_decimals_narrow_domain() {
    let plan = value::plan((2.3, 2.4));
    assert!(plan.axis_suffix.is_none());
    assert!(
        plan.ticks.iter().any(|t| t.label == "2.350"),
        "scaled width 0.1 should label with three decimals, got {:?}",
        plan.ticks.iter().map(|t| t.label.clone()).collect::<Vec<_>>()
    );
}
