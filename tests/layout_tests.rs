use chart_engine::axis::{plan_ticks, AxisEdge, AxisKind, AxisOptions};
use chart_engine::data_types::PixelBounds;
use chart_engine::layout::{solve_layout, AxisSlot};
use chart_engine::text::{MonospaceMeasurer, TextMeasurer};

fn slots() -> Vec<AxisSlot> {
    vec![
        AxisSlot {
            options: AxisOptions::new(AxisKind::Value, AxisEdge::Left),
            domain: (0.0, 100.0),
        },
        AxisSlot {
            options: AxisOptions::new(AxisKind::Time, AxisEdge::Bottom),
            domain: (1_700_000_000_000.0, 1_700_000_000_000.0 + 4.0 * 3_600_000.0),
        },
    ]
}

#[test]
fn test_layout_reserves_gutters_for_both_axes() {
    let outer = PixelBounds::new(0.0, 0.0, 800.0, 600.0);
    let layout = solve_layout(outer, &slots(), &MonospaceMeasurer::default());

    assert_eq!(layout.plans.len(), 2);
    assert!(layout.gutters.left > 0.0, "value labels need a left gutter");
    assert!(layout.gutters.bottom > 0.0, "time labels need a bottom gutter");
    assert_eq!(layout.gutters.right, 0.0);
    assert_eq!(layout.gutters.top, 0.0);

    assert_eq!(layout.plot_area.origin_x, layout.gutters.left);
    assert_eq!(layout.plot_area.width, 800.0 - layout.gutters.left);
    assert_eq!(layout.plot_area.height, 600.0 - layout.gutters.bottom);
}

#[test]
fn test_layout_is_a_fixed_point() {
    let outer = PixelBounds::new(0.0, 0.0, 800.0, 600.0);
    let measurer = MonospaceMeasurer::default();
    let first = solve_layout(outer, &slots(), &measurer);
    let again = solve_layout(first.plot_area, &slots(), &measurer);

    // Re-solving from the already-shrunken area reserves the same gutters:
    // the feedback loop has converged.
    assert_eq!(first.gutters, again.gutters);
}

#[test]
fn test_left_axis_thickness_tracks_longest_label() {
    let measurer = MonospaceMeasurer::default();
    let options = AxisOptions::new(AxisKind::Value, AxisEdge::Left);
    let bounds = PixelBounds::new(0.0, 0.0, 400.0, 300.0);

    let narrow = plan_ticks((0.0, 9.0), bounds, &options, &measurer);
    let wide = plan_ticks((0.0, 90_000.0), bounds, &options, &measurer);
    assert!(
        wide.required_thickness > narrow.required_thickness,
        "labels plus a display-factor suffix need a wider gutter"
    );

    let longest = wide
        .ticks
        .iter()
        .map(|t| measurer.measure_width(&t.label, options.font_size))
        .fold(0.0f32, f32::max);
    assert!(wide.required_thickness >= longest);
}

#[test]
fn test_bottom_axis_reserves_room_for_suffix_line() {
    let measurer = MonospaceMeasurer::default();
    let bounds = PixelBounds::new(0.0, 0.0, 400.0, 300.0);
    let domain = (1_700_000_000_000.0, 1_700_000_000_000.0 + 4.0 * 3_600_000.0);

    let time = plan_ticks(
        domain,
        bounds,
        &AxisOptions::new(AxisKind::Time, AxisEdge::Bottom),
        &measurer,
    );
    let value = plan_ticks(
        (0.0, 10.0),
        bounds,
        &AxisOptions::new(AxisKind::Value, AxisEdge::Bottom),
        &measurer,
    );
    // The time plan carries a "(hour:min)" suffix line; the plain value plan
    // does not.
    assert!(time.required_thickness > value.required_thickness);
}

#[test]
fn test_degenerate_outer_bounds_do_not_underflow() {
    let outer = PixelBounds::new(0.0, 0.0, 10.0, 10.0);
    let layout = solve_layout(outer, &slots(), &MonospaceMeasurer::default());
    assert!(layout.plot_area.width >= 0.0);
    assert!(layout.plot_area.height >= 0.0);
}
