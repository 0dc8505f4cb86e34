#![allow(clippy::float_cmp)]

use super::*;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================
// layout_chart
// =============================================================

#[test]
fn zero_sized_container_draws_nothing() {
    assert!(layout_chart(&SAMPLE_CHART_DATA, Size::new(0.0, 200.0), false).is_none());
    assert!(layout_chart(&SAMPLE_CHART_DATA, Size::new(300.0, 0.0), false).is_none());
}

#[test]
fn too_small_plot_area_draws_nothing() {
    // 36 + 12 insets leave 19px of width.
    assert!(layout_chart(&SAMPLE_CHART_DATA, Size::new(67.0, 200.0), false).is_none());
    // 12 + 24 insets leave 19px of height.
    assert!(layout_chart(&SAMPLE_CHART_DATA, Size::new(300.0, 55.0), false).is_none());
    assert!(layout_chart(&SAMPLE_CHART_DATA, Size::new(68.0, 56.0), false).is_some());
}

#[test]
fn grid_line_count_depends_on_compact() {
    let regular = layout_chart(&SAMPLE_CHART_DATA, Size::new(400.0, 300.0), false).unwrap();
    let compact = layout_chart(&SAMPLE_CHART_DATA, Size::new(400.0, 300.0), true).unwrap();
    assert_eq!(regular.grid_lines.len(), 5);
    assert_eq!(compact.grid_lines.len(), 4);
    assert_eq!(regular.y_labels.len(), 5);
    assert_eq!(compact.y_labels.len(), 4);
}

#[test]
fn grid_lines_span_plot_area() {
    let g = layout_chart(&SAMPLE_CHART_DATA, Size::new(400.0, 300.0), false).unwrap();
    let first = g.grid_lines[0];
    let last = g.grid_lines[4];
    assert_eq!(first.y, 12.0);
    assert_eq!(last.y, 300.0 - 24.0);
    assert_eq!(first.x_start, 36.0);
    assert_eq!(first.x_end, 400.0 - 12.0);
}

#[test]
fn series_points_scale_to_headroom() {
    let g = layout_chart(&SAMPLE_CHART_DATA, Size::new(400.0, 300.0), false).unwrap();
    let revenue = &g.series[0];
    assert_eq!(revenue.points.len(), 6);
    assert!(approx_eq(revenue.points[0].x, 36.0));
    assert!(approx_eq(revenue.points[5].x, 388.0));

    // Peak value 1720 sits at 1/1.1 of the plot height.
    let plot_h = 300.0 - 12.0 - 24.0;
    let expected_top = 12.0 + plot_h - plot_h / 1.1;
    assert!(approx_eq(revenue.points[5].y, expected_top));
}

#[test]
fn series_style_follows_compact() {
    let regular = layout_chart(&SAMPLE_CHART_DATA, Size::new(400.0, 300.0), false).unwrap();
    assert_eq!(regular.series[0].line_width, 1.5);
    assert_eq!(regular.series[0].marker_radius, Some(2.5));
    assert_eq!(regular.series[1].color, "#6b8f71");

    let compact = layout_chart(&SAMPLE_CHART_DATA, Size::new(400.0, 300.0), true).unwrap();
    assert_eq!(compact.series[0].line_width, 1.0);
    assert_eq!(compact.series[0].marker_radius, Some(1.5));
}

#[test]
fn compact_short_plot_hides_markers() {
    // 8 + 18 insets leave 54px of plot height.
    let g = layout_chart(&SAMPLE_CHART_DATA, Size::new(400.0, 80.0), true).unwrap();
    assert!(g.series.iter().all(|s| s.marker_radius.is_none()));
}

#[test]
fn axis_labels() {
    let g = layout_chart(&SAMPLE_CHART_DATA, Size::new(400.0, 300.0), false).unwrap();
    let x_text: Vec<_> = g.x_labels.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(x_text, vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun"]);
    assert_eq!(g.x_labels[0].y, 296.0);
    assert_eq!(g.y_labels[0].text, "1.9k");
    assert_eq!(g.y_labels[4].text, "0.0k");
    assert_eq!(g.y_labels[0].x, 33.0);
}

#[test]
fn backing_size_doubles() {
    let g = layout_chart(&SAMPLE_CHART_DATA, Size::new(400.0, 300.0), false).unwrap();
    assert_eq!(g.backing_size(), Size::new(800.0, 600.0));
}

#[test]
fn empty_data_draws_nothing() {
    let data = ChartData { labels: &[], series: &[] };
    assert!(layout_chart(&data, Size::new(400.0, 300.0), false).is_none());
}

#[test]
fn single_point_series_sits_on_left_edge() {
    static ONE: [Series; 1] = [Series { label: "One", color: "#000", data: &[5.0] }];
    let data = ChartData { labels: &["Only"], series: &ONE };
    let g = layout_chart(&data, Size::new(400.0, 300.0), false).unwrap();
    assert_eq!(g.series[0].points[0].x, 36.0);
    assert_eq!(g.x_labels[0].x, 36.0);
}

#[test]
fn format_thousands_one_decimal() {
    assert_eq!(format_thousands(1500.0), "1.5k");
    assert_eq!(format_thousands(0.0), "0.0k");
}

// =============================================================
// ChartSurface
// =============================================================

#[test]
fn mount_subscribes_and_drop_releases() {
    let host = EventHost::new();
    let surface = ChartSurface::mount(&host, false, "16:9");
    assert_eq!(host.active(Channel::ContainerSize), 1);
    drop(surface);
    assert_eq!(host.active(Channel::ContainerSize), 0);
}

#[test]
fn nothing_drawn_before_first_measurement() {
    let host = EventHost::new();
    let mut surface = ChartSurface::mount(&host, false, "16:9");
    assert!(surface.frame().is_none());
    assert!(!surface.set_aspect("4:3", false));
    assert_eq!(surface.draw_count(), 0);
}

#[test]
fn zero_resize_is_noop() {
    let host = EventHost::new();
    let mut surface = ChartSurface::mount(&host, false, "16:9");
    assert!(surface.on_resize(Size::new(400.0, 300.0)));
    let before = surface.frame().cloned();
    assert!(!surface.on_resize(Size::new(0.0, 0.0)));
    assert_eq!(surface.frame().cloned(), before);
    assert_eq!(surface.draw_count(), 1);
}

#[test]
fn redraw_is_idempotent() {
    let host = EventHost::new();
    let mut surface = ChartSurface::mount(&host, false, "16:9");
    surface.on_resize(Size::new(400.0, 300.0));
    let first = surface.frame().cloned();
    surface.on_resize(Size::new(400.0, 300.0));
    assert_eq!(surface.frame().cloned(), first);
    assert_eq!(surface.draw_count(), 2);
}

#[test]
fn aspect_change_redraws_at_last_size() {
    let host = EventHost::new();
    let mut surface = ChartSurface::mount(&host, false, "16:9");
    surface.on_resize(Size::new(400.0, 300.0));
    assert!(surface.set_aspect("16:4", true));
    assert_eq!(surface.aspect_id(), "16:4");
    let frame = surface.frame().unwrap();
    assert_eq!(frame.grid_lines.len(), 4);
    assert_eq!(frame.size, Size::new(400.0, 300.0));
}

#[test]
fn shrinking_below_minimum_keeps_last_frame() {
    let host = EventHost::new();
    let mut surface = ChartSurface::mount(&host, false, "16:9");
    surface.on_resize(Size::new(400.0, 300.0));
    let drawn = surface.frame().cloned();
    assert!(!surface.on_resize(Size::new(40.0, 40.0)));
    assert_eq!(surface.frame().cloned(), drawn);
    assert_eq!(surface.draw_count(), 1);
}
