//! Line-chart geometry for the chart component.
//!
//! [`layout_chart`] is pure: given the data, the container size and the
//! compact hint it returns every line, marker and label position in CSS
//! pixels, or `None` when the container is too small to draw into. The
//! host scales its backing store by [`ChartGeometry::pixel_ratio`].
//!
//! [`ChartSurface`] models a mounted chart. It holds the container-size
//! subscription for its lifetime and recomputes the geometry whenever the
//! container is measured or the slide aspect changes. Recomputing with the
//! same inputs yields the same frame.

#[cfg(test)]
#[path = "chart_test.rs"]
mod chart_test;

use serde::Serialize;

use crate::consts::{CHART_HEADROOM, CHART_MIN_PLOT_PX, CHART_PIXEL_RATIO};
use crate::listen::{Channel, EventHost, Subscription};

// =============================================================================
// DATA
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Series {
    pub label: &'static str,
    pub color: &'static str,
    pub data: &'static [f64],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: &'static [&'static str],
    pub series: &'static [Series],
}

impl ChartData {
    fn max_value(&self) -> Option<f64> {
        self.series.iter().flat_map(|s| s.data.iter().copied()).reduce(f64::max)
    }
}

/// Demo revenue/expense series shown by every chart region.
pub static SAMPLE_CHART_DATA: ChartData = ChartData {
    labels: &["Jan", "Feb", "Mar", "Apr", "May", "Jun"],
    series: &[
        Series { label: "Revenue", color: "#4a6fa5", data: &[1200.0, 1400.0, 1300.0, 1550.0, 1480.0, 1720.0] },
        Series { label: "Expenses", color: "#6b8f71", data: &[850.0, 920.0, 880.0, 1020.0, 990.0, 1140.0] },
    ],
};

// =============================================================================
// GEOMETRY
// =============================================================================

/// Measured container size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    #[must_use]
    pub fn for_compact(compact: bool) -> Self {
        if compact {
            Self { top: 8.0, right: 8.0, bottom: 18.0, left: 28.0 }
        } else {
            Self { top: 12.0, right: 12.0, bottom: 24.0, left: 36.0 }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Horizontal grid line spanning the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridLine {
    pub y: f64,
    pub x_start: f64,
    pub x_end: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPath {
    pub label: &'static str,
    pub color: &'static str,
    pub line_width: f64,
    pub points: Vec<Point>,
    /// Radius of the point markers; `None` when markers are suppressed.
    pub marker_radius: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_px: u32,
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartGeometry {
    pub size: Size,
    pub pixel_ratio: f64,
    pub insets: Insets,
    pub grid_lines: Vec<GridLine>,
    pub series: Vec<SeriesPath>,
    pub x_labels: Vec<AxisLabel>,
    pub y_labels: Vec<AxisLabel>,
}

impl ChartGeometry {
    /// Backing-store dimensions for a high-density canvas.
    #[must_use]
    pub fn backing_size(&self) -> Size {
        Size::new(self.size.width * self.pixel_ratio, self.size.height * self.pixel_ratio)
    }
}

/// Compute the frame for `data` inside a container of `size`.
///
/// Returns `None` for a zero-sized container, for a plot area narrower or
/// shorter than the minimum, and for data without a positive maximum.
#[must_use]
pub fn layout_chart(data: &ChartData, size: Size, compact: bool) -> Option<ChartGeometry> {
    if size.is_empty() {
        return None;
    }
    let insets = Insets::for_compact(compact);
    let plot_w = size.width - insets.left - insets.right;
    let plot_h = size.height - insets.top - insets.bottom;
    if plot_w < CHART_MIN_PLOT_PX || plot_h < CHART_MIN_PLOT_PX {
        return None;
    }

    let max_val = data.max_value().filter(|m| *m > 0.0)? * CHART_HEADROOM;
    let grid_count: u32 = if compact { 3 } else { 4 };
    let band = plot_h / f64::from(grid_count);

    let grid_lines = (0..=grid_count)
        .map(|i| GridLine { y: insets.top + band * f64::from(i), x_start: insets.left, x_end: size.width - insets.right })
        .collect();

    let x_at = |i: usize, n: usize| {
        if n > 1 { insets.left + plot_w / (n - 1) as f64 * i as f64 } else { insets.left }
    };
    let y_at = |val: f64| insets.top + plot_h - (val / max_val) * plot_h;

    let show_markers = !compact || plot_h > 60.0;
    let series = data
        .series
        .iter()
        .map(|s| SeriesPath {
            label: s.label,
            color: s.color,
            line_width: if compact { 1.0 } else { 1.5 },
            points: s.data.iter().enumerate().map(|(i, v)| Point { x: x_at(i, s.data.len()), y: y_at(*v) }).collect(),
            marker_radius: show_markers.then_some(if compact { 1.5 } else { 2.5 }),
        })
        .collect();

    let x_labels = data
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| AxisLabel {
            text: (*label).to_owned(),
            x: x_at(i, data.labels.len()),
            y: size.height - 4.0,
            font_px: if compact { 8 } else { 9 },
        })
        .collect();

    let y_labels = (0..=grid_count)
        .map(|i| {
            let val = max_val / f64::from(grid_count) * f64::from(grid_count - i);
            AxisLabel {
                text: format_thousands(val),
                x: insets.left - 3.0,
                y: insets.top + band * f64::from(i) + 3.0,
                font_px: if compact { 7 } else { 9 },
            }
        })
        .collect();

    Some(ChartGeometry { size, pixel_ratio: CHART_PIXEL_RATIO, insets, grid_lines, series, x_labels, y_labels })
}

/// Axis label in thousands with one decimal, e.g. `1892` → `"1.9k"`.
#[must_use]
pub fn format_thousands(value: f64) -> String {
    format!("{:.1}k", value / 1000.0)
}

// =============================================================================
// SURFACE
// =============================================================================

/// A mounted chart that redraws when its container is measured.
#[derive(Debug)]
pub struct ChartSurface {
    compact: bool,
    aspect_id: String,
    size: Option<Size>,
    frame: Option<ChartGeometry>,
    draws: usize,
    _observer: Subscription,
}

impl ChartSurface {
    /// Mount and start observing the container size.
    #[must_use]
    pub fn mount(host: &EventHost, compact: bool, aspect_id: &str) -> Self {
        Self {
            compact,
            aspect_id: aspect_id.to_owned(),
            size: None,
            frame: None,
            draws: 0,
            _observer: host.subscribe(Channel::ContainerSize),
        }
    }

    /// Container measured. A zero size, or one whose plot area falls below
    /// the minimum, draws nothing and the last frame stays on screen.
    /// Returns whether a frame was drawn.
    pub fn on_resize(&mut self, size: Size) -> bool {
        if size.is_empty() {
            return false;
        }
        self.size = Some(size);
        self.redraw()
    }

    /// Slide aspect changed. Redraws at the last measured size.
    pub fn set_aspect(&mut self, aspect_id: &str, compact: bool) -> bool {
        self.aspect_id = aspect_id.to_owned();
        self.compact = compact;
        self.redraw()
    }

    fn redraw(&mut self) -> bool {
        let Some(size) = self.size else {
            return false;
        };
        let Some(frame) = layout_chart(&SAMPLE_CHART_DATA, size, self.compact) else {
            return false;
        };
        self.frame = Some(frame);
        self.draws += 1;
        true
    }

    /// The most recent frame, if one has been drawn.
    #[must_use]
    pub fn frame(&self) -> Option<&ChartGeometry> {
        self.frame.as_ref()
    }

    #[must_use]
    pub fn aspect_id(&self) -> &str {
        &self.aspect_id
    }

    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.draws
    }
}
