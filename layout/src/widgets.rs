//! Small financial widgets: waterfall (bridge) bars, year-over-year variance
//! rows and sparklines.
//!
//! Each builder is pure and returns positions and display strings; the host
//! maps bar classes onto its own styling.

#[cfg(test)]
#[path = "widgets_test.rs"]
mod widgets_test;

use serde::{Deserialize, Serialize};

use crate::chart::Point;

// =============================================================================
// WATERFALL
// =============================================================================

/// Default bar-area height in pixels.
pub const WATERFALL_HEIGHT_PX: f64 = 340.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Absolute level; resets the running total.
    Total,
    /// Intermediate absolute level; resets the running total.
    Subtotal,
    /// Signed change applied to the running total.
    Change,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterfallStep {
    pub label: String,
    #[serde(default)]
    pub sublabel: Option<String>,
    pub kind: StepKind,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarClass {
    Total,
    Subtotal,
    Increase,
    Decrease,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterfallBar {
    pub label: String,
    pub sublabel: Option<String>,
    pub class: BarClass,
    pub bottom_px: f64,
    pub height_px: f64,
    pub value_text: String,
}

/// Lay out waterfall bars.
///
/// The scale maximum is `max_value` when given, else the first total, else
/// the largest absolute value. An empty input or a non-positive scale
/// produces no bars.
#[must_use]
pub fn waterfall(steps: &[WaterfallStep], height: f64, max_value: Option<f64>) -> Vec<WaterfallBar> {
    let scale_max = max_value
        .filter(|v| *v != 0.0)
        .or_else(|| steps.iter().find(|s| s.kind == StepKind::Total).map(|s| s.value).filter(|v| *v != 0.0))
        .or_else(|| steps.iter().map(|s| s.value.abs()).reduce(f64::max));
    let Some(scale_max) = scale_max.filter(|v| *v > 0.0) else {
        return Vec::new();
    };
    let scale = height / scale_max;

    let mut running = 0.0;
    steps
        .iter()
        .map(|step| {
            let (bottom, bar_height) = match step.kind {
                StepKind::Total | StepKind::Subtotal => {
                    running = step.value;
                    (0.0, step.value * scale)
                }
                StepKind::Change => {
                    let prev = running;
                    running += step.value;
                    if step.value < 0.0 {
                        (running * scale, step.value.abs() * scale)
                    } else {
                        (prev * scale, step.value * scale)
                    }
                }
            };
            let class = match step.kind {
                StepKind::Total => BarClass::Total,
                StepKind::Subtotal => BarClass::Subtotal,
                StepKind::Change if step.value < 0.0 => BarClass::Decrease,
                StepKind::Change => BarClass::Increase,
            };
            WaterfallBar {
                label: step.label.clone(),
                sublabel: step.sublabel.clone(),
                class,
                bottom_px: bottom,
                height_px: bar_height,
                value_text: format_currency(step.value),
            }
        })
        .collect()
}

/// Compact currency: `$1.25M`, `$340K`, `$87`. The sign is dropped; bar
/// class carries direction.
#[must_use]
pub fn format_currency(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("${:.2}M", abs / 1_000_000.0)
    } else if abs >= 1000.0 {
        format!("${:.0}K", abs / 1000.0)
    } else {
        format!("${abs:.0}")
    }
}

// =============================================================================
// VARIANCE
// =============================================================================

/// Largest percentage the bars represent before clamping.
pub const VARIANCE_MAX_PERCENT: f64 = 50.0;

/// Which direction counts as good news for a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Favorable {
    Up,
    #[default]
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VarianceInput {
    Section {
        section: String,
    },
    Item {
        label: String,
        current: f64,
        prior: f64,
        #[serde(default)]
        favorable: Favorable,
        #[serde(default)]
        highlight: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarianceBar {
    pub label: String,
    pub variance: f64,
    /// Bar width as a percentage of the container; half the container is
    /// the clamp limit.
    pub bar_width_pct: f64,
    /// Bar extends right of the zero line.
    pub positive: bool,
    pub favorable: bool,
    pub highlight: bool,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VarianceLine {
    Section { title: String },
    Row(VarianceBar),
}

/// Percent change from `prior` to `current`. A zero prior maps to ±100.
#[must_use]
pub fn calculate_variance(current: f64, prior: f64) -> f64 {
    if prior == 0.0 {
        return if current > 0.0 { 100.0 } else { -100.0 };
    }
    (current - prior) / prior.abs() * 100.0
}

/// `+12.5%` / `-3.0%`.
#[must_use]
pub fn format_variance(variance: f64) -> String {
    let sign = if variance >= 0.0 { "+" } else { "" };
    format!("{sign}{variance:.1}%")
}

#[must_use]
pub fn variance_rows(items: &[VarianceInput], max_percent: f64) -> Vec<VarianceLine> {
    items
        .iter()
        .map(|item| match item {
            VarianceInput::Section { section } => VarianceLine::Section { title: section.clone() },
            VarianceInput::Item { label, current, prior, favorable, highlight } => {
                let variance = calculate_variance(*current, *prior);
                let clamped = variance.clamp(-max_percent, max_percent);
                VarianceLine::Row(VarianceBar {
                    label: label.clone(),
                    variance,
                    bar_width_pct: clamped.abs() / max_percent * 50.0,
                    positive: variance >= 0.0,
                    favorable: match favorable {
                        Favorable::Up => variance >= 0.0,
                        Favorable::Down => variance <= 0.0,
                    },
                    highlight: *highlight,
                    display: format_variance(variance),
                })
            }
        })
        .collect()
}

// =============================================================================
// SPARKLINE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sparkline {
    pub width: f64,
    pub height: f64,
    pub points: Vec<Point>,
}

impl Sparkline {
    /// Last point, where the end dot is drawn.
    #[must_use]
    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// `points` attribute for an SVG polyline.
    #[must_use]
    pub fn svg_points(&self) -> String {
        self.points.iter().map(|p| format!("{},{}", p.x, p.y)).collect::<Vec<_>>().join(" ")
    }

    /// Closed path under the line for an area fill.
    #[must_use]
    pub fn area_path(&self) -> String {
        let mut path = String::new();
        if let Some(first) = self.points.first() {
            path.push_str(&format!("M0,{}", first.y));
        }
        for p in &self.points {
            path.push_str(&format!(" L{},{}", p.x, p.y));
        }
        path.push_str(&format!(" L{},{} L0,{} Z", self.width, self.height, self.height));
        path
    }
}

/// Sparkline over a `width` × `height` box with `inset` pixels of padding.
///
/// Needs at least two values. A flat series is drawn along the bottom edge.
#[must_use]
pub fn sparkline(data: &[f64], width: f64, height: f64, inset: f64) -> Option<Sparkline> {
    if data.len() < 2 {
        return None;
    }
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let range = if max - min == 0.0 { 1.0 } else { max - min };
    let inner_w = width - inset * 2.0;
    let inner_h = height - inset * 2.0;
    let step = inner_w / (data.len() - 1) as f64;

    let points = data
        .iter()
        .enumerate()
        .map(|(i, v)| Point { x: inset + i as f64 * step, y: inset + (1.0 - (v - min) / range) * inner_h })
        .collect();
    Some(Sparkline { width, height, points })
}
