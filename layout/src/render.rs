//! Region content renderer.
//!
//! Dispatches a region's component kind to a renderer-agnostic description
//! of what to draw. Each description carries the effective padding and the
//! font sizes for the current density; the host turns it into markup. The
//! chart variant carries only its legend and density, because the plot
//! itself depends on the measured container and is produced by
//! [`crate::chart::ChartSurface`].

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::chart::SAMPLE_CHART_DATA;
use crate::consts::{COMPACT_PADDING_FLOOR_PX, COMPACT_PADDING_REDUCTION_PX};
use crate::region::ComponentKind;

/// Padding actually applied to a region's content.
///
/// Compact rendering takes 4px off, never going below 4px.
#[must_use]
pub fn effective_padding(compact: bool, padding: u32) -> u32 {
    if compact {
        padding.saturating_sub(COMPACT_PADDING_REDUCTION_PX).max(COMPACT_PADDING_FLOOR_PX)
    } else {
        padding
    }
}

/// What a region displays in content mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "component", rename_all = "lowercase")]
pub enum RenderOutput {
    /// Nothing is drawn.
    Empty,
    Title(TitleBlock),
    Markdown(MarkdownBlock),
    Chart(ChartBlock),
    Table(TableBlock),
    Image(ImageBlock),
}

impl RenderOutput {
    /// Padding of the rendered block; `None` for empty output.
    #[must_use]
    pub fn padding(&self) -> Option<u32> {
        match self {
            Self::Empty => None,
            Self::Title(b) => Some(b.padding),
            Self::Markdown(b) => Some(b.padding),
            Self::Chart(b) => Some(b.padding),
            Self::Table(b) => Some(b.padding),
            Self::Image(b) => Some(b.padding),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleBlock {
    pub padding: u32,
    pub eyebrow: &'static str,
    pub eyebrow_font_px: u32,
    pub heading: &'static str,
    pub heading_font_px: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkdownNode {
    Heading { level: u8, text: &'static str },
    Paragraph { text: &'static str },
    List { items: Vec<&'static str> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkdownBlock {
    pub padding: u32,
    pub body_font_px: u32,
    /// Font size of the level-2 heading; level-3 headings use `body_font_px`.
    pub heading_font_px: u32,
    pub nodes: Vec<MarkdownNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
    pub swatch_width_px: u32,
    pub font_px: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartBlock {
    pub padding: u32,
    pub compact: bool,
    pub legend_gap_px: u32,
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub month: &'static str,
    pub revenue: String,
    pub expenses: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableBlock {
    pub padding: u32,
    pub font_px: u32,
    pub header: [&'static str; 3],
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageBlock {
    pub padding: u32,
    pub font_px: u32,
    pub caption: &'static str,
}

/// Render a component with the region's configured padding.
#[must_use]
pub fn render(kind: ComponentKind, compact: bool, padding: u32) -> RenderOutput {
    let padding = effective_padding(compact, padding);
    match kind {
        ComponentKind::Title => RenderOutput::Title(title(compact, padding)),
        ComponentKind::Markdown => RenderOutput::Markdown(markdown(compact, padding)),
        ComponentKind::Chart => RenderOutput::Chart(chart(compact, padding)),
        ComponentKind::Table => RenderOutput::Table(table(compact, padding)),
        ComponentKind::Image => RenderOutput::Image(ImageBlock { padding, font_px: pick(compact, 10, 12), caption: "Image" }),
    }
}

/// Render a component given by wire name. Unknown names render nothing.
#[must_use]
pub fn render_named(name: &str, compact: bool, padding: u32) -> RenderOutput {
    ComponentKind::parse(name).map_or(RenderOutput::Empty, |kind| render(kind, compact, padding))
}

fn pick(compact: bool, small: u32, regular: u32) -> u32 {
    if compact { small } else { regular }
}

fn title(compact: bool, padding: u32) -> TitleBlock {
    TitleBlock {
        padding,
        eyebrow: "Fall 2025 Management Presentation",
        eyebrow_font_px: pick(compact, 9, 11),
        heading: "Financial Performance 2024",
        heading_font_px: pick(compact, 14, 20),
    }
}

fn markdown(compact: bool, padding: u32) -> MarkdownBlock {
    MarkdownBlock {
        padding,
        body_font_px: pick(compact, 10, 13),
        heading_font_px: pick(compact, 11, 14),
        nodes: vec![
            MarkdownNode::Heading { level: 2, text: "Key Highlights" },
            MarkdownNode::Paragraph {
                text: "**Revenue growth** of 108% year-over-year demonstrates strong market position and validates our strategic investments in product development.",
            },
            MarkdownNode::Paragraph {
                text: "Our expansion into new markets contributed significantly to this growth, with the APAC region showing particularly strong adoption rates among enterprise customers.",
            },
            MarkdownNode::Heading { level: 3, text: "Trends" },
            MarkdownNode::List {
                items: vec![
                    "Consistent upward trajectory across all quarters",
                    "Expenses scaling efficiently with revenue growth",
                    "Profit margins expanding significantly in H2",
                    "Customer acquisition costs decreased 15%",
                ],
            },
            MarkdownNode::Heading { level: 3, text: "Looking Ahead" },
            MarkdownNode::Paragraph {
                text: "Q1 2025 projections indicate continued momentum with expected revenue growth of 25-30% quarter-over-quarter.",
            },
            MarkdownNode::Paragraph {
                text: "Key initiatives include launching our enterprise tier, expanding the sales team, and deepening partnerships with strategic technology providers.",
            },
        ],
    }
}

fn chart(compact: bool, padding: u32) -> ChartBlock {
    ChartBlock {
        padding,
        compact,
        legend_gap_px: pick(compact, 8, 12),
        legend: SAMPLE_CHART_DATA
            .series
            .iter()
            .map(|s| LegendEntry {
                label: s.label,
                color: s.color,
                swatch_width_px: pick(compact, 8, 12),
                font_px: pick(compact, 8, 10),
            })
            .collect(),
    }
}

const TABLE_ROWS: [(&str, u32, u32); 4] =
    [("Jan", 1200, 850), ("Feb", 1400, 920), ("Mar", 1300, 880), ("Apr", 1550, 1020)];

fn table(compact: bool, padding: u32) -> TableBlock {
    TableBlock {
        padding,
        font_px: pick(compact, 9, 11),
        header: ["Month", "Revenue", "Expenses"],
        rows: TABLE_ROWS
            .iter()
            .map(|&(month, revenue, expenses)| TableRow {
                month,
                revenue: format!("${}", group_thousands(revenue)),
                expenses: format!("${}", group_thousands(expenses)),
            })
            .collect(),
    }
}

/// Format an integer with comma thousands separators.
#[must_use]
pub fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
