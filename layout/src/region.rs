//! Region model: one placeable area of a slide.
//!
//! A region is a pure value. It names where it sits on the grid (a single
//! 1-based track or a span expression such as `"1 / -1"`), what component it
//! shows, and how much padding surrounds that component. Behavior lives in
//! the resolver and renderer; this module only defines the data.

#[cfg(test)]
#[path = "region_test.rs"]
mod region_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_PADDING_PX, PADDING_OPTIONS_PX};

/// Content component a region displays. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Title,
    Markdown,
    Chart,
    Table,
    Image,
}

impl ComponentKind {
    /// Every component kind, in editor menu order.
    pub const ALL: [Self; 5] = [Self::Title, Self::Markdown, Self::Chart, Self::Table, Self::Image];

    /// Parse the wire name of a component. Unknown names yield `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "title" => Some(Self::Title),
            "markdown" => Some(Self::Markdown),
            "chart" => Some(Self::Chart),
            "table" => Some(Self::Table),
            "image" => Some(Self::Image),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Markdown => "markdown",
            Self::Chart => "chart",
            Self::Table => "table",
            Self::Image => "image",
        }
    }

    /// Human-readable label shown in component pickers.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Markdown => "Markdown",
            Self::Chart => "Chart",
            Self::Table => "Table",
            Self::Image => "Image",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row or column placement of a region.
///
/// Serialized untagged so a track reads as `1` and a span as `"1 / -1"`,
/// matching grid placement syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Placement {
    /// A single 1-based track index.
    Track(u16),
    /// A span expression handed to the renderer verbatim.
    Span(String),
}

impl Placement {
    /// The single track index, if this placement is not a span.
    #[must_use]
    pub fn track(&self) -> Option<u16> {
        match self {
            Self::Track(n) => Some(*n),
            Self::Span(_) => None,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Track(n) => write!(f, "{n}"),
            Self::Span(expr) => f.write_str(expr),
        }
    }
}

/// A named rectangular area of a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Unique within the owning layout.
    pub id: String,
    pub name: String,
    pub row: Placement,
    pub col: Placement,
    /// Display color used by the layout-mode wireframe.
    pub color: String,
    pub component: ComponentKind,
    /// Padding in pixels around the component.
    #[serde(default = "default_padding")]
    pub padding: u32,
}

fn default_padding() -> u32 {
    DEFAULT_PADDING_PX
}

/// Snap a padding value to the nearest option the editor offers.
///
/// Ties resolve toward the smaller option.
#[must_use]
pub fn snap_padding(px: u32) -> u32 {
    let mut best = PADDING_OPTIONS_PX[0];
    for option in PADDING_OPTIONS_PX {
        if option.abs_diff(px) < best.abs_diff(px) {
            best = option;
        }
    }
    best
}
