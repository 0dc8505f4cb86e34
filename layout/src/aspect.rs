//! Aspect-ratio catalog and the stack-vs-grid policy.

#[cfg(test)]
#[path = "aspect_test.rs"]
mod aspect_test;

use serde::Serialize;

use crate::consts::{GRID_SLIDE_MAX_WIDTH_PX, STACK_SLIDE_MIN_HEIGHT_PX, STACK_SLIDE_WIDTH_PX};
use crate::error::LayoutError;

/// A selectable slide proportion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AspectRatio {
    /// Selector identifier, e.g. `"16:9"`.
    pub id: &'static str,
    pub width: u32,
    pub height: u32,
    pub label: &'static str,
    /// When set, regions flow vertically and track sizing is ignored.
    pub stack: bool,
}

impl AspectRatio {
    /// Compact rendering hint: smaller fonts and padding.
    #[must_use]
    pub fn compact(&self) -> bool {
        matches!(self.id, "16:4" | "9:16")
    }

    /// Outer sizing of the slide surface for this ratio.
    #[must_use]
    pub fn frame(&self) -> SlideFrame {
        if self.stack {
            SlideFrame::Stacked { width: STACK_SLIDE_WIDTH_PX, min_height: STACK_SLIDE_MIN_HEIGHT_PX }
        } else {
            SlideFrame::Proportional { width: self.width, height: self.height, max_width: GRID_SLIDE_MAX_WIDTH_PX }
        }
    }
}

/// How the slide surface itself is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlideFrame {
    /// Fixed width, content-driven height.
    Stacked { width: u32, min_height: u32 },
    /// Full available width up to `max_width`, height from the ratio.
    Proportional { width: u32, height: u32, max_width: u32 },
}

/// Identifier of the ratio a new session starts with.
pub const DEFAULT_ASPECT_ID: &str = "16:9";

static ASPECT_RATIOS: [AspectRatio; 4] = [
    AspectRatio { id: "16:9", width: 16, height: 9, label: "Desktop", stack: false },
    AspectRatio { id: "16:4", width: 16, height: 4, label: "Wide", stack: false },
    AspectRatio { id: "4:3", width: 4, height: 3, label: "Tablet", stack: false },
    AspectRatio { id: "9:16", width: 9, height: 16, label: "Mobile", stack: true },
];

/// All ratios in selector order.
#[must_use]
pub fn list_aspect_ratios() -> &'static [AspectRatio] {
    &ASPECT_RATIOS
}

/// Look up a ratio by identifier.
///
/// # Errors
///
/// Returns `AspectRatioNotFound` for unknown identifiers.
pub fn resolve(id: &str) -> Result<AspectRatio, LayoutError> {
    ASPECT_RATIOS
        .iter()
        .find(|a| a.id == id)
        .copied()
        .ok_or_else(|| LayoutError::AspectRatioNotFound(id.to_owned()))
}

/// The ratio a new session starts with.
#[must_use]
pub fn default_aspect() -> AspectRatio {
    ASPECT_RATIOS[0]
}
