//! Grid resolver: layout + aspect ratio + column split → placement plan.
//!
//! DESIGN
//! ======
//! The plan is a structured value, not style text. In grid mode every region
//! keeps its row/column placement verbatim and the column track list has its
//! first percentage token replaced by the live split. In stack mode the track
//! lists are dropped entirely and regions flow in `stack_order`. Resolution
//! never mutates the layout, so switching between the two modes loses
//! nothing.

#[cfg(test)]
#[path = "resolve_test.rs"]
mod resolve_test;

use serde::Serialize;

use crate::aspect::AspectRatio;
use crate::consts::{AUTO_ROW_MIN_HEIGHT_PX, STACK_CHART_HEIGHT_PX};
use crate::preset::Layout;
use crate::region::{ComponentKind, Placement, Region};
use crate::render::effective_padding;

/// Resolved placement of every region for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PlacementPlan {
    Grid(GridPlan),
    Stack(StackPlan),
}

impl PlacementPlan {
    /// Region ids in the order the renderer emits them.
    #[must_use]
    pub fn region_ids(&self) -> Vec<&str> {
        match self {
            Self::Grid(plan) => plan.regions.iter().map(|r| r.style.id.as_str()).collect(),
            Self::Stack(plan) => plan.blocks.iter().map(|b| b.style.id.as_str()).collect(),
        }
    }

    /// Whether the plan uses compact rendering.
    #[must_use]
    pub fn compact(&self) -> bool {
        match self {
            Self::Grid(plan) => plan.compact,
            Self::Stack(plan) => plan.compact,
        }
    }
}

/// Appearance shared by grid and stacked placements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionStyle {
    pub id: String,
    pub name: String,
    pub color: String,
    pub component: ComponentKind,
    /// Padding after compact adjustment.
    pub padding: u32,
}

impl RegionStyle {
    fn from_region(region: &Region, compact: bool) -> Self {
        Self {
            id: region.id.clone(),
            name: region.name.clone(),
            color: region.color.clone(),
            component: region.component,
            padding: effective_padding(compact, region.padding),
        }
    }
}

/// Two-dimensional placement on explicit tracks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridPlan {
    /// Row track list, unchanged from the layout.
    pub rows: String,
    /// Column track list with the split substituted.
    pub cols: String,
    /// Whether the column split control applies to this plan.
    pub resizable: bool,
    pub col_split: f64,
    pub compact: bool,
    pub regions: Vec<GridPlacement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridPlacement {
    pub row: Placement,
    pub col: Placement,
    /// The region's first row track is sized `auto`.
    pub auto_row: bool,
    #[serde(flatten)]
    pub style: RegionStyle,
}

impl GridPlacement {
    /// Minimum block height to reserve. Empty `auto` rows would collapse
    /// while editing, so layout mode keeps them visible.
    #[must_use]
    pub fn min_height(&self, editing_layout: bool) -> u32 {
        if editing_layout && self.auto_row { AUTO_ROW_MIN_HEIGHT_PX } else { 0 }
    }
}

/// Single vertical flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackPlan {
    pub compact: bool,
    pub blocks: Vec<StackBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackBlock {
    /// Zero-based top-to-bottom position.
    pub order: usize,
    pub size: BlockSize,
    #[serde(flatten)]
    pub style: RegionStyle,
}

/// Block-axis size hint in the stacked flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockSize {
    Auto,
    Fixed(u32),
}

/// Resolve a layout for the given aspect ratio and column split.
#[must_use]
pub fn resolve(layout: &Layout, aspect: &AspectRatio, col_split: f64) -> PlacementPlan {
    let compact = aspect.compact();
    if aspect.stack {
        PlacementPlan::Stack(resolve_stack(layout, compact))
    } else {
        PlacementPlan::Grid(resolve_grid(layout, compact, col_split))
    }
}

fn resolve_stack(layout: &Layout, compact: bool) -> StackPlan {
    let blocks = layout
        .stack_order
        .iter()
        .filter_map(|id| layout.region(id))
        .enumerate()
        .map(|(order, region)| StackBlock {
            order,
            size: stack_block_size(region.component),
            style: RegionStyle::from_region(region, compact),
        })
        .collect();
    StackPlan { compact, blocks }
}

/// Charts need a definite height to plot into; everything else sizes to content.
#[must_use]
pub fn stack_block_size(component: ComponentKind) -> BlockSize {
    match component {
        ComponentKind::Chart => BlockSize::Fixed(STACK_CHART_HEIGHT_PX),
        _ => BlockSize::Auto,
    }
}

fn resolve_grid(layout: &Layout, compact: bool, col_split: f64) -> GridPlan {
    let row_tracks = layout.row_tracks();
    let regions = layout
        .regions
        .iter()
        .map(|region| {
            let row_index = region.row.track().map_or(0, |n| usize::from(n.saturating_sub(1)));
            GridPlacement {
                row: region.row.clone(),
                col: region.col.clone(),
                auto_row: row_tracks.get(row_index).is_some_and(|t| *t == "auto"),
                style: RegionStyle::from_region(region, compact),
            }
        })
        .collect();

    let resizable = layout.has_resizable_cols();
    GridPlan {
        rows: layout.rows.clone(),
        cols: if resizable { substitute_split(&layout.cols, col_split) } else { layout.cols.clone() },
        resizable,
        col_split,
        compact,
        regions,
    }
}

/// Replace the first `<digits>%` token in a track list with the split value.
///
/// Track lists without such a token are returned unchanged.
#[must_use]
pub fn substitute_split(cols: &str, col_split: f64) -> String {
    let bytes = cols.as_bytes();
    for (end, &b) in bytes.iter().enumerate() {
        if b != b'%' {
            continue;
        }
        let start = bytes[..end]
            .iter()
            .rposition(|c| !c.is_ascii_digit())
            .map_or(0, |i| i + 1);
        if start < end {
            return format!("{}{col_split}%{}", &cols[..start], &cols[end + 1..]);
        }
    }
    cols.to_owned()
}
