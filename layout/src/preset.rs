//! Layout value and the preset catalog.
//!
//! DESIGN
//! ======
//! Presets are `'static` templates, never handed out by reference. Selecting
//! one builds a fresh owned [`Layout`], so edits made in an editing session
//! can never leak back into the catalog or into another session. Region
//! mutations follow the same rule: they return a new `Layout` with exactly
//! one region replaced and everything else (including the stack order)
//! carried over.

#[cfg(test)]
#[path = "preset_test.rs"]
mod preset_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::region::{ComponentKind, Placement, Region};

/// A named arrangement of regions with track sizing and a stacking order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub name: String,
    pub regions: Vec<Region>,
    /// Row track sizing expression, e.g. `"auto 1fr"`.
    pub rows: String,
    /// Column track sizing expression, e.g. `"35% 1fr"`.
    pub cols: String,
    /// Region ids in top-to-bottom order for the stacked flow.
    pub stack_order: Vec<String>,
}

impl Layout {
    /// Look up a region by id.
    #[must_use]
    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    /// Whether the column tracks carry a percentage the split control can drive.
    #[must_use]
    pub fn has_resizable_cols(&self) -> bool {
        self.cols.contains('%')
    }

    /// Row tracks split on whitespace.
    #[must_use]
    pub fn row_tracks(&self) -> Vec<&str> {
        self.rows.split_whitespace().collect()
    }

    /// Return a copy with one region's component replaced.
    ///
    /// # Errors
    ///
    /// Returns `RegionNotFound` if no region has the given id.
    pub fn with_region_component(&self, id: &str, component: ComponentKind) -> Result<Self, LayoutError> {
        self.with_region(id, |region| region.component = component)
    }

    /// Return a copy with one region's padding replaced.
    ///
    /// Any non-negative value is accepted here; the editor snaps to its
    /// option list before calling.
    ///
    /// # Errors
    ///
    /// Returns `RegionNotFound` if no region has the given id.
    pub fn with_region_padding(&self, id: &str, padding: u32) -> Result<Self, LayoutError> {
        self.with_region(id, |region| region.padding = padding)
    }

    fn with_region(&self, id: &str, apply: impl FnOnce(&mut Region)) -> Result<Self, LayoutError> {
        let index = self
            .regions
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| LayoutError::RegionNotFound(id.to_owned()))?;
        let mut next = self.clone();
        apply(&mut next.regions[index]);
        Ok(next)
    }

    /// Check region id uniqueness and that the stack order is a permutation
    /// of the region ids.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let mut ids = HashSet::new();
        for region in &self.regions {
            if !ids.insert(region.id.as_str()) {
                return Err(LayoutError::DuplicateRegion(region.id.clone()));
            }
        }

        let mut stacked = HashSet::new();
        for id in &self.stack_order {
            if !ids.contains(id.as_str()) {
                return Err(LayoutError::UnknownStackEntry(id.clone()));
            }
            if !stacked.insert(id.as_str()) {
                return Err(LayoutError::DuplicateRegion(id.clone()));
            }
        }

        if let Some(missing) = self.regions.iter().find(|r| !stacked.contains(r.id.as_str())) {
            return Err(LayoutError::MissingFromStack(missing.id.clone()));
        }
        Ok(())
    }
}

// =============================================================================
// TEMPLATES
// =============================================================================

#[derive(Clone, Copy)]
enum TrackTemplate {
    Track(u16),
    Span(&'static str),
}

impl TrackTemplate {
    fn to_placement(self) -> Placement {
        match self {
            Self::Track(n) => Placement::Track(n),
            Self::Span(expr) => Placement::Span(expr.to_owned()),
        }
    }
}

struct RegionTemplate {
    id: &'static str,
    name: &'static str,
    row: TrackTemplate,
    col: TrackTemplate,
    color: &'static str,
    component: ComponentKind,
    padding: u32,
}

struct PresetTemplate {
    name: &'static str,
    regions: &'static [RegionTemplate],
    rows: &'static str,
    cols: &'static str,
    stack_order: &'static [&'static str],
}

impl PresetTemplate {
    fn instantiate(&self) -> Layout {
        Layout {
            name: self.name.to_owned(),
            regions: self
                .regions
                .iter()
                .map(|r| Region {
                    id: r.id.to_owned(),
                    name: r.name.to_owned(),
                    row: r.row.to_placement(),
                    col: r.col.to_placement(),
                    color: r.color.to_owned(),
                    component: r.component,
                    padding: r.padding,
                })
                .collect(),
            rows: self.rows.to_owned(),
            cols: self.cols.to_owned(),
            stack_order: self.stack_order.iter().map(|id| (*id).to_owned()).collect(),
        }
    }
}

const FULL_SPAN: TrackTemplate = TrackTemplate::Span("1 / -1");

static PRESETS: [PresetTemplate; 4] = [
    PresetTemplate {
        name: "Title + 2 Columns",
        regions: &[
            RegionTemplate {
                id: "title",
                name: "Title",
                row: TrackTemplate::Track(1),
                col: FULL_SPAN,
                color: "#4a6fa5",
                component: ComponentKind::Title,
                padding: 12,
            },
            RegionTemplate {
                id: "left",
                name: "Description",
                row: TrackTemplate::Track(2),
                col: TrackTemplate::Track(1),
                color: "#6b8f71",
                component: ComponentKind::Markdown,
                padding: 12,
            },
            RegionTemplate {
                id: "right",
                name: "Visualization",
                row: TrackTemplate::Track(2),
                col: TrackTemplate::Track(2),
                color: "#c9a227",
                component: ComponentKind::Chart,
                padding: 8,
            },
        ],
        rows: "auto 1fr",
        cols: "35% 1fr",
        stack_order: &["title", "right", "left"],
    },
    PresetTemplate {
        name: "Two Columns",
        regions: &[
            RegionTemplate {
                id: "left",
                name: "Left",
                row: TrackTemplate::Track(1),
                col: TrackTemplate::Track(1),
                color: "#4a6fa5",
                component: ComponentKind::Markdown,
                padding: 12,
            },
            RegionTemplate {
                id: "right",
                name: "Right",
                row: TrackTemplate::Track(1),
                col: TrackTemplate::Track(2),
                color: "#6b8f71",
                component: ComponentKind::Chart,
                padding: 8,
            },
        ],
        rows: "1fr",
        cols: "1fr 1fr",
        stack_order: &["left", "right"],
    },
    PresetTemplate {
        name: "Header + Body + Footer",
        regions: &[
            RegionTemplate {
                id: "header",
                name: "Header",
                row: TrackTemplate::Track(1),
                col: FULL_SPAN,
                color: "#4a6fa5",
                component: ComponentKind::Title,
                padding: 12,
            },
            RegionTemplate {
                id: "body",
                name: "Body",
                row: TrackTemplate::Track(2),
                col: FULL_SPAN,
                color: "#6b8f71",
                component: ComponentKind::Chart,
                padding: 8,
            },
            RegionTemplate {
                id: "footer",
                name: "Footer",
                row: TrackTemplate::Track(3),
                col: FULL_SPAN,
                color: "#c9a227",
                component: ComponentKind::Markdown,
                padding: 12,
            },
        ],
        rows: "auto 1fr auto",
        cols: "1fr",
        stack_order: &["header", "body", "footer"],
    },
    PresetTemplate {
        name: "Sidebar + Content",
        regions: &[
            RegionTemplate {
                id: "sidebar",
                name: "Sidebar",
                row: FULL_SPAN,
                col: TrackTemplate::Track(1),
                color: "#4a6fa5",
                component: ComponentKind::Markdown,
                padding: 12,
            },
            RegionTemplate {
                id: "content",
                name: "Content",
                row: FULL_SPAN,
                col: TrackTemplate::Track(2),
                color: "#6b8f71",
                component: ComponentKind::Chart,
                padding: 8,
            },
        ],
        rows: "1fr",
        cols: "25% 1fr",
        stack_order: &["content", "sidebar"],
    },
];

// =============================================================================
// CATALOG
// =============================================================================

/// Every preset, in catalog order. Each call builds fresh values.
#[must_use]
pub fn list_presets() -> Vec<Layout> {
    PRESETS.iter().map(PresetTemplate::instantiate).collect()
}

/// Preset names in catalog order.
#[must_use]
pub fn preset_names() -> Vec<&'static str> {
    PRESETS.iter().map(|p| p.name).collect()
}

/// Build an independent copy of the named preset.
///
/// # Errors
///
/// Returns `PresetNotFound` if no preset has the given name.
pub fn select_preset(name: &str) -> Result<Layout, LayoutError> {
    PRESETS
        .iter()
        .find(|p| p.name == name)
        .map(PresetTemplate::instantiate)
        .ok_or_else(|| LayoutError::PresetNotFound(name.to_owned()))
}

/// The preset a new editing session starts with.
#[must_use]
pub fn default_preset() -> Layout {
    PRESETS[0].instantiate()
}
