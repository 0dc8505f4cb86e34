//! Editing session.
//!
//! An [`EditorSession`] owns the interaction state of one builder view: the
//! working layout copy, the selected aspect ratio, the view mode and the
//! column-split resize controller. Selection changes and region edits go
//! through it so that the invariants between them hold (a preset change
//! resets the split, a hidden divider never keeps a drag alive).

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

use crate::aspect::{self, AspectRatio};
use crate::consts::{DEFAULT_COL_SPLIT_PCT, DIVIDER_WIDTH_PX, PADDING_OPTIONS_PX};
use crate::error::LayoutError;
use crate::listen::EventHost;
use crate::preset::{self, Layout};
use crate::region::{ComponentKind, Region, snap_padding};
use crate::render::{RenderOutput, render};
use crate::resize::{ContainerRect, PressResponse, ResizeController};
use crate::resolve::{PlacementPlan, resolve};

/// Whether regions show their wireframe editor or their content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Layout,
    Content,
}

impl ViewMode {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "layout" => Some(Self::Layout),
            "content" => Some(Self::Content),
            _ => None,
        }
    }
}

/// Wireframe shown for a region in layout mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutOverlay {
    pub region_id: String,
    pub name: String,
    pub color: String,
    pub component: ComponentKind,
    pub padding: u32,
    pub padding_options: &'static [u32],
}

impl LayoutOverlay {
    fn for_region(region: &Region) -> Self {
        Self {
            region_id: region.id.clone(),
            name: region.name.clone(),
            color: region.color.clone(),
            component: region.component,
            padding: region.padding,
            padding_options: &PADDING_OPTIONS_PX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum RegionView {
    Overlay(LayoutOverlay),
    Content(RenderOutput),
}

/// Drag handle between the first two columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Divider {
    /// Horizontal center, in percent of the slide width.
    pub left_pct: f64,
    pub width_px: u32,
}

#[derive(Debug)]
pub struct EditorSession {
    layout: Layout,
    aspect: AspectRatio,
    mode: ViewMode,
    resize: ResizeController,
    host: EventHost,
}

impl EditorSession {
    /// Start on the first preset, the default aspect ratio and layout mode.
    #[must_use]
    pub fn new(host: EventHost) -> Self {
        Self {
            layout: preset::default_preset(),
            aspect: aspect::default_aspect(),
            mode: ViewMode::default(),
            resize: ResizeController::new(DEFAULT_COL_SPLIT_PCT),
            host,
        }
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub fn aspect(&self) -> &AspectRatio {
        &self.aspect
    }

    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    #[must_use]
    pub fn split(&self) -> f64 {
        self.resize.split()
    }

    #[must_use]
    pub fn is_resizing(&self) -> bool {
        self.resize.is_resizing()
    }

    #[must_use]
    pub fn compact(&self) -> bool {
        self.aspect.compact()
    }

    #[must_use]
    pub fn stacking(&self) -> bool {
        self.aspect.stack
    }

    // =========================================================================
    // SELECTION
    // =========================================================================

    /// Replace the working layout with a fresh copy of a preset and reset the
    /// split. Unknown names leave the session untouched.
    ///
    /// # Errors
    ///
    /// Returns `PresetNotFound` for unknown names.
    pub fn select_preset(&mut self, name: &str) -> Result<(), LayoutError> {
        let layout = preset::select_preset(name)?;
        self.resize.cancel();
        self.layout = layout;
        self.resize.set_split(DEFAULT_COL_SPLIT_PCT);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AspectRatioNotFound` for unknown identifiers.
    pub fn select_aspect(&mut self, id: &str) -> Result<(), LayoutError> {
        self.aspect = aspect::resolve(id)?;
        self.settle_drag();
        Ok(())
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
        self.settle_drag();
    }

    /// # Errors
    ///
    /// Returns `RegionNotFound` if the layout has no such region.
    pub fn assign_component(&mut self, region_id: &str, component: ComponentKind) -> Result<(), LayoutError> {
        self.layout = self.layout.with_region_component(region_id, component)?;
        Ok(())
    }

    /// Set a region's padding, snapped to the nearest offered option.
    /// Returns the value stored.
    ///
    /// # Errors
    ///
    /// Returns `RegionNotFound` if the layout has no such region.
    pub fn set_padding(&mut self, region_id: &str, px: u32) -> Result<u32, LayoutError> {
        let snapped = snap_padding(px);
        self.layout = self.layout.with_region_padding(region_id, snapped)?;
        Ok(snapped)
    }

    // =========================================================================
    // VIEW
    // =========================================================================

    #[must_use]
    pub fn plan(&self) -> PlacementPlan {
        resolve(&self.layout, &self.aspect, self.resize.split())
    }

    fn has_resizable_col(&self) -> bool {
        self.layout.has_resizable_cols() && !self.aspect.stack
    }

    /// The divider is shown only while viewing content of a percent-split grid.
    #[must_use]
    pub fn divider(&self) -> Option<Divider> {
        (self.has_resizable_col() && self.mode == ViewMode::Content)
            .then(|| Divider { left_pct: self.resize.split(), width_px: DIVIDER_WIDTH_PX })
    }

    /// `Split: 35%` readout for percent-split grids, in either mode.
    #[must_use]
    pub fn split_label(&self) -> Option<String> {
        self.has_resizable_col().then(|| format!("Split: {}%", self.resize.split().round()))
    }

    /// Render one region for the current mode.
    ///
    /// # Errors
    ///
    /// Returns `RegionNotFound` if the layout has no such region.
    pub fn render_region(&self, region_id: &str) -> Result<RegionView, LayoutError> {
        let region = self.layout.region(region_id).ok_or_else(|| LayoutError::RegionNotFound(region_id.to_owned()))?;
        Ok(match self.mode {
            ViewMode::Layout => RegionView::Overlay(LayoutOverlay::for_region(region)),
            ViewMode::Content => RegionView::Content(render(region.component, self.compact(), region.padding)),
        })
    }

    // =========================================================================
    // POINTER
    // =========================================================================

    /// Press on the divider. Ignored when the divider is hidden.
    pub fn pointer_down_divider(&mut self) -> Option<PressResponse> {
        self.divider()?;
        Some(self.resize.press(&self.host))
    }

    pub fn pointer_move(&mut self, client_x: f64, container: ContainerRect) -> Option<f64> {
        self.resize.pointer_move(client_x, container)
    }

    pub fn pointer_up(&mut self) {
        self.resize.release();
    }

    fn settle_drag(&mut self) {
        if self.divider().is_none() {
            self.resize.cancel();
        }
    }
}
