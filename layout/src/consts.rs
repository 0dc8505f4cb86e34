//! Shared numeric constants for the layout crate.

// ── Padding ─────────────────────────────────────────────────────

/// Padding assigned to a region when none is given, in pixels.
pub const DEFAULT_PADDING_PX: u32 = 12;

/// Padding values offered by the layout-mode editor.
pub const PADDING_OPTIONS_PX: [u32; 6] = [0, 4, 8, 12, 16, 24];

/// Amount removed from a region's padding in compact rendering.
pub const COMPACT_PADDING_REDUCTION_PX: u32 = 4;

/// Compact rendering never shrinks padding below this.
pub const COMPACT_PADDING_FLOOR_PX: u32 = 4;

// ── Column split ────────────────────────────────────────────────

/// Lower bound of the draggable column split, in percent.
pub const MIN_COL_SPLIT_PCT: f64 = 20.0;

/// Upper bound of the draggable column split, in percent.
pub const MAX_COL_SPLIT_PCT: f64 = 80.0;

/// Split applied when a session starts or a preset is selected.
pub const DEFAULT_COL_SPLIT_PCT: f64 = 35.0;

/// Hit width of the divider handle, in pixels. Centered on the split line.
pub const DIVIDER_WIDTH_PX: u32 = 8;

// ── Sizing hints ────────────────────────────────────────────────

/// Fixed block height given to chart regions in the stacked flow.
pub const STACK_CHART_HEIGHT_PX: u32 = 200;

/// Minimum height reserved for `auto` rows while editing the layout.
pub const AUTO_ROW_MIN_HEIGHT_PX: u32 = 60;

/// Slide width in the stacked (mobile) flow.
pub const STACK_SLIDE_WIDTH_PX: u32 = 300;

/// Slide minimum height in the stacked (mobile) flow.
pub const STACK_SLIDE_MIN_HEIGHT_PX: u32 = 400;

/// Slide maximum width in grid mode.
pub const GRID_SLIDE_MAX_WIDTH_PX: u32 = 900;

// ── Chart ───────────────────────────────────────────────────────

/// Backing-store scale for chart canvases (retina).
pub const CHART_PIXEL_RATIO: f64 = 2.0;

/// Charts whose plot area is narrower or shorter than this are not drawn.
pub const CHART_MIN_PLOT_PX: f64 = 20.0;

/// Headroom multiplier applied to the largest data value.
pub const CHART_HEADROOM: f64 = 1.1;
