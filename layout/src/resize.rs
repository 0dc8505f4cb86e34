//! Column-split resize controller.
//!
//! Two states. A press on the divider moves `Idle` → `Dragging` and acquires
//! the move and release subscriptions; every exit from `Dragging` (release,
//! cancel, or dropping the controller) releases them with the state that
//! owns them. A press that arrives while already dragging is ignored, so the
//! listeners can never be attached twice.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use crate::consts::{DEFAULT_COL_SPLIT_PCT, MAX_COL_SPLIT_PCT, MIN_COL_SPLIT_PCT};
use crate::listen::{Channel, EventHost, Subscription};

/// Horizontal extent of the slide container in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerRect {
    pub left: f64,
    pub width: f64,
}

impl ContainerRect {
    #[must_use]
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }
}

/// Move and release listeners held for the duration of one drag.
#[derive(Debug)]
pub struct DragSubscription {
    _pointer_move: Subscription,
    _pointer_up: Subscription,
}

impl DragSubscription {
    fn acquire(host: &EventHost) -> Self {
        Self { _pointer_move: host.subscribe(Channel::PointerMove), _pointer_up: host.subscribe(Channel::PointerUp) }
    }
}

/// Drag state. The subscription lives inside `Dragging`, so leaving the
/// state releases it.
#[derive(Debug, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSubscription),
}

/// Host response to a divider press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressResponse {
    /// Suppress the native default (text selection, image drag).
    pub prevent_default: bool,
    /// A new drag began.
    pub started: bool,
}

#[derive(Debug)]
pub struct ResizeController {
    state: DragState,
    split: f64,
}

impl Default for ResizeController {
    fn default() -> Self {
        Self::new(DEFAULT_COL_SPLIT_PCT)
    }
}

impl ResizeController {
    #[must_use]
    pub fn new(split: f64) -> Self {
        Self { state: DragState::Idle, split: clamp_split(split) }
    }

    /// Current column split in percent, always within bounds.
    #[must_use]
    pub fn split(&self) -> f64 {
        self.split
    }

    /// Overwrite the split, clamped to bounds.
    pub fn set_split(&mut self, split: f64) {
        if split.is_finite() {
            self.split = clamp_split(split);
        }
    }

    #[must_use]
    pub fn is_resizing(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Pointer pressed on the divider.
    pub fn press(&mut self, host: &EventHost) -> PressResponse {
        if self.is_resizing() {
            return PressResponse { prevent_default: true, started: false };
        }
        self.state = DragState::Dragging(DragSubscription::acquire(host));
        PressResponse { prevent_default: true, started: true }
    }

    /// Pointer moved anywhere. Returns the new split while dragging.
    ///
    /// Moves outside a drag, over a zero-width container, or at a
    /// non-finite position leave the split untouched.
    pub fn pointer_move(&mut self, client_x: f64, container: ContainerRect) -> Option<f64> {
        if !self.is_resizing() {
            return None;
        }
        let pct = split_from_pointer(client_x, container)?;
        self.split = pct;
        Some(pct)
    }

    /// Pointer released anywhere. Ends the drag and detaches its listeners.
    pub fn release(&mut self) {
        self.state = DragState::Idle;
    }

    /// Abandon any drag in progress (teardown, preset change).
    pub fn cancel(&mut self) {
        self.release();
    }
}

/// Clamp a split percentage to the allowed range.
#[must_use]
pub fn clamp_split(pct: f64) -> f64 {
    pct.clamp(MIN_COL_SPLIT_PCT, MAX_COL_SPLIT_PCT)
}

/// Split percentage for a pointer at `client_x`, clamped.
///
/// `None` when the container has no width or the input is not finite.
#[must_use]
pub fn split_from_pointer(client_x: f64, container: ContainerRect) -> Option<f64> {
    if !(container.width > 0.0) || !client_x.is_finite() || !container.left.is_finite() || !container.width.is_finite() {
        return None;
    }
    let fraction = (client_x - container.left) / container.width;
    Some(clamp_split(fraction * 100.0))
}
