//! Slide layout engine for the presentation builder.
//!
//! The engine models a rectangular slide split into named regions, each bound
//! to a content component. It owns preset selection, aspect-ratio reflow
//! (including the stacked mobile flow), per-region padding, and the
//! interactive column-split resize. Nothing here draws pixels: every
//! operation returns a plain value ([`resolve::PlacementPlan`],
//! [`render::RenderOutput`], [`chart::ChartGeometry`]) that the host
//! presentation layer turns into markup or canvas calls.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`region`] | Region value, component kinds, track placements |
//! | [`preset`] | `Layout` value and the immutable preset catalog |
//! | [`aspect`] | Aspect-ratio catalog and stack/grid policy |
//! | [`resolve`] | Grid resolver producing a [`resolve::PlacementPlan`] |
//! | [`resize`] | Column-split drag state machine |
//! | [`render`] | Component dispatch and effective padding |
//! | [`chart`] | Line-chart geometry and resize-driven redraw |
//! | [`widgets`] | Waterfall, variance and sparkline geometry |
//! | [`listen`] | Scoped event subscriptions |
//! | [`session`] | Editing session tying everything together |
//! | [`consts`] | Shared numeric constants |
//! | [`error`] | Engine error type |

pub mod aspect;
pub mod chart;
pub mod consts;
pub mod error;
pub mod listen;
pub mod preset;
pub mod region;
pub mod render;
pub mod resize;
pub mod resolve;
pub mod session;
pub mod widgets;

pub use aspect::AspectRatio;
pub use error::LayoutError;
pub use preset::Layout;
pub use region::{ComponentKind, Placement, Region};
pub use resolve::PlacementPlan;
pub use session::{EditorSession, ViewMode};
