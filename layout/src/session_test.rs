#![allow(clippy::float_cmp)]

use super::*;
use crate::listen::Channel;
use crate::render::RenderOutput;
use crate::resolve::PlacementPlan;

fn session() -> (EventHost, EditorSession) {
    let host = EventHost::new();
    let session = EditorSession::new(host.clone());
    (host, session)
}

fn rect() -> ContainerRect {
    ContainerRect::new(0.0, 1000.0)
}

// =============================================================
// Initial state
// =============================================================

#[test]
fn starts_on_first_preset_in_layout_mode() {
    let (_, s) = session();
    assert_eq!(s.layout().name, "Title + 2 Columns");
    assert_eq!(s.aspect().id, "16:9");
    assert_eq!(s.mode(), ViewMode::Layout);
    assert_eq!(s.split(), 35.0);
    assert!(!s.compact());
    assert!(!s.stacking());
}

#[test]
fn view_mode_parse() {
    assert_eq!(ViewMode::parse("content"), Some(ViewMode::Content));
    assert_eq!(ViewMode::parse("layout"), Some(ViewMode::Layout));
    assert_eq!(ViewMode::parse("preview"), None);
}

// =============================================================
// Divider visibility
// =============================================================

#[test]
fn divider_hidden_in_layout_mode() {
    let (_, s) = session();
    assert!(s.divider().is_none());
    assert_eq!(s.split_label().as_deref(), Some("Split: 35%"));
}

#[test]
fn divider_shown_in_content_mode_for_percent_cols() {
    let (_, mut s) = session();
    s.set_mode(ViewMode::Content);
    let divider = s.divider().unwrap();
    assert_eq!(divider.left_pct, 35.0);
    assert_eq!(divider.width_px, 8);
}

#[test]
fn divider_hidden_for_fixed_cols() {
    let (_, mut s) = session();
    s.set_mode(ViewMode::Content);
    s.select_preset("Two Columns").unwrap();
    assert!(s.divider().is_none());
    assert!(s.split_label().is_none());
}

#[test]
fn divider_hidden_when_stacking() {
    let (_, mut s) = session();
    s.set_mode(ViewMode::Content);
    s.select_aspect("9:16").unwrap();
    assert!(s.divider().is_none());
    assert!(s.split_label().is_none());
}

// =============================================================
// Drag routing
// =============================================================

#[test]
fn press_on_hidden_divider_is_ignored() {
    let (host, mut s) = session();
    assert!(s.pointer_down_divider().is_none());
    assert_eq!(host.active(Channel::PointerMove), 0);
}

#[test]
fn drag_updates_split_and_plan() {
    let (host, mut s) = session();
    s.set_mode(ViewMode::Content);
    let resp = s.pointer_down_divider().unwrap();
    assert!(resp.started && resp.prevent_default);
    assert_eq!(host.active(Channel::PointerMove), 1);

    assert_eq!(s.pointer_move(420.0, rect()), Some(42.0));
    s.pointer_up();
    assert_eq!(host.active(Channel::PointerMove), 0);
    assert_eq!(host.active(Channel::PointerUp), 0);

    let PlacementPlan::Grid(plan) = s.plan() else { panic!("expected grid") };
    assert_eq!(plan.cols, "42% 1fr");
    assert_eq!(s.split_label().as_deref(), Some("Split: 42%"));
}

#[test]
fn split_label_rounds() {
    let (_, mut s) = session();
    s.set_mode(ViewMode::Content);
    s.pointer_down_divider();
    s.pointer_move(426.0, rect());
    assert_eq!(s.split_label().as_deref(), Some("Split: 43%"));
}

#[test]
fn preset_change_resets_split_and_ends_drag() {
    let (host, mut s) = session();
    s.set_mode(ViewMode::Content);
    s.pointer_down_divider();
    s.pointer_move(600.0, rect());
    s.select_preset("Sidebar + Content").unwrap();
    assert_eq!(s.split(), 35.0);
    assert!(!s.is_resizing());
    assert_eq!(host.active(Channel::PointerMove), 0);

    let PlacementPlan::Grid(plan) = s.plan() else { panic!("expected grid") };
    assert_eq!(plan.cols, "35% 1fr");
}

#[test]
fn leaving_content_mode_ends_drag() {
    let (host, mut s) = session();
    s.set_mode(ViewMode::Content);
    s.pointer_down_divider();
    s.set_mode(ViewMode::Layout);
    assert!(!s.is_resizing());
    assert_eq!(host.active(Channel::PointerUp), 0);
}

#[test]
fn switching_to_stack_ends_drag() {
    let (host, mut s) = session();
    s.set_mode(ViewMode::Content);
    s.pointer_down_divider();
    s.select_aspect("9:16").unwrap();
    assert!(!s.is_resizing());
    assert_eq!(host.active(Channel::PointerMove), 0);
}

#[test]
fn dropping_session_mid_drag_releases_listeners() {
    let host = EventHost::new();
    {
        let mut s = EditorSession::new(host.clone());
        s.set_mode(ViewMode::Content);
        s.pointer_down_divider();
        assert_eq!(host.active(Channel::PointerMove), 1);
    }
    assert_eq!(host.active(Channel::PointerMove), 0);
}

// =============================================================
// Selection errors
// =============================================================

#[test]
fn unknown_preset_leaves_state() {
    let (_, mut s) = session();
    let err = s.select_preset("Nope").unwrap_err();
    assert_eq!(err, LayoutError::PresetNotFound("Nope".into()));
    assert_eq!(s.layout().name, "Title + 2 Columns");
}

#[test]
fn unknown_aspect_leaves_state() {
    let (_, mut s) = session();
    assert!(s.select_aspect("21:9").unwrap_err().is_not_found());
    assert_eq!(s.aspect().id, "16:9");
}

// =============================================================
// Region edits and rendering
// =============================================================

#[test]
fn set_padding_snaps() {
    let (_, mut s) = session();
    assert_eq!(s.set_padding("left", 10).unwrap(), 8);
    assert_eq!(s.layout().region("left").unwrap().padding, 8);
    assert_eq!(s.set_padding("left", 100).unwrap(), 24);
}

#[test]
fn edits_do_not_touch_catalog() {
    let (_, mut s) = session();
    s.assign_component("right", ComponentKind::Image).unwrap();
    s.select_preset("Title + 2 Columns").unwrap();
    assert_eq!(s.layout().region("right").unwrap().component, ComponentKind::Chart);
}

#[test]
fn edit_unknown_region_fails() {
    let (_, mut s) = session();
    assert_eq!(
        s.assign_component("ghost", ComponentKind::Table),
        Err(LayoutError::RegionNotFound("ghost".into()))
    );
    assert!(s.set_padding("ghost", 4).is_err());
}

#[test]
fn layout_mode_renders_overlay_with_actual_padding() {
    let (_, mut s) = session();
    s.set_padding("title", 0).unwrap();
    let RegionView::Overlay(overlay) = s.render_region("title").unwrap() else { panic!("expected overlay") };
    assert_eq!(overlay.name, "Title");
    assert_eq!(overlay.padding, 0);
    assert_eq!(overlay.padding_options, &[0, 4, 8, 12, 16, 24]);
}

#[test]
fn content_mode_renders_component_with_compact_padding() {
    let (_, mut s) = session();
    s.set_mode(ViewMode::Content);
    s.select_aspect("16:4").unwrap();
    let RegionView::Content(out) = s.render_region("right").unwrap() else { panic!("expected content") };
    assert!(matches!(out, RenderOutput::Chart(_)));
    assert_eq!(out.padding(), Some(4));
}

#[test]
fn render_unknown_region_fails() {
    let (_, s) = session();
    assert!(s.render_region("ghost").unwrap_err().is_not_found());
}
