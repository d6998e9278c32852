//! Level 2: Placement, Drag and Pan Tests
//!
//! Library drops, node moves and canvas pans under zoom and pan.

mod common;

use common::harness::CanvasHarness;
use slint::Model;
use workflow_canvas::{CanvasError, GridPos, NodeId, Outcome, Point};

// ============================================================================
// Placement
// ============================================================================

#[test]
fn test_drop_snaps_to_grid() {
    let harness = CanvasHarness::new();
    let id = harness.place("database", 47.0, 95.0);
    assert_eq!(harness.position(id), Some(GridPos::new(40, 100)));

    let row = harness.ctrl.models().nodes().row_data(0).unwrap();
    assert_eq!((row.screen_x, row.screen_y), (40.0, 100.0));
}

#[test]
fn test_ids_increase_and_are_not_reused() {
    let harness = CanvasHarness::new();
    let a = harness.place("database", 0.0, 0.0);
    let b = harness.place("filter", 200.0, 0.0);
    assert!(b > a);

    harness.delete(b).unwrap();
    let c = harness.place("display", 400.0, 0.0);
    assert!(c > b);
    assert_eq!(c.to_string(), "node-3");
}

#[test]
fn test_unknown_component_type_places_nothing() {
    let harness = CanvasHarness::new();
    assert_eq!(harness.try_place("hologram", 0.0, 0.0), None);
    assert_eq!(harness.node_count(), 0);
    assert_eq!(
        harness.tracker.errors.borrow().as_slice(),
        &["Component type not found: hologram".to_string()]
    );
}

#[test]
fn test_drop_outside_canvas_is_discarded() {
    let harness = CanvasHarness::new();
    harness.ctrl.update(|s| s.begin_library_drag("api")).unwrap();
    let outcome = harness
        .ctrl
        .update(|s| s.drop_on_canvas(Point::new(10.0, 10.0), false))
        .unwrap();
    assert_eq!(outcome, Outcome::Ignored);
    assert_eq!(harness.node_count(), 0);
}

#[test]
fn test_drop_under_zoom_and_pan() {
    let harness = CanvasHarness::new();
    harness.ctrl.zoom_in();
    harness.ctrl.zoom_in(); // 1.44
    harness.pan(Point::new(0.0, 0.0), Point::new(100.0, 50.0));

    // (388 - 100) / 1.44 = 200, (194 - 50) / 1.44 = 100
    let id = harness.place("sensor", 388.0, 194.0);
    assert_eq!(harness.position(id), Some(GridPos::new(200, 100)));

    let screen = harness.ctrl.session().node_screen_position(id).unwrap();
    assert!((screen.x - 388.0).abs() < 0.01);
    assert!((screen.y - 194.0).abs() < 0.01);
}

// ============================================================================
// Node drag
// ============================================================================

#[test]
fn test_drag_moves_and_snaps() {
    let harness = CanvasHarness::new();
    let id = harness.place("filter", 100.0, 100.0);

    let moved = harness
        .drag_node(id, Point::new(12.0, 8.0), Point::new(53.0, 29.0))
        .unwrap();
    assert_eq!(moved, Outcome::NodeMoved { node: id, position: GridPos::new(160, 120) });
    assert_eq!(harness.position(id), Some(GridPos::new(160, 120)));
    assert!(harness.ctrl.session().selection().contains(id));
}

#[test]
fn test_drag_divides_screen_motion_by_zoom() {
    let harness = CanvasHarness::new();
    let id = harness.place("filter", 100.0, 100.0);
    harness.ctrl.zoom_in(); // 1.2

    harness
        .drag_node(id, Point::new(5.0, 5.0), Point::new(120.0, 240.0))
        .unwrap();
    assert_eq!(harness.position(id), Some(GridPos::new(200, 300)));
}

#[test]
fn test_drag_under_pan_keeps_node_under_pointer() {
    let harness = CanvasHarness::new();
    let id = harness.place("filter", 100.0, 100.0);
    harness.pan(Point::new(0.0, 0.0), Point::new(300.0, 0.0));

    harness
        .drag_node(id, Point::new(0.0, 0.0), Point::new(40.0, 0.0))
        .unwrap();
    assert_eq!(harness.position(id), Some(GridPos::new(140, 100)));
}

#[test]
fn test_release_ends_drag() {
    let harness = CanvasHarness::new();
    let id = harness.place("filter", 100.0, 100.0);
    harness.drag_node(id, Point::ZERO, Point::new(20.0, 0.0)).unwrap();

    let after = harness
        .ctrl
        .update(|s| s.pointer_move(Point::new(900.0, 900.0)))
        .unwrap();
    assert_eq!(after, Outcome::Ignored);
    assert_eq!(harness.position(id), Some(GridPos::new(120, 100)));
}

#[test]
fn test_press_on_unknown_node_is_an_error() {
    let harness = CanvasHarness::new();
    let id = harness.place("filter", 0.0, 0.0);
    harness.delete(id).unwrap();
    assert_eq!(
        harness.ctrl.pointer_down_on_node(1, Point::ZERO),
        Err(CanvasError::NodeNotFound(id))
    );
}

// ============================================================================
// Pan
// ============================================================================

#[test]
fn test_pan_shifts_every_node_on_screen() {
    let harness = CanvasHarness::new();
    harness.place("database", 0.0, 0.0);
    harness.place("display", 200.0, 100.0);
    harness.ctrl.zoom_out();

    harness.pan(Point::new(50.0, 50.0), Point::new(80.0, 40.0));
    assert_eq!(harness.ctrl.session().viewport().pan(), Point::new(30.0, -10.0));

    let rows: Vec<_> = harness.ctrl.models().nodes().iter().collect();
    assert_eq!((rows[0].screen_x, rows[0].screen_y), (30.0, -10.0));
    // Logical positions are unchanged
    assert_eq!(harness.position(NodeId(rows[1].id as u64)), Some(GridPos::new(200, 100)));
}
