//! Test harness driving a canvas the way the UI does.
//!
//! Every helper goes through [`CanvasController`], so the Slint models are
//! synced after each step just as they would be in a running window.

#![allow(dead_code)]

use super::OutcomeTracker;
use slint::Model;
use workflow_canvas::{
    CanvasConfig, CanvasController, EdgeId, GridPos, NodeId, Outcome, Point, Result,
};

pub struct CanvasHarness {
    pub ctrl: CanvasController,
    pub tracker: OutcomeTracker,
}

impl CanvasHarness {
    pub fn new() -> Self {
        Self::with_config(CanvasConfig::default())
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        Self {
            ctrl: CanvasController::with_config(config),
            tracker: OutcomeTracker::new(),
        }
    }

    fn run(&self, f: impl FnOnce(&mut workflow_canvas::CanvasSession) -> Result<Outcome>) -> Result<Outcome> {
        let result = self.ctrl.update(f);
        self.tracker.record(&result);
        result
    }

    // === Simulated gestures ===

    /// Drag `type_name` from the library and drop it at screen `(x, y)`.
    pub fn place(&self, type_name: &str, x: f32, y: f32) -> NodeId {
        self.try_place(type_name, x, y)
            .unwrap_or_else(|| panic!("placing {} failed", type_name))
    }

    pub fn try_place(&self, type_name: &str, x: f32, y: f32) -> Option<NodeId> {
        self.run(|s| s.begin_library_drag(type_name)).ok()?;
        match self.run(|s| s.drop_on_canvas(Point::new(x, y), true)) {
            Ok(Outcome::NodePlaced(id)) => Some(id),
            _ => None,
        }
    }

    /// Press on a node at its drawn origin plus `grab`, move by `by`, release.
    pub fn drag_node(&self, node: NodeId, grab: Point, by: Point) -> Result<Outcome> {
        let origin = self
            .ctrl
            .session()
            .node_screen_position(node)
            .unwrap_or(Point::ZERO);
        let start = origin + grab;
        self.run(|s| s.pointer_down_on_node(node, start))?;
        let moved = self.run(|s| s.pointer_move(start + by));
        self.run(|s| Ok(s.pointer_up()))?;
        moved
    }

    /// Press on empty canvas at `from`, move to `to`, release.
    pub fn pan(&self, from: Point, to: Point) {
        self.run(|s| Ok(s.pointer_down_on_canvas(from))).ok();
        self.run(|s| s.pointer_move(to)).ok();
        self.run(|s| Ok(s.pointer_up())).ok();
    }

    /// Click an output slot then an input slot, entering connect mode first
    /// if needed.
    pub fn connect(&self, from: NodeId, out_slot: usize, to: NodeId, in_slot: usize) -> Result<EdgeId> {
        if !self.ctrl.session().connect_mode() {
            self.ctrl.toggle_connect_mode();
        }
        self.run(|s| s.click_output_slot(from, out_slot))?;
        match self.run(|s| s.click_input_slot(to, in_slot))? {
            Outcome::Connected(id) => Ok(id),
            other => panic!("expected Connected, got {:?}", other),
        }
    }

    pub fn delete(&self, node: NodeId) -> Result<Outcome> {
        self.run(|s| s.delete_node(node))
    }

    // === Queries ===

    pub fn position(&self, node: NodeId) -> Option<GridPos> {
        self.ctrl.session().graph().node(node).map(|n| n.position)
    }

    pub fn node_count(&self) -> usize {
        self.ctrl.session().graph().node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.ctrl.session().graph().edge_count()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.ctrl.session().report().messages()
    }

    /// Error panel contents as the UI sees them
    pub fn error_rows(&self) -> Vec<String> {
        self.ctrl
            .models()
            .messages()
            .iter()
            .map(|m| m.to_string())
            .collect()
    }
}
