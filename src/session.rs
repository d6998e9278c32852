//! The editing session behind one workflow canvas.
//!
//! [`CanvasSession`] owns the graph, the viewport, gesture state, selection
//! and the latest validation report. The rendering layer feeds it pointer and
//! toolbar events and reads the collections back; nothing here depends on a
//! running UI.
//!
//! # Example
//!
//! ```ignore
//! use workflow_canvas::{CanvasSession, Point};
//!
//! let mut session = CanvasSession::new();
//!
//! // Drag "Database" from the library and drop it on the canvas
//! session.begin_library_drag("database")?;
//! session.drop_on_canvas(Point::new(120.0, 80.0), true)?;
//!
//! // Wire it to an AI model in connect mode
//! session.begin_library_drag("ai-model")?;
//! session.drop_on_canvas(Point::new(320.0, 80.0), true)?;
//! session.toggle_connect_mode();
//! let [db, model] = [session.graph().nodes()[0].id, session.graph().nodes()[1].id];
//! session.click_output_slot(db, 0)?;
//! session.click_input_slot(model, 0)?;
//!
//! assert!(session.is_valid());
//! ```

use crate::catalog::Archetype;
use crate::config::CanvasConfig;
use crate::error::{CanvasError, EndpointFault, Result};
use crate::graph::{EdgeId, Endpoint, NodeId, WorkflowGraph};
use crate::grid::GridPos;
use crate::interaction::{DragUpdate, Interaction, PendingConnection};
use crate::selection::SelectionManager;
use crate::validate::{validate, ValidationReport};
use crate::viewport::{Point, Viewport};
use log::{debug, warn};

/// What an event did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A library drag started; the payload is held until drop
    PayloadCaptured(Archetype),
    NodePlaced(NodeId),
    DragStarted,
    NodeMoved { node: NodeId, position: GridPos },
    Panned { pan: Point },
    DragEnded,
    ConnectionPending(Endpoint),
    Connected(EdgeId),
    Disconnected(EdgeId),
    NodeDeleted { node: NodeId, edges: Vec<EdgeId> },
    NodesDeleted(Vec<NodeId>),
    Cleared,
    /// The event's preconditions were not met; nothing changed
    Ignored,
}

/// Counts shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasStatus {
    pub components: usize,
    pub connections: usize,
    pub zoom_percent: i32,
    pub error_count: usize,
}

#[derive(Debug)]
pub struct CanvasSession {
    graph: WorkflowGraph,
    viewport: Viewport,
    interaction: Interaction,
    selection: SelectionManager,
    report: ValidationReport,
    show_grid: bool,
    config: CanvasConfig,
}

impl Default for CanvasSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasSession {
    /// Empty canvas with default configuration.
    pub fn new() -> Self {
        Self::with_config(CanvasConfig::default())
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        let mut graph = WorkflowGraph::with_policy(config.edge_policy);
        graph.set_grid_size(config.grid_size);
        Self {
            graph,
            viewport: Viewport::with_limits(config.min_zoom, config.max_zoom, config.zoom_step),
            interaction: Interaction::new(),
            selection: SelectionManager::new(),
            report: ValidationReport::default(),
            show_grid: config.show_grid,
            config,
        }
    }

    // === Read side ===

    pub fn graph(&self) -> &WorkflowGraph {
        &self.graph
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Latest validation result
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }

    pub fn connect_mode(&self) -> bool {
        self.interaction.connect_mode()
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn pending_connection(&self) -> Option<PendingConnection> {
        self.interaction.pending()
    }

    /// Where `node` is drawn, in screen pixels
    pub fn node_screen_position(&self, node: NodeId) -> Option<Point> {
        let node = self.graph.node(node)?;
        Some(self.viewport.to_screen(node.position.to_point()))
    }

    pub fn status(&self) -> CanvasStatus {
        CanvasStatus {
            components: self.graph.node_count(),
            connections: self.graph.edge_count(),
            zoom_percent: self.viewport.zoom_percent(),
            error_count: self.report.error_count(),
        }
    }

    // === Placement ===

    /// Pointer-down on a library item, identified by its type string.
    pub fn begin_library_drag(&mut self, type_name: &str) -> Result<Outcome> {
        match Archetype::from_type_str(type_name) {
            Ok(archetype) => Ok(self.begin_library_drag_archetype(archetype)),
            Err(err) => {
                self.interaction.take_payload();
                warn!("{}", err);
                Err(err)
            }
        }
    }

    pub fn begin_library_drag_archetype(&mut self, archetype: Archetype) -> Outcome {
        self.interaction.set_payload(archetype);
        Outcome::PayloadCaptured(archetype)
    }

    /// Drop the carried archetype at `screen`.
    ///
    /// Drops outside the canvas surface discard the payload.
    pub fn drop_on_canvas(&mut self, screen: Point, over_canvas: bool) -> Result<Outcome> {
        let Some(payload) = self.interaction.take_payload() else {
            return Ok(Outcome::Ignored);
        };
        if !over_canvas {
            debug!("{} dropped outside the canvas, discarded", payload.0);
            return Ok(Outcome::Ignored);
        }

        let logical = self.viewport.to_logical(screen);
        let id = self.graph.add_node(payload.0, logical);
        self.after_mutation();
        Ok(Outcome::NodePlaced(id))
    }

    pub fn cancel_library_drag(&mut self) -> bool {
        self.interaction.take_payload().is_some()
    }

    // === Move / pan ===

    /// Pointer-down on a node body: select it and start moving it.
    ///
    /// Ignored in connect mode, where clicks belong to the slots.
    pub fn pointer_down_on_node(&mut self, node: NodeId, screen: Point) -> Result<Outcome> {
        if self.interaction.connect_mode() {
            return Ok(Outcome::Ignored);
        }
        let Some(node_screen) = self.node_screen_position(node) else {
            let err = CanvasError::NodeNotFound(node);
            warn!("{}", err);
            return Err(err);
        };

        self.selection.handle_interaction(node, false);
        self.interaction.begin_node_drag(node, node_screen, screen);
        Ok(Outcome::DragStarted)
    }

    /// Pointer-down on empty canvas: start panning.
    pub fn pointer_down_on_canvas(&mut self, screen: Point) -> Outcome {
        self.interaction.begin_pan(screen);
        Outcome::DragStarted
    }

    pub fn pointer_move(&mut self, screen: Point) -> Result<Outcome> {
        match self.interaction.pointer_move(screen, &self.viewport) {
            None => Ok(Outcome::Ignored),
            Some(DragUpdate::Pan { delta }) => {
                self.viewport.pan_by(delta);
                Ok(Outcome::Panned { pan: self.viewport.pan() })
            }
            Some(DragUpdate::MoveNode { node, position }) => {
                match self.graph.move_node(node, position) {
                    Ok(position) => {
                        self.after_mutation();
                        Ok(Outcome::NodeMoved { node, position })
                    }
                    Err(err) => {
                        self.interaction.end_drag();
                        warn!("{}", err);
                        Err(err)
                    }
                }
            }
        }
    }

    pub fn pointer_up(&mut self) -> Outcome {
        match self.interaction.end_drag() {
            Some(_) => Outcome::DragEnded,
            None => Outcome::Ignored,
        }
    }

    // === Connections ===

    /// Returns the new connect mode state.
    pub fn toggle_connect_mode(&mut self) -> bool {
        self.interaction.toggle_connect_mode()
    }

    /// Click on an output slot: make it the pending connection source.
    ///
    /// A previous pending source is replaced.
    pub fn click_output_slot(&mut self, node: NodeId, slot: usize) -> Result<Outcome> {
        if !self.interaction.connect_mode() {
            return Ok(Outcome::Ignored);
        }
        let source = Endpoint::new(node, slot);
        if self.graph.node(node).is_none() {
            let err = CanvasError::InvalidEndpoint {
                endpoint: source,
                reason: EndpointFault::MissingNode,
            };
            warn!("{}", err);
            return Err(err);
        }

        if let Some(previous) = self.interaction.begin_connection(source) {
            debug!("pending connection from {} replaced by {}", previous.source, source);
        }
        Ok(Outcome::ConnectionPending(source))
    }

    /// Click on an input slot: complete the pending connection.
    ///
    /// If the connection is rejected the pending source is kept, so another
    /// input can be tried.
    pub fn click_input_slot(&mut self, node: NodeId, slot: usize) -> Result<Outcome> {
        if !self.interaction.connect_mode() {
            return Ok(Outcome::Ignored);
        }
        let Some(pending) = self.interaction.pending() else {
            return Ok(Outcome::Ignored);
        };

        match self.graph.add_edge(pending.source, Endpoint::new(node, slot)) {
            Ok(id) => {
                self.interaction.take_pending();
                self.after_mutation();
                Ok(Outcome::Connected(id))
            }
            Err(err) => {
                warn!("{}", err);
                Err(err)
            }
        }
    }

    pub fn cancel_connection(&mut self) -> bool {
        self.interaction.cancel_connection().is_some()
    }

    // === Deletion ===

    pub fn delete_node(&mut self, node: NodeId) -> Result<Outcome> {
        let edges = self.graph.delete_node(node).map_err(|err| {
            warn!("{}", err);
            err
        })?;
        self.selection.remove(node);
        self.interaction.forget_node(node);
        self.after_mutation();
        Ok(Outcome::NodeDeleted { node, edges })
    }

    pub fn delete_edge(&mut self, edge: EdgeId) -> Result<Outcome> {
        let removed = self.graph.delete_edge(edge).map_err(|err| {
            warn!("{}", err);
            err
        })?;
        self.after_mutation();
        Ok(Outcome::Disconnected(removed.id))
    }

    /// Delete every selected node.
    pub fn delete_selected(&mut self) -> Outcome {
        let selected: Vec<NodeId> = self.selection.iter().collect();
        if selected.is_empty() {
            return Outcome::Ignored;
        }
        for &node in &selected {
            // Selection only ever holds placed nodes
            if self.graph.delete_node(node).is_ok() {
                self.interaction.forget_node(node);
            }
        }
        self.selection.clear();
        self.after_mutation();
        Outcome::NodesDeleted(selected)
    }

    pub fn select_node(&mut self, node: NodeId, shift_held: bool) -> Result<()> {
        if self.graph.node(node).is_none() {
            return Err(CanvasError::NodeNotFound(node));
        }
        self.selection.handle_interaction(node, shift_held);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Empty the canvas. Connect mode, grid and viewport are kept.
    pub fn clear(&mut self) -> Outcome {
        self.graph.clear();
        self.selection.clear();
        self.interaction.reset();
        self.after_mutation();
        Outcome::Cleared
    }

    // === View ===

    /// Returns the new grid visibility.
    pub fn toggle_grid(&mut self) -> bool {
        self.show_grid = !self.show_grid;
        self.show_grid
    }

    /// Returns the new zoom factor.
    pub fn zoom_in(&mut self) -> f32 {
        self.viewport.zoom_in();
        self.viewport.zoom()
    }

    pub fn zoom_out(&mut self) -> f32 {
        self.viewport.zoom_out();
        self.viewport.zoom()
    }

    pub fn reset_zoom(&mut self) -> f32 {
        self.viewport.reset_zoom();
        self.viewport.zoom()
    }

    // === Validation ===

    /// Re-run validation now and return the fresh report.
    pub fn validate(&mut self) -> &ValidationReport {
        self.report = validate(&self.graph);
        debug!(
            "validation: {} issue(s) over {} node(s), {} connection(s)",
            self.report.error_count(),
            self.graph.node_count(),
            self.graph.edge_count()
        );
        &self.report
    }

    fn after_mutation(&mut self) {
        if self.config.auto_validate {
            self.validate();
        }
    }
}
