//! Pointer gesture state for the canvas.
//!
//! [`Interaction`] tracks the ephemeral parts of editing: the library drag
//! payload, an active node-move or pan drag, connect mode and the pending
//! half of a connection. It never touches the graph; it turns pointer input
//! into [`DragUpdate`]s that the session applies.

use crate::catalog::Archetype;
use crate::graph::{Endpoint, NodeId};
use crate::viewport::{Point, Viewport};

/// What an active drag is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Node(NodeId),
    Canvas,
}

/// An active pointer drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub kind: DragKind,
    /// Pointer minus the dragged node's screen position at drag start.
    /// Zero for canvas pans.
    pub offset: Point,
    /// Last pointer position seen, in screen pixels
    pub last_pointer: Point,
}

/// Archetype carried from the library to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragPayload(pub Archetype);

/// First half of a connection: the chosen output slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingConnection {
    pub source: Endpoint,
}

/// Change requested by a pointer move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    /// Move the node to this logical position (unsnapped)
    MoveNode { node: NodeId, position: Point },
    /// Add this raw screen delta to the pan offset
    Pan { delta: Point },
}

#[derive(Debug, Clone, Default)]
pub struct Interaction {
    drag: Option<DragState>,
    payload: Option<DragPayload>,
    pending: Option<PendingConnection>,
    connect_mode: bool,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Id of the node being moved, if a node drag is active
    pub fn dragged_node(&self) -> Option<NodeId> {
        match self.drag?.kind {
            DragKind::Node(id) => Some(id),
            DragKind::Canvas => None,
        }
    }

    pub fn payload(&self) -> Option<DragPayload> {
        self.payload
    }

    pub fn pending(&self) -> Option<PendingConnection> {
        self.pending
    }

    pub fn connect_mode(&self) -> bool {
        self.connect_mode
    }

    // === Library drag ===

    pub fn set_payload(&mut self, archetype: Archetype) {
        self.payload = Some(DragPayload(archetype));
    }

    pub fn take_payload(&mut self) -> Option<DragPayload> {
        self.payload.take()
    }

    // === Move / pan ===

    /// Start moving a node.
    ///
    /// Ignored while connect mode is active; returns whether the drag began.
    pub fn begin_node_drag(&mut self, node: NodeId, node_screen: Point, pointer: Point) -> bool {
        if self.connect_mode {
            return false;
        }
        self.drag = Some(DragState {
            kind: DragKind::Node(node),
            offset: pointer - node_screen,
            last_pointer: pointer,
        });
        true
    }

    pub fn begin_pan(&mut self, pointer: Point) {
        self.drag = Some(DragState {
            kind: DragKind::Canvas,
            offset: Point::ZERO,
            last_pointer: pointer,
        });
    }

    /// Translate a pointer move into the change it implies, if any.
    pub fn pointer_move(&mut self, pointer: Point, viewport: &Viewport) -> Option<DragUpdate> {
        let drag = self.drag.as_mut()?;
        let delta = pointer - drag.last_pointer;
        drag.last_pointer = pointer;

        Some(match drag.kind {
            DragKind::Node(node) => DragUpdate::MoveNode {
                node,
                position: viewport.to_logical(pointer - drag.offset),
            },
            DragKind::Canvas => DragUpdate::Pan { delta },
        })
    }

    /// Finish the active drag, returning it.
    pub fn end_drag(&mut self) -> Option<DragState> {
        self.drag.take()
    }

    // === Connections ===

    /// Flip connect mode. Leaving connect mode drops any pending connection.
    pub fn toggle_connect_mode(&mut self) -> bool {
        self.set_connect_mode(!self.connect_mode);
        self.connect_mode
    }

    pub fn set_connect_mode(&mut self, enabled: bool) {
        self.connect_mode = enabled;
        if !enabled {
            self.pending = None;
        }
    }

    /// Remember `source` as the pending output. Replaces any earlier pending
    /// connection, which is returned.
    pub fn begin_connection(&mut self, source: Endpoint) -> Option<PendingConnection> {
        self.pending.replace(PendingConnection { source })
    }

    pub fn take_pending(&mut self) -> Option<PendingConnection> {
        self.pending.take()
    }

    pub fn cancel_connection(&mut self) -> Option<PendingConnection> {
        self.pending.take()
    }

    /// Drop every gesture that refers to `node`.
    pub fn forget_node(&mut self, node: NodeId) {
        if self.dragged_node() == Some(node) {
            self.drag = None;
        }
        if self.pending.is_some_and(|p| p.source.node == node) {
            self.pending = None;
        }
    }

    /// Drop all in-flight gestures. Connect mode is kept.
    pub fn reset(&mut self) {
        self.drag = None;
        self.payload = None;
        self.pending = None;
    }
}
