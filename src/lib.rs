//! # Workflow Canvas
//!
//! Headless core of a visual workflow builder: a palette of sixteen
//! component archetypes, a grid-snapped canvas of placed components joined
//! by slot-to-slot connections, a zoom/pan viewport and advisory validation
//! (disconnected components, circular dependencies).
//!
//! ## Layers
//!
//! - [`catalog`] - The fixed archetype palette: names, categories, colors, slot counts
//! - [`graph`] - [`WorkflowGraph`] with id allocation and composable connection validators
//! - [`viewport`] / [`grid`] - Screen/logical transforms and grid snapping
//! - [`interaction`] - Library drag, node drag, pan, connect-mode gestures
//! - [`validate`] - Disconnection and cycle checks
//! - [`session`] - [`CanvasSession`], the event-driven editing session
//! - [`models`] / [`controller`] - Slint model mirrors and a clonable callback handle
//!
//! ## Quick Start
//!
//! ```ignore
//! use workflow_canvas::{CanvasSession, Point};
//!
//! let mut session = CanvasSession::new();
//! session.begin_library_drag("database")?;
//! session.drop_on_canvas(Point::new(0.0, 0.0), true)?;
//! println!("{} component(s)", session.status().components);
//! ```

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod graph;
pub mod grid;
pub mod interaction;
pub mod models;
pub mod selection;
pub mod session;
pub mod validate;
pub mod viewport;

pub use catalog::{grouped, Archetype, ArchetypeSpec, Category};
pub use config::CanvasConfig;
pub use controller::CanvasController;
pub use error::{CanvasError, EndpointFault, Result};
pub use graph::{
    CompositeValidator, ConnectionValidator, Edge, EdgeId, EdgePolicy, Endpoint, Node, NodeId,
    NoDuplicatesValidator, NodesExistValidator, SlotRangeValidator, WorkflowGraph,
};
pub use grid::{snap_to_grid, GridPos, GRID_SIZE};
pub use interaction::{DragKind, DragPayload, DragState, DragUpdate, Interaction, PendingConnection};
pub use models::{CanvasModels, EdgeRow, NodeRow};
pub use selection::SelectionManager;
pub use session::{CanvasSession, CanvasStatus, Outcome};
pub use validate::{validate, ValidationIssue, ValidationReport};
pub use viewport::{to_logical, to_screen, Point, Viewport};
