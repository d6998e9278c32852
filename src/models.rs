//! Slint model mirrors of a [`CanvasSession`].
//!
//! The rendering layer binds `ModelRc`s from [`CanvasModels`] to its
//! repeaters and calls [`CanvasModels::sync`] after each event. Rows that did
//! not change are left untouched so repeaters don't rebuild their items.
//!
//! A `.slint` file declares its own row structs, so the models are generic
//! over the row type. The host hands in constructors from [`NodeRow`] /
//! [`EdgeRow`] to its generated structs:
//!
//! ```ignore
//! slint::include_modules!(); // declares `ComponentData`, `ConnectionData`
//!
//! let models = CanvasModels::with_rows(
//!     |n: &NodeRow| ComponentData {
//!         id: n.id,
//!         title: n.name.clone(),
//!         color: n.color,
//!         x: n.screen_x,
//!         y: n.screen_y,
//!         inputs: n.inputs,
//!         outputs: n.outputs,
//!         selected: n.selected,
//!     },
//!     |e: &EdgeRow| ConnectionData {
//!         from_node: e.source_node,
//!         from_slot: e.source_slot,
//!         to_node: e.target_node,
//!         to_slot: e.target_slot,
//!     },
//! );
//! window.set_components(models.nodes());
//! window.set_connections(models.edges());
//! window.set_errors(models.messages());
//!
//! session.drop_on_canvas(Point::new(x, y), true)?;
//! models.sync(&session);
//! ```

use crate::graph::{Edge, Node};
use crate::session::CanvasSession;
use crate::viewport::Viewport;
use slint::{Color, Model, ModelRc, SharedString, VecModel};
use std::rc::Rc;

/// Ids and slot indices as Slint `int`s. Values past `i32::MAX` saturate.
fn to_slint_int<T: TryInto<i32>>(value: T) -> i32 {
    value.try_into().unwrap_or(i32::MAX)
}

/// One placed component, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRow {
    pub id: i32,
    pub type_name: SharedString,
    pub name: SharedString,
    pub category: SharedString,
    pub color: Color,
    /// Top-left corner in screen pixels
    pub screen_x: f32,
    pub screen_y: f32,
    pub inputs: i32,
    pub outputs: i32,
    pub selected: bool,
}

impl NodeRow {
    fn build(node: &Node, viewport: &Viewport, selected: bool) -> Self {
        let spec = node.archetype.spec();
        let screen = viewport.to_screen(node.position.to_point());
        Self {
            id: to_slint_int(node.id.0),
            type_name: SharedString::from(spec.archetype.as_str()),
            name: SharedString::from(spec.name),
            category: SharedString::from(spec.category.label()),
            color: spec.color,
            screen_x: screen.x,
            screen_y: screen.y,
            inputs: to_slint_int(spec.inputs),
            outputs: to_slint_int(spec.outputs),
            selected,
        }
    }
}

/// One connection, by node id and slot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRow {
    pub id: i32,
    pub source_node: i32,
    pub source_slot: i32,
    pub target_node: i32,
    pub target_slot: i32,
}

impl From<&Edge> for EdgeRow {
    fn from(edge: &Edge) -> Self {
        Self {
            id: to_slint_int(edge.id.0),
            source_node: to_slint_int(edge.source.node.0),
            source_slot: to_slint_int(edge.source.slot),
            target_node: to_slint_int(edge.target.node.0),
            target_slot: to_slint_int(edge.target.slot),
        }
    }
}

/// Write `rows` into `model`, touching only rows that differ.
fn sync_rows<T>(model: &VecModel<T>, rows: impl IntoIterator<Item = T>) -> usize
where
    T: Clone + PartialEq + 'static,
{
    let mut len = 0;
    for (i, row) in rows.into_iter().enumerate() {
        len = i + 1;
        if i < model.row_count() {
            if model.row_data(i).as_ref() != Some(&row) {
                model.set_row_data(i, row);
            }
        } else {
            model.push(row);
        }
    }
    // Remove excess rows
    while model.row_count() > len {
        model.remove(model.row_count() - 1);
    }
    len
}

/// Node, connection and message models for one canvas.
///
/// `N` and `E` are the row types the UI declares. The defaults,
/// [`NodeRow`] and [`EdgeRow`], suit hosts that don't bind to `.slint`
/// structs (and tests).
pub struct CanvasModels<N = NodeRow, E = EdgeRow> {
    nodes: Rc<VecModel<N>>,
    edges: Rc<VecModel<E>>,
    messages: Rc<VecModel<SharedString>>,
    node_row: Rc<dyn Fn(&NodeRow) -> N>,
    edge_row: Rc<dyn Fn(&EdgeRow) -> E>,
}

impl<N, E> Clone for CanvasModels<N, E> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            messages: self.messages.clone(),
            node_row: self.node_row.clone(),
            edge_row: self.edge_row.clone(),
        }
    }
}

impl Default for CanvasModels {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasModels {
    /// Models over the crate's own row types.
    pub fn new() -> Self {
        Self::with_rows(NodeRow::clone, |e: &EdgeRow| *e)
    }
}

impl<N, E> CanvasModels<N, E>
where
    N: Clone + PartialEq + 'static,
    E: Clone + PartialEq + 'static,
{
    /// Models whose rows are built by `node_row` and `edge_row`.
    pub fn with_rows(
        node_row: impl Fn(&NodeRow) -> N + 'static,
        edge_row: impl Fn(&EdgeRow) -> E + 'static,
    ) -> Self {
        Self {
            nodes: Rc::new(VecModel::default()),
            edges: Rc::new(VecModel::default()),
            messages: Rc::new(VecModel::default()),
            node_row: Rc::new(node_row),
            edge_row: Rc::new(edge_row),
        }
    }

    pub fn nodes(&self) -> ModelRc<N> {
        ModelRc::from(self.nodes.clone())
    }

    pub fn edges(&self) -> ModelRc<E> {
        ModelRc::from(self.edges.clone())
    }

    /// Validation messages for the error panel
    pub fn messages(&self) -> ModelRc<SharedString> {
        ModelRc::from(self.messages.clone())
    }

    /// Bring every model in line with `session`.
    pub fn sync(&self, session: &CanvasSession) {
        let viewport = session.viewport();
        let selection = session.selection();
        sync_rows(
            &self.nodes,
            session.graph().nodes().iter().map(|n| {
                (self.node_row)(&NodeRow::build(n, viewport, selection.contains(n.id)))
            }),
        );
        sync_rows(
            &self.edges,
            session
                .graph()
                .edges()
                .iter()
                .map(|e| (self.edge_row)(&EdgeRow::from(e))),
        );
        sync_rows(
            &self.messages,
            session.report().messages().into_iter().map(SharedString::from),
        );
    }
}
