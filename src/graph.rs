use crate::catalog::Archetype;
use crate::error::{CanvasError, EndpointFault, Result};
use crate::grid::{snap_to_grid, GridPos, GRID_SIZE};
use crate::viewport::Point;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a placed node. Allocated monotonically, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Identifier of a connection. Allocated monotonically, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connection-{}", self.0)
    }
}

/// One side of a connection: a node and a slot index on it.
///
/// Whether the slot is an output or an input depends on which side of the
/// [`Edge`] the endpoint sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub node: NodeId,
    pub slot: usize,
}

impl Endpoint {
    pub const fn new(node: NodeId, slot: usize) -> Self {
        Self { node, slot }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.node, self.slot)
    }
}

/// A placed component instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub archetype: Archetype,
    pub position: GridPos,
}

/// A directed connection from an output slot to an input slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: Endpoint,
    pub target: Endpoint,
}

impl Edge {
    /// True if either end of this edge is on `node`
    pub fn touches(&self, node: NodeId) -> bool {
        self.source.node == node || self.target.node == node
    }
}

// ============================================================================
// Connection Validation Framework
// ============================================================================

/// Rule deciding whether a new connection may be inserted.
///
/// Rules see the graph as it is *before* insertion. Combine several with
/// [`CompositeValidator`].
///
/// # Example
///
/// ```ignore
/// struct SingleFanOut;
///
/// impl ConnectionValidator for SingleFanOut {
///     fn validate(&self, source: Endpoint, target: Endpoint, graph: &WorkflowGraph) -> Result<()> {
///         match graph.edges().iter().find(|e| e.source == source) {
///             Some(e) => Err(CanvasError::DuplicateEdge { existing: e.id }),
///             None => Ok(()),
///         }
///     }
/// }
/// ```
pub trait ConnectionValidator {
    fn validate(&self, source: Endpoint, target: Endpoint, graph: &WorkflowGraph) -> Result<()>;
}

/// Both endpoint nodes must exist.
#[derive(Clone, Copy, Debug, Default)]
pub struct NodesExistValidator;

impl ConnectionValidator for NodesExistValidator {
    fn validate(&self, source: Endpoint, target: Endpoint, graph: &WorkflowGraph) -> Result<()> {
        for endpoint in [source, target] {
            if graph.node(endpoint.node).is_none() {
                return Err(CanvasError::InvalidEndpoint {
                    endpoint,
                    reason: EndpointFault::MissingNode,
                });
            }
        }
        Ok(())
    }
}

/// Endpoints must be on different nodes and within each archetype's slot count.
///
/// Nodes that do not exist are left to [`NodesExistValidator`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SlotRangeValidator;

impl ConnectionValidator for SlotRangeValidator {
    fn validate(&self, source: Endpoint, target: Endpoint, graph: &WorkflowGraph) -> Result<()> {
        if source.node == target.node {
            return Err(CanvasError::InvalidEndpoint {
                endpoint: target,
                reason: EndpointFault::SameNode,
            });
        }

        if let Some(node) = graph.node(source.node) {
            let available = node.archetype.outputs();
            if source.slot >= available {
                return Err(CanvasError::InvalidEndpoint {
                    endpoint: source,
                    reason: EndpointFault::OutputOutOfRange { available },
                });
            }
        }

        if let Some(node) = graph.node(target.node) {
            let available = node.archetype.inputs();
            if target.slot >= available {
                return Err(CanvasError::InvalidEndpoint {
                    endpoint: target,
                    reason: EndpointFault::InputOutOfRange { available },
                });
            }
        }

        Ok(())
    }
}

/// Rejects a second connection between the same output and input slot.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDuplicatesValidator;

impl ConnectionValidator for NoDuplicatesValidator {
    fn validate(&self, source: Endpoint, target: Endpoint, graph: &WorkflowGraph) -> Result<()> {
        match graph.find_edge(source, target) {
            Some(existing) => Err(CanvasError::DuplicateEdge { existing: existing.id }),
            None => Ok(()),
        }
    }
}

/// Chains validators; the first failure wins.
#[derive(Default)]
pub struct CompositeValidator {
    validators: Vec<Box<dyn ConnectionValidator>>,
}

impl CompositeValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validator. Validators run in the order they were added.
    pub fn add<V: ConnectionValidator + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl fmt::Debug for CompositeValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeValidator")
            .field("validators", &self.validators.len())
            .finish()
    }
}

impl ConnectionValidator for CompositeValidator {
    fn validate(&self, source: Endpoint, target: Endpoint, graph: &WorkflowGraph) -> Result<()> {
        self.validators
            .iter()
            .try_for_each(|v| v.validate(source, target, graph))
    }
}

/// How strictly new connections are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgePolicy {
    /// Endpoints must exist, be on different nodes, be within slot range, and
    /// not duplicate an existing connection.
    #[default]
    Strict,
    /// Endpoints must exist. Out-of-range slots, self connections and
    /// parallel connections are accepted.
    Permissive,
}

impl EdgePolicy {
    pub fn validator(self) -> CompositeValidator {
        match self {
            EdgePolicy::Strict => CompositeValidator::new()
                .add(NodesExistValidator)
                .add(SlotRangeValidator)
                .add(NoDuplicatesValidator),
            EdgePolicy::Permissive => CompositeValidator::new().add(NodesExistValidator),
        }
    }
}

// ============================================================================
// Graph Model
// ============================================================================

/// Placed nodes and their connections.
///
/// Nodes keep insertion order, which is also render order. All positions are
/// snapped to the grid on the way in.
#[derive(Debug)]
pub struct WorkflowGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    next_node: u64,
    next_edge: u64,
    grid_size: i32,
    validator: CompositeValidator,
}

impl Default for WorkflowGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowGraph {
    /// Empty graph with [`EdgePolicy::Strict`] and the default grid.
    pub fn new() -> Self {
        Self::with_policy(EdgePolicy::Strict)
    }

    pub fn with_policy(policy: EdgePolicy) -> Self {
        Self::with_validator(policy.validator())
    }

    /// Empty graph using a custom connection validator.
    pub fn with_validator(validator: CompositeValidator) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            next_node: 1,
            next_edge: 1,
            grid_size: GRID_SIZE,
            validator,
        }
    }

    /// Set the grid cell used for snapping. Existing positions are untouched.
    pub fn set_grid_size(&mut self, cell: i32) {
        self.grid_size = cell.max(1);
    }

    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    // === Queries ===

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Edges with either end on `node`
    pub fn edges_touching(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.touches(node))
    }

    /// Edges leaving `node`
    pub fn outgoing(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.source.node == node)
    }

    /// The first edge between exactly these two slots, if any
    pub fn find_edge(&self, source: Endpoint, target: Endpoint) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.target == target)
    }

    // === Mutations ===

    /// Place a new node at `position` (logical units, snapped to the grid).
    pub fn add_node(&mut self, archetype: Archetype, position: Point) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        let position = snap_to_grid(position, self.grid_size);
        self.nodes.push(Node { id, archetype, position });
        debug!("added {} ({}) at {}", id, archetype, position);
        id
    }

    /// Place a node by archetype type string, e.g. `"database"`.
    pub fn add_node_by_type(&mut self, type_name: &str, position: Point) -> Result<NodeId> {
        let archetype = Archetype::from_type_str(type_name)?;
        Ok(self.add_node(archetype, position))
    }

    /// Move a node. No bounds checking; nodes may leave the visible area.
    ///
    /// Returns the snapped position actually stored.
    pub fn move_node(&mut self, id: NodeId, position: Point) -> Result<GridPos> {
        let snapped = snap_to_grid(position, self.grid_size);
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(CanvasError::NodeNotFound(id))?;
        node.position = snapped;
        Ok(snapped)
    }

    /// Remove a node and every edge touching it.
    ///
    /// Returns the ids of the removed edges.
    pub fn delete_node(&mut self, id: NodeId) -> Result<Vec<EdgeId>> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or(CanvasError::NodeNotFound(id))?;
        self.nodes.remove(index);

        let removed: Vec<EdgeId> = self.edges_touching(id).map(|e| e.id).collect();
        self.edges.retain(|e| !e.touches(id));
        debug!("deleted {} and {} connection(s)", id, removed.len());
        Ok(removed)
    }

    /// Connect an output slot to an input slot.
    pub fn add_edge(&mut self, source: Endpoint, target: Endpoint) -> Result<EdgeId> {
        self.validator.validate(source, target, self)?;

        let id = EdgeId(self.next_edge);
        self.next_edge += 1;
        self.edges.push(Edge { id, source, target });
        debug!("connected {} -> {} as {}", source, target, id);
        Ok(id)
    }

    pub fn delete_edge(&mut self, id: EdgeId) -> Result<Edge> {
        let index = self
            .edges
            .iter()
            .position(|e| e.id == id)
            .ok_or(CanvasError::EdgeNotFound(id))?;
        Ok(self.edges.remove(index))
    }

    /// Remove all nodes and edges. Id counters keep counting.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================
