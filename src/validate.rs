//! Advisory workflow checks.
//!
//! Findings never block editing; they feed the error list and the
//! valid/invalid badge.

use crate::graph::{NodeId, WorkflowGraph};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A problem found in the current graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Nodes with no incident connection, reported only when the graph has
    /// more than one node
    Disconnected { count: usize },
    /// The connections contain a directed cycle
    CircularDependency,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected { count } => write!(f, "{} component(s) are not connected", count),
            Self::CircularDependency => write!(f, "Circular dependency detected in workflow"),
        }
    }
}

/// Result of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.issues.len()
    }

    /// Human readable lines for the error panel
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

/// Run every check against `graph`.
///
/// The disconnection check runs first, so when both fire the report lists
/// the disconnection before the cycle.
pub fn validate(graph: &WorkflowGraph) -> ValidationReport {
    let mut issues = Vec::new();

    let disconnected = disconnected_nodes(graph).len();
    if disconnected > 0 {
        issues.push(ValidationIssue::Disconnected { count: disconnected });
    }

    if has_cycle(graph) {
        issues.push(ValidationIssue::CircularDependency);
    }

    ValidationReport { issues }
}

/// Nodes with no incident edge, in node order.
///
/// Empty when the graph has one node or none; a lone node is never flagged.
pub fn disconnected_nodes(graph: &WorkflowGraph) -> Vec<NodeId> {
    if graph.node_count() <= 1 {
        return Vec::new();
    }

    let connected: HashSet<NodeId> = graph
        .edges()
        .iter()
        .flat_map(|e| [e.source.node, e.target.node])
        .collect();

    graph
        .nodes()
        .iter()
        .map(|n| n.id)
        .filter(|id| !connected.contains(id))
        .collect()
}

/// True if the edges, read as `source -> target` arcs, contain a cycle.
///
/// Iterative depth-first search from every unvisited node; stops at the
/// first back edge. A self connection counts as a cycle.
pub fn has_cycle(graph: &WorkflowGraph) -> bool {
    let mut successors: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
    for edge in graph.edges() {
        successors
            .entry(edge.source.node)
            .or_default()
            .push(edge.target.node);
    }

    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut on_stack: HashSet<NodeId> = HashSet::new();
    // (node, index of the next successor to explore)
    let mut stack: Vec<(NodeId, usize)> = Vec::new();

    for start in graph.nodes().iter().map(|n| n.id) {
        if !visited.insert(start) {
            continue;
        }
        on_stack.insert(start);
        stack.push((start, 0));

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let next = successors
                .get(&node)
                .and_then(|s| s.get(frame.1))
                .copied();

            match next {
                Some(child) => {
                    frame.1 += 1;
                    if on_stack.contains(&child) {
                        return true;
                    }
                    if visited.insert(child) {
                        on_stack.insert(child);
                        stack.push((child, 0));
                    }
                }
                None => {
                    on_stack.remove(&node);
                    stack.pop();
                }
            }
        }
    }

    false
}
