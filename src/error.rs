use crate::graph::{EdgeId, Endpoint, NodeId};
use thiserror::Error;

/// Reasons a canvas mutation or gesture was refused.
///
/// Advisory validation findings are not errors; see
/// [`ValidationIssue`](crate::validate::ValidationIssue).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    /// The type string does not name any catalog archetype
    #[error("Component type not found: {0}")]
    UnknownArchetype(String),
    /// A connection endpoint is missing, out of range, or connects a node to itself
    #[error("Invalid connection endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: Endpoint, reason: EndpointFault },
    /// A connection between these slots already exists
    #[error("Connection already exists as {existing}")]
    DuplicateEdge { existing: EdgeId },
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),
    #[error("Connection {0} not found")]
    EdgeNotFound(EdgeId),
}

/// Why an endpoint was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EndpointFault {
    #[error("node does not exist")]
    MissingNode,
    #[error("output slot out of range (node has {available})")]
    OutputOutOfRange { available: usize },
    #[error("input slot out of range (node has {available})")]
    InputOutOfRange { available: usize },
    #[error("cannot connect a node to itself")]
    SameNode,
    /// A UI slot index below zero; the endpoint then carries slot 0
    #[error("slot index {slot} is negative")]
    NegativeSlot { slot: i32 },
}

pub type Result<T> = std::result::Result<T, CanvasError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CanvasError::UnknownArchetype("robot".into()).to_string(),
            "Component type not found: robot"
        );
        assert_eq!(
            CanvasError::NodeNotFound(NodeId(7)).to_string(),
            "Node node-7 not found"
        );
        assert_eq!(
            CanvasError::InvalidEndpoint {
                endpoint: Endpoint::new(NodeId(2), 3),
                reason: EndpointFault::InputOutOfRange { available: 1 },
            }
            .to_string(),
            "Invalid connection endpoint node-2[3]: input slot out of range (node has 1)"
        );
        assert_eq!(
            CanvasError::InvalidEndpoint {
                endpoint: Endpoint::new(NodeId(5), 0),
                reason: EndpointFault::NegativeSlot { slot: -2 },
            }
            .to_string(),
            "Invalid connection endpoint node-5[0]: slot index -2 is negative"
        );
        assert_eq!(
            CanvasError::DuplicateEdge { existing: EdgeId(4) }.to_string(),
            "Connection already exists as connection-4"
        );
    }
}
