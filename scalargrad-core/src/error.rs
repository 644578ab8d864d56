use crate::autograd::{Arity, NodeId, Op};
use thiserror::Error;

/// Custom error type for the scalargrad crate.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum ScalarGradError {
    /// A value, seed, gradient or target vector does not have the length the
    /// graph (or optimizer) declares.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Graph validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Optimizer parameters are not initialized; call initialize() or weights() first")]
    NotInitialized,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Structural problems detected while building a [`Graph`](crate::Graph).
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ValidationError {
    #[error("graph has no nodes")]
    Empty,

    #[error("input/output list references unknown node {id}")]
    UnknownEndpoint { id: NodeId },

    #[error("node {id} appears more than once in the input/output lists")]
    DuplicateEndpoint { id: NodeId },

    #[error("node {node} has an edge to unknown node {target}")]
    DanglingReference { node: NodeId, target: NodeId },

    #[error("node {node} ({op}) expects {expected} inputs, got {actual}")]
    ArityMismatch {
        node: NodeId,
        op: Op,
        expected: Arity,
        actual: usize,
    },

    #[error("consumer list of node {node} does not mirror the input lists that reference it")]
    InconsistentConsumers { node: NodeId },

    #[error("cycle detected in the computation graph (through node {node})")]
    CycleDetected { node: NodeId },

    #[error("node {id} is listed as a graph input but is not an input node")]
    NotAnInput { id: NodeId },

    #[error("node {id} is listed as a graph output but is not an output node")]
    NotAnOutput { id: NodeId },

    #[error("input node {id} is missing from the graph's input list")]
    UnlistedInput { id: NodeId },

    #[error("output node {id} is missing from the graph's output list")]
    UnlistedOutput { id: NodeId },

    #[error("input node {id} has no consumers")]
    InputWithoutConsumers { id: NodeId },

    #[error("output node {id} has consumers")]
    OutputHasConsumers { id: NodeId },

    #[error("module parameters must be the trailing inputs of the graph, in order")]
    ParamsNotTrailingInputs,
}
