use super::graph::Graph;
use super::node::{Node, NodeId};
use super::op::Op;
use crate::error::ScalarGradError;
use crate::scalar::Scalar;

/// Incremental construction of a [`Graph`].
///
/// Every call appends one node and returns its id. Consumer lists are kept in
/// sync with input lists as nodes are added, so callers never wire both ends
/// of an edge by hand. Structural checks run once, in [`GraphBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder<T> {
    nodes: Vec<Node<T>>,
    inputs: Vec<NodeId>,
    outputs: Vec<NodeId>,
}

impl<T: Scalar> GraphBuilder<T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Adds a graph input. Inputs receive values from `forward` in the order
    /// they were added here.
    pub fn input(&mut self, label: impl Into<String>) -> NodeId {
        let id = self.push(Node::new(label, Op::Input, Vec::new()));
        self.inputs.push(id);
        id
    }

    pub fn constant(&mut self, label: impl Into<String>, value: T) -> NodeId {
        self.push(Node::constant(label, value))
    }

    /// Adds a node applying `op` to `inputs`, in operand order.
    ///
    /// Arity and references are not checked here; an invalid node makes
    /// `build` fail.
    pub fn op(&mut self, label: impl Into<String>, op: Op, inputs: &[NodeId]) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        for input in inputs {
            if let Some(producer) = self.nodes.get_mut(input.index()) {
                producer.push_consumer(id);
            }
        }
        self.push(Node::new(label, op, inputs.to_vec()))
    }

    pub fn add(&mut self, label: impl Into<String>, inputs: &[NodeId]) -> NodeId {
        self.op(label, Op::Add, inputs)
    }

    pub fn multiply(&mut self, label: impl Into<String>, inputs: &[NodeId]) -> NodeId {
        self.op(label, Op::Multiply, inputs)
    }

    pub fn relu(&mut self, label: impl Into<String>, input: NodeId) -> NodeId {
        self.op(label, Op::Relu, &[input])
    }

    pub fn exp(&mut self, label: impl Into<String>, input: NodeId) -> NodeId {
        self.op(label, Op::Exp, &[input])
    }

    pub fn reciprocal(&mut self, label: impl Into<String>, input: NodeId) -> NodeId {
        self.op(label, Op::Reciprocal, &[input])
    }

    /// Adds `sum(left[i] * right[i])`.
    ///
    /// # Errors
    /// `DimensionMismatch` if the operand vectors differ in length.
    pub fn dot(
        &mut self,
        label: impl Into<String>,
        left: &[NodeId],
        right: &[NodeId],
    ) -> Result<NodeId, ScalarGradError> {
        if left.len() != right.len() {
            return Err(ScalarGradError::DimensionMismatch {
                expected: left.len(),
                actual: right.len(),
            });
        }
        let operands: Vec<NodeId> = left.iter().chain(right).copied().collect();
        Ok(self.op(label, Op::Dot, &operands))
    }

    /// Adds a graph output reading `source`. Seeds passed to `backprop` are
    /// matched to outputs in the order they were added here.
    pub fn output(&mut self, label: impl Into<String>, source: NodeId) -> NodeId {
        let id = self.op(label, Op::Output, &[source]);
        self.outputs.push(id);
        id
    }

    /// Number of edges currently leaving `id`.
    pub fn consumer_count(&self, id: NodeId) -> usize {
        self.nodes
            .get(id.index())
            .map_or(0, |node| node.consumers().len())
    }

    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Validates the accumulated nodes and freezes them into a [`Graph`].
    pub fn build(self) -> Result<Graph<T>, ScalarGradError> {
        Graph::from_nodes(self.nodes, self.inputs, self.outputs)
    }

    fn push(&mut self, node: Node<T>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }
}
