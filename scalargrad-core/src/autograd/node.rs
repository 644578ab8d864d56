use super::op::Op;
use crate::scalar::Scalar;
use std::fmt;

/// Stable index of a node inside its graph's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A scalar unit of computation.
///
/// Edges are stored on both ends: `inputs` are the producers this node reads
/// (in operand order), `consumers` are the nodes that read this one. Both are
/// indices into the arena owned by the [`Graph`](super::Graph).
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T> {
    label: String,
    op: Op,
    inputs: Vec<NodeId>,
    consumers: Vec<NodeId>,
    value: T,
    grad: T,
}

impl<T: Scalar> Node<T> {
    /// Creates a node with no consumers and zeroed value and gradient.
    pub fn new(label: impl Into<String>, op: Op, inputs: Vec<NodeId>) -> Self {
        Self {
            label: label.into(),
            op,
            inputs,
            consumers: Vec::new(),
            value: T::zero(),
            grad: T::zero(),
        }
    }

    pub fn constant(label: impl Into<String>, value: T) -> Self {
        Self {
            value,
            ..Self::new(label, Op::Constant, Vec::new())
        }
    }

    /// Replaces the consumer list. Used when assembling nodes by hand for
    /// [`Graph::from_nodes`](super::Graph::from_nodes).
    pub fn with_consumers(mut self, consumers: Vec<NodeId>) -> Self {
        self.consumers = consumers;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn op(&self) -> Op {
        self.op
    }

    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    pub fn consumers(&self) -> &[NodeId] {
        &self.consumers
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn grad(&self) -> T {
        self.grad
    }

    /// True for a graph input: an `Input` node with no producers.
    pub fn is_input(&self) -> bool {
        self.op == Op::Input && self.inputs.is_empty()
    }

    /// True for a graph output: an `Output` node nobody consumes.
    pub fn is_output(&self) -> bool {
        self.op == Op::Output && self.consumers.is_empty()
    }

    /// Recomputes this node's value from the current values of its inputs.
    ///
    /// `arena` is the node storage of the graph this node belongs to.
    pub fn compute_val(&self, arena: &[Node<T>]) -> T {
        self.op.forward(&self.input_values(arena), self.value)
    }

    /// Gradient contributions into each input, aligned with [`Node::inputs`],
    /// given this node's accumulated `upstream` gradient.
    pub fn compute_grad(&self, arena: &[Node<T>], upstream: T) -> Vec<T> {
        self.op
            .backward(&self.input_values(arena), self.value, upstream)
    }

    fn input_values(&self, arena: &[Node<T>]) -> Vec<T> {
        self.inputs.iter().map(|id| arena[id.index()].value).collect()
    }

    pub(crate) fn set_value(&mut self, value: T) {
        self.value = value;
    }

    pub(crate) fn set_grad(&mut self, grad: T) {
        self.grad = grad;
    }

    pub(crate) fn push_consumer(&mut self, consumer: NodeId) {
        self.consumers.push(consumer);
    }
}
