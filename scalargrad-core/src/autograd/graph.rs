use super::gradients::Gradients;
use super::node::{Node, NodeId};
use super::traversal::{topological_order, Direction, VisitedSet};
use super::validate::validate;
use crate::error::ScalarGradError;
use crate::scalar::Scalar;
use log::{debug, trace};

/// A validated scalar computation graph.
///
/// The graph owns every [`Node`]; edges are [`NodeId`] indices into that
/// storage. Structure is fixed once built: `forward`, `backprop` and
/// `zero_grad` only touch the value and gradient fields.
///
/// Stored gradients accumulate across `backprop` calls until `zero_grad` is
/// called. [`Graph::gradients`] avoids that bookkeeping by returning a fresh
/// buffer per call.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<T> {
    nodes: Vec<Node<T>>,
    inputs: Vec<NodeId>,
    outputs: Vec<NodeId>,
    intermediates: Vec<NodeId>,
    forward_order: Vec<NodeId>,
    backward_order: Vec<NodeId>,
}

impl<T: Scalar> Graph<T> {
    /// Builds a graph from fully wired nodes.
    ///
    /// # Arguments
    /// * `nodes`: the node arena. Every input and consumer edge must point into it.
    /// * `inputs`: the `Input` nodes, in the positional order `forward` assigns values.
    /// * `outputs`: the `Output` nodes, in the positional order `backprop` assigns seeds.
    ///
    /// # Errors
    /// Returns `ScalarGradError::Validation` for dangling references, arity
    /// mismatches, consumer lists that do not mirror input lists, misplaced or
    /// unlisted input/output nodes, and cycles.
    pub fn from_nodes(
        nodes: Vec<Node<T>>,
        inputs: Vec<NodeId>,
        outputs: Vec<NodeId>,
    ) -> Result<Self, ScalarGradError> {
        validate(&nodes, &inputs, &outputs)?;

        let constants = nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.op().is_source() && !node.is_input())
            .map(|(index, _)| NodeId::new(index));
        let sources: Vec<NodeId> = inputs.iter().copied().chain(constants).collect();

        let forward_order = topological_order(&nodes, &sources, Direction::Forward);
        let backward_order = topological_order(&nodes, &outputs, Direction::Reverse);
        let mut endpoints = VisitedSet::new(nodes.len());
        for &id in inputs.iter().chain(&outputs) {
            endpoints.insert(id);
        }
        let intermediates = (0..nodes.len())
            .map(NodeId::new)
            .filter(|&id| !endpoints.contains(id))
            .collect::<Vec<_>>();

        debug!(
            "Built graph: {} nodes ({} inputs, {} outputs, {} intermediates)",
            nodes.len(),
            inputs.len(),
            outputs.len(),
            intermediates.len()
        );

        Ok(Self {
            nodes,
            inputs,
            outputs,
            intermediates,
            forward_order,
            backward_order,
        })
    }

    pub fn nodes(&self) -> &[Node<T>] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[NodeId] {
        &self.outputs
    }

    pub fn intermediates(&self) -> &[NodeId] {
        &self.intermediates
    }

    /// Order `forward` visits nodes in: producers before consumers.
    pub fn forward_order(&self) -> &[NodeId] {
        &self.forward_order
    }

    /// Order `backprop` visits nodes in: consumers before producers.
    pub fn backward_order(&self) -> &[NodeId] {
        &self.backward_order
    }

    pub fn value(&self, id: NodeId) -> Option<T> {
        self.node(id).map(Node::value)
    }

    /// Stored gradient accumulator of `id`.
    pub fn grad(&self, id: NodeId) -> Option<T> {
        self.node(id).map(Node::grad)
    }

    pub fn output_values(&self) -> Vec<T> {
        self.outputs
            .iter()
            .map(|id| self.nodes[id.index()].value())
            .collect()
    }

    /// Stored gradient accumulators of the input nodes, in input order.
    pub fn input_grads(&self) -> Vec<T> {
        self.inputs
            .iter()
            .map(|id| self.nodes[id.index()].grad())
            .collect()
    }

    /// Runs the forward pass.
    ///
    /// Assigns `values` positionally to the input nodes, then recomputes every
    /// node in forward topological order. Only value fields change.
    ///
    /// # Errors
    /// `DimensionMismatch` if `values.len()` differs from the number of inputs;
    /// the graph is left untouched in that case.
    pub fn forward(&mut self, values: &[T]) -> Result<(), ScalarGradError> {
        if values.len() != self.inputs.len() {
            return Err(ScalarGradError::DimensionMismatch {
                expected: self.inputs.len(),
                actual: values.len(),
            });
        }

        for (id, &value) in self.inputs.iter().zip(values) {
            self.nodes[id.index()].set_value(value);
        }

        for &id in &self.forward_order {
            let value = self.nodes[id.index()].compute_val(&self.nodes);
            trace!("forward {} ({}) = {}", id, self.nodes[id.index()].label(), value);
            self.nodes[id.index()].set_value(value);
        }
        Ok(())
    }

    /// Runs the backward pass into the stored gradient accumulators.
    ///
    /// Each output's gradient is overwritten with its seed; every other node
    /// keeps what it already holds and receives `+=` contributions. Call
    /// [`Graph::zero_grad`] between independent passes.
    ///
    /// # Errors
    /// `DimensionMismatch` if `seeds.len()` differs from the number of outputs.
    pub fn backprop(&mut self, seeds: &[T]) -> Result<(), ScalarGradError> {
        let mut grads =
            Gradients::from_vec(self.nodes.iter().map(Node::grad).collect());
        self.accumulate(grads.as_mut_slice(), seeds)?;

        for (node, grad) in self.nodes.iter_mut().zip(grads.into_vec()) {
            node.set_grad(grad);
        }
        Ok(())
    }

    /// Runs the backward pass into a fresh buffer and returns it.
    ///
    /// Reads only node values; stored accumulators are neither read nor
    /// written, so repeated calls never leak into each other.
    pub fn gradients(&self, seeds: &[T]) -> Result<Gradients<T>, ScalarGradError> {
        let mut grads = Gradients::zeros(self.nodes.len());
        self.accumulate(grads.as_mut_slice(), seeds)?;
        Ok(grads)
    }

    /// Resets every stored gradient to zero. Values are untouched.
    pub fn zero_grad(&mut self) {
        for node in &mut self.nodes {
            node.set_grad(T::zero());
        }
    }

    fn accumulate(&self, grads: &mut [T], seeds: &[T]) -> Result<(), ScalarGradError> {
        if seeds.len() != self.outputs.len() {
            return Err(ScalarGradError::DimensionMismatch {
                expected: self.outputs.len(),
                actual: seeds.len(),
            });
        }

        for (id, &seed) in self.outputs.iter().zip(seeds) {
            grads[id.index()] = seed;
        }

        for &id in &self.backward_order {
            let node = &self.nodes[id.index()];
            let upstream = grads[id.index()];
            trace!("backward {} ({}) grad = {}", id, node.label(), upstream);
            let contributions = node.compute_grad(&self.nodes, upstream);
            for (input, contribution) in node.inputs().iter().zip(contributions) {
                grads[input.index()] += contribution;
            }
        }
        Ok(())
    }
}
