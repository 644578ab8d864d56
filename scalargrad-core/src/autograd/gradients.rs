use super::node::NodeId;
use crate::scalar::Scalar;
use std::ops::Index;

/// Gradient buffer produced by a single [`Graph::gradients`](super::Graph::gradients)
/// call: one accumulator per node, owned by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients<T> {
    values: Vec<T>,
}

impl<T: Scalar> Gradients<T> {
    pub(crate) fn zeros(len: usize) -> Self {
        Self {
            values: vec![T::zero(); len],
        }
    }

    pub(crate) fn from_vec(values: Vec<T>) -> Self {
        Self { values }
    }

    pub fn get(&self, id: NodeId) -> Option<T> {
        self.values.get(id.index()).copied()
    }

    /// Gradients of `ids`, in that order.
    ///
    /// # Panics
    /// Panics if an id does not belong to the graph that produced the buffer.
    pub fn select(&self, ids: &[NodeId]) -> Vec<T> {
        ids.iter().map(|&id| self[id]).collect()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    pub fn into_vec(self) -> Vec<T> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, T)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(index, &grad)| (NodeId::new(index), grad))
    }
}

impl<T> Index<NodeId> for Gradients<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &T {
        &self.values[id.index()]
    }
}
