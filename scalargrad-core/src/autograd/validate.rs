use super::node::{Node, NodeId};
use super::op::Op;
use super::traversal::VisitedSet;
use crate::error::ValidationError;
use crate::scalar::Scalar;
use std::collections::{HashSet, VecDeque};

/// Structural checks run once when a graph is built.
pub(crate) fn validate<T: Scalar>(
    nodes: &[Node<T>],
    inputs: &[NodeId],
    outputs: &[NodeId],
) -> Result<(), ValidationError> {
    if nodes.is_empty() {
        return Err(ValidationError::Empty);
    }
    check_endpoints(nodes.len(), inputs, outputs)?;
    check_edges(nodes)?;
    check_arity(nodes)?;
    check_consumers_mirror_inputs(nodes)?;
    check_roles(nodes, inputs, outputs)?;
    check_acyclic(nodes)
}

fn check_endpoints(
    len: usize,
    inputs: &[NodeId],
    outputs: &[NodeId],
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for &id in inputs.iter().chain(outputs) {
        if id.index() >= len {
            return Err(ValidationError::UnknownEndpoint { id });
        }
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateEndpoint { id });
        }
    }
    Ok(())
}

fn check_edges<T: Scalar>(nodes: &[Node<T>]) -> Result<(), ValidationError> {
    for (index, node) in nodes.iter().enumerate() {
        for &target in node.inputs().iter().chain(node.consumers()) {
            if target.index() >= nodes.len() {
                return Err(ValidationError::DanglingReference {
                    node: NodeId::new(index),
                    target,
                });
            }
        }
    }
    Ok(())
}

fn check_arity<T: Scalar>(nodes: &[Node<T>]) -> Result<(), ValidationError> {
    for (index, node) in nodes.iter().enumerate() {
        let expected = node.op().arity();
        if !expected.accepts(node.inputs().len()) {
            return Err(ValidationError::ArityMismatch {
                node: NodeId::new(index),
                op: node.op(),
                expected,
                actual: node.inputs().len(),
            });
        }
    }
    Ok(())
}

/// Every `n -> c` input edge must appear as `c` in `n`'s consumer list, with
/// the same multiplicity.
fn check_consumers_mirror_inputs<T: Scalar>(nodes: &[Node<T>]) -> Result<(), ValidationError> {
    // Built in increasing consumer order, so each list is already sorted.
    let mut expected: Vec<Vec<NodeId>> = vec![Vec::new(); nodes.len()];
    for (index, node) in nodes.iter().enumerate() {
        for input in node.inputs() {
            expected[input.index()].push(NodeId::new(index));
        }
    }

    for (index, node) in nodes.iter().enumerate() {
        let mut actual = node.consumers().to_vec();
        actual.sort_unstable();
        if actual != expected[index] {
            return Err(ValidationError::InconsistentConsumers {
                node: NodeId::new(index),
            });
        }
    }
    Ok(())
}

fn check_roles<T: Scalar>(
    nodes: &[Node<T>],
    inputs: &[NodeId],
    outputs: &[NodeId],
) -> Result<(), ValidationError> {
    for &id in inputs {
        let node = &nodes[id.index()];
        if !node.is_input() {
            return Err(ValidationError::NotAnInput { id });
        }
        if node.consumers().is_empty() {
            return Err(ValidationError::InputWithoutConsumers { id });
        }
    }
    for &id in outputs {
        let node = &nodes[id.index()];
        if node.op() != Op::Output {
            return Err(ValidationError::NotAnOutput { id });
        }
        if !node.consumers().is_empty() {
            return Err(ValidationError::OutputHasConsumers { id });
        }
    }

    // Endpoint ids are range-checked by `check_endpoints`.
    let mut listed = VisitedSet::new(nodes.len());
    for &id in inputs.iter().chain(outputs) {
        listed.insert(id);
    }
    for (index, node) in nodes.iter().enumerate() {
        let id = NodeId::new(index);
        match node.op() {
            Op::Input if !listed.contains(id) => {
                return Err(ValidationError::UnlistedInput { id })
            }
            Op::Output if !listed.contains(id) => {
                return Err(ValidationError::UnlistedOutput { id })
            }
            _ => {}
        }
    }
    Ok(())
}

/// Kahn's algorithm: a DAG drains completely.
fn check_acyclic<T: Scalar>(nodes: &[Node<T>]) -> Result<(), ValidationError> {
    let mut in_degree: Vec<usize> = nodes.iter().map(|n| n.inputs().len()).collect();
    let mut queue: VecDeque<NodeId> = in_degree
        .iter()
        .enumerate()
        .filter(|&(_, &degree)| degree == 0)
        .map(|(index, _)| NodeId::new(index))
        .collect();

    let mut drained = 0;
    while let Some(id) = queue.pop_front() {
        drained += 1;
        for &consumer in nodes[id.index()].consumers() {
            let degree = &mut in_degree[consumer.index()];
            *degree = degree.saturating_sub(1);
            if *degree == 0 {
                queue.push_back(consumer);
            }
        }
    }

    if drained == nodes.len() {
        return Ok(());
    }
    let stuck = in_degree
        .iter()
        .position(|&degree| degree > 0)
        .unwrap_or_default();
    Err(ValidationError::CycleDetected {
        node: NodeId::new(stuck),
    })
}
