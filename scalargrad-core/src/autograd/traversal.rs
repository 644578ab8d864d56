//! Topological traversal
//!
//! Depth-first post-order over the node arena. Descending into every
//! unvisited neighbor before finishing a node means the finished list, read
//! backwards, is a topological order for the chosen edge direction:
//!
//! - `Direction::Forward` follows consumer edges; every node comes strictly
//!   after all of its producers.
//! - `Direction::Reverse` follows input edges; every node comes after all of
//!   its consumers, which is the order backprop needs.
//!
//! The walk keeps an explicit frame stack instead of recursing, so long
//! chains do not exhaust the call stack.

use super::node::{Node, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Visited marks, one per arena slot. Ids must lie inside the arena.
#[derive(Debug, Clone)]
pub(crate) struct VisitedSet {
    marks: Vec<bool>,
}

impl VisitedSet {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            marks: vec![false; len],
        }
    }

    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.marks[id.index()]
    }

    /// Marks `id`; returns `false` if it was already marked.
    pub(crate) fn insert(&mut self, id: NodeId) -> bool {
        !std::mem::replace(&mut self.marks[id.index()], true)
    }
}

fn neighbors<T>(node: &Node<T>, direction: Direction) -> &[NodeId]
where
    T: crate::Scalar,
{
    match direction {
        Direction::Forward => node.consumers(),
        Direction::Reverse => node.inputs(),
    }
}

/// Evaluation order of every node reachable from `roots` in `direction`.
///
/// Each reachable node appears exactly once, however many paths lead to it.
///
/// # Panics
/// Panics if a root or an edge points outside `nodes`. [`Graph`](super::Graph)
/// only calls this on validated arenas.
pub fn topological_order<T: crate::Scalar>(
    nodes: &[Node<T>],
    roots: &[NodeId],
    direction: Direction,
) -> Vec<NodeId> {
    let mut order = post_order(nodes.len(), roots, |id| {
        neighbors(&nodes[id.index()], direction)
    });
    // Popping the post-order stack
    order.reverse();
    order
}

/// Iterative depth-first post-order over `len` nodes.
///
/// `edges(id)` yields the neighbors of `id` to descend into.
pub(crate) fn post_order<'a, F>(len: usize, roots: &[NodeId], mut edges: F) -> Vec<NodeId>
where
    F: FnMut(NodeId) -> &'a [NodeId],
{
    let mut visited = VisitedSet::new(len);
    let mut finished = Vec::with_capacity(len);
    // (node, index of the next neighbor to look at)
    let mut frames: Vec<(NodeId, usize)> = Vec::new();

    for &root in roots {
        if !visited.insert(root) {
            continue;
        }
        frames.push((root, 0));

        while let Some(frame) = frames.last_mut() {
            let (node, cursor) = *frame;
            let next = edges(node).get(cursor).copied();
            match next {
                Some(neighbor) => {
                    frame.1 += 1;
                    if visited.insert(neighbor) {
                        frames.push((neighbor, 0));
                    }
                }
                None => {
                    frames.pop();
                    finished.push(node);
                }
            }
        }
    }

    finished
}
