//! Graph construction, traversal, forward evaluation and backpropagation.

pub mod builder;
pub mod grad_check;
pub mod gradients;
pub mod graph;
pub mod node;
pub mod op;
pub mod traversal;
mod validate;

pub use builder::GraphBuilder;
pub use gradients::Gradients;
pub use graph::Graph;
pub use node::{Node, NodeId};
pub use op::{Arity, Op};
pub use traversal::{topological_order, Direction};
