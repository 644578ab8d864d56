//! Scalar reverse-mode automatic differentiation.
//!
//! A [`Graph`] is an arena of scalar [`Node`]s wired into a DAG. `forward`
//! evaluates it in topological order, `backprop` pushes gradients back through
//! the same DAG, and [`Module`] couples a graph with an [`Optimizer`] to fit
//! trainable parameters.
//!
//! ```
//! use scalargrad_core::{GraphBuilder, Op};
//!
//! // f(x, y, z) = (x + y) * z
//! let mut builder = GraphBuilder::<f64>::new();
//! let x = builder.input("x");
//! let y = builder.input("y");
//! let z = builder.input("z");
//! let sum = builder.op("sum", Op::Add, &[x, y]);
//! let prod = builder.op("prod", Op::Multiply, &[sum, z]);
//! let f = builder.output("f", prod);
//! let mut graph = builder.build().unwrap();
//!
//! graph.forward(&[-2.0, 5.0, -4.0]).unwrap();
//! assert_eq!(graph.value(f), Some(-12.0));
//!
//! let grads = graph.gradients(&[1.0]).unwrap();
//! assert_eq!(grads.select(&[x, y, z]), vec![-4.0, -4.0, 3.0]);
//! ```

pub mod autograd;
pub mod error;
pub mod nn;
pub mod optim;
pub mod scalar;
pub mod utils;

// Re-export the types needed to build and train a graph directly from the crate root.
pub use autograd::{Gradients, Graph, GraphBuilder, Node, NodeId, Op};
pub use error::{ScalarGradError, ValidationError};
pub use nn::{Loss, Module, Reduction, SquaredError, WeightInit};
pub use optim::{Optimizer, Sgd, SgdConfig};
pub use scalar::Scalar;

// Re-export traits required by public functions/structs
pub use num_traits;
