//! Optimizers that own a module's trainable parameter vector.
//!
//! The `Optimizer` trait is the seam a [`Module`](crate::Module) talks to:
//! it reads the current parameters before a forward pass and hands back their
//! gradients after a backward pass.

pub mod optimizer_trait;
pub mod sgd;

pub use optimizer_trait::Optimizer;
pub use sgd::{Sgd, SgdConfig};

#[cfg(test)]
mod sgd_test;
