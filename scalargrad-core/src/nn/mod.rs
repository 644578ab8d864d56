//! Trainable models on top of the autograd graph: the [`Module`] wrapper,
//! layer builders, weight initialization and loss functions.

pub mod init;
pub mod layers;
pub mod losses;
pub mod module;

pub use init::WeightInit;
pub use losses::{Loss, Reduction, SquaredError};
pub use module::Module;

#[cfg(test)]
mod init_test;
