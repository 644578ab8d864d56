//! Builders that produce ready-to-train [`Module`](crate::Module)s.

pub mod linear;

pub use linear::linear;
