use num_traits::{Float, NumAssignOps};
use rand::distributions::uniform::SampleUniform;
use std::fmt::{Debug, Display};

/// The element type stored in graph nodes.
///
/// Restricted to floating-point types (`f32`, `f64`): every operator rule
/// (`exp`, reciprocal, relu) and the optimizer's uniform sampling need float
/// semantics.
pub trait Scalar:
    Float // Num + Copy + NumCast + PartialOrd + exp/recip/...
    + NumAssignOps // AddAssign, SubAssign, MulAssign, ...
    + SampleUniform
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + 'static
{
}

impl Scalar for f32 {}
impl Scalar for f64 {}
