pub mod squared_error;

pub use squared_error::SquaredError;

use crate::error::ScalarGradError;
use crate::scalar::Scalar;
use num_traits::NumCast;
use std::str::FromStr;

/// How per-output (and, in a batch, per-sample) terms are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    #[default]
    Sum,
    Mean,
}

impl Reduction {
    /// Factor applied to a sum of `count` terms: 1 for `Sum`, `1 / count` for
    /// `Mean`. An empty `Mean` scales by 1.
    pub fn scale<T: Scalar>(self, count: usize) -> T {
        match self {
            Reduction::Sum => T::one(),
            Reduction::Mean if count == 0 => T::one(),
            Reduction::Mean => <T as NumCast>::from(count).map_or(T::one(), T::recip),
        }
    }
}

impl FromStr for Reduction {
    type Err = ScalarGradError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sum" => Ok(Reduction::Sum),
            "mean" => Ok(Reduction::Mean),
            _ => Err(ScalarGradError::InvalidConfiguration(format!(
                "Unsupported reduction type: {}",
                s
            ))),
        }
    }
}

/// A differentiable objective over a module's outputs.
pub trait Loss<T: Scalar> {
    /// Returns the loss value and the seed for each prediction, i.e.
    /// `d loss / d predictions[k]`.
    ///
    /// # Errors
    /// `DimensionMismatch` if `predictions` and `targets` differ in length.
    fn loss(&self, predictions: &[T], targets: &[T]) -> Result<(T, Vec<T>), ScalarGradError>;

    fn reduction(&self) -> Reduction;
}
