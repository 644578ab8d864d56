use super::{Loss, Reduction};
use crate::error::ScalarGradError;
use crate::scalar::Scalar;

/// Squared error `Σ (p_k - t_k)^2`, divided by the output count under
/// [`Reduction::Mean`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SquaredError {
    pub reduction: Reduction,
}

impl SquaredError {
    pub fn new(reduction: Reduction) -> Self {
        Self { reduction }
    }
}

impl<T: Scalar> Loss<T> for SquaredError {
    fn loss(&self, predictions: &[T], targets: &[T]) -> Result<(T, Vec<T>), ScalarGradError> {
        if predictions.len() != targets.len() {
            return Err(ScalarGradError::DimensionMismatch {
                expected: predictions.len(),
                actual: targets.len(),
            });
        }
        let scale: T = self.reduction.scale(predictions.len());
        let two = T::one() + T::one();

        let mut total = T::zero();
        let mut seeds = Vec::with_capacity(predictions.len());
        for (&p, &t) in predictions.iter().zip(targets) {
            let diff = p - t;
            total += diff * diff;
            seeds.push(two * diff * scale);
        }
        Ok((total * scale, seeds))
    }

    fn reduction(&self) -> Reduction {
        self.reduction
    }
}
