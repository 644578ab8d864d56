use crate::error::ScalarGradError;
use crate::scalar::Scalar;
use num_traits::NumCast;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::Normal;

/// Scheme used to draw initial parameter values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightInit {
    /// Uniform over the closed interval `[low, high]`.
    Uniform { low: f64, high: f64 },
    /// Gaussian with the given mean and standard deviation.
    Normal { mean: f64, std: f64 },
}

impl Default for WeightInit {
    fn default() -> Self {
        WeightInit::Uniform {
            low: -1.0,
            high: 1.0,
        }
    }
}

impl WeightInit {
    /// Checks that the scheme's parameters describe a real distribution.
    ///
    /// # Errors
    /// `InvalidConfiguration` for non-finite bounds, `low >= high`, or a
    /// negative or non-finite standard deviation.
    pub fn validate(&self) -> Result<(), ScalarGradError> {
        match *self {
            WeightInit::Uniform { low, high } => {
                if !(low.is_finite() && high.is_finite() && low < high && (high - low).is_finite())
                {
                    return Err(ScalarGradError::InvalidConfiguration(format!(
                        "uniform init requires finite low < high with a finite span, got [{}, {}]",
                        low, high
                    )));
                }
            }
            WeightInit::Normal { mean, std } => {
                if !(mean.is_finite() && std.is_finite() && std >= 0.0) {
                    return Err(ScalarGradError::InvalidConfiguration(format!(
                        "normal init requires finite mean and std >= 0, got mean={}, std={}",
                        mean, std
                    )));
                }
            }
        }
        Ok(())
    }

    /// Draws `count` values from the scheme using `rng`.
    pub fn sample<T: Scalar, R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<T>, ScalarGradError> {
        self.validate()?;
        match *self {
            WeightInit::Uniform { low, high } => {
                let (low, high) = (cast::<T>(low)?, cast::<T>(high)?);
                // Bounds valid in f64 can still overflow the parameter type.
                if !(low.is_finite() && high.is_finite() && (high - low).is_finite()) {
                    return Err(ScalarGradError::InvalidConfiguration(format!(
                        "uniform init bounds [{}, {}] overflow the parameter type",
                        low, high
                    )));
                }
                let dist = Uniform::new_inclusive(low, high);
                Ok((0..count).map(|_| dist.sample(rng)).collect())
            }
            WeightInit::Normal { mean, std } => {
                let dist = Normal::new(mean, std).map_err(|e| {
                    ScalarGradError::InvalidConfiguration(format!("normal init: {}", e))
                })?;
                (0..count).map(|_| cast::<T>(dist.sample(rng))).collect()
            }
        }
    }
}

fn cast<T: Scalar>(value: f64) -> Result<T, ScalarGradError> {
    <T as NumCast>::from(value).ok_or_else(|| {
        ScalarGradError::InvalidConfiguration(format!(
            "value {} is not representable in the parameter type",
            value
        ))
    })
}
