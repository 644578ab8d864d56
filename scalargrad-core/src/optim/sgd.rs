use crate::error::ScalarGradError;
use crate::nn::init::WeightInit;
use crate::optim::optimizer_trait::Optimizer;
use crate::scalar::Scalar;
use log::{debug, warn};
use num_traits::NumCast;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Options for [`Sgd::with_config`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SgdConfig {
    pub learning_rate: f64,
    pub init: WeightInit,
    /// Seed for lazily materialized weights. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SgdConfig {
    fn default() -> Self {
        Self {
            learning_rate: 1e-2,
            init: WeightInit::default(),
            seed: None,
        }
    }
}

/// Implements plain Stochastic Gradient Descent: `param -= learning_rate * grad`.
#[derive(Debug, Clone)]
pub struct Sgd<T> {
    param_count: usize,
    learning_rate: T,
    init: WeightInit,
    rng: StdRng,
    seeded: bool,
    params: Option<Vec<T>>,
}

impl<T: Scalar> Sgd<T> {
    /// Creates an `Sgd` with the default init scheme and an entropy-seeded
    /// random source. Parameters are drawn on first use.
    ///
    /// The learning rate is taken as given: a zero, negative or NaN rate is
    /// only logged. Use [`Sgd::with_config`] for a checked construction.
    pub fn new(param_count: usize, learning_rate: T) -> Self {
        if !(learning_rate.is_finite() && learning_rate > T::zero()) {
            warn!(
                "Sgd created with learning rate {}; updates will not descend",
                learning_rate
            );
        }
        Self {
            param_count,
            learning_rate,
            init: WeightInit::default(),
            rng: StdRng::from_entropy(),
            seeded: false,
            params: None,
        }
    }

    /// # Errors
    /// `InvalidConfiguration` if the learning rate is not finite and positive,
    /// or the init scheme is invalid.
    pub fn with_config(param_count: usize, config: SgdConfig) -> Result<Self, ScalarGradError> {
        if !(config.learning_rate.is_finite() && config.learning_rate > 0.0) {
            return Err(ScalarGradError::InvalidConfiguration(format!(
                "learning rate must be finite and positive, got {}",
                config.learning_rate
            )));
        }
        config.init.validate()?;
        let learning_rate = <T as NumCast>::from(config.learning_rate).ok_or_else(|| {
            ScalarGradError::InvalidConfiguration(format!(
                "learning rate {} is not representable",
                config.learning_rate
            ))
        })?;

        let (rng, seeded) = match config.seed {
            Some(seed) => (StdRng::seed_from_u64(seed), true),
            None => (StdRng::from_entropy(), false),
        };
        Ok(Self {
            param_count,
            learning_rate,
            init: config.init,
            rng,
            seeded,
            params: None,
        })
    }

    pub fn init(&self) -> WeightInit {
        self.init
    }

    /// Replaces the parameter vector.
    ///
    /// # Errors
    /// `DimensionMismatch` if `values.len() != param_count()`.
    pub fn set_weights(&mut self, values: Vec<T>) -> Result<(), ScalarGradError> {
        if values.len() != self.param_count {
            return Err(ScalarGradError::DimensionMismatch {
                expected: self.param_count,
                actual: values.len(),
            });
        }
        self.params = Some(values);
        Ok(())
    }

    fn materialize(&mut self) -> Result<(), ScalarGradError> {
        let params = self.init.sample(self.param_count, &mut self.rng)?;
        debug!("Initialized {} parameters: {:?}", self.param_count, params);
        self.params = Some(params);
        Ok(())
    }
}

impl<T: Scalar> Optimizer<T> for Sgd<T> {
    fn param_count(&self) -> usize {
        self.param_count
    }

    fn learning_rate(&self) -> T {
        self.learning_rate
    }

    fn initialize(&mut self, seed: u64) -> Result<(), ScalarGradError> {
        self.rng = StdRng::seed_from_u64(seed);
        self.seeded = true;
        self.materialize()
    }

    fn is_initialized(&self) -> bool {
        self.params.is_some()
    }

    fn weights(&mut self) -> Result<&[T], ScalarGradError> {
        if self.params.is_none() {
            if !self.seeded {
                warn!(
                    "Materializing {} parameters from an unseeded random source; runs are not reproducible",
                    self.param_count
                );
            }
            self.materialize()?;
        }
        self.params
            .as_deref()
            .ok_or(ScalarGradError::NotInitialized)
    }

    fn update_weights(&mut self, grads: &[T]) -> Result<(), ScalarGradError> {
        let params = self
            .params
            .as_mut()
            .ok_or(ScalarGradError::NotInitialized)?;
        if grads.len() != params.len() {
            return Err(ScalarGradError::DimensionMismatch {
                expected: params.len(),
                actual: grads.len(),
            });
        }
        let lr = self.learning_rate;
        for (param, &grad) in params.iter_mut().zip(grads) {
            *param -= lr * grad;
        }
        Ok(())
    }
}
