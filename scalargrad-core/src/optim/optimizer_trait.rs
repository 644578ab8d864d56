use crate::error::ScalarGradError;
use crate::scalar::Scalar;

/// Trait defining the common interface for all optimizers.
///
/// An optimizer owns a flat parameter vector of length `param_count`, in the
/// same order as the parameter nodes of the module it trains.
pub trait Optimizer<T: Scalar> {
    /// Number of parameters managed.
    fn param_count(&self) -> usize;

    fn learning_rate(&self) -> T;

    /// Reseeds the random source and draws a fresh parameter vector.
    ///
    /// Calling it again replaces the current parameters.
    fn initialize(&mut self, seed: u64) -> Result<(), ScalarGradError>;

    fn is_initialized(&self) -> bool;

    /// Current parameters, materialized from the init scheme on first access
    /// if `initialize` was never called.
    fn weights(&mut self) -> Result<&[T], ScalarGradError>;

    /// Performs a single optimization step with one gradient per parameter.
    ///
    /// # Errors
    /// `DimensionMismatch` if `grads.len() != param_count()`, `NotInitialized`
    /// if no parameter vector exists yet.
    fn update_weights(&mut self, grads: &[T]) -> Result<(), ScalarGradError>;
}
