use crate::autograd::{Graph, NodeId};
use crate::error::{ScalarGradError, ValidationError};
use crate::nn::layers::linear;
use crate::nn::losses::Loss;
use crate::optim::Optimizer;
use crate::scalar::Scalar;
use log::debug;

/// A graph whose trailing inputs are trainable parameters.
///
/// The module owns the graph; the parameter values live in an [`Optimizer`],
/// whose vector is laid out in the same order as `params`. Every call that
/// needs parameter values takes the optimizer explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Module<T> {
    graph: Graph<T>,
    params: Vec<NodeId>,
}

impl<T: Scalar> Module<T> {
    /// Wraps `graph`, registering `params` as its trainable inputs.
    ///
    /// # Errors
    /// `ValidationError::ParamsNotTrailingInputs` unless `params` equals the
    /// tail of `graph.inputs()`, in order.
    pub fn new(graph: Graph<T>, params: Vec<NodeId>) -> Result<Self, ScalarGradError> {
        if !graph.inputs().ends_with(&params) {
            return Err(ValidationError::ParamsNotTrailingInputs.into());
        }
        Ok(Self { graph, params })
    }

    /// A fully connected layer built by `layers::linear`.
    pub fn linear(
        in_features: usize,
        out_features: usize,
        label: &str,
    ) -> Result<Self, ScalarGradError> {
        linear(in_features, out_features, label)
    }

    pub fn graph(&self) -> &Graph<T> {
        &self.graph
    }

    pub fn params(&self) -> &[NodeId] {
        &self.params
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Number of inputs supplied by the caller, i.e. inputs that are not parameters.
    pub fn input_count(&self) -> usize {
        self.graph.inputs().len() - self.params.len()
    }

    /// Stored gradient of each parameter node, in parameter order.
    pub fn param_grads(&self) -> Vec<T> {
        self.params
            .iter()
            .filter_map(|&id| self.graph.grad(id))
            .collect()
    }

    /// Evaluates the graph on `inputs` followed by the optimizer's current
    /// parameters and returns the output values.
    ///
    /// # Errors
    /// `DimensionMismatch` if `inputs.len() != input_count()` or the optimizer
    /// manages a different number of parameters than the module declares.
    pub fn forward<O: Optimizer<T>>(
        &mut self,
        inputs: &[T],
        optimizer: &mut O,
    ) -> Result<Vec<T>, ScalarGradError> {
        if inputs.len() != self.input_count() {
            return Err(ScalarGradError::DimensionMismatch {
                expected: self.input_count(),
                actual: inputs.len(),
            });
        }
        self.check_optimizer(optimizer)?;

        let mut values = Vec::with_capacity(self.graph.inputs().len());
        values.extend_from_slice(inputs);
        values.extend_from_slice(optimizer.weights()?);
        self.graph.forward(&values)?;
        Ok(self.graph.output_values())
    }

    /// One independent training step: clears stored gradients, backpropagates
    /// `seeds` and applies the parameter gradients through the optimizer.
    pub fn backprop<O: Optimizer<T>>(
        &mut self,
        seeds: &[T],
        optimizer: &mut O,
    ) -> Result<(), ScalarGradError> {
        self.check_optimizer(optimizer)?;
        self.graph.zero_grad();
        self.graph.backprop(seeds)?;
        optimizer.update_weights(&self.param_grads())
    }

    /// Runs every `(inputs, targets)` sample through the module, sums the
    /// parameter gradients and applies a single optimizer update.
    ///
    /// Returns the batch loss: the sum of per-sample losses, or their mean under
    /// [`Reduction::Mean`](crate::Reduction::Mean), in which case the seeds are
    /// scaled by the same factor.
    ///
    /// Stored gradients are left zeroed; each sample's gradients are computed
    /// into a fresh buffer.
    pub fn train_batch<L, O>(
        &mut self,
        samples: &[(Vec<T>, Vec<T>)],
        loss: &L,
        optimizer: &mut O,
    ) -> Result<T, ScalarGradError>
    where
        L: Loss<T> + ?Sized,
        O: Optimizer<T>,
    {
        if samples.is_empty() {
            return Err(ScalarGradError::InvalidConfiguration(
                "training batch is empty".to_string(),
            ));
        }
        self.check_optimizer(optimizer)?;
        self.graph.zero_grad();

        let scale: T = loss.reduction().scale(samples.len());
        let mut batch_loss = T::zero();
        let mut param_grads = vec![T::zero(); self.params.len()];

        for (inputs, targets) in samples {
            let predictions = self.forward(inputs, optimizer)?;
            let (sample_loss, seeds) = loss.loss(&predictions, targets)?;
            batch_loss += sample_loss;

            let seeds: Vec<T> = seeds.into_iter().map(|seed| seed * scale).collect();
            let grads = self.graph.gradients(&seeds)?;
            for (acc, &param) in param_grads.iter_mut().zip(&self.params) {
                *acc += grads[param];
            }
        }

        let batch_loss = batch_loss * scale;
        debug!("Batch of {} samples, loss {}", samples.len(), batch_loss);
        optimizer.update_weights(&param_grads)?;
        Ok(batch_loss)
    }

    fn check_optimizer<O: Optimizer<T>>(&self, optimizer: &O) -> Result<(), ScalarGradError> {
        if optimizer.param_count() != self.params.len() {
            return Err(ScalarGradError::DimensionMismatch {
                expected: self.params.len(),
                actual: optimizer.param_count(),
            });
        }
        Ok(())
    }
}
