use super::graph::Graph;
use crate::error::ScalarGradError;
use crate::scalar::Scalar;
use approx::abs_diff_eq;
use log::debug;
use num_traits::NumCast;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}: analytical grad {analytical:?} != numerical grad {numerical:?} (difference {difference:?})")]
    GradientMismatch {
        input_index: usize,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },

    #[error("Numerical gradient is NaN or infinite for input {input_index}. Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },

    #[error("Analytical gradient is NaN or infinite for input {input_index}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite { input_index: usize, value: f64 },

    #[error("Graph error during gradient check: {0}")]
    Graph(#[from] ScalarGradError),

    #[error("epsilon and tolerance must be finite and positive, got epsilon={epsilon}, tolerance={tolerance}")]
    InvalidSettings { epsilon: f64, tolerance: f64 },
}

fn to_f64<T: Scalar>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

fn from_f64<T: Scalar>(value: f64) -> T {
    <T as NumCast>::from(value).unwrap_or_else(T::nan)
}

/// Seed-weighted sum of the output values after a forward pass with `values`.
fn weighted_loss<T: Scalar>(
    graph: &mut Graph<T>,
    values: &[T],
    seeds: &[T],
) -> Result<f64, ScalarGradError> {
    graph.forward(values)?;
    Ok(graph
        .output_values()
        .into_iter()
        .zip(seeds)
        .map(|(value, &seed)| to_f64(value) * to_f64(seed))
        .sum())
}

/// Central finite-difference estimate of `d(sum(seeds[i] * output[i])) / d input`
/// for every input.
///
/// Leaves the graph holding the forward state for `values`.
pub fn numerical_gradients<T: Scalar>(
    graph: &mut Graph<T>,
    values: &[T],
    seeds: &[T],
    epsilon: f64,
) -> Result<Vec<f64>, GradCheckError> {
    if !(epsilon.is_finite() && epsilon > 0.0) {
        return Err(GradCheckError::InvalidSettings {
            epsilon,
            tolerance: 0.0,
        });
    }
    if seeds.len() != graph.outputs().len() {
        return Err(ScalarGradError::DimensionMismatch {
            expected: graph.outputs().len(),
            actual: seeds.len(),
        }
        .into());
    }

    let mut perturbed = values.to_vec();
    let mut estimates = Vec::with_capacity(values.len());
    for input_index in 0..values.len() {
        let original = to_f64(values[input_index]);

        perturbed[input_index] = from_f64(original + epsilon);
        let loss_plus = weighted_loss(graph, &perturbed, seeds)?;
        perturbed[input_index] = from_f64(original - epsilon);
        let loss_minus = weighted_loss(graph, &perturbed, seeds)?;
        perturbed[input_index] = values[input_index];

        let estimate = (loss_plus - loss_minus) / (2.0 * epsilon);
        if !estimate.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                input_index,
                loss_plus,
                loss_minus,
            });
        }
        estimates.push(estimate);
    }

    graph.forward(values)?;
    Ok(estimates)
}

/// Compares `Graph::gradients` against central finite differences for every
/// input.
///
/// An entry passes when the absolute difference is within `tolerance`.
///
/// # Errors
/// The first mismatching or non-finite input, or any graph error. The graph is
/// left holding the forward state for `values` whenever the passes themselves
/// succeed.
pub fn check_gradients<T: Scalar>(
    graph: &mut Graph<T>,
    values: &[T],
    seeds: &[T],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError> {
    if !(epsilon.is_finite() && epsilon > 0.0 && tolerance.is_finite() && tolerance > 0.0) {
        return Err(GradCheckError::InvalidSettings { epsilon, tolerance });
    }

    graph.forward(values)?;
    let analytical = graph.gradients(seeds)?.select(graph.inputs());
    let numerical = numerical_gradients(graph, values, seeds, epsilon)?;

    for (input_index, (&analytical, numerical)) in analytical.iter().zip(numerical).enumerate() {
        let analytical = to_f64(analytical);
        if !analytical.is_finite() {
            return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                input_index,
                value: analytical,
            });
        }
        if !abs_diff_eq!(analytical, numerical, epsilon = tolerance) {
            return Err(GradCheckError::GradientMismatch {
                input_index,
                analytical,
                numerical,
                difference: (analytical - numerical).abs(),
            });
        }
    }

    debug!("Gradient check passed for {} inputs", values.len());
    Ok(())
}
