use crate::autograd::{GraphBuilder, NodeId};
use crate::error::ScalarGradError;
use crate::nn::module::Module;
use crate::scalar::Scalar;
use log::debug;

/// Builds a fully connected layer `y_u = Σ_i w_{u,i} * x_i + b_u`.
///
/// Each output unit is a single `Dot` node over `[x_0, .., x_{n-1}, 1]` and
/// `[w_{u,0}, .., w_{u,n-1}, b_u]`; the `1` is one `Constant` node shared by
/// every unit. The graph inputs are the `in_features` data inputs followed by
/// the parameters in unit-major order (unit 0's weights then its bias, then
/// unit 1, ...), which is also the order of the optimizer's parameter vector.
///
/// # Arguments
/// * `in_features`: number of caller-supplied inputs.
/// * `out_features`: number of output units; must be at least 1.
/// * `label`: prefix for node labels.
///
/// # Errors
/// `InvalidConfiguration` if `out_features` is zero.
pub fn linear<T: Scalar>(
    in_features: usize,
    out_features: usize,
    label: &str,
) -> Result<Module<T>, ScalarGradError> {
    if out_features == 0 {
        return Err(ScalarGradError::InvalidConfiguration(format!(
            "linear layer '{}' needs at least one output unit",
            label
        )));
    }

    let mut builder = GraphBuilder::new();
    let xs: Vec<NodeId> = (0..in_features)
        .map(|i| builder.input(format!("{}.x{}", label, i)))
        .collect();

    let mut params = Vec::with_capacity(out_features * (in_features + 1));
    let mut units = Vec::with_capacity(out_features);
    for unit in 0..out_features {
        let mut operands: Vec<NodeId> = (0..in_features)
            .map(|i| builder.input(format!("{}.w{}_{}", label, unit, i)))
            .collect();
        operands.push(builder.input(format!("{}.b{}", label, unit)));
        params.extend_from_slice(&operands);
        units.push(operands);
    }

    let one = builder.constant(format!("{}.one", label), T::one());
    let mut features = xs;
    features.push(one);

    for (unit, weights) in units.iter().enumerate() {
        let dot = builder.dot(format!("{}.dot{}", label, unit), &features, weights)?;
        builder.output(format!("{}.y{}", label, unit), dot);
    }

    let graph = builder.build()?;
    debug!(
        "Linear layer '{}': {} -> {}, {} parameters",
        label,
        in_features,
        out_features,
        params.len()
    );
    Module::new(graph, params)
}
