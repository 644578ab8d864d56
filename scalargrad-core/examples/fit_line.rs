//! # Fitting a line with a single linear unit
//!
//! Builds `Module::linear(1, 1, ..)`, a seeded `Sgd` optimizer and a
//! squared-error loss, then runs full-batch gradient descent on points drawn
//! from `y = 2x + 1`.
//!
//! ## Running
//! `cargo run --example fit_line`

use scalargrad_core::{Module, Optimizer, ScalarGradError, Sgd, SgdConfig, SquaredError};

fn main() -> Result<(), ScalarGradError> {
    let samples: Vec<(Vec<f64>, Vec<f64>)> = [-1.5, -0.5, 0.5, 1.5]
        .iter()
        .map(|&x| (vec![x], vec![2.0 * x + 1.0]))
        .collect();

    let mut model = Module::<f64>::linear(1, 1, "line")?;
    let config = SgdConfig {
        learning_rate: 1e-2,
        seed: Some(42),
        ..SgdConfig::default()
    };
    let mut optimizer = Sgd::with_config(model.param_count(), config)?;
    let loss_fn = SquaredError::default();

    for epoch in 0..200 {
        let loss = model.train_batch(&samples, &loss_fn, &mut optimizer)?;
        if epoch % 20 == 0 {
            println!("epoch {:>3}: loss = {:.6}", epoch, loss);
        }
    }

    let weights = optimizer.weights()?;
    println!("weight = {:.4}, bias = {:.4}", weights[0], weights[1]);

    let prediction = model.forward(&[3.0], &mut optimizer)?;
    println!("f(3.0) = {:.4} (expected 7.0)", prediction[0]);
    Ok(())
}
