use scalargrad_core::{
    Module, Optimizer, Reduction, ScalarGradError, Sgd, SgdConfig, SquaredError,
};

mod common;

fn seeded_sgd(param_count: usize, seed: u64) -> Result<Sgd<f64>, ScalarGradError> {
    let config = SgdConfig {
        learning_rate: 1e-2,
        seed: Some(seed),
        ..SgdConfig::default()
    };
    Sgd::with_config(param_count, config)
}

#[test]
fn test_linear_unit_fits_two_points() -> Result<(), ScalarGradError> {
    let mut module = Module::<f64>::linear(1, 1, "fit")?;
    let mut optimizer = seeded_sgd(module.param_count(), 17)?;
    let samples = common::line_samples();
    let loss_fn = SquaredError::default();

    let mut losses = Vec::with_capacity(100);
    for _ in 0..100 {
        losses.push(module.train_batch(&samples, &loss_fn, &mut optimizer)?);
    }

    for pair in losses.windows(2) {
        assert!(
            pair[1] <= pair[0] + 1e-12,
            "loss increased: {} -> {}",
            pair[0],
            pair[1]
        );
    }

    let weights = optimizer.weights()?;
    let (weight, bias) = (weights[0], weights[1]);
    // Analytic solution: weight 2, bias 1
    let ratio = weight / bias;
    assert!(
        (ratio - 2.0).abs() <= 0.05 * 2.0,
        "weight/bias ratio {} too far from 2 (weight {}, bias {})",
        ratio,
        weight,
        bias
    );
    Ok(())
}

#[test]
fn test_online_updates_with_forward_and_backprop() -> Result<(), ScalarGradError> {
    let mut module = Module::<f64>::linear(1, 1, "online")?;
    let mut optimizer = seeded_sgd(module.param_count(), 5)?;
    let samples = common::line_samples();

    let mut first_loss = None;
    let mut last_loss = 0.0;
    for _ in 0..500 {
        let mut epoch_loss = 0.0;
        for (inputs, targets) in &samples {
            let prediction = module.forward(inputs, &mut optimizer)?[0];
            let diff = prediction - targets[0];
            epoch_loss += diff * diff;
            module.backprop(&[2.0 * diff], &mut optimizer)?;
        }
        first_loss.get_or_insert(epoch_loss);
        last_loss = epoch_loss;
    }

    assert!(last_loss < first_loss.unwrap_or(f64::INFINITY));
    let weights = optimizer.weights()?;
    assert!((weights[0] - 2.0).abs() < 0.1, "weight {}", weights[0]);
    assert!((weights[1] - 1.0).abs() < 0.05, "bias {}", weights[1]);
    Ok(())
}

#[test]
fn test_same_seed_same_training_run() -> Result<(), ScalarGradError> {
    let samples = common::line_samples();
    let loss_fn = SquaredError::new(Reduction::Mean);

    let mut runs = Vec::new();
    for _ in 0..2 {
        let mut module = Module::<f64>::linear(1, 1, "repro")?;
        let mut optimizer = seeded_sgd(module.param_count(), 99)?;
        for _ in 0..10 {
            module.train_batch(&samples, &loss_fn, &mut optimizer)?;
        }
        runs.push(optimizer.weights()?.to_vec());
    }
    assert_eq!(runs[0], runs[1]);
    Ok(())
}

#[test]
fn test_two_output_layer_learns_both_units() -> Result<(), ScalarGradError> {
    // y0 = x0 - x1, y1 = 0.5 * x0 + 2
    let samples: Vec<(Vec<f64>, Vec<f64>)> = [(1.0, 0.0), (0.0, 1.0), (1.0, 1.0), (-1.0, 0.5)]
        .iter()
        .map(|&(a, b)| (vec![a, b], vec![a - b, 0.5 * a + 2.0]))
        .collect();

    let mut module = Module::<f64>::linear(2, 2, "fc")?;
    let config = SgdConfig {
        learning_rate: 0.05,
        seed: Some(1),
        ..SgdConfig::default()
    };
    let mut optimizer = Sgd::with_config(module.param_count(), config)?;
    let loss_fn = SquaredError::default();

    let initial = module.train_batch(&samples, &loss_fn, &mut optimizer)?;
    let mut last = initial;
    for _ in 0..2000 {
        last = module.train_batch(&samples, &loss_fn, &mut optimizer)?;
    }
    assert!(last < initial);
    assert!(last < 1e-6, "final loss {}", last);

    let expected = [1.0, -1.0, 0.0, 0.5, 0.0, 2.0];
    scalargrad_core::utils::testing::check_values_near(optimizer.weights()?, &expected, 1e-3);
    Ok(())
}
