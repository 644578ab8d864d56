#[cfg(test)]
mod tests {
    use crate::error::ScalarGradError;
    use crate::nn::init::WeightInit;
    use crate::optim::optimizer_trait::Optimizer;
    use crate::optim::sgd::{Sgd, SgdConfig};
    use crate::utils::testing::check_values_near;

    #[test]
    fn test_sgd_basic_step() -> Result<(), ScalarGradError> {
        let mut optimizer = Sgd::new(4, 0.1f32);
        optimizer.set_weights(vec![1.0, 2.0, 3.0, 4.0])?;

        optimizer.update_weights(&[0.1, 0.2, 0.3, 0.4])?;

        let expected = [0.99, 1.98, 2.97, 3.96];
        check_values_near(optimizer.weights()?, &expected, 1e-6);
        Ok(())
    }

    #[test]
    fn test_update_before_initialize_fails() {
        let mut optimizer = Sgd::new(2, 0.1f64);
        assert!(!optimizer.is_initialized());
        assert_eq!(
            optimizer.update_weights(&[1.0, 1.0]),
            Err(ScalarGradError::NotInitialized)
        );
    }

    #[test]
    fn test_update_dimension_mismatch() -> Result<(), ScalarGradError> {
        let mut optimizer = Sgd::new(3, 0.1f64);
        optimizer.initialize(0)?;
        let before = optimizer.weights()?.to_vec();

        assert_eq!(
            optimizer.update_weights(&[1.0]),
            Err(ScalarGradError::DimensionMismatch {
                expected: 3,
                actual: 1
            })
        );
        assert_eq!(optimizer.weights()?, before.as_slice());
        Ok(())
    }

    #[test]
    fn test_initialize_is_reproducible() -> Result<(), ScalarGradError> {
        let mut a = Sgd::<f64>::new(8, 0.01);
        let mut b = Sgd::<f64>::new(8, 0.01);
        a.initialize(123)?;
        b.initialize(123)?;
        assert!(a.is_initialized());
        assert_eq!(a.weights()?, b.weights()?);
        assert!(a.weights()?.iter().all(|w| (-1.0..=1.0).contains(w)));

        // Re-initializing replaces the vector.
        let first = a.weights()?.to_vec();
        a.initialize(124)?;
        assert_ne!(a.weights()?, first.as_slice());
        Ok(())
    }

    #[test]
    fn test_lazy_weights_are_stable() -> Result<(), ScalarGradError> {
        let config = SgdConfig {
            seed: Some(9),
            ..SgdConfig::default()
        };
        let mut lazy = Sgd::<f64>::with_config(5, config)?;
        assert!(!lazy.is_initialized());
        let first = lazy.weights()?.to_vec();
        assert!(lazy.is_initialized());
        assert_eq!(lazy.weights()?, first.as_slice());

        // A seeded config draws the same vector as an explicit initialize.
        let mut explicit = Sgd::<f64>::with_config(5, SgdConfig::default())?;
        explicit.initialize(9)?;
        assert_eq!(explicit.weights()?, first.as_slice());
        Ok(())
    }

    #[test]
    fn test_unseeded_lazy_weights_materialize() -> Result<(), ScalarGradError> {
        let mut optimizer = Sgd::<f32>::new(3, 0.5);
        assert_eq!(optimizer.weights()?.len(), 3);
        assert_eq!(optimizer.learning_rate(), 0.5);
        assert_eq!(optimizer.param_count(), 3);
        Ok(())
    }

    #[test]
    fn test_config_validation() {
        for learning_rate in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let config = SgdConfig {
                learning_rate,
                ..SgdConfig::default()
            };
            assert!(matches!(
                Sgd::<f64>::with_config(1, config),
                Err(ScalarGradError::InvalidConfiguration(_))
            ));
        }

        let config = SgdConfig {
            init: WeightInit::Normal { mean: 0.0, std: -1.0 },
            ..SgdConfig::default()
        };
        assert!(Sgd::<f64>::with_config(1, config).is_err());
    }

    #[test]
    fn test_normal_init_through_config() -> Result<(), ScalarGradError> {
        let config = SgdConfig {
            learning_rate: 0.1,
            init: WeightInit::Normal { mean: 0.0, std: 0.01 },
            seed: Some(3),
        };
        let mut optimizer = Sgd::<f64>::with_config(10, config)?;
        assert_eq!(optimizer.init(), config.init);
        assert!(optimizer.weights()?.iter().all(|w| w.abs() < 0.1));
        Ok(())
    }

    #[test]
    fn test_set_weights_length_checked() {
        let mut optimizer = Sgd::new(2, 0.1f64);
        assert_eq!(
            optimizer.set_weights(vec![1.0]),
            Err(ScalarGradError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert!(!optimizer.is_initialized());
    }

    #[test]
    fn test_new_skips_learning_rate_check() -> Result<(), ScalarGradError> {
        // `new` keeps the rate as given, `with_config` rejects it.
        let mut unchecked = Sgd::new(1, -0.5f64);
        assert_eq!(unchecked.learning_rate(), -0.5);
        unchecked.set_weights(vec![1.0])?;
        unchecked.update_weights(&[1.0])?;
        assert_eq!(unchecked.weights()?, &[1.5]);

        let config = SgdConfig {
            learning_rate: -0.5,
            ..SgdConfig::default()
        };
        assert!(matches!(
            Sgd::<f64>::with_config(1, config),
            Err(ScalarGradError::InvalidConfiguration(_))
        ));
        Ok(())
    }

    #[test]
    fn test_overflowing_uniform_bounds_rejected_by_config() {
        let config = SgdConfig {
            init: WeightInit::Uniform {
                low: -1e308,
                high: 1e308,
            },
            seed: Some(1),
            ..SgdConfig::default()
        };
        assert!(matches!(
            Sgd::<f64>::with_config(2, config),
            Err(ScalarGradError::InvalidConfiguration(_))
        ));

        // Representable in f64 but not in f32: surfaces on first weights() read.
        let config = SgdConfig {
            init: WeightInit::Uniform {
                low: -1e39,
                high: 1e39,
            },
            seed: Some(1),
            ..SgdConfig::default()
        };
        let mut optimizer = Sgd::<f32>::with_config(2, config).unwrap();
        assert!(matches!(
            optimizer.weights(),
            Err(ScalarGradError::InvalidConfiguration(_))
        ));
        assert!(!optimizer.is_initialized());
    }
}
