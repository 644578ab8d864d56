#[cfg(test)]
mod tests {
    use crate::error::ScalarGradError;
    use crate::nn::init::WeightInit;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_is_symmetric_uniform() {
        assert_eq!(
            WeightInit::default(),
            WeightInit::Uniform {
                low: -1.0,
                high: 1.0
            }
        );
    }

    #[test]
    fn test_uniform_samples_stay_in_bounds() -> Result<(), ScalarGradError> {
        let mut rng = StdRng::seed_from_u64(7);
        let values: Vec<f64> = WeightInit::default().sample(1000, &mut rng)?;
        assert_eq!(values.len(), 1000);
        assert!(values.iter().all(|v| (-1.0..=1.0).contains(v)));

        let narrow = WeightInit::Uniform { low: 2.0, high: 3.0 };
        let values: Vec<f32> = narrow.sample(100, &mut rng)?;
        assert!(values.iter().all(|v| (2.0..=3.0).contains(v)));
        Ok(())
    }

    #[test]
    fn test_same_seed_same_samples() -> Result<(), ScalarGradError> {
        let init = WeightInit::Normal { mean: 0.0, std: 0.5 };
        let a: Vec<f64> = init.sample(16, &mut StdRng::seed_from_u64(42))?;
        let b: Vec<f64> = init.sample(16, &mut StdRng::seed_from_u64(42))?;
        let c: Vec<f64> = init.sample(16, &mut StdRng::seed_from_u64(43))?;
        assert_eq!(a, b);
        assert_ne!(a, c);
        Ok(())
    }

    #[test]
    fn test_normal_sample_mean() -> Result<(), ScalarGradError> {
        let init = WeightInit::Normal { mean: 3.0, std: 0.1 };
        let values: Vec<f64> = init.sample(2000, &mut StdRng::seed_from_u64(1))?;
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        approx::assert_abs_diff_eq!(mean, 3.0, epsilon = 0.05);
        Ok(())
    }

    #[test]
    fn test_zero_std_is_constant() -> Result<(), ScalarGradError> {
        let init = WeightInit::Normal { mean: 0.25, std: 0.0 };
        let values: Vec<f64> = init.sample(4, &mut StdRng::seed_from_u64(0))?;
        assert_eq!(values, vec![0.25; 4]);
        Ok(())
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let invalid = [
            WeightInit::Uniform { low: 1.0, high: 1.0 },
            WeightInit::Uniform { low: 2.0, high: -2.0 },
            WeightInit::Uniform { low: f64::NEG_INFINITY, high: 0.0 },
            WeightInit::Normal { mean: 0.0, std: -1.0 },
            WeightInit::Normal { mean: f64::NAN, std: 1.0 },
        ];
        for init in invalid {
            assert!(matches!(
                init.validate(),
                Err(ScalarGradError::InvalidConfiguration(_))
            ));
            let sampled = init.sample::<f64, _>(3, &mut StdRng::seed_from_u64(0));
            assert!(sampled.is_err());
        }
    }

    #[test]
    fn test_uniform_span_overflow_rejected() {
        let init = WeightInit::Uniform {
            low: -1e308,
            high: 1e308,
        };
        assert!(matches!(
            init.validate(),
            Err(ScalarGradError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            init.sample::<f64, _>(2, &mut StdRng::seed_from_u64(1)),
            Err(ScalarGradError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_uniform_bounds_overflowing_f32_rejected() {
        let init = WeightInit::Uniform {
            low: -1e39,
            high: 1e39,
        };
        assert_eq!(init.validate(), Ok(()));
        assert!(matches!(
            init.sample::<f32, _>(2, &mut StdRng::seed_from_u64(1)),
            Err(ScalarGradError::InvalidConfiguration(_))
        ));
        // The same bounds are fine in f64.
        assert_eq!(init.sample::<f64, _>(2, &mut StdRng::seed_from_u64(1)).map(|v| v.len()), Ok(2));
    }
}
