use crate::scalar::Scalar;

/// Checks that two scalar vectors have the same length and agree element-wise
/// within `tolerance`.
/// Panics with the first offending index otherwise.
pub fn check_values_near<T: Scalar>(actual: &[T], expected: &[T], tolerance: T) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Length mismatch: actual has {}, expected has {}",
        actual.len(),
        expected.len()
    );

    for (i, (&a, &e)) in actual.iter().zip(expected).enumerate() {
        let diff = (a - e).abs();
        // NaN never compares as near
        if !(diff <= tolerance) {
            panic!(
                "Value mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}
