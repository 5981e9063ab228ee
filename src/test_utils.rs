//! Utilities for testing.
//!
//! Helpers shared by the sampling, curve and quadrature tests: descriptive
//! statistics of a sample, ordering checks, and approximate equality with
//! either relative or absolute tolerances.
//!
//! These utilities are not intended for use in production code but
//! only in `#[cfg(test)]` contexts and doc examples.

use crate::Float;

/// Compute the **sample mean** and **sample variance** of a slice of values.
///
/// # Arguments
/// * `samples` – A slice of sampled values.
///
/// # Returns
/// A tuple `(mean, variance)` computed as:
/// - `mean = Σx / n`
/// - `variance = Σ(x - mean)² / n`
///
/// # Example
/// ```
/// use lifesim::test_utils::basic_statistics;
///
/// let samples = vec![1.0, 2.0, 3.0];
/// let (mean, var) = basic_statistics(&samples);
/// assert_eq!(mean, 2.0);
/// assert_eq!(var, 2.0/3.0);
/// ```
pub fn basic_statistics(samples: &[Float]) -> (Float, Float) {
    let mean = samples.iter().sum::<Float>() / samples.len() as Float;
    let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<Float>() / samples.len() as Float;
    (mean, var)
}

/// Whether `values` is sorted in non-decreasing order.
///
/// # Example
/// ```
/// use lifesim::test_utils::is_non_decreasing;
///
/// assert!(is_non_decreasing(&[0.1, 0.1, 0.4]));
/// assert!(!is_non_decreasing(&[0.4, 0.1]));
/// ```
pub fn is_non_decreasing(values: &[Float]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

/// Assert that two floating-point values are approximately equal within
/// a relative tolerance expressed as a fraction of the expected value.
///
/// # Arguments
/// * `actual` – The observed value.
/// * `expected` – The theoretical or expected value.
/// * `tolerance` – The maximum allowed relative error (e.g., `0.05` for 5%).
/// * `label` – A label for the assertion, included in failure messages.
///
/// # Panics
/// Panics if the absolute difference exceeds `expected * tolerance`.
pub fn assert_close(actual: Float, expected: Float, tolerance: Float, label: &str) {
    assert!(
        (actual - expected).abs() <= expected.abs() * tolerance,
        "{label} {actual} outside tolerance of expected {expected}"
    );
}

/// Assert that `actual` lies within `bound` of `expected` in absolute terms.
///
/// # Panics
/// Panics if `|actual - expected| > bound`.
///
/// # Example
/// ```
/// use lifesim::Float;
/// use lifesim::test_utils::assert_within;
///
/// assert_within(0.3679, (-1.0 as Float).exp(), 1e-4, "exp(-1)");
/// ```
pub fn assert_within(actual: Float, expected: Float, bound: Float, label: &str) {
    assert!(
        (actual - expected).abs() <= bound,
        "{label} {actual} differs from {expected} by more than {bound}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_statistics_mean_and_variance() {
        let samples = [1.0, 2.0, 3.0, 4.0];
        let (mean, var) = basic_statistics(&samples);

        assert!((mean - 2.5).abs() < 1e-12, "mean mismatch, got {mean}");
        // Population variance
        assert!((var - 1.25).abs() < 1e-12, "variance mismatch, got {var}");
    }

    #[test]
    fn test_assert_close_passes() {
        assert_close(10.2, 10.0, 0.05, "test_value");
    }

    #[test]
    #[should_panic]
    fn test_assert_close_fails() {
        // 6% off, 5% allowed
        assert_close(10.6, 10.0, 0.05, "test_value");
    }

    #[test]
    #[should_panic]
    fn test_assert_within_fails() {
        assert_within(0.5, 0.4, 0.05, "test_value");
    }

    #[test]
    fn test_single_element_is_sorted() {
        assert!(is_non_decreasing(&[3.0]));
        assert!(is_non_decreasing(&[]));
    }
}
