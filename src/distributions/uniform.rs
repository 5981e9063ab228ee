//! Sorted uniform samples on `[0, 1)`.

use rand::{
    rngs::StdRng,
    Rng,
    SeedableRng,
};
use tracing::debug;

use crate::{LifesimError, Result, Float};

/// Ordered sample of uniform draws in `[0, 1)`, sorted ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformSample {
    values: Vec<Float>,
}

impl UniformSample {
    /// Build a [UniformSample] from explicit values.
    /// # Arguments
    /// * `values` - Non-empty, non-decreasing values, each in `[0, 1)`.
    /// # Returns
    /// A new [UniformSample], or [LifesimError::InvalidArgument] if a value is
    /// out of range or the sequence is not sorted.
    pub fn from_values(values: Vec<Float>) -> Result<Self> {
        if values.is_empty() {
            return Err(LifesimError::invalid("uniform sample must not be empty"));
        }
        if let Some(bad) = values.iter().find(|u| !(0.0..1.0).contains(*u)) {
            return Err(LifesimError::invalid(format!("uniform value {bad} outside [0, 1)")));
        }
        if values.windows(2).any(|w| w[0] > w[1]) {
            return Err(LifesimError::invalid("uniform sample must be sorted ascending"));
        }
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[Float] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = &Float> {
        self.values.iter()
    }
}

/// Source of sorted uniform samples.
/// # Example
/// ```
/// use lifesim::distributions::SampleGenerator;
///
/// let mut generator = SampleGenerator::new_seeded(42);
/// let sample = generator.generate(10).unwrap();
/// assert_eq!(sample.len(), 10);
/// assert!(sample.as_slice().windows(2).all(|w| w[0] <= w[1]));
/// ```
pub struct SampleGenerator {
    /// Random number generator
    rng: StdRng,
}

impl SampleGenerator {
    /// Create a new [SampleGenerator] seeded from OS entropy.
    pub fn new() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    /// Create a new [SampleGenerator] with a specified random seed.
    /// # Arguments
    /// * `seed` - Seed for the random number generator.
    /// # Returns
    /// A new [SampleGenerator].
    pub fn new_seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Create a new [SampleGenerator] around an existing generator.
    pub fn from_rng(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Draw `n` independent uniforms in `[0, 1)` and sort them ascending.
    /// # Arguments
    /// * `n` - Sample size. Must be > 0.
    /// # Returns
    /// A [UniformSample] of length `n`, or [LifesimError::InvalidArgument] if `n == 0`.
    pub fn generate(&mut self, n: usize) -> Result<UniformSample> {
        if n == 0 {
            return Err(LifesimError::invalid("sample count must be > 0"));
        }
        // `random::<Float>()` never yields 1.0, which keeps the inverse CDF finite.
        let mut values: Vec<Float> = (0..n).map(|_| self.rng.random::<Float>()).collect();
        values.sort_by(|a, b| a.total_cmp(b));
        debug!(n, "generated uniform sample");
        Ok(UniformSample { values })
    }
}

impl Default for SampleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_close, basic_statistics, is_non_decreasing};

    #[test]
    fn samples_within_bounds_and_sorted() {
        let mut generator = SampleGenerator::new();
        let sample = generator.generate(500).unwrap();

        assert_eq!(sample.len(), 500);
        for &u in sample.iter() {
            assert!((0.0..1.0).contains(&u), "Value {} out of bounds [0, 1)", u);
        }
        assert!(is_non_decreasing(sample.as_slice()), "Sample is not sorted");
    }

    #[test]
    fn seeded_reproducible() {
        let seed = 12345;
        let mut generator1 = SampleGenerator::new_seeded(seed);
        let mut generator2 = SampleGenerator::new_seeded(seed);

        for n in [1, 10, 100] {
            assert_eq!(
                generator1.generate(n).unwrap(),
                generator2.generate(n).unwrap(),
                "Samples of size {} should be equal with the same seed", n
            );
        }
    }

    #[test]
    fn injected_rng_matches_seeded() {
        let mut injected = SampleGenerator::from_rng(StdRng::seed_from_u64(9));
        let mut seeded = SampleGenerator::new_seeded(9);
        assert_eq!(injected.generate(20).unwrap(), seeded.generate(20).unwrap());
    }

    #[test]
    fn single_element() {
        let sample = SampleGenerator::new_seeded(1).generate(1).unwrap();
        assert_eq!(sample.len(), 1);
    }

    #[test]
    fn zero_count_rejected() {
        let result = SampleGenerator::new_seeded(1).generate(0);
        assert!(matches!(result, Err(LifesimError::InvalidArgument { .. })));
    }

    #[test]
    fn from_values_validates() {
        assert!(UniformSample::from_values(vec![0.0, 0.5, 0.99]).is_ok());
        assert!(UniformSample::from_values(vec![]).is_err());
        assert!(UniformSample::from_values(vec![0.2, 1.0]).is_err());
        assert!(UniformSample::from_values(vec![-0.1, 0.2]).is_err());
        assert!(UniformSample::from_values(vec![0.6, 0.2]).is_err());
        assert!(UniformSample::from_values(vec![Float::NAN]).is_err());
    }

    #[test]
    #[ignore]
    fn moments_approximation() {
        let sample = SampleGenerator::new_seeded(2024).generate(100_000).unwrap();
        let (mean, var) = basic_statistics(sample.as_slice());
        assert_close(mean, 0.5, 0.01, "uniform mean");
        assert_close(var, 1.0 / 12.0, 0.02, "uniform variance");
    }
}
