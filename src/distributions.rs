//! Module for the lifetime distributions and the uniform source feeding them.

use crate::Float;

/// Trait for continuous lifetime distributions on `[0, +inf)`.
///
/// Implementations are unchecked primitives: callers are responsible for
/// passing `x >= 0` and `u` in `[0, 1)`.
pub trait LifetimeDistribution {
    /// Probability density at `x`.
    fn pdf(&self, x: Float) -> Float;

    /// Cumulative probability `P(X <= x)`.
    fn cdf(&self, x: Float) -> Float;

    /// Survival probability `P(X > x)`.
    fn survival(&self, x: Float) -> Float {
        1.0 - self.cdf(x)
    }

    /// Characteristic time over which the density decays.
    ///
    /// Numeric integration uses it to place its first evaluations where the
    /// mass is. Defaults to `1`.
    fn scale(&self) -> Float {
        1.0
    }

    /// Inverse of [LifetimeDistribution::cdf].
    /// # Arguments
    /// * `u` - Probability in `[0, 1)`.
    fn inverse_cdf(&self, u: Float) -> Float;
}

pub mod uniform;
pub use uniform::{SampleGenerator, UniformSample};
pub mod exponential;
pub use exponential::{Exponential, VariateSequence, invert};
