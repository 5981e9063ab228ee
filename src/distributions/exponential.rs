//! Exponential distribution and inverse-transform sampling.
//!
//! The free functions [pdf], [cdf], [survival] and [inverse_cdf] are the
//! unchecked hot-path math: they assume `x >= 0` and `u` in `[0, 1)`. Domain
//! checks live in the orchestration code ([invert], the curve evaluator and
//! the integrator), and `rate > 0` is guaranteed by [RateParameter] itself.

use rand::Rng;
use tracing::debug;

use crate::{
    rate::RateParameter,
    Float,
};
use super::{LifetimeDistribution, UniformSample};

/// Probability density `λ exp(-λx)`.
pub fn pdf(x: Float, rate: RateParameter) -> Float {
    let lambda = rate.value();
    lambda * (-lambda * x).exp()
}

/// Cumulative distribution `1 - exp(-λx)`.
pub fn cdf(x: Float, rate: RateParameter) -> Float {
    -(-rate.value() * x).exp_m1()
}

/// Survival function `exp(-λx)`, the closed form of the density tail.
pub fn survival(x: Float, rate: RateParameter) -> Float {
    (-rate.value() * x).exp()
}

/// Inverse CDF `-ln(1 - u) / λ`.
///
/// Tends to `+inf` as `u -> 1`; `u == 1` is not special-cased.
pub fn inverse_cdf(u: Float, rate: RateParameter) -> Float {
    -(-u).ln_1p() / rate.value()
}

/// Ordered sequence of simulated lifetimes produced by [invert].
#[derive(Debug, Clone, PartialEq)]
pub struct VariateSequence {
    values: Vec<Float>,
}

impl VariateSequence {
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

    /// Largest variate, i.e. the last element.
    pub fn max(&self) -> Option<Float> {
        self.values.last().copied()
    }
}

/// Map a sorted uniform sample through the exponential inverse CDF.
/// # Arguments
/// * `sample` - Sorted uniform sample.
/// * `rate` - Rate used for every element.
/// # Returns
/// A [VariateSequence] of the same length, non-decreasing like its input.
///
/// # Example
/// ```
/// use lifesim::{Float, RateParameter};
/// use lifesim::distributions::{invert, UniformSample};
///
/// let sample = UniformSample::from_values(vec![0.0, 0.5]).unwrap();
/// let rate = RateParameter::new(2.0).unwrap();
/// let variates = invert(&sample, rate);
/// assert_eq!(variates.as_slice()[0], 0.0);
/// assert!((variates.as_slice()[1] - (2.0 as Float).ln() / 2.0).abs() < 1e-12);
/// ```
pub fn invert(sample: &UniformSample, rate: RateParameter) -> VariateSequence {
    let values: Vec<Float> = sample.iter().map(|&u| inverse_cdf(u, rate)).collect();
    debug!(n = values.len(), rate = rate.value(), "inverted uniform sample");
    VariateSequence { values }
}

/// Exponential lifetime distribution.
/// # Example
/// ```
/// use lifesim::Float;
/// use lifesim::distributions::{Exponential, LifetimeDistribution};
///
/// let dist = Exponential::from_time_constant(5.0).unwrap();
/// assert!((dist.survival(5.0) - (-1.0 as Float).exp()).abs() < 1e-12);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Exponential {
    /// The rate parameter (> 0)
    rate: RateParameter,
}

impl Exponential {
    /// Create a new [Exponential] distribution with given rate parameter.
    pub fn new(rate: RateParameter) -> Self {
        Self { rate }
    }

    /// Create a new [Exponential] distribution with mean lifetime `t`.
    /// # Returns
    /// A new [Exponential], or an error if `t` is not finite and > 0.
    pub fn from_time_constant(t: Float) -> crate::Result<Self> {
        Ok(Self::new(RateParameter::from_time_constant(t)?))
    }

    pub fn rate(&self) -> RateParameter {
        self.rate
    }

    /// Draw a single lifetime by inverse transform.
    /// # Arguments
    /// * `rng` - A random number generator
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Float {
        inverse_cdf(rng.random::<Float>(), self.rate)
    }
}

impl LifetimeDistribution for Exponential {
    fn pdf(&self, x: Float) -> Float {
        pdf(x, self.rate)
    }

    fn cdf(&self, x: Float) -> Float {
        cdf(x, self.rate)
    }

    fn survival(&self, x: Float) -> Float {
        survival(x, self.rate)
    }

    fn scale(&self) -> Float {
        self.rate.mean_lifetime()
    }

    fn inverse_cdf(&self, u: Float) -> Float {
        inverse_cdf(u, self.rate)
    }
}
