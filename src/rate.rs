//! Rate parameter of the exponential lifetime model.

use crate::{LifesimError, Result, Float};

/// Positive rate λ of an exponential distribution.
///
/// A [RateParameter] can only be built through its checked constructors, so
/// every function receiving one may assume `λ > 0` and finite.
///
/// # Example
/// ```
/// use lifesim::RateParameter;
///
/// let rate = RateParameter::from_time_constant(4.0).unwrap();
/// assert_eq!(rate.value(), 0.25);
/// assert_eq!(rate.mean_lifetime(), 4.0);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct RateParameter(Float);

impl RateParameter {
    /// Create a new [RateParameter] from λ directly.
    /// # Arguments
    /// * `lambda` - The rate. Must be finite and > 0.
    /// # Returns
    /// A new [RateParameter], or [LifesimError::InvalidArgument].
    pub fn new(lambda: Float) -> Result<Self> {
        if !lambda.is_finite() || lambda <= 0.0 {
            return Err(LifesimError::invalid(format!("rate ({lambda}) must be finite and > 0")));
        }
        Ok(Self(lambda))
    }

    /// Create a new [RateParameter] as `1 / t`.
    /// # Arguments
    /// * `t` - Time constant (mean lifetime). Must be finite and > 0.
    /// # Returns
    /// A new [RateParameter], or [LifesimError::InvalidArgument].
    pub fn from_time_constant(t: Float) -> Result<Self> {
        if !t.is_finite() || t <= 0.0 {
            return Err(LifesimError::invalid(format!("time constant ({t}) must be finite and > 0")));
        }
        Self::new(1.0 / t)
    }

    /// Arithmetic mean of a set of rates.
    /// # Arguments
    /// * `rates` - Non-empty set of rates.
    /// # Returns
    /// The representative rate, or [LifesimError::InvalidArgument] if `rates` is empty.
    pub fn mean(rates: &[RateParameter]) -> Result<Self> {
        if rates.is_empty() {
            return Err(LifesimError::invalid("cannot average an empty set of rates"));
        }
        let sum: Float = rates.iter().map(|r| r.0).sum();
        Self::new(sum / rates.len() as Float)
    }

    /// The rate λ.
    pub fn value(&self) -> Float {
        self.0
    }

    /// Expected lifetime `1 / λ`.
    pub fn mean_lifetime(&self) -> Float {
        1.0 / self.0
    }
}
