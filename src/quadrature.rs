//! Globally adaptive quadrature on finite and semi-infinite intervals.
//!
//! The interval is repeatedly bisected at the subinterval with the largest
//! error estimate until the summed error meets the tolerance or the
//! subinterval budget runs out. Running out of budget is an error; the partial
//! estimate is carried in [LifesimError::IntegrationDidNotConverge] only.

use std::fmt;

use tracing::{debug, warn};

use crate::{LifesimError, Result, Float};

pub mod gauss_kronrod;
use gauss_kronrod::{gauss_kronrod_15, RuleEstimate};

/// Default subinterval budget.
pub const DEFAULT_MAX_SUBINTERVALS: usize = 50;

/// Default absolute and relative tolerance, `sqrt(EPSILON)`.
pub fn default_tolerance() -> Float {
    Float::EPSILON.sqrt()
}

/// Outcome of a converged integration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct IntegrationResult {
    /// Estimate of the integral
    pub value           : Float,
    /// Absolute error bound reported by the rule
    pub error_estimate  : Float,
    /// Number of subintervals in the final partition
    pub subintervals    : usize,
}

impl fmt::Display for IntegrationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (+/- {:e})", self.value, self.error_estimate)
    }
}

#[derive(Debug, Copy, Clone)]
struct Segment {
    lo      : Float,
    hi      : Float,
    value   : Float,
    error   : Float,
}

impl Segment {
    fn new<F: Fn(Float) -> Float + ?Sized>(f: &F, lo: Float, hi: Float) -> Self {
        let RuleEstimate { value, error } = gauss_kronrod_15(f, lo, hi);
        Self { lo, hi, value, error }
    }
}

/// Adaptive Gauss-Kronrod integrator settings.
///
/// # Example
/// ```
/// use lifesim::quadrature::Quadrature;
///
/// let quad = Quadrature::new().with_abs_tolerance(1e-10);
/// let result = quad.integrate_to_infinity(|x| (-x).exp(), 0.0).unwrap();
/// assert!((result.value - 1.0).abs() <= 1e-10 + result.error_estimate);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quadrature {
    abs_tolerance       : Float,
    rel_tolerance       : Float,
    min_subintervals    : usize,
    max_subintervals    : usize,
}

impl Default for Quadrature {
    fn default() -> Self {
        Self {
            abs_tolerance: default_tolerance(),
            rel_tolerance: default_tolerance(),
            min_subintervals: 1,
            max_subintervals: DEFAULT_MAX_SUBINTERVALS,
        }
    }
}

impl Quadrature {
    /// Create a new [Quadrature] with the default tolerances and budget.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_abs_tolerance(mut self, tolerance: Float) -> Self {
        self.abs_tolerance = tolerance;
        self
    }

    pub fn with_rel_tolerance(mut self, tolerance: Float) -> Self {
        self.rel_tolerance = tolerance;
        self
    }

    /// Number of subintervals the partition must reach before an estimate is
    /// accepted, however small its error.
    pub fn with_min_subintervals(mut self, min_subintervals: usize) -> Self {
        self.min_subintervals = min_subintervals;
        self
    }

    pub fn with_max_subintervals(mut self, max_subintervals: usize) -> Self {
        self.max_subintervals = max_subintervals;
        self
    }

    pub fn abs_tolerance(&self) -> Float {
        self.abs_tolerance
    }

    pub fn rel_tolerance(&self) -> Float {
        self.rel_tolerance
    }

    pub fn min_subintervals(&self) -> usize {
        self.min_subintervals
    }

    pub fn max_subintervals(&self) -> usize {
        self.max_subintervals
    }

    fn validate(&self) -> Result<()> {
        let valid = |t: Float| t.is_finite() && t >= 0.0;
        if !valid(self.abs_tolerance) || !valid(self.rel_tolerance) {
            return Err(LifesimError::invalid(format!(
                "tolerances must be finite and >= 0 (abs {}, rel {})",
                self.abs_tolerance, self.rel_tolerance
            )));
        }
        if self.abs_tolerance == 0.0 && self.rel_tolerance == 0.0 {
            return Err(LifesimError::invalid("at least one tolerance must be > 0"));
        }
        if self.max_subintervals == 0 {
            return Err(LifesimError::invalid("subinterval budget must be > 0"));
        }
        if self.min_subintervals > self.max_subintervals {
            return Err(LifesimError::invalid(format!(
                "minimum subintervals ({}) exceed the budget ({})",
                self.min_subintervals, self.max_subintervals
            )));
        }
        Ok(())
    }

    /// Integrate `f` over the finite interval `[a, b]`.
    /// # Arguments
    /// * `f` - Integrand
    /// * `a` - Lower bound, finite
    /// * `b` - Upper bound, finite and `>= a`
    /// # Returns
    /// The converged [IntegrationResult], [LifesimError::InvalidArgument] for bad
    /// bounds or settings, or [LifesimError::IntegrationDidNotConverge].
    pub fn integrate<F: Fn(Float) -> Float>(&self, f: F, a: Float, b: Float) -> Result<IntegrationResult> {
        self.integrate_with_breakpoints(f, &[a, b])
    }

    /// Integrate `f` over `[points[0], points[last]]`, starting from the
    /// partition given by `points`.
    ///
    /// Breakpoints let the caller place subintervals where the integrand
    /// varies on a scale much smaller than the interval.
    /// # Arguments
    /// * `f` - Integrand
    /// * `points` - At least two finite, non-decreasing bounds
    pub fn integrate_with_breakpoints<F: Fn(Float) -> Float>(&self, f: F, points: &[Float]) -> Result<IntegrationResult> {
        self.validate()?;
        if points.len() < 2 {
            return Err(LifesimError::invalid("at least two breakpoints are required"));
        }
        if points.iter().any(|p| !p.is_finite()) || points.windows(2).any(|w| w[0] > w[1]) {
            return Err(LifesimError::invalid(format!("invalid breakpoints {points:?}")));
        }
        let mut partition: Vec<Float> = points.to_vec();
        partition.dedup();
        if partition.len() < 2 {
            return Ok(IntegrationResult { value: 0.0, error_estimate: 0.0, subintervals: 0 });
        }
        self.adapt(&f, &partition)
    }

    /// Integrate `f` over `[a, +inf)` at unit scale.
    ///
    /// Same as [Quadrature::integrate_to_infinity_scaled] with `scale = 1`.
    /// # Arguments
    /// * `f` - Integrand, must decay fast enough for the integral to exist
    /// * `a` - Finite lower bound
    pub fn integrate_to_infinity<F: Fn(Float) -> Float>(&self, f: F, a: Float) -> Result<IntegrationResult> {
        self.integrate_to_infinity_scaled(f, a, 1.0)
    }

    /// Integrate `f` over `[a, +inf)`.
    ///
    /// Uses the substitution `x = a + scale * (1 - t) / t`, which maps `t` in
    /// `(0, 1]` onto `[a, +inf)`, and integrates `scale * f(x(t)) / t^2` on
    /// `[0, 1]`. `scale` should be the length over which `f` decays; a
    /// density concentrated far inside `scale` is invisible to the first rule
    /// evaluations.
    /// # Arguments
    /// * `f` - Integrand, must decay fast enough for the integral to exist
    /// * `a` - Finite lower bound
    /// * `scale` - Characteristic length of `f`, finite and > 0
    ///
    /// # Example
    /// ```
    /// use lifesim::Float;
    /// use lifesim::quadrature::Quadrature;
    ///
    /// let lambda: Float = 1e5;
    /// let result = Quadrature::new()
    ///     .integrate_to_infinity_scaled(|x| lambda * (-lambda * x).exp(), 0.0, 1.0 / lambda)
    ///     .unwrap();
    /// assert!((result.value - 1.0).abs() < 1e-8);
    /// ```
    pub fn integrate_to_infinity_scaled<F: Fn(Float) -> Float>(&self, f: F, a: Float, scale: Float) -> Result<IntegrationResult> {
        self.validate()?;
        if !a.is_finite() {
            return Err(LifesimError::invalid(format!("lower bound ({a}) must be finite")));
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(LifesimError::invalid(format!("scale ({scale}) must be finite and > 0")));
        }
        let transformed = |t: Float| {
            let x = a + scale * (1.0 - t) / t;
            scale * f(x) / (t * t)
        };
        self.adapt(&transformed, &[0.0, 1.0])
    }

    fn adapt<F: Fn(Float) -> Float + ?Sized>(&self, f: &F, points: &[Float]) -> Result<IntegrationResult> {
        let mut segments: Vec<Segment> = points
            .windows(2)
            .map(|w| Segment::new(f, w[0], w[1]))
            .collect();

        loop {
            let value: Float = segments.iter().map(|s| s.value).sum();
            let error: Float = segments.iter().map(|s| s.error).sum();
            let tolerance = self.abs_tolerance.max(self.rel_tolerance * value.abs());

            let did_not_converge = |reason: &str| {
                warn!(reason, value, error, tolerance, subintervals = segments.len(), "quadrature gave up");
                LifesimError::IntegrationDidNotConverge {
                    value,
                    error_estimate: error,
                    tolerance,
                    subintervals: segments.len(),
                }
            };

            if !value.is_finite() || !error.is_finite() {
                return Err(did_not_converge("non-finite estimate"));
            }
            if error <= tolerance && segments.len() >= self.min_subintervals {
                debug!(value, error, subintervals = segments.len(), "quadrature converged");
                return Ok(IntegrationResult { value, error_estimate: error, subintervals: segments.len() });
            }
            if segments.len() >= self.max_subintervals {
                return Err(did_not_converge("subinterval budget exhausted"));
            }

            // Widest segment while below the minimum partition, largest error otherwise
            let key = |s: &Segment| if error <= tolerance { s.hi - s.lo } else { s.error };
            let worst = segments
                .iter()
                .enumerate()
                .max_by(|(_, l), (_, r)| key(l).total_cmp(&key(r)))
                .map(|(i, _)| i)
                .unwrap_or(0);
            let Segment { lo, hi, .. } = segments[worst];
            let mid = 0.5 * (lo + hi);
            if mid <= lo || mid >= hi {
                return Err(did_not_converge("interval too small to bisect"));
            }
            segments.swap_remove(worst);
            segments.push(Segment::new(f, lo, mid));
            segments.push(Segment::new(f, mid, hi));
        }
    }
}
