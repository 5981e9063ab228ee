//! Reliability of a component with an exponential lifetime.
//!
//! Probabilities are obtained by numerically integrating the density, not
//! from the closed forms; the closed forms (`exp(-λt)`, `1 - exp(-λt)`, `1/λ`)
//! only serve as cross-checks in tests. [tail_probability] works for any
//! [LifetimeDistribution].

use tracing::debug;

use crate::{
    distributions::{Exponential, LifetimeDistribution},
    quadrature::{IntegrationResult, Quadrature},
    rate::RateParameter,
    LifesimError,
    Result,
    Float,
};

/// Minimum partition of every reliability integral.
const MIN_SUBINTERVALS: usize = 2;

/// Breakpoints stop at this many scale lengths; the density has decayed by
/// `exp(-64)` there.
const MAX_BREAKPOINT_SCALES: Float = 64.0;

fn check_threshold(threshold: Float) -> Result<()> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(LifesimError::invalid(format!("threshold ({threshold}) must be finite and >= 0")));
    }
    Ok(())
}

fn quadrature_for(tolerance: Float) -> Result<Quadrature> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(LifesimError::invalid(format!("tolerance ({tolerance}) must be finite and > 0")));
    }
    Ok(Quadrature::new()
        .with_abs_tolerance(tolerance)
        .with_rel_tolerance(tolerance)
        .with_min_subintervals(MIN_SUBINTERVALS))
}

/// Partition of `[0, threshold]` refined geometrically near the origin, where
/// the density of `dist` changes on the length `dist.scale()`.
fn breakpoints<D: LifetimeDistribution + ?Sized>(dist: &D, threshold: Float) -> Vec<Float> {
    let scale = dist.scale();
    let mut points = vec![0.0];
    let mut x = scale;
    while x < threshold && x <= MAX_BREAKPOINT_SCALES * scale {
        points.push(x);
        x *= 2.0;
    }
    points.push(threshold);
    points
}

/// Clamp the estimate to `[0, 1]`; the error bound is kept as reported.
fn as_probability(mut result: IntegrationResult) -> IntegrationResult {
    result.value = result.value.clamp(0.0, 1.0);
    result
}

/// Probability that a lifetime drawn from `dist` exceeds `threshold`.
/// # Arguments
/// * `dist` - Any lifetime distribution; its density is integrated on the
///   length [LifetimeDistribution::scale].
/// * `threshold` - Time, finite and >= 0.
/// * `tolerance` - Absolute and relative tolerance of the quadrature, > 0.
/// # Returns
/// The tail mass with its error bound, [LifesimError::InvalidArgument] for bad
/// arguments, or [LifesimError::IntegrationDidNotConverge].
pub fn tail_probability<D: LifetimeDistribution + ?Sized>(dist: &D, threshold: Float, tolerance: Float) -> Result<IntegrationResult> {
    check_threshold(threshold)?;
    let quad = quadrature_for(tolerance)?;
    let result = quad.integrate_to_infinity_scaled(|x| dist.pdf(x), threshold, dist.scale())?;
    Ok(as_probability(result))
}

/// Probability that a component with rate `rate` survives beyond `threshold`.
///
/// # Example
/// ```
/// use lifesim::{Float, RateParameter};
/// use lifesim::reliability::survival_probability;
///
/// let rate = RateParameter::from_time_constant(5.0).unwrap();
/// let result = survival_probability(5.0, rate, 1e-10).unwrap();
/// assert!((result.value - (-1.0 as Float).exp()).abs() <= 1e-10 + result.error_estimate);
/// ```
pub fn survival_probability(threshold: Float, rate: RateParameter, tolerance: Float) -> Result<IntegrationResult> {
    let result = tail_probability(&Exponential::new(rate), threshold, tolerance)?;
    debug!(threshold, rate = rate.value(), value = result.value, error = result.error_estimate, "survival probability");
    Ok(result)
}

/// Probability that a component with rate `rate` fails by `threshold`,
/// integrating the density over `[0, threshold]`.
pub fn failure_probability(threshold: Float, rate: RateParameter, tolerance: Float) -> Result<IntegrationResult> {
    check_threshold(threshold)?;
    let quad = quadrature_for(tolerance)?;
    let dist = Exponential::new(rate);
    let result = quad.integrate_with_breakpoints(|x| dist.pdf(x), &breakpoints(&dist, threshold))?;
    Ok(as_probability(result))
}

/// Mean lifetime, the integral of the survival function over `[0, +inf)`.
pub fn mean_lifetime(rate: RateParameter, tolerance: Float) -> Result<IntegrationResult> {
    let quad = quadrature_for(tolerance)?;
    let dist = Exponential::new(rate);
    quad.integrate_to_infinity_scaled(|x| dist.survival(x), 0.0, dist.scale())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadrature::default_tolerance;
    use crate::simulation::REFERENCE_THRESHOLD;
    use crate::test_utils::assert_within;
    use proptest::prelude::*;

    fn rate(t: Float) -> RateParameter {
        RateParameter::from_time_constant(t).unwrap()
    }

    #[test]
    fn reference_scenario() {
        let tol = default_tolerance();
        for (t, expected) in [(3.0, 0.1888756028375618), (4.0, 0.2865047968601901), (5.0, 0.36787944117144233)] {
            let result = survival_probability(5.0, rate(t), tol).unwrap();
            assert_within(result.value, expected, tol + result.error_estimate, &format!("p(t={t})"));
            assert!(result.error_estimate >= 0.0);
        }
    }

    #[test]
    fn whole_line_integrates_to_one() {
        for t in [1e-6, 1e-5, 1e-4, 0.05, 1.0, 3.0, 20.0, 1e4, 1e6] {
            let result = survival_probability(0.0, rate(t), 1e-10).unwrap();
            assert_within(result.value, 1.0, 1e-10 + result.error_estimate, &format!("total mass for t={t}"));
        }
    }

    #[test]
    fn fast_decay_is_resolved() {
        let tol = default_tolerance();
        for lambda in [1e4, 1e5] {
            let r = RateParameter::new(lambda).unwrap();
            for (threshold, expected) in [(0.0, 1.0), (1.0 / lambda, (-1.0 as Float).exp()), (3.0 / lambda, (-3.0 as Float).exp())] {
                let result = survival_probability(threshold, r, tol).unwrap();
                assert_within(result.value, expected, tol + result.error_estimate, &format!("λ={lambda} t={threshold}"));
                assert!(result.subintervals >= MIN_SUBINTERVALS);
            }
            let far = survival_probability(REFERENCE_THRESHOLD, r, tol).unwrap();
            assert!(far.value < 1e-12, "λ={lambda}: {}", far.value);

            let fail = failure_probability(1.0 / lambda, r, tol).unwrap();
            assert_within(fail.value, 1.0 - (-1.0 as Float).exp(), tol + fail.error_estimate, &format!("failure λ={lambda}"));
            let fail = failure_probability(REFERENCE_THRESHOLD, r, tol).unwrap();
            assert_within(fail.value, 1.0, tol + fail.error_estimate, &format!("certain failure λ={lambda}"));

            let mean = mean_lifetime(r, 1e-10).unwrap();
            assert_within(mean.value, 1.0 / lambda, 1e-9 / lambda + mean.error_estimate, &format!("mean λ={lambda}"));
        }
    }

    #[test]
    fn breakpoints_follow_scale() {
        let dist = Exponential::new(rate(1.0));
        assert_eq!(breakpoints(&dist, 5.0), vec![0.0, 1.0, 2.0, 4.0, 5.0]);
        assert_eq!(breakpoints(&dist, 0.5), vec![0.0, 0.5]);
        assert_eq!(breakpoints(&dist, 1.0), vec![0.0, 1.0]);
        let fast = Exponential::new(RateParameter::new(1e5).unwrap());
        let points = breakpoints(&fast, 5.0);
        assert_eq!(points.len(), 9);
        assert_eq!(points.last(), Some(&5.0));
    }

    #[test]
    fn far_tail_is_negligible() {
        let result = survival_probability(1e4, rate(1.0), 1e-10).unwrap();
        assert!(result.value < 1e-10, "got {}", result.value);
    }

    #[test]
    fn failure_complements_survival() {
        let tol = 1e-10;
        let r = rate(4.0);
        let fail = failure_probability(5.0, r, tol).unwrap();
        let survive = survival_probability(5.0, r, tol).unwrap();
        assert_within(fail.value + survive.value, 1.0, 2.0 * tol + fail.error_estimate + survive.error_estimate, "total");
        assert_eq!(failure_probability(0.0, r, tol).unwrap().value, 0.0);
    }

    #[test]
    fn mean_lifetime_is_time_constant() {
        for t in [0.5, 3.0, 4.0, 5.0] {
            let result = mean_lifetime(rate(t), 1e-10).unwrap();
            assert_within(result.value, t, 1e-9 * t + result.error_estimate, &format!("mean for t={t}"));
        }
    }

    #[test]
    fn invalid_arguments() {
        let r = rate(3.0);
        let invalid = |res: Result<IntegrationResult>| matches!(res, Err(LifesimError::InvalidArgument { .. }));

        assert!(invalid(survival_probability(-1.0, r, 1e-8)));
        assert!(invalid(survival_probability(Float::NAN, r, 1e-8)));
        assert!(invalid(survival_probability(5.0, r, 0.0)));
        assert!(invalid(survival_probability(5.0, r, -1e-8)));
        assert!(invalid(failure_probability(-0.5, r, 1e-8)));
        assert!(invalid(mean_lifetime(r, Float::INFINITY)));
    }

    #[test]
    fn works_for_other_distributions() {
        // Rayleigh with unit scale: pdf x exp(-x²/2), survival exp(-x²/2)
        struct Rayleigh;
        impl LifetimeDistribution for Rayleigh {
            fn pdf(&self, x: Float) -> Float { x * (-0.5 * x * x).exp() }
            fn cdf(&self, x: Float) -> Float { 1.0 - (-0.5 * x * x).exp() }
            fn inverse_cdf(&self, u: Float) -> Float { (-2.0 * (1.0 - u).ln()).sqrt() }
        }

        let result = tail_probability(&Rayleigh, 1.5, 1e-10).unwrap();
        assert_within(result.value, Rayleigh.survival(1.5), 1e-10 + result.error_estimate, "rayleigh tail");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn matches_closed_form(ln_lambda in -14.0 as Float..14.0 as Float, decays in 0.0 as Float..30.0 as Float) {
            let tol = default_tolerance();
            let lambda = ln_lambda.exp();
            let threshold = decays / lambda;
            let r = RateParameter::new(lambda).unwrap();
            let result = survival_probability(threshold, r, tol).unwrap();
            let exact = (-lambda * threshold).exp();
            prop_assert!(
                (result.value - exact).abs() <= tol + result.error_estimate,
                "λ={} t={}: {} vs {} (err {})", lambda, threshold, result.value, exact, result.error_estimate
            );
            prop_assert!((0.0..=1.0).contains(&result.value));
        }

        #[test]
        fn absolute_threshold_any_rate(ln_lambda in -14.0 as Float..14.0 as Float, threshold in 0.0 as Float..20.0 as Float) {
            let tol = default_tolerance();
            let lambda = ln_lambda.exp();
            let result = survival_probability(threshold, RateParameter::new(lambda).unwrap(), tol).unwrap();
            let exact = (-lambda * threshold).exp();
            prop_assert!(
                (result.value - exact).abs() <= tol + result.error_estimate,
                "λ={} t={}: {} vs {}", lambda, threshold, result.value, exact
            );
        }
    }
}
