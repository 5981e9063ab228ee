//! PDF and CDF curves on a shared grid.
//!
//! Every curve produced here reuses the same x-array: the variates drawn with
//! the mean of all rates. Curves for different rates are therefore evaluated
//! at positions that were not sampled from their own distribution. This keeps
//! the curves aligned for plotting and tabulation; callers that need a
//! faithful per-rate sample must [invert](crate::distributions::invert) with
//! each rate separately.

use std::sync::Arc;

use tracing::debug;

use crate::{
    distributions::{exponential, VariateSequence},
    rate::RateParameter,
    LifesimError,
    Result,
    Float,
};

/// Which function a [DistributionCurve] holds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CurveKind {
    Pdf,
    Cdf,
}

impl CurveKind {
    fn apply(&self, x: Float, rate: RateParameter) -> Float {
        match self {
            CurveKind::Pdf => exponential::pdf(x, rate),
            CurveKind::Cdf => exponential::cdf(x, rate),
        }
    }
}

/// A PDF or CDF evaluated at every position of a shared grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionCurve {
    pub kind    : CurveKind,
    pub rate    : RateParameter,
    /// Grid positions, shared between all curves of one evaluation
    pub x       : Arc<[Float]>,
    /// Function values, `y[i] = f(x[i])`
    pub y       : Vec<Float>,
}

/// PDF and CDF curves for the same set of rates.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSet {
    pub pdf: Vec<DistributionCurve>,
    pub cdf: Vec<DistributionCurve>,
}

fn checked_grid(variates: &VariateSequence, rates: &[RateParameter]) -> Result<Arc<[Float]>> {
    if rates.is_empty() {
        return Err(LifesimError::invalid("at least one rate is required"));
    }
    if let Some(bad) = variates.iter().find(|x| !x.is_finite() || **x < 0.0) {
        return Err(LifesimError::invalid(format!("grid position {bad} must be finite and >= 0")));
    }
    Ok(Arc::from(variates.as_slice()))
}

fn curves_on(grid: &Arc<[Float]>, rates: &[RateParameter], kind: CurveKind) -> Vec<DistributionCurve> {
    rates
        .iter()
        .map(|&rate| DistributionCurve {
            kind,
            rate,
            x: Arc::clone(grid),
            y: grid.iter().map(|&x| kind.apply(x, rate)).collect(),
        })
        .collect()
}

/// Evaluate one kind of curve for every rate on the shared grid.
/// # Arguments
/// * `variates` - Grid positions.
/// * `rates` - One curve is produced per rate, in order.
/// * `kind` - PDF or CDF.
/// # Returns
/// The curves, or [LifesimError::InvalidArgument] if `rates` is empty or a grid
/// position is negative or not finite.
///
/// # Example
/// ```
/// use lifesim::RateParameter;
/// use lifesim::distributions::{invert, UniformSample};
/// use lifesim::evaluator::{evaluate, CurveKind};
///
/// let grid = invert(&UniformSample::from_values(vec![0.0, 0.5]).unwrap(), RateParameter::new(1.0).unwrap());
/// let rates = [RateParameter::new(0.5).unwrap(), RateParameter::new(2.0).unwrap()];
/// let curves = evaluate(&grid, &rates, CurveKind::Pdf).unwrap();
/// assert_eq!(curves.len(), 2);
/// assert_eq!(curves[1].y[0], 2.0);
/// ```
pub fn evaluate(variates: &VariateSequence, rates: &[RateParameter], kind: CurveKind) -> Result<Vec<DistributionCurve>> {
    let grid = checked_grid(variates, rates)?;
    debug!(points = grid.len(), curves = rates.len(), ?kind, "evaluating curves");
    Ok(curves_on(&grid, rates, kind))
}

/// Evaluate PDF and CDF curves for every rate, all sharing one grid allocation.
pub fn evaluate_all(variates: &VariateSequence, rates: &[RateParameter]) -> Result<CurveSet> {
    let grid = checked_grid(variates, rates)?;
    debug!(points = grid.len(), curves = rates.len(), "evaluating pdf and cdf curves");
    Ok(CurveSet {
        pdf: curves_on(&grid, rates, CurveKind::Pdf),
        cdf: curves_on(&grid, rates, CurveKind::Cdf),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::{invert, SampleGenerator, UniformSample};
    use crate::test_utils::is_non_decreasing;

    fn reference_rates() -> Vec<RateParameter> {
        [3.0, 4.0, 5.0]
            .iter()
            .map(|&t| RateParameter::from_time_constant(t).unwrap())
            .collect()
    }

    fn reference_grid(n: usize) -> VariateSequence {
        let rates = reference_rates();
        let sample = SampleGenerator::new_seeded(11).generate(n).unwrap();
        invert(&sample, RateParameter::mean(&rates).unwrap())
    }

    #[test]
    fn curves_share_grid() {
        let grid = reference_grid(100);
        let set = evaluate_all(&grid, &reference_rates()).unwrap();

        assert_eq!(set.pdf.len(), 3);
        assert_eq!(set.cdf.len(), 3);
        for curve in set.pdf.iter().chain(set.cdf.iter()) {
            assert!(Arc::ptr_eq(&curve.x, &set.pdf[0].x), "grid was reallocated");
            assert_eq!(curve.x.len(), 100);
            assert_eq!(curve.y.len(), 100);
        }
    }

    #[test]
    fn values_match_closed_form() {
        let grid = reference_grid(50);
        let rates = reference_rates();
        let set = evaluate_all(&grid, &rates).unwrap();

        for (curve, rate) in set.pdf.iter().zip(&rates) {
            assert_eq!(curve.kind, CurveKind::Pdf);
            for (&x, &y) in curve.x.iter().zip(&curve.y) {
                let lambda = rate.value();
                assert!((y - lambda * (-lambda * x).exp()).abs() < 1e-12);
            }
        }
        for curve in &set.cdf {
            assert_eq!(curve.kind, CurveKind::Cdf);
            assert!(is_non_decreasing(&curve.y), "cdf should increase along a sorted grid");
            assert!(curve.y.iter().all(|y| (0.0..=1.0).contains(y)));
        }
    }

    #[test]
    fn single_point_grid() {
        let grid = invert(&UniformSample::from_values(vec![0.25]).unwrap(), RateParameter::new(1.0).unwrap());
        let curves = evaluate(&grid, &reference_rates(), CurveKind::Cdf).unwrap();
        assert_eq!(curves.len(), 3);
        assert!(curves.iter().all(|c| c.y.len() == 1));
    }

    #[test]
    fn no_rates_rejected() {
        let grid = reference_grid(5);
        assert!(matches!(evaluate(&grid, &[], CurveKind::Pdf), Err(LifesimError::InvalidArgument { .. })));
        assert!(evaluate_all(&grid, &[]).is_err());
    }
}
