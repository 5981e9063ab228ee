//! End-to-end lifetime simulation.
//!
//! Inputs are validated as a whole before anything is sampled or integrated,
//! so a bad configuration never yields partial output.

use std::fmt;

use tracing::{debug, info};

use crate::{
    distributions::{invert, SampleGenerator, VariateSequence},
    evaluator::{evaluate_all, DistributionCurve},
    quadrature::{default_tolerance, IntegrationResult},
    rate::RateParameter,
    reliability::survival_probability,
    LifesimError,
    Result,
    Float,
};

/// Threshold of the reference configuration.
pub const REFERENCE_THRESHOLD: Float = 5.0;

/// Largest accepted sample count. Every draw is held in memory three times
/// over (uniforms, variates, curves), so larger requests are refused up front.
pub const MAX_SAMPLE_COUNT: i64 = 1 << 24;

/// Inputs of a simulation run.
///
/// Counts and time constants are signed so that negative values coming from
/// the outside are rejected by [SimulationConfig::validate] rather than
/// wrapping around.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Mean lifetimes, one distribution each
    pub time_constants  : Vec<i64>,
    /// Number of uniform draws (N)
    pub sample_count    : i64,
    /// Time beyond which survival is evaluated
    pub threshold       : Float,
    /// Quadrature tolerance
    pub tolerance       : Float,
    /// Seed for the uniform source; OS entropy when `None`
    pub seed            : Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_constants: vec![3, 4, 5],
            sample_count: 100,
            threshold: REFERENCE_THRESHOLD,
            tolerance: default_tolerance(),
            seed: None,
        }
    }
}

/// Validated form of a [SimulationConfig].
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationPlan {
    pub time_constants  : Vec<i64>,
    pub rates           : Vec<RateParameter>,
    /// Mean of `rates`, used to build the shared grid
    pub grid_rate       : RateParameter,
    pub sample_count    : usize,
    pub threshold       : Float,
    pub tolerance       : Float,
    pub seed            : Option<u64>,
}

impl SimulationConfig {
    /// Check every input and derive the rates.
    /// # Returns
    /// A [SimulationPlan], or [LifesimError::InvalidArgument] naming the first bad input.
    pub fn validate(&self) -> Result<SimulationPlan> {
        if self.time_constants.is_empty() {
            return Err(LifesimError::invalid("at least one time constant is required"));
        }
        if let Some(bad) = self.time_constants.iter().find(|&&t| t <= 0) {
            return Err(LifesimError::invalid(format!("time constant ({bad}) must be > 0")));
        }
        if self.sample_count <= 0 {
            return Err(LifesimError::invalid(format!("sample count ({}) must be > 0", self.sample_count)));
        }
        if self.sample_count > MAX_SAMPLE_COUNT {
            return Err(LifesimError::invalid(format!(
                "sample count ({}) exceeds the maximum of {MAX_SAMPLE_COUNT}",
                self.sample_count
            )));
        }
        let sample_count = usize::try_from(self.sample_count)
            .map_err(|_| LifesimError::invalid(format!("sample count ({}) is too large", self.sample_count)))?;
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(LifesimError::invalid(format!("threshold ({}) must be finite and >= 0", self.threshold)));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(LifesimError::invalid(format!("tolerance ({}) must be finite and > 0", self.tolerance)));
        }

        let rates = self
            .time_constants
            .iter()
            .map(|&t| RateParameter::from_time_constant(t as Float))
            .collect::<Result<Vec<_>>>()?;
        let grid_rate = RateParameter::mean(&rates)?;

        Ok(SimulationPlan {
            time_constants: self.time_constants.clone(),
            rates,
            grid_rate,
            sample_count,
            threshold: self.threshold,
            tolerance: self.tolerance,
            seed: self.seed,
        })
    }
}

/// Survival probability for one configured time constant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurvivalEstimate {
    pub time_constant   : i64,
    pub threshold       : Float,
    pub result          : IntegrationResult,
}

impl fmt::Display for SurvivalEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p(t={}) = {}", self.time_constant, self.result.value)
    }
}

/// Everything a run computes. Rendering is left to the consumer.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    /// Shared x-axis of every curve
    pub variates    : VariateSequence,
    /// One PDF curve per time constant, in configuration order
    pub pdf_curves  : Vec<DistributionCurve>,
    /// One CDF curve per time constant, in configuration order
    pub cdf_curves  : Vec<DistributionCurve>,
    /// One survival estimate per time constant, in configuration order
    pub survival    : Vec<SurvivalEstimate>,
}

/// Run a simulation from a raw configuration.
/// # Example
/// ```
/// use lifesim::simulation::{run, SimulationConfig};
///
/// let config = SimulationConfig { sample_count: 0, ..SimulationConfig::default() };
/// assert!(run(&config).is_err());
/// ```
pub fn run(config: &SimulationConfig) -> Result<SimulationReport> {
    let plan = config.validate()?;
    let mut generator = match plan.seed {
        Some(seed) => SampleGenerator::new_seeded(seed),
        None => SampleGenerator::new(),
    };
    run_plan(&plan, &mut generator)
}

/// Run a validated plan with a caller-provided uniform source.
pub fn run_plan(plan: &SimulationPlan, generator: &mut SampleGenerator) -> Result<SimulationReport> {
    info!(
        time_constants = ?plan.time_constants,
        n = plan.sample_count,
        threshold = plan.threshold,
        "running lifetime simulation"
    );

    let sample = generator.generate(plan.sample_count)?;
    let variates = invert(&sample, plan.grid_rate);
    let curves = evaluate_all(&variates, &plan.rates)?;
    debug!(grid_rate = plan.grid_rate.value(), max = ?variates.max(), "curves evaluated");

    let survival = plan
        .time_constants
        .iter()
        .zip(&plan.rates)
        .map(|(&time_constant, &rate)| -> Result<SurvivalEstimate> {
            let result = survival_probability(plan.threshold, rate, plan.tolerance)?;
            Ok(SurvivalEstimate { time_constant, threshold: plan.threshold, result })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SimulationReport {
        variates,
        pdf_curves: curves.pdf,
        cdf_curves: curves.cdf,
        survival,
    })
}
