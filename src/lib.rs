//! Welcome to lifesim, a library for simulating exponential component lifetimes
//! and estimating their reliability.
//!
//! The pipeline draws a sorted uniform sample, maps it through the exponential
//! inverse CDF, evaluates PDF and CDF curves on the resulting grid, and
//! integrates the density tail numerically to obtain survival probabilities.
//!
//! ```
//! use lifesim::simulation::{run, SimulationConfig};
//!
//! let config = SimulationConfig { seed: Some(7), ..SimulationConfig::default() };
//! let report = run(&config).unwrap();
//! assert_eq!(report.variates.len(), 100);
//! assert_eq!(report.survival.len(), 3);
//! ```

/// The numeric type used throughout lifesim.
///
/// Set to `f32` when the `f32` feature is enabled.
#[cfg(feature = "f32")]
pub type Float = f32;

/// The numeric type used throughout lifesim.
///
/// Defaults to `f64` for precision; the quadrature tolerances are tuned for it.
#[cfg(all(feature = "f64", not(feature = "f32")))]
pub type Float = f64;

pub mod error;
pub use error::{LifesimError, Result};

pub mod rate;
pub use rate::RateParameter;

pub mod distributions;

pub mod evaluator;

pub mod quadrature;

pub mod reliability;

pub mod simulation;

pub mod test_utils;
