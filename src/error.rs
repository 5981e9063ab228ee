//! Error type shared by every stage of the pipeline.

use thiserror::Error;

use crate::Float;

/// Errors reported by lifesim.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifesimError {
    /// An argument is outside the domain of the operation (non-positive rate,
    /// non-positive sample count, negative threshold, ...).
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The adaptive quadrature exhausted its refinement budget before the
    /// error estimate fell below the requested tolerance.
    #[error(
        "integration did not converge after {subintervals} subintervals: \
         estimate {value}, error {error_estimate} > tolerance {tolerance}"
    )]
    IntegrationDidNotConverge {
        value           : Float,
        error_estimate  : Float,
        tolerance       : Float,
        subintervals    : usize,
    },
}

impl LifesimError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument { message: message.into() }
    }
}

/// Result alias used throughout lifesim.
pub type Result<T> = std::result::Result<T, LifesimError>;
