use std::num::ParseFloatError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuroraError {
    /// Invalid pole, boundary selector, boundary kind or configuration value.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Numeric input outside the valid domain of a function.
    #[error("{value} is outside the valid domain of {context}")]
    Domain { context: &'static str, value: f64 },
    /// A single field line failed to converge within the limit radius.
    #[error("field line traced from {start:?} did not converge: {reason}")]
    TraceDivergence { start: [f64; 3], reason: String },
    /// Ephemeris or driving-parameter source failure.
    #[error("upstream source unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("float parsing error: {0}")]
    ParseFloat(#[from] ParseFloatError),
}

impl AuroraError {
    pub(crate) fn domain(context: &'static str, value: f64) -> Self {
        AuroraError::Domain { context, value }
    }

    /// Errors that only invalidate one traced sample rather than a whole curve
    pub fn is_recoverable_sample(&self) -> bool {
        matches!(self, AuroraError::TraceDivergence { .. })
    }
}
