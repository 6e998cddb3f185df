//! Error types for surfel estimation
//!
//! Provides a unified error type for all surfel-* crates.

use thiserror::Error;

/// Core error type for digital surface estimation
#[derive(Error, Debug)]
pub enum Error {
    /// Radius bounds rejected at configuration time
    #[error("Invalid radius bounds: expected 0 < min <= max, got min={min}, max={max}")]
    InvalidRadius { min: f64, max: f64 },

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A functor received fewer samples than it needs
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// The estimate is undefined for this neighbourhood (zero weight, null normal, ...)
    #[error("Degenerate estimate: {0}")]
    Degenerate(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// No boundary element could be located
    #[error("No boundary surfel found after {tries} tries")]
    BelNotFound { tries: usize },

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Validate a `(min, max)` radius pair.
    ///
    /// Accepts exactly the pairs with `0 < min <= max`, both finite.
    pub fn check_radius_bounds(min: f64, max: f64) -> Result<()> {
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(Self::InvalidRadius { min, max });
        }
        Ok(())
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Computation(format!("{context} contains NaN or infinite values"))
    }

    /// Create an error for a functor that did not get enough neighbours
    pub fn insufficient(expected: usize, actual: usize) -> Self {
        Self::InsufficientData { expected, actual }
    }
}
