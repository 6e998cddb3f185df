//! Convolution weight kernels
//!
//! A weight kernel turns the distance between a neighbour and the centre
//! surfel into a scalar weight. Kernels are stateless apart from their scale
//! parameter, so one instance can be shared by every evaluation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Scalar weight as a function of distance from the centre
pub trait WeightKernel: Send + Sync {
    /// Weight for a neighbour at `distance`
    fn weight(&self, distance: f64) -> f64;

    /// Name of this kernel for debugging/logging
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<F> WeightKernel for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    #[inline]
    fn weight(&self, distance: f64) -> f64 {
        self(distance)
    }
}

/// Gaussian kernel `exp(-d² / (2σ²))`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GaussianKernel {
    sigma: f64,
}

impl GaussianKernel {
    /// Create a Gaussian kernel; `sigma` must be finite and positive
    pub fn new(sigma: f64) -> Result<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "Gaussian sigma {sigma} must be finite and positive"
            )));
        }
        Ok(Self { sigma })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl WeightKernel for GaussianKernel {
    #[inline]
    fn weight(&self, distance: f64) -> f64 {
        (-distance * distance / (2.0 * self.sigma * self.sigma)).exp()
    }

    fn name(&self) -> &'static str {
        "Gaussian"
    }
}

/// Constant kernel `w ≡ value`
///
/// Used with functors that do their own weighting, or none at all (plain
/// least-squares over the whole neighbourhood).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstantKernel {
    value: f64,
}

impl ConstantKernel {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Default for ConstantKernel {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl WeightKernel for ConstantKernel {
    #[inline]
    fn weight(&self, _distance: f64) -> f64 {
        self.value
    }

    fn name(&self) -> &'static str {
        "Constant"
    }
}
