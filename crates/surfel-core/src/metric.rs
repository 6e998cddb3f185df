//! Distance metrics over the ambient space
//!
//! The estimator adapter is metric-agnostic: neighbourhoods are bounded and
//! ordered by whatever [`Metric`] the caller supplies. The Euclidean
//! [`L2Metric`] is the reference; L1 and L-infinity give diamond- and
//! box-shaped neighbourhoods.
//!
//! ## Invariants
//!
//! * `distance(p, q) >= 0` and `distance(p, p) == 0`.
//! * Symmetric. The triangle inequality is assumed, not checked.

use crate::error::{Error, Result};
use crate::numeric::DigitalInteger;
use crate::point::{Point, RealPoint};
use serde::{Deserialize, Serialize};

/// Distance function between points of an `N`-dimensional space
pub trait Metric<const N: usize>: Send + Sync {
    /// Distance between two continuous points
    fn distance(&self, p: &RealPoint<N>, q: &RealPoint<N>) -> f64;

    /// Distance between two lattice points
    fn digital_distance<I: DigitalInteger>(&self, p: &Point<I, N>, q: &Point<I, N>) -> f64
    where
        Self: Sized,
    {
        self.distance(&p.to_real(), &q.to_real())
    }

    /// Name for logging
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<M: Metric<N> + ?Sized, const N: usize> Metric<N> for &M {
    #[inline]
    fn distance(&self, p: &RealPoint<N>, q: &RealPoint<N>) -> f64 {
        (**self).distance(p, q)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Euclidean distance: √(Σ(pᵢ - qᵢ)²)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct L2Metric;

/// Manhattan distance: Σ|pᵢ - qᵢ|
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct L1Metric;

/// Chebyshev distance: max|pᵢ - qᵢ|
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LInfMetric;

/// Minkowski distance: (Σ|pᵢ - qᵢ|ᵖ)^(1/p), `p >= 1`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LpMetric {
    p: f64,
}

/// Shared instance of the reference metric
pub const L2: L2Metric = L2Metric;

impl<const N: usize> Metric<N> for L2Metric {
    #[inline]
    fn distance(&self, p: &RealPoint<N>, q: &RealPoint<N>) -> f64 {
        (p - q).norm()
    }

    fn name(&self) -> &'static str {
        "L2"
    }
}

impl<const N: usize> Metric<N> for L1Metric {
    #[inline]
    fn distance(&self, p: &RealPoint<N>, q: &RealPoint<N>) -> f64 {
        p.iter().zip(q.iter()).map(|(a, b)| (a - b).abs()).sum()
    }

    fn name(&self) -> &'static str {
        "L1"
    }
}

impl<const N: usize> Metric<N> for LInfMetric {
    #[inline]
    fn distance(&self, p: &RealPoint<N>, q: &RealPoint<N>) -> f64 {
        p.iter()
            .zip(q.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    fn name(&self) -> &'static str {
        "LInf"
    }
}

impl LpMetric {
    /// Create a Minkowski metric. `p` must be finite and `>= 1`.
    pub fn new(p: f64) -> Result<Self> {
        if !p.is_finite() || p < 1.0 {
            return Err(Error::InvalidParameter(format!(
                "Minkowski exponent {p} must be finite and >= 1"
            )));
        }
        Ok(Self { p })
    }

    /// Exponent
    pub fn exponent(&self) -> f64 {
        self.p
    }
}

impl<const N: usize> Metric<N> for LpMetric {
    #[inline]
    fn distance(&self, p: &RealPoint<N>, q: &RealPoint<N>) -> f64 {
        p.iter()
            .zip(q.iter())
            .map(|(a, b)| (a - b).abs().powf(self.p))
            .sum::<f64>()
            .powf(1.0 / self.p)
    }

    fn name(&self) -> &'static str {
        "Lp"
    }
}
