//! Core traits and types for surfel-based estimation on digital surfaces
//!
//! This crate provides the foundation shared by the topology and estimation
//! crates.
//!
//! # Overview
//!
//! - **Digital space kernel**: [`Space`] fixes an integer type and a dimension
//!   at compile time and derives sub-spaces / sub-co-spaces as types
//! - **Points**: [`PointVector`] integer tuples and `nalgebra` real points
//! - **Metrics**: pluggable [`Metric`] implementations (L1, L2, L∞, Lp)
//! - **Weight kernels**: [`WeightKernel`] (Gaussian, constant, closures)
//! - **Collaborator traits**: [`DigitalSurface`], [`SurfelEmbedder`],
//!   [`OrientedSurfel`]
//!
//! # Example
//!
//! ```rust
//! use surfel_core::{L2Metric, Metric, Point, Z3};
//!
//! assert_eq!(Z3::dim(), 3);
//! let a = Point::<i32, 3>::new([0, 0, 0]);
//! let b = Point::<i32, 3>::new([1, 2, 2]);
//! assert_eq!(L2Metric.digital_distance(&a, &b), 3.0);
//! ```

pub mod config;
pub mod error;
pub mod kernels;
pub mod metric;
pub mod numeric;
pub mod point;
pub mod space;
pub mod traits;

// Re-export core types
pub use error::{Error, Result};

pub use config::{EstimatorConfig, RadiusBounds, DEFAULT_MAX_VISITED};
pub use kernels::{ConstantKernel, GaussianKernel, WeightKernel};
pub use metric::{L1Metric, L2Metric, LInfMetric, LpMetric, Metric, L2};
pub use numeric::DigitalInteger;
pub use point::{Point, PointVector, RealPoint, RealVector, Vector};
pub use space::{DigitalSpace, Space, Subcospace, Z2, Z3};
pub use traits::{DigitalSurface, OrientedSurfel, SurfelEmbedder};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ConstantKernel, DigitalSpace, DigitalSurface, EstimatorConfig, GaussianKernel, L2Metric,
        Metric, OrientedSurfel, Point, RealPoint, RealVector, Result, Space, SurfelEmbedder,
        WeightKernel, Z2, Z3,
    };

    pub use crate::error::Error;
}
