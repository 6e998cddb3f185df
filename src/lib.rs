//! Local differential estimators on digital surfaces
//!
//! Umbrella crate re-exporting the workspace:
//!
//! - [`surfel_core`]: digital space kernel, points, metrics, kernels, error type
//! - [`surfel_topology`]: Khalimsky grids, implicit digital surfaces, bel search
//! - [`surfel_estimation`]: neighbourhood enumeration, surfel functors and the
//!   local estimator adapter
//!
//! # Example
//!
//! ```rust
//! use surfel_geometry::prelude::*;
//!
//! let space = KhalimskySpace::new(Point::<i32, 3>::diagonal(-10), Point::diagonal(10))?;
//! let shape = ImplicitEllipsoid::new(6.0, 4.5, 3.4)?;
//! let bel = find_bel_along_axis(&space, &shape, &Point::zero(), 0)?;
//! let surface = ImplicitDigitalSurface::new(space, shape, SurfelAdjacency::Interior, bel)?;
//!
//! let functor = convolution(ElementaryConvolutionNormal::new(
//!     CanonicSurfelEmbedder::<i32, 3>::new(),
//!     1.0,
//! )?);
//! let kernel = GaussianKernel::new(2.0)?;
//! let estimator = LocalEstimatorAdapter::new(&surface, &L2Metric, &functor, &kernel)
//!     .init(1.0, 5.0)?;
//!
//! let normal = estimator.eval(&bel)?;
//! assert!(normal[0] > 0.99);
//! # Ok::<(), surfel_geometry::Error>(())
//! ```

pub use surfel_core;
pub use surfel_estimation;
pub use surfel_topology;

pub use surfel_core::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use surfel_core::prelude::*;
    pub use surfel_estimation::prelude::*;
    pub use surfel_topology::prelude::*;
}
