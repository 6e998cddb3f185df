//! Reference digital surfaces for surfel estimation
//!
//! This crate supplies concrete collaborators for the estimation layer:
//!
//! - [`KhalimskySpace`] and [`SignedSurfel`]: bounded cubical grid and its
//!   oriented facets
//! - [`SurfelAdjacency`]: interior / exterior boundary following
//! - [`ImplicitDigitalSurface`]: boundary of a predicate-defined shape,
//!   discovered lazily
//! - [`find_a_bel`], [`find_bel_along_axis`]: locate a starting bel
//! - [`CanonicSurfelEmbedder`]: surfels to facet centres
//! - [`DigitalSurface`]: single-owner surface handle
//!
//! # Example
//!
//! ```rust
//! use surfel_topology::{
//!     find_bel_along_axis, ImplicitDigitalSurface, ImplicitEllipsoid, KhalimskySpace,
//!     SurfelAdjacency,
//! };
//! use surfel_core::{DigitalSurface as _, Point};
//!
//! let space = KhalimskySpace::new(Point::<i32, 3>::diagonal(-10), Point::diagonal(10))?;
//! let shape = ImplicitEllipsoid::new(6.0, 4.5, 3.4)?;
//! let bel = find_bel_along_axis(&space, &shape, &Point::zero(), 0)?;
//! let surface = ImplicitDigitalSurface::new(space, shape, SurfelAdjacency::Interior, bel)?;
//! assert!(surface.surfels().count() > 100);
//! # Ok::<(), surfel_core::Error>(())
//! ```

pub mod adjacency;
pub mod bel;
pub mod embedder;
pub mod implicit;
pub mod khalimsky;
pub mod shapes;
pub mod surface;

pub use adjacency::SurfelAdjacency;
pub use bel::{find_a_bel, find_bel_along_axis};
pub use embedder::CanonicSurfelEmbedder;
pub use implicit::ImplicitDigitalSurface;
pub use khalimsky::{KhalimskySpace, SignedSurfel};
pub use shapes::{ImplicitBall, ImplicitEllipsoid, PointPredicate};
pub use surface::{BreadthFirstTraversal, DigitalSurface};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        find_a_bel, find_bel_along_axis, CanonicSurfelEmbedder, ImplicitDigitalSurface,
        ImplicitEllipsoid, KhalimskySpace, PointPredicate, SignedSurfel, SurfelAdjacency,
    };
}
