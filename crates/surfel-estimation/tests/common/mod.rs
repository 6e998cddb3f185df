//! Shared fixtures for estimator integration tests

#![allow(dead_code)]

use surfel_core::{Point, RealVector, SurfelEmbedder};
use surfel_topology::{
    find_bel_along_axis, CanonicSurfelEmbedder, ImplicitDigitalSurface, ImplicitEllipsoid,
    KhalimskySpace, SignedSurfel, SurfelAdjacency,
};

pub use approx::assert_relative_eq;

pub type P3 = Point<i32, 3>;
pub type Surfel = SignedSurfel<i32, 3>;
pub type EllipsoidSurface = ImplicitDigitalSurface<i32, 3, ImplicitEllipsoid>;
pub type Embedder = CanonicSurfelEmbedder<i32, 3>;

pub fn ellipsoid() -> ImplicitEllipsoid {
    ImplicitEllipsoid::new(6.0, 4.5, 3.4).unwrap()
}

/// Digital ellipsoid (6.0, 4.5, 3.4) in `[-10, 10]^3`, starting at the `+x` tip
pub fn ellipsoid_surface() -> EllipsoidSurface {
    let space = KhalimskySpace::new(P3::diagonal(-10), P3::diagonal(10)).unwrap();
    let shape = ellipsoid();
    let bel = find_bel_along_axis(&space, &shape, &P3::zero(), 0).unwrap();
    ImplicitDigitalSurface::new(space, shape, SurfelAdjacency::Interior, bel).unwrap()
}

/// Exact outward normal of the ellipsoid at the embedding of `surfel`
pub fn true_normal(surfel: &Surfel) -> RealVector<3> {
    ellipsoid().outward_normal(&Embedder::new().embed(surfel))
}

/// Angle between two unit vectors, in radians
pub fn angle(a: &RealVector<3>, b: &RealVector<3>) -> f64 {
    a.dot(b).clamp(-1.0, 1.0).acos()
}
