//! Shared fixtures for topology integration tests

use surfel_core::Point;
use surfel_topology::{
    find_bel_along_axis, ImplicitDigitalSurface, ImplicitEllipsoid, KhalimskySpace,
    SurfelAdjacency,
};

pub type P3 = Point<i32, 3>;

/// Semi-axes of the reference ellipsoid
pub const SEMI_AXES: [f64; 3] = [6.0, 4.5, 3.4];

pub fn domain() -> KhalimskySpace<i32, 3> {
    KhalimskySpace::new(P3::diagonal(-10), P3::diagonal(10)).unwrap()
}

pub fn ellipsoid() -> ImplicitEllipsoid {
    ImplicitEllipsoid::new(SEMI_AXES[0], SEMI_AXES[1], SEMI_AXES[2]).unwrap()
}

/// Ellipsoid boundary starting from the bel on the `+x` axis
pub fn ellipsoid_surface(
    adjacency: SurfelAdjacency,
) -> ImplicitDigitalSurface<i32, 3, ImplicitEllipsoid> {
    let space = domain();
    let shape = ellipsoid();
    let bel = find_bel_along_axis(&space, &shape, &P3::zero(), 0).unwrap();
    ImplicitDigitalSurface::new(space, shape, adjacency, bel).unwrap()
}
