//! Surfel adjacency on the boundary of a voxel set
//!
//! Given a surfel `s` with interior voxel `v`, exterior voxel `w` and a
//! tracking direction `d` orthogonal to `s`, exactly one of three surfels
//! continues the boundary in direction `d`:
//!
//! - *concave*: between `w + d` (interior) and `w`
//! - *flat*: between `v + d` (interior) and `w + d`
//! - *convex*: between `v` and `v + d` (exterior)
//!
//! Interior adjacency tests the candidates in that order, which keeps the
//! interior connected across diagonal configurations; exterior adjacency
//! tests them in reverse order.

use serde::{Deserialize, Serialize};
use surfel_core::{DigitalInteger, Point};

use crate::khalimsky::SignedSurfel;

/// Convention used to resolve ambiguous (diagonal) boundary configurations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfelAdjacency {
    /// Prefer connecting interior voxels
    #[default]
    Interior,
    /// Prefer connecting exterior voxels
    Exterior,
}

impl SurfelAdjacency {
    /// Build from the boolean flag used by classical APIs (`true` = interior)
    pub fn from_interior_flag(interior: bool) -> Self {
        if interior {
            Self::Interior
        } else {
            Self::Exterior
        }
    }

    /// Surfel following `surfel` along `track_axis`, towards `+e` if `up`.
    ///
    /// `is_inside` classifies voxels. `track_axis` must differ from the
    /// orthogonal axis of `surfel`.
    pub fn follower<I, const N: usize, F>(
        &self,
        surfel: &SignedSurfel<I, N>,
        track_axis: usize,
        up: bool,
        is_inside: F,
    ) -> SignedSurfel<I, N>
    where
        I: DigitalInteger,
        F: Fn(&Point<I, N>) -> bool,
    {
        debug_assert_ne!(track_axis, surfel.axis());

        let step = if up { I::one() } else { -I::one() };
        let d = Point::<I, N>::base(track_axis, step);
        let v = surfel.inner_voxel();
        let w = surfel.outer_voxel();
        let v1 = v + d;
        let w1 = w + d;

        let concave = || SignedSurfel::from_inner_voxel(&w1, track_axis, !up);
        let flat = || SignedSurfel::from_inner_voxel(&v1, surfel.axis(), surfel.direct());
        let convex = || SignedSurfel::from_inner_voxel(&v, track_axis, up);

        match self {
            Self::Interior => {
                if is_inside(&w1) {
                    concave()
                } else if is_inside(&v1) {
                    flat()
                } else {
                    convex()
                }
            }
            Self::Exterior => {
                if !is_inside(&v1) {
                    convex()
                } else if !is_inside(&w1) {
                    flat()
                } else {
                    concave()
                }
            }
        }
    }

    /// All `2(N - 1)` boundary neighbours of `surfel`, appended to `out`
    pub fn write_followers<I, const N: usize, F>(
        &self,
        surfel: &SignedSurfel<I, N>,
        is_inside: F,
        out: &mut Vec<SignedSurfel<I, N>>,
    ) where
        I: DigitalInteger,
        F: Fn(&Point<I, N>) -> bool,
    {
        for axis in (0..N).filter(|&k| k != surfel.axis()) {
            for up in [true, false] {
                out.push(self.follower(surfel, axis, up, &is_inside));
            }
        }
    }
}
