//! Digital surface given implicitly by a foreground predicate
//!
//! Nothing is stored besides the predicate and a starting bel: adjacency is
//! recomputed from the predicate on every query and the full surface is
//! discovered lazily by a breadth-first walk.

use std::fmt;

use surfel_core::traits::DigitalSurface;
use surfel_core::{DigitalInteger, Error, Point, Result};

use crate::adjacency::SurfelAdjacency;
use crate::khalimsky::{KhalimskySpace, SignedSurfel};
use crate::shapes::PointPredicate;
use crate::surface::BreadthFirstTraversal;

/// Boundary component of `{p in space | predicate(p)}` containing a start bel
///
/// Voxels outside the space bounds are treated as background, so the
/// surface is always closed.
pub struct ImplicitDigitalSurface<I, const N: usize, P> {
    space: KhalimskySpace<I, N>,
    predicate: P,
    adjacency: SurfelAdjacency,
    start: SignedSurfel<I, N>,
}

impl<I, const N: usize, P> ImplicitDigitalSurface<I, N, P>
where
    I: DigitalInteger,
    P: PointPredicate<I, N>,
{
    /// Build the surface; `start` must separate a foreground voxel from a
    /// background one.
    pub fn new(
        space: KhalimskySpace<I, N>,
        predicate: P,
        adjacency: SurfelAdjacency,
        start: SignedSurfel<I, N>,
    ) -> Result<Self> {
        let surface = Self {
            space,
            predicate,
            adjacency,
            start,
        };
        if !surface.is_bel(&start) {
            return Err(Error::InvalidParameter(format!(
                "{start} is not a boundary surfel of the shape"
            )));
        }
        Ok(surface)
    }

    /// Foreground test, bounds included
    #[inline]
    pub fn is_inside(&self, p: &Point<I, N>) -> bool {
        self.space.contains(p) && self.predicate.contains(p)
    }

    /// `true` if `surfel` has a foreground interior and a background exterior
    pub fn is_bel(&self, surfel: &SignedSurfel<I, N>) -> bool {
        self.is_inside(&surfel.inner_voxel()) && !self.is_inside(&surfel.outer_voxel())
    }

    pub fn space(&self) -> &KhalimskySpace<I, N> {
        &self.space
    }

    pub fn predicate(&self) -> &P {
        &self.predicate
    }

    pub fn adjacency(&self) -> SurfelAdjacency {
        self.adjacency
    }

    pub fn start(&self) -> &SignedSurfel<I, N> {
        &self.start
    }
}

impl<I, const N: usize, P> DigitalSurface for ImplicitDigitalSurface<I, N, P>
where
    I: DigitalInteger,
    P: PointPredicate<I, N>,
{
    type Surfel = SignedSurfel<I, N>;
    type Surfels<'a>
        = BreadthFirstTraversal<'a, Self>
    where
        Self: 'a;

    fn write_neighbors(&self, surfel: &Self::Surfel, out: &mut Vec<Self::Surfel>) {
        self.adjacency
            .write_followers(surfel, |p: &Point<I, N>| self.is_inside(p), out);
    }

    fn surfels(&self) -> Self::Surfels<'_> {
        BreadthFirstTraversal::new(self, self.start)
    }
}

impl<I: DigitalInteger, const N: usize, P> fmt::Debug for ImplicitDigitalSurface<I, N, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImplicitDigitalSurface")
            .field("space", &self.space)
            .field("adjacency", &self.adjacency)
            .field("start", &self.start)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    type P3 = Point<i32, 3>;

    fn cube_surface(
        half: i32,
    ) -> ImplicitDigitalSurface<i32, 3, impl PointPredicate<i32, 3>> {
        let space = KhalimskySpace::new(P3::diagonal(-8), P3::diagonal(8)).unwrap();
        let cube = move |p: &P3| p.norm_inf() <= half as f64;
        let start = space.surfel(&P3::new([half, 0, 0]), 0, true);
        ImplicitDigitalSurface::new(space, cube, SurfelAdjacency::Interior, start).unwrap()
    }

    #[test]
    fn test_cube_surfel_count() {
        // A cube of side 2h+1 has 6 (2h+1)^2 boundary facets.
        for half in [0, 1, 2] {
            let surface = cube_surface(half);
            let side = (2 * half + 1) as usize;
            let surfels: Vec<_> = surface.surfels().collect();
            assert_eq!(surfels.len(), 6 * side * side);
            let unique: HashSet<_> = surfels.iter().copied().collect();
            assert_eq!(unique.len(), surfels.len());
            assert!(surfels.iter().all(|s| surface.is_bel(s)));
        }
    }

    #[test]
    fn test_every_surfel_has_four_neighbours() {
        let surface = cube_surface(1);
        for s in surface.surfels() {
            let neighbours = surface.neighbors(&s);
            assert_eq!(neighbours.len(), 4);
            assert!(neighbours.iter().all(|n| surface.is_bel(n)));
        }
    }

    #[test]
    fn test_traversal_restarts() {
        let surface = cube_surface(1);
        let first: Vec<_> = surface.surfels().collect();
        let second: Vec<_> = surface.surfels().collect();
        assert_eq!(first, second);
        assert_eq!(first[0], *surface.start());
    }

    #[test]
    fn test_rejects_non_bel_start() {
        let space = KhalimskySpace::new(P3::diagonal(-4), P3::diagonal(4)).unwrap();
        let cube = |p: &P3| p.norm_inf() <= 1.0;
        let interior = space.surfel(&P3::zero(), 0, true);
        let err = ImplicitDigitalSurface::new(space, cube, SurfelAdjacency::Interior, interior);
        assert!(matches!(err, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_bounds_close_the_surface() {
        // Whole domain is foreground: the surface is the domain boundary.
        let space = KhalimskySpace::new(Point::<i32, 2>::zero(), Point::new([2, 1])).unwrap();
        let everything = |_: &Point<i32, 2>| true;
        let start = space.surfel(&Point::new([2, 0]), 0, true);
        let surface =
            ImplicitDigitalSurface::new(space, everything, SurfelAdjacency::Exterior, start)
                .unwrap();
        assert_eq!(surface.surfels().count(), 2 * (3 + 2));
    }
}
