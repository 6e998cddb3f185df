//! Collaborator traits consumed by the estimators
//!
//! The estimation layer never builds surfaces itself. It is written against
//! these capabilities, which any digital surface implementation can provide:
//!
//! - [`DigitalSurface`]: surfel adjacency plus a full-surface traversal
//! - [`SurfelEmbedder`]: surfel → representative point in ambient space
//! - [`OrientedSurfel`]: orthogonal axis and outward orientation of a facet

use crate::point::{RealPoint, RealVector};
use std::fmt::Debug;
use std::hash::Hash;

/// Combinatorial surface made of surfels
///
/// Implementations own their surfels; estimators only hold a shared
/// reference and never mutate the surface.
pub trait DigitalSurface {
    /// Opaque surfel handle
    type Surfel: Clone + Eq + Hash + Debug;

    /// Lazy, finite, forward-only traversal of every surfel
    type Surfels<'a>: Iterator<Item = Self::Surfel>
    where
        Self: 'a;

    /// Append the surfels adjacent to `surfel` to `out`
    fn write_neighbors(&self, surfel: &Self::Surfel, out: &mut Vec<Self::Surfel>);

    /// Fresh traversal over the whole surface.
    ///
    /// Each call starts over; a traversal cannot be rewound.
    fn surfels(&self) -> Self::Surfels<'_>;

    /// Adjacent surfels of `surfel`
    fn neighbors(&self, surfel: &Self::Surfel) -> Vec<Self::Surfel> {
        let mut out = Vec::new();
        self.write_neighbors(surfel, &mut out);
        out
    }

    /// Number of surfels, when known without a traversal
    fn len_hint(&self) -> Option<usize> {
        None
    }
}

/// Maps a surfel to a point of the `N`-dimensional ambient space
pub trait SurfelEmbedder<S, const N: usize>: Send + Sync {
    fn embed(&self, surfel: &S) -> RealPoint<N>;
}

impl<S, E: SurfelEmbedder<S, N> + ?Sized, const N: usize> SurfelEmbedder<S, N> for &E {
    #[inline]
    fn embed(&self, surfel: &S) -> RealPoint<N> {
        (**self).embed(surfel)
    }
}

/// Surfel that knows its orientation in an `N`-dimensional grid
pub trait OrientedSurfel<const N: usize> {
    /// Axis orthogonal to the facet
    fn orth_direction(&self) -> usize;

    /// `true` when the outward normal points along `+e_k`, `k` the orthogonal axis
    fn is_direct(&self) -> bool;

    /// Unit outward normal of the facet
    fn trivial_normal(&self) -> RealVector<N> {
        let mut n = RealVector::<N>::zeros();
        n[self.orth_direction()] = if self.is_direct() { 1.0 } else { -1.0 };
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy)]
    struct Facet {
        axis: usize,
        direct: bool,
    }

    impl OrientedSurfel<3> for Facet {
        fn orth_direction(&self) -> usize {
            self.axis
        }

        fn is_direct(&self) -> bool {
            self.direct
        }
    }

    #[test]
    fn test_trivial_normal() {
        let up = Facet { axis: 2, direct: true };
        assert_eq!(up.trivial_normal(), RealVector::<3>::new(0.0, 0.0, 1.0));
        let left = Facet { axis: 0, direct: false };
        assert_eq!(left.trivial_normal(), RealVector::<3>::new(-1.0, 0.0, 0.0));
    }

    struct Ring(usize);

    impl DigitalSurface for Ring {
        type Surfel = usize;
        type Surfels<'a> = std::ops::Range<usize>;

        fn write_neighbors(&self, surfel: &usize, out: &mut Vec<usize>) {
            out.push((surfel + 1) % self.0);
            out.push((surfel + self.0 - 1) % self.0);
        }

        fn surfels(&self) -> Self::Surfels<'_> {
            0..self.0
        }
    }

    #[test]
    fn test_surface_defaults() {
        let ring = Ring(5);
        assert_eq!(ring.neighbors(&0), vec![1, 4]);
        assert_eq!(ring.surfels().count(), 5);
        assert_eq!(ring.len_hint(), None);
    }
}
