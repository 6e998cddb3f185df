//! Canonic embedding of signed surfels into real space

use std::fmt;
use std::marker::PhantomData;

use surfel_core::{DigitalInteger, RealPoint, SurfelEmbedder};

use crate::khalimsky::SignedSurfel;

/// Embeds a surfel at the centre of its facet.
///
/// Khalimsky coordinate `k` maps to `(k - 1) / 2`, so voxel centres land on
/// integer points and facets halfway between two of them.
pub struct CanonicSurfelEmbedder<I, const N: usize> {
    _integer: PhantomData<fn() -> I>,
}

impl<I, const N: usize> CanonicSurfelEmbedder<I, N> {
    pub const fn new() -> Self {
        Self {
            _integer: PhantomData,
        }
    }
}

impl<I, const N: usize> Default for CanonicSurfelEmbedder<I, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, const N: usize> Clone for CanonicSurfelEmbedder<I, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, const N: usize> Copy for CanonicSurfelEmbedder<I, N> {}

impl<I, const N: usize> fmt::Debug for CanonicSurfelEmbedder<I, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanonicSurfelEmbedder<{}>", N)
    }
}

impl<I: DigitalInteger, const N: usize> SurfelEmbedder<SignedSurfel<I, N>, N>
    for CanonicSurfelEmbedder<I, N>
{
    #[inline]
    fn embed(&self, surfel: &SignedSurfel<I, N>) -> RealPoint<N> {
        RealPoint::<N>::from_fn(|k, _| (surfel.kcoords()[k].as_f64() - 1.0) / 2.0)
    }
}
