//! Dimension-generic digital space descriptor
//!
//! A [`Space`] is a zero-sized marker fixing an integer type and a dimension
//! at compile time. It holds no runtime state; its only job is to name the
//! point and vector types of a digital geometry and to derive the spaces of
//! lower dimension used when projecting.
//!
//! # Example
//!
//! ```rust
//! use surfel_core::space::{DigitalSpace, Space, Subcospace};
//!
//! type Z3 = Space<i32, 3>;
//!
//! assert_eq!(Z3::dim(), 3);
//! let plane = Z3::subspace::<2>();
//! assert_eq!(plane.dimension(), 2);
//!
//! // Codimension 1 of Z3 is a 2D space
//! let cospace: <Z3 as Subcospace<1>>::Type = Z3::subcospace::<1>();
//! assert_eq!(cospace.dimension(), 2);
//! ```

use crate::numeric::DigitalInteger;
use crate::point::{Point, PointVector, Vector};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Post-monomorphisation check that `0 < D <= N`
pub(crate) struct AssertSubdimension<const D: usize, const N: usize>;

impl<const D: usize, const N: usize> AssertSubdimension<D, N> {
    pub(crate) const OK: () = assert!(D > 0 && D <= N, "subspace dimension must be in 1..=N");
}

/// Type-level description of a digital space
///
/// Implemented by [`Space`]; generic code that only needs the point type and
/// the dimension should bound on this trait.
pub trait DigitalSpace: Copy + Default + Send + Sync + 'static {
    /// Integer type of the coordinates
    type Integer: DigitalInteger;

    /// Point type (tuple of `DIMENSION` integers)
    type Point;

    /// Displacement type
    type Vector;

    /// Space of dimension `D` over the same integers
    type Subspace<const D: usize>: DigitalSpace;

    /// Fixed dimension
    const DIMENSION: usize;
}

/// Digital space over the integer type `I` in dimension `N`
pub struct Space<I, const N: usize> {
    _integer: PhantomData<fn() -> I>,
}

/// Standard 2D digital plane
pub type Z2 = Space<i32, 2>;

/// Standard 3D digital space
pub type Z3 = Space<i32, 3>;

impl<I: DigitalInteger, const N: usize> Space<I, N> {
    /// Fixed dimension of the space
    pub const DIMENSION: usize = N;

    /// Create the (stateless) descriptor
    #[inline]
    pub const fn new() -> Self {
        Self {
            _integer: PhantomData,
        }
    }

    /// Dimension, resolved at compile time
    #[inline]
    pub const fn dim() -> usize {
        N
    }

    /// Same as [`Space::dim`] for an instance
    #[inline]
    pub const fn dimension(&self) -> usize {
        N
    }

    /// Descriptor of the `D`-dimensional subspace. Requires `0 < D <= N`.
    #[inline]
    pub fn subspace<const D: usize>() -> Space<I, D> {
        #[allow(clippy::let_unit_value)]
        let () = AssertSubdimension::<D, N>::OK;
        Space::new()
    }

    /// Descriptor of the space of dimension `N - C`
    #[inline]
    pub fn subcospace<const C: usize>() -> <Self as Subcospace<C>>::Type
    where
        Self: Subcospace<C>,
    {
        Default::default()
    }

    /// Always `true` for an instantiated space
    #[inline]
    pub const fn is_valid(&self) -> bool {
        N > 0
    }

    /// Origin of the space
    #[inline]
    pub fn origin() -> Point<I, N> {
        PointVector::zero()
    }
}

impl<I: DigitalInteger, const N: usize> DigitalSpace for Space<I, N> {
    type Integer = I;
    type Point = Point<I, N>;
    type Vector = Vector<I, N>;
    type Subspace<const D: usize> = Space<I, D>;

    const DIMENSION: usize = N;
}

/// Space obtained by removing `C` dimensions
///
/// Stable Rust cannot express `Space<I, { N - C }>` for generic `N`, so the
/// relation is spelled out for every dimension up to 8.
pub trait Subcospace<const C: usize> {
    /// Resulting space of dimension `N - C`
    type Type: DigitalSpace;
}

macro_rules! impl_subcospace {
    ($n:literal => $($c:literal : $d:literal),+) => {
        $(
            impl<I: DigitalInteger> Subcospace<$c> for Space<I, $n> {
                type Type = Space<I, $d>;
            }
        )+
    };
}

impl_subcospace!(1 => 0: 1);
impl_subcospace!(2 => 0: 2, 1: 1);
impl_subcospace!(3 => 0: 3, 1: 2, 2: 1);
impl_subcospace!(4 => 0: 4, 1: 3, 2: 2, 3: 1);
impl_subcospace!(5 => 0: 5, 1: 4, 2: 3, 3: 2, 4: 1);
impl_subcospace!(6 => 0: 6, 1: 5, 2: 4, 3: 3, 4: 2, 5: 1);
impl_subcospace!(7 => 0: 7, 1: 6, 2: 5, 3: 4, 4: 3, 5: 2, 6: 1);
impl_subcospace!(8 => 0: 8, 1: 7, 2: 6, 3: 5, 4: 4, 5: 3, 6: 2, 7: 1);

// Manual impls: deriving would put bounds on `I` that the marker does not need.

impl<I, const N: usize> Clone for Space<I, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, const N: usize> Copy for Space<I, N> {}

impl<I, const N: usize> Default for Space<I, N> {
    fn default() -> Self {
        Self {
            _integer: PhantomData,
        }
    }
}

impl<I, const N: usize> PartialEq for Space<I, N> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<I, const N: usize> Eq for Space<I, N> {}

impl<I, const N: usize> Hash for Space<I, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        N.hash(state);
    }
}

impl<I: DigitalInteger, const N: usize> fmt::Debug for Space<I, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Space<{}, {}>", I::NAME, N)
    }
}

impl<I: DigitalInteger, const N: usize> fmt::Display for Space<I, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Space dim={N}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dimension_of<S: DigitalSpace>() -> usize {
        S::DIMENSION
    }

    #[test]
    fn test_dimension() {
        assert_eq!(Z3::dim(), 3);
        assert_eq!(Z2::DIMENSION, 2);
        assert_eq!(Space::<i64, 5>::new().dimension(), 5);
        assert_eq!(dimension_of::<Z3>(), 3);
    }

    #[test]
    fn test_subspace_types() {
        let sub = Z3::subspace::<2>();
        assert_eq!(sub, Z2::new());
        assert_eq!(dimension_of::<<Z3 as DigitalSpace>::Subspace<1>>(), 1);
    }

    #[test]
    fn test_subcospace_types() {
        let c1: Z2 = Z3::subcospace::<1>();
        assert_eq!(c1.dimension(), 2);
        let c0: Z3 = Z3::subcospace::<0>();
        assert_eq!(c0.dimension(), 3);
        assert_eq!(Space::<i16, 8>::subcospace::<5>().dimension(), 3);
    }

    #[test]
    fn test_stateless_semantics() {
        let a = Z3::new();
        let b = a;
        assert_eq!(a, b);
        assert!(a.is_valid());
        assert_eq!(std::mem::size_of::<Z3>(), 0);
        assert_eq!(Z3::origin(), Point::<i32, 3>::zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Z3::new().to_string(), "[Space dim=3]");
        assert_eq!(format!("{:?}", Z2::new()), "Space<i32, 2>");
    }
}
