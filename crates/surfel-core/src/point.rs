//! Fixed-size integer points and vectors
//!
//! A [`PointVector`] is a tuple of `N` integer coordinates. Points and
//! displacement vectors share the representation, as in most digital geometry
//! kernels; [`Point`] and [`Vector`] are aliases used for readability.
//! Continuous coordinates use `nalgebra` static vectors.

use crate::numeric::DigitalInteger;
use crate::space::AssertSubdimension;
use nalgebra::SVector;
use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, Neg, Sub, SubAssign};

/// Point in the continuous ambient space of dimension `N`
pub type RealPoint<const N: usize> = SVector<f64, N>;

/// Vector in the continuous ambient space of dimension `N`
pub type RealVector<const N: usize> = SVector<f64, N>;

/// Integer tuple of length `N`
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PointVector<I, const N: usize> {
    coords: [I; N],
}

/// Digital point
pub type Point<I, const N: usize> = PointVector<I, N>;

/// Digital displacement
pub type Vector<I, const N: usize> = PointVector<I, N>;

impl<I: DigitalInteger, const N: usize> PointVector<I, N> {
    /// Create from raw coordinates
    #[inline]
    pub const fn new(coords: [I; N]) -> Self {
        Self { coords }
    }

    /// The origin / null vector
    #[inline]
    pub fn zero() -> Self {
        Self::diagonal(I::zero())
    }

    /// All coordinates equal to `value`
    #[inline]
    pub fn diagonal(value: I) -> Self {
        Self { coords: [value; N] }
    }

    /// `value` along `axis`, zero elsewhere
    ///
    /// # Panics
    /// If `axis >= N`.
    pub fn base(axis: usize, value: I) -> Self {
        let mut p = Self::zero();
        p.coords[axis] = value;
        p
    }

    /// Number of coordinates
    #[inline]
    pub const fn dimension(&self) -> usize {
        N
    }

    #[inline]
    pub fn coords(&self) -> &[I; N] {
        &self.coords
    }

    #[inline]
    pub fn into_coords(self) -> [I; N] {
        self.coords
    }

    /// Scalar product
    pub fn dot(&self, other: &Self) -> I {
        self.coords
            .iter()
            .zip(other.coords.iter())
            .fold(I::zero(), |acc, (&a, &b)| acc + a * b)
    }

    /// L1 norm
    pub fn norm1(&self) -> f64 {
        self.coords.iter().map(|c| c.abs().as_f64()).sum()
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.coords
            .iter()
            .map(|c| {
                let v = c.as_f64();
                v * v
            })
            .sum::<f64>()
            .sqrt()
    }

    /// L-infinity norm
    pub fn norm_inf(&self) -> f64 {
        self.coords
            .iter()
            .map(|c| c.abs().as_f64())
            .fold(0.0, f64::max)
    }

    /// Component-wise maximum
    pub fn sup(&self, other: &Self) -> Self {
        let mut out = *self;
        for (o, &b) in out.coords.iter_mut().zip(other.coords.iter()) {
            *o = (*o).max(b);
        }
        out
    }

    /// Component-wise minimum
    pub fn inf(&self, other: &Self) -> Self {
        let mut out = *self;
        for (o, &b) in out.coords.iter_mut().zip(other.coords.iter()) {
            *o = (*o).min(b);
        }
        out
    }

    /// `true` when every coordinate is `<=` the matching one in `other`
    pub fn is_lower(&self, other: &Self) -> bool {
        self.coords
            .iter()
            .zip(other.coords.iter())
            .all(|(a, b)| a <= b)
    }

    /// Keep the first `D` coordinates.
    ///
    /// This is the projection whose target type is the `D`-dimensional
    /// subspace of the owning space. `D` must satisfy `0 < D <= N`.
    pub fn project<const D: usize>(&self) -> PointVector<I, D> {
        #[allow(clippy::let_unit_value)]
        let () = AssertSubdimension::<D, N>::OK;
        PointVector {
            coords: std::array::from_fn(|i| self.coords[i]),
        }
    }

    /// Embed into continuous coordinates
    pub fn to_real(&self) -> RealPoint<N> {
        RealPoint::<N>::from_fn(|i, _| self.coords[i].as_f64())
    }
}

impl<I: DigitalInteger, const N: usize> Default for PointVector<I, N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<I, const N: usize> From<[I; N]> for PointVector<I, N> {
    fn from(coords: [I; N]) -> Self {
        Self { coords }
    }
}

impl<I, const N: usize> Index<usize> for PointVector<I, N> {
    type Output = I;

    #[inline]
    fn index(&self, index: usize) -> &I {
        &self.coords[index]
    }
}

impl<I, const N: usize> IndexMut<usize> for PointVector<I, N> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut I {
        &mut self.coords[index]
    }
}

impl<I: DigitalInteger, const N: usize> Add for PointVector<I, N> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<I: DigitalInteger, const N: usize> AddAssign for PointVector<I, N> {
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.coords.iter_mut().zip(rhs.coords) {
            *a = *a + b;
        }
    }
}

impl<I: DigitalInteger, const N: usize> Sub for PointVector<I, N> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self -= rhs;
        self
    }
}

impl<I: DigitalInteger, const N: usize> SubAssign for PointVector<I, N> {
    fn sub_assign(&mut self, rhs: Self) {
        for (a, b) in self.coords.iter_mut().zip(rhs.coords) {
            *a = *a - b;
        }
    }
}

impl<I: DigitalInteger, const N: usize> Neg for PointVector<I, N> {
    type Output = Self;

    fn neg(mut self) -> Self {
        for a in self.coords.iter_mut() {
            *a = -*a;
        }
        self
    }
}

impl<I: DigitalInteger, const N: usize> Mul<I> for PointVector<I, N> {
    type Output = Self;

    fn mul(mut self, rhs: I) -> Self {
        for a in self.coords.iter_mut() {
            *a = *a * rhs;
        }
        self
    }
}

impl<I: DigitalInteger, const N: usize> fmt::Display for PointVector<I, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    type P3 = Point<i32, 3>;

    #[test]
    fn test_arithmetic() {
        let a = P3::new([1, 2, 3]);
        let b = P3::new([4, -5, 6]);
        assert_eq!(a + b, P3::new([5, -3, 9]));
        assert_eq!(b - a, P3::new([3, -7, 3]));
        assert_eq!(-a, P3::new([-1, -2, -3]));
        assert_eq!(a * 2, P3::new([2, 4, 6]));
        assert_eq!(a.dot(&b), 4 - 10 + 18);
    }

    #[test]
    fn test_norms() {
        let v = Vector::<i32, 3>::new([3, -4, 0]);
        assert_relative_eq!(v.norm(), 5.0);
        assert_relative_eq!(v.norm1(), 7.0);
        assert_relative_eq!(v.norm_inf(), 4.0);
    }

    #[test]
    fn test_sup_inf_lower() {
        let a = P3::new([1, 5, -2]);
        let b = P3::new([3, 0, -2]);
        assert_eq!(a.sup(&b), P3::new([3, 5, -2]));
        assert_eq!(a.inf(&b), P3::new([1, 0, -2]));
        assert!(a.inf(&b).is_lower(&a));
        assert!(!a.is_lower(&b));
    }

    #[test]
    fn test_base_and_index() {
        let mut e = P3::base(1, 7);
        assert_eq!(e.into_coords(), [0, 7, 0]);
        e[2] = -1;
        assert_eq!(e[2], -1);
        assert_eq!(e.dimension(), 3);
    }

    #[test]
    fn test_project_truncates() {
        let p = P3::new([7, 8, 9]);
        let q: Point<i32, 2> = p.project::<2>();
        assert_eq!(q, Point::<i32, 2>::new([7, 8]));
    }

    #[test]
    fn test_to_real_and_display() {
        let p = P3::new([1, -2, 3]);
        let r = p.to_real();
        assert_relative_eq!(r[1], -2.0);
        assert_eq!(p.to_string(), "(1, -2, 3)");
    }
}
