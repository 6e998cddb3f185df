//! Implicit shapes: predicates over lattice points
//!
//! A digital shape is described by a predicate telling whether a voxel
//! belongs to the foreground. Closures work directly; the ellipsoid and the
//! ball below also know their exact outward normals, which makes them handy
//! references when checking estimators.

use serde::{Deserialize, Serialize};
use surfel_core::{DigitalInteger, Error, Point, RealPoint, RealVector, Result};

/// Foreground predicate over `N`-dimensional lattice points
pub trait PointPredicate<I, const N: usize>: Send + Sync {
    fn contains(&self, p: &Point<I, N>) -> bool;
}

impl<I, F, const N: usize> PointPredicate<I, N> for F
where
    F: Fn(&Point<I, N>) -> bool + Send + Sync,
{
    #[inline]
    fn contains(&self, p: &Point<I, N>) -> bool {
        self(p)
    }
}

/// Axis-aligned ellipsoid `(x/a)² + (y/b)² + (z/c)² <= 1` centred at the origin
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImplicitEllipsoid {
    a: f64,
    b: f64,
    c: f64,
}

impl ImplicitEllipsoid {
    /// Semi-axes must be finite and positive
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self> {
        for (name, v) in [("a", a), ("b", b), ("c", c)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(Error::InvalidParameter(format!(
                    "ellipsoid semi-axis {name}={v} must be finite and positive"
                )));
            }
        }
        Ok(Self { a, b, c })
    }

    pub fn semi_axes(&self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }

    /// Value of the implicit function; `<= 1` inside
    pub fn level(&self, p: &RealPoint<3>) -> f64 {
        let x = p[0] / self.a;
        let y = p[1] / self.b;
        let z = p[2] / self.c;
        x * x + y * y + z * z
    }

    /// Unit gradient of the implicit function at `p`
    ///
    /// On the boundary this is the exact outward normal.
    pub fn outward_normal(&self, p: &RealPoint<3>) -> RealVector<3> {
        RealVector::<3>::new(
            p[0] / (self.a * self.a),
            p[1] / (self.b * self.b),
            p[2] / (self.c * self.c),
        )
        .normalize()
    }
}

impl<I: DigitalInteger> PointPredicate<I, 3> for ImplicitEllipsoid {
    #[inline]
    fn contains(&self, p: &Point<I, 3>) -> bool {
        self.level(&p.to_real()) <= 1.0
    }
}

/// Euclidean ball in dimension `N`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImplicitBall<const N: usize> {
    center: RealPoint<N>,
    radius: f64,
}

impl<const N: usize> ImplicitBall<N> {
    pub fn new(center: RealPoint<N>, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "ball radius {radius} must be finite and positive"
            )));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> &RealPoint<N> {
        &self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Unit vector from the centre towards `p`
    pub fn outward_normal(&self, p: &RealPoint<N>) -> RealVector<N> {
        (p - self.center).normalize()
    }
}

impl<I: DigitalInteger, const N: usize> PointPredicate<I, N> for ImplicitBall<N> {
    #[inline]
    fn contains(&self, p: &Point<I, N>) -> bool {
        (p.to_real() - self.center).norm() <= self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ellipsoid_membership() {
        let e = ImplicitEllipsoid::new(6.0, 4.5, 3.4).unwrap();
        assert!(e.contains(&Point::<i32, 3>::new([6, 0, 0])));
        assert!(!e.contains(&Point::<i32, 3>::new([7, 0, 0])));
        assert!(e.contains(&Point::<i32, 3>::new([0, 4, 3])) == (16.0 / 20.25 + 9.0 / 11.56 <= 1.0));
        assert!(ImplicitEllipsoid::new(0.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_ellipsoid_normal() {
        let e = ImplicitEllipsoid::new(6.0, 4.5, 3.4).unwrap();
        let n = e.outward_normal(&RealPoint::<3>::new(6.0, 0.0, 0.0));
        assert_relative_eq!(n, RealVector::<3>::new(1.0, 0.0, 0.0));
        let n = e.outward_normal(&RealPoint::<3>::new(0.0, 0.0, -3.4));
        assert_relative_eq!(n, RealVector::<3>::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_ball_2d() {
        let ball = ImplicitBall::new(RealPoint::<2>::zeros(), 3.0).unwrap();
        assert!(PointPredicate::<i64, 2>::contains(&ball, &Point::new([3, 0])));
        assert!(!PointPredicate::<i64, 2>::contains(&ball, &Point::new([3, 1])));
        assert_relative_eq!(
            ball.outward_normal(&RealPoint::<2>::new(0.0, 2.0)),
            RealVector::<2>::new(0.0, 1.0)
        );
        assert!(ImplicitBall::new(RealPoint::<2>::zeros(), -1.0).is_err());
    }

    #[test]
    fn test_closure_predicate() {
        let half_space = |p: &Point<i32, 2>| p[0] <= 0;
        assert!(half_space.contains(&Point::new([0, 5])));
        assert!(!half_space.contains(&Point::new([1, 5])));
    }
}
