//! Bounded Khalimsky grid and signed surfels
//!
//! Cells of the cubical complex are addressed by Khalimsky coordinates:
//! voxel `x` has coordinates `2x + 1` on every axis, and the facet between
//! two voxels that differ along axis `k` has the even coordinate in between
//! on that axis. A surfel is such a facet together with an orientation
//! telling on which side the interior lies.

use std::fmt;

use surfel_core::{DigitalInteger, Error, OrientedSurfel, Point, Result, Space};

/// Bounded digital domain with Khalimsky cell addressing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KhalimskySpace<I, const N: usize> {
    lower: Point<I, N>,
    upper: Point<I, N>,
}

impl<I: DigitalInteger, const N: usize> KhalimskySpace<I, N> {
    /// Create the domain `[lower, upper]` (inclusive on every axis)
    pub fn new(lower: Point<I, N>, upper: Point<I, N>) -> Result<Self> {
        if !lower.is_lower(&upper) {
            return Err(Error::InvalidParameter(format!(
                "lower bound {lower} is not below upper bound {upper}"
            )));
        }
        // Khalimsky coordinates of the outer facets must stay representable.
        let representable = |p: &Point<I, N>| {
            p.coords().iter().all(|&c| {
                let k = 2 * c.as_i64() + 1;
                I::try_from_i64(k - 2).is_some() && I::try_from_i64(k + 2).is_some()
            })
        };
        if !representable(&lower) || !representable(&upper) {
            return Err(Error::InvalidParameter(format!(
                "bounds {lower}..{upper} overflow Khalimsky coordinates of {}",
                I::NAME
            )));
        }
        Ok(Self { lower, upper })
    }

    #[inline]
    pub fn lower(&self) -> &Point<I, N> {
        &self.lower
    }

    #[inline]
    pub fn upper(&self) -> &Point<I, N> {
        &self.upper
    }

    /// Digital space of the domain
    #[inline]
    pub fn space(&self) -> Space<I, N> {
        Space::new()
    }

    /// `true` if the voxel `p` lies inside the bounds
    #[inline]
    pub fn contains(&self, p: &Point<I, N>) -> bool {
        self.lower.is_lower(p) && p.is_lower(&self.upper)
    }

    /// Number of voxels along `axis`
    pub fn width(&self, axis: usize) -> i64 {
        self.upper[axis].as_i64() - self.lower[axis].as_i64() + 1
    }

    /// Surfel separating the voxel `inner` from its neighbour along `axis`.
    ///
    /// With `direct == true` the exterior neighbour is `inner + e_axis`,
    /// otherwise `inner - e_axis`.
    pub fn surfel(&self, inner: &Point<I, N>, axis: usize, direct: bool) -> SignedSurfel<I, N> {
        SignedSurfel::from_inner_voxel(inner, axis, direct)
    }

    /// Surfel between two voxels that differ by one unit on exactly one axis.
    ///
    /// Returns `None` when the voxels are not 1-adjacent.
    pub fn surfel_between(
        &self,
        inner: &Point<I, N>,
        outer: &Point<I, N>,
    ) -> Option<SignedSurfel<I, N>> {
        let diff = *outer - *inner;
        if diff.norm1() != 1.0 {
            return None;
        }
        let axis = (0..N).find(|&k| diff[k] != I::zero())?;
        Some(self.surfel(inner, axis, diff[axis] > I::zero()))
    }
}

/// Oriented facet between an interior and an exterior voxel
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignedSurfel<I, const N: usize> {
    kcoords: Point<I, N>,
    axis: usize,
    direct: bool,
}

impl<I: DigitalInteger, const N: usize> SignedSurfel<I, N> {
    /// Build from the interior voxel and the outward direction along `axis`
    pub fn from_inner_voxel(inner: &Point<I, N>, axis: usize, direct: bool) -> Self {
        let one = I::one();
        let mut kcoords = Point::<I, N>::zero();
        for k in 0..N {
            kcoords[k] = inner[k] + inner[k] + one;
        }
        kcoords[axis] = if direct {
            kcoords[axis] + one
        } else {
            kcoords[axis] - one
        };
        Self {
            kcoords,
            axis,
            direct,
        }
    }

    /// Khalimsky coordinates of the facet
    #[inline]
    pub fn kcoords(&self) -> &Point<I, N> {
        &self.kcoords
    }

    /// Axis orthogonal to the facet
    #[inline]
    pub fn axis(&self) -> usize {
        self.axis
    }

    /// `true` when the exterior lies towards `+e_axis`
    #[inline]
    pub fn direct(&self) -> bool {
        self.direct
    }

    /// Voxel on the interior side
    pub fn inner_voxel(&self) -> Point<I, N> {
        self.voxel(!self.direct)
    }

    /// Voxel on the exterior side
    pub fn outer_voxel(&self) -> Point<I, N> {
        self.voxel(self.direct)
    }

    fn voxel(&self, towards_positive: bool) -> Point<I, N> {
        let one = I::one();
        let two = one + one;
        let mut k = self.kcoords;
        k[self.axis] = if towards_positive {
            k[self.axis] + one
        } else {
            k[self.axis] - one
        };
        let mut p = Point::<I, N>::zero();
        for i in 0..N {
            p[i] = (k[i] - one) / two;
        }
        p
    }

    /// Same facet seen from the other side
    pub fn opposite(&self) -> Self {
        Self {
            kcoords: self.kcoords,
            axis: self.axis,
            direct: !self.direct,
        }
    }
}

impl<I: DigitalInteger, const N: usize> OrientedSurfel<N> for SignedSurfel<I, N> {
    #[inline]
    fn orth_direction(&self) -> usize {
        self.axis
    }

    #[inline]
    fn is_direct(&self) -> bool {
        self.direct
    }
}

impl<I: DigitalInteger, const N: usize> fmt::Debug for SignedSurfel<I, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Surfel{}{}{}",
            self.kcoords,
            if self.direct { '+' } else { '-' },
            self.axis
        )
    }
}

impl<I: DigitalInteger, const N: usize> fmt::Display for SignedSurfel<I, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
