//! Locating a boundary element (bel) of an implicit shape

use rand::Rng;
use tracing::{debug, instrument, trace};

use surfel_core::{DigitalInteger, Error, Point, Result};

use crate::khalimsky::{KhalimskySpace, SignedSurfel};
use crate::shapes::PointPredicate;

fn is_inside<I, const N: usize, P>(space: &KhalimskySpace<I, N>, shape: &P, p: &Point<I, N>) -> bool
where
    I: DigitalInteger,
    P: PointPredicate<I, N>,
{
    space.contains(p) && shape.contains(p)
}

fn random_point<I, const N: usize, R>(space: &KhalimskySpace<I, N>, rng: &mut R) -> Result<Point<I, N>>
where
    I: DigitalInteger,
    R: Rng + ?Sized,
{
    let mut p = Point::<I, N>::zero();
    for k in 0..N {
        let c = rng.gen_range(space.lower()[k].as_i64()..=space.upper()[k].as_i64());
        p[k] = I::try_from_i64(c)
            .ok_or_else(|| Error::Computation(format!("coordinate {c} out of range for {}", I::NAME)))?;
    }
    Ok(p)
}

/// Find a bel by random sampling followed by dichotomy.
///
/// Up to `nb_tries` voxels are drawn uniformly in the bounds until both a
/// foreground and a background voxel have been seen. The segment between
/// them is then halved until the two ends are 1-adjacent.
#[instrument(skip(space, shape, rng))]
pub fn find_a_bel<I, const N: usize, P, R>(
    space: &KhalimskySpace<I, N>,
    shape: &P,
    nb_tries: usize,
    rng: &mut R,
) -> Result<SignedSurfel<I, N>>
where
    I: DigitalInteger,
    P: PointPredicate<I, N>,
    R: Rng + ?Sized,
{
    let mut inside = None;
    let mut outside = None;
    let mut tries = 0;
    while tries < nb_tries && (inside.is_none() || outside.is_none()) {
        tries += 1;
        let p = random_point(space, rng)?;
        if is_inside(space, shape, &p) {
            inside.get_or_insert(p);
        } else {
            outside.get_or_insert(p);
        }
    }
    let (Some(mut a), Some(mut b)) = (inside, outside) else {
        return Err(Error::BelNotFound { tries: nb_tries });
    };
    debug!("Sampled inside {} and outside {} after {} tries", a, b, tries);

    loop {
        let diff = b - a;
        if diff.norm1() == 1.0 {
            break;
        }
        let mut mid = a;
        for k in 0..N {
            mid[k] = a[k] + diff[k] / (I::one() + I::one());
        }
        if mid == a {
            // All components differ by at most one: step along the first one.
            let k = (0..N).find(|&k| diff[k] != I::zero()).unwrap_or(0);
            mid[k] = a[k] + diff[k];
        }
        trace!("Dichotomy {} .. {} -> {}", a, b, mid);
        if is_inside(space, shape, &mid) {
            a = mid;
        } else {
            b = mid;
        }
    }

    space
        .surfel_between(&a, &b)
        .ok_or_else(|| Error::Computation(format!("voxels {a} and {b} are not adjacent")))
}

/// Walk from a foreground voxel along `+e_axis` to the first bel.
///
/// Deterministic alternative to [`find_a_bel`]. Leaving the bounds counts as
/// reaching the background.
pub fn find_bel_along_axis<I, const N: usize, P>(
    space: &KhalimskySpace<I, N>,
    shape: &P,
    start: &Point<I, N>,
    axis: usize,
) -> Result<SignedSurfel<I, N>>
where
    I: DigitalInteger,
    P: PointPredicate<I, N>,
{
    if axis >= N {
        return Err(Error::InvalidParameter(format!(
            "axis {axis} out of range for dimension {N}"
        )));
    }
    if !is_inside(space, shape, start) {
        return Err(Error::InvalidParameter(format!(
            "start voxel {start} is not inside the shape"
        )));
    }
    let step = Point::<I, N>::base(axis, I::one());
    let mut current = *start;
    while current[axis] < space.upper()[axis] {
        let next = current + step;
        if !is_inside(space, shape, &next) {
            break;
        }
        current = next;
    }
    Ok(space.surfel(&current, axis, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::shapes::ImplicitEllipsoid;

    type P3 = Point<i32, 3>;

    fn domain() -> KhalimskySpace<i32, 3> {
        KhalimskySpace::new(P3::diagonal(-10), P3::diagonal(10)).unwrap()
    }

    #[test]
    fn test_find_a_bel_on_ellipsoid() {
        let space = domain();
        let shape = ImplicitEllipsoid::new(6.0, 4.5, 3.4).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let bel = find_a_bel(&space, &shape, 100_000, &mut rng).unwrap();
        assert!(shape.contains(&bel.inner_voxel()));
        assert!(!PointPredicate::<i32, 3>::contains(&shape, &bel.outer_voxel()));
    }

    #[test]
    fn test_find_a_bel_is_reproducible() {
        let space = domain();
        let shape = ImplicitEllipsoid::new(6.0, 4.5, 3.4).unwrap();
        let a = find_a_bel(&space, &shape, 1000, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        let b = find_a_bel(&space, &shape, 1000, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_find_a_bel_empty_shape() {
        let space = domain();
        let empty = |_: &P3| false;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = find_a_bel(&space, &empty, 50, &mut rng).unwrap_err();
        assert!(matches!(err, Error::BelNotFound { tries: 50 }));
    }

    #[test]
    fn test_find_a_bel_full_domain() {
        let space = domain();
        let full = |_: &P3| true;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(find_a_bel(&space, &full, 50, &mut rng).is_err());
    }

    #[test]
    fn test_find_bel_along_axis() {
        let space = domain();
        let shape = ImplicitEllipsoid::new(6.0, 4.5, 3.4).unwrap();
        let bel = find_bel_along_axis(&space, &shape, &P3::zero(), 0).unwrap();
        assert_eq!(bel.inner_voxel(), P3::new([6, 0, 0]));
        assert_eq!(bel.outer_voxel(), P3::new([7, 0, 0]));
        assert!(bel.direct());
    }

    #[test]
    fn test_find_bel_along_axis_hits_bounds() {
        let space = KhalimskySpace::new(P3::diagonal(-2), P3::diagonal(2)).unwrap();
        let full = |_: &P3| true;
        let bel = find_bel_along_axis(&space, &full, &P3::zero(), 2).unwrap();
        assert_eq!(bel.inner_voxel(), P3::new([0, 0, 2]));
        assert!(find_bel_along_axis(&space, &full, &P3::diagonal(5), 0).is_err());
        assert!(find_bel_along_axis(&space, &full, &P3::zero(), 3).is_err());
    }
}
