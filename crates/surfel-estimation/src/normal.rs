//! Normal vector functors
//!
//! - [`ElementaryConvolutionNormal`]: weighted sum of the trivial (facet)
//!   normals of the neighbourhood, normalised
//! - [`LinearLeastSquaresNormal`]: weighted principal component analysis of
//!   the embedded neighbourhood; the normal is the direction of least
//!   variance

use nalgebra::DMatrix;
use surfel_core::{Error, OrientedSurfel, RealPoint, RealVector, Result, SurfelEmbedder};

use crate::functor::{ConvolutionFunctor, FittingFunctor, WeightedSurfel};

const NORM_EPSILON: f64 = 1e-12;

fn check_scale(h: f64) -> Result<f64> {
    if !h.is_finite() || h <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "grid step h={h} must be finite and positive"
        )));
    }
    Ok(h)
}

/// Convolution of trivial normals
///
/// Each neighbour contributes `weight * trivial_normal`. The sum is
/// normalised to unit length; a null sum is reported as
/// [`Error::Degenerate`].
#[derive(Clone, Copy, Debug)]
pub struct ElementaryConvolutionNormal<E> {
    embedder: E,
    h: f64,
}

impl<E> ElementaryConvolutionNormal<E> {
    /// `h` is the grid step of the digitisation
    pub fn new(embedder: E, h: f64) -> Result<Self> {
        Ok(Self {
            embedder,
            h: check_scale(h)?,
        })
    }

    pub fn h(&self) -> f64 {
        self.h
    }
}

impl<S, E, const N: usize> ConvolutionFunctor<S, N> for ElementaryConvolutionNormal<E>
where
    S: OrientedSurfel<N>,
    E: SurfelEmbedder<S, N>,
{
    type Quantity = RealVector<N>;
    type Embedder = E;
    type Accumulator = RealVector<N>;

    #[inline]
    fn embedder(&self) -> &E {
        &self.embedder
    }

    #[inline]
    fn zero(&self) -> RealVector<N> {
        RealVector::<N>::zeros()
    }

    #[inline]
    fn accumulate(&self, acc: &mut RealVector<N>, sample: &WeightedSurfel<S>) {
        *acc += sample.surfel.trivial_normal() * sample.weight;
    }

    fn finalize(&self, acc: RealVector<N>, _total_weight: f64) -> Result<RealVector<N>> {
        let norm = acc.norm();
        if !norm.is_finite() {
            return Err(Error::non_finite("convolved normal"));
        }
        if norm <= NORM_EPSILON {
            return Err(Error::Degenerate(
                "trivial normals cancel out over the neighbourhood".into(),
            ));
        }
        Ok(acc / norm)
    }
}

/// Plane fit by weighted principal component analysis
///
/// Surfels are embedded and scaled by `h`. The weighted covariance of the
/// points is diagonalised; the eigenvector of the smallest eigenvalue is
/// the normal, flipped to agree with the trivial normal of the centre
/// surfel. Needs at least `N` samples and a well-defined direction of least
/// variance.
#[derive(Clone, Copy, Debug)]
pub struct LinearLeastSquaresNormal<E> {
    embedder: E,
    h: f64,
}

impl<E> LinearLeastSquaresNormal<E> {
    pub fn new(embedder: E, h: f64) -> Result<Self> {
        Ok(Self {
            embedder,
            h: check_scale(h)?,
        })
    }

    pub fn h(&self) -> f64 {
        self.h
    }
}

impl<S, E, const N: usize> FittingFunctor<S, N> for LinearLeastSquaresNormal<E>
where
    S: OrientedSurfel<N>,
    E: SurfelEmbedder<S, N>,
{
    type Quantity = RealVector<N>;
    type Embedder = E;

    #[inline]
    fn embedder(&self) -> &E {
        &self.embedder
    }

    fn min_samples(&self) -> usize {
        N
    }

    fn fit(&self, samples: &[WeightedSurfel<S>]) -> Result<RealVector<N>> {
        let center = samples
            .first()
            .ok_or_else(|| Error::insufficient(N, 0))?;

        let points: Vec<RealPoint<N>> = samples
            .iter()
            .map(|s| self.embedder.embed(&s.surfel) * self.h)
            .collect();
        let total_weight: f64 = samples.iter().map(|s| s.weight).sum();
        if !total_weight.is_finite() {
            return Err(Error::non_finite("sample weights"));
        }
        if total_weight <= 0.0 {
            return Err(Error::Degenerate("zero total weight".into()));
        }

        let centroid = samples
            .iter()
            .zip(&points)
            .fold(RealPoint::<N>::zeros(), |acc, (s, p)| acc + p * s.weight)
            / total_weight;

        let mut covariance = DMatrix::<f64>::zeros(N, N);
        for (s, p) in samples.iter().zip(&points) {
            let d = p - centroid;
            for i in 0..N {
                for j in 0..N {
                    covariance[(i, j)] += s.weight * d[i] * d[j];
                }
            }
        }
        covariance /= total_weight;

        let eigen = covariance.symmetric_eigen();
        let mut order: Vec<usize> = (0..N).collect();
        order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));
        let smallest = order[0];
        let scale = eigen.eigenvalues[order[N - 1]].abs().max(NORM_EPSILON);
        if N > 1 && eigen.eigenvalues[order[1]] - eigen.eigenvalues[smallest] <= 1e-9 * scale {
            return Err(Error::Degenerate(
                "no unique direction of least variance".into(),
            ));
        }

        let column = eigen.eigenvectors.column(smallest);
        let mut normal = RealVector::<N>::from_fn(|k, _| column[k]);
        let norm = normal.norm();
        if !norm.is_finite() || norm <= NORM_EPSILON {
            return Err(Error::Computation("eigen decomposition failed".into()));
        }
        normal /= norm;
        if normal.dot(&center.surfel.trivial_normal()) < 0.0 {
            normal = -normal;
        }
        Ok(normal)
    }
}
