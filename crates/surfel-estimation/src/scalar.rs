//! Weighted scalar averaging over a neighbourhood

use std::fmt;

use surfel_core::{Error, Result, SurfelEmbedder};

use crate::functor::{ConvolutionFunctor, WeightedSurfel};

/// Weighted mean of a per-surfel scalar field
///
/// `field` is evaluated once per neighbour. The result is
/// `sum(w * field(s)) / sum(w)`; a zero total weight is
/// [`Error::Degenerate`].
#[derive(Clone, Copy)]
pub struct WeightedScalarMean<E, F> {
    embedder: E,
    field: F,
}

impl<E, F> WeightedScalarMean<E, F> {
    pub fn new(embedder: E, field: F) -> Self {
        Self { embedder, field }
    }
}

impl<E: fmt::Debug, F> fmt::Debug for WeightedScalarMean<E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedScalarMean")
            .field("embedder", &self.embedder)
            .finish_non_exhaustive()
    }
}

impl<S, E, F, const N: usize> ConvolutionFunctor<S, N> for WeightedScalarMean<E, F>
where
    E: SurfelEmbedder<S, N>,
    F: Fn(&S) -> f64,
{
    type Quantity = f64;
    type Embedder = E;
    type Accumulator = f64;

    fn embedder(&self) -> &E {
        &self.embedder
    }

    fn zero(&self) -> f64 {
        0.0
    }

    #[inline]
    fn accumulate(&self, acc: &mut f64, sample: &WeightedSurfel<S>) {
        *acc += sample.weight * (self.field)(&sample.surfel);
    }

    fn finalize(&self, acc: f64, total_weight: f64) -> Result<f64> {
        if total_weight <= 0.0 {
            return Err(Error::Degenerate("zero total weight".into()));
        }
        let mean = acc / total_weight;
        if !mean.is_finite() {
            return Err(Error::non_finite("weighted mean"));
        }
        Ok(mean)
    }
}
