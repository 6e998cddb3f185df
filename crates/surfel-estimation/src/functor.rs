//! Elementary surfel functors
//!
//! An elementary functor turns a weighted neighbourhood into one quantity.
//! Two shapes exist:
//!
//! - [`ConvolutionFunctor`]: folds samples one by one into an accumulator,
//!   then finalizes against the total weight
//! - [`FittingFunctor`]: sees the whole weighted sample set at once
//!
//! The estimator is written against [`SurfelFunctor`] only. The zero-size
//! wrappers [`Convolution`] and [`Fitting`] lift either shape into it, so
//! the dispatch is fixed by the type and compiles down to a direct call.
//!
//! Functors take `&self` everywhere and keep per-call state on the stack.
//! A `Sync` functor can therefore be shared by concurrent evaluations.

use surfel_core::{Error, Result, SurfelEmbedder};

/// One neighbour handed to a functor
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedSurfel<S> {
    pub surfel: S,
    /// Metric distance to the centre surfel
    pub distance: f64,
    /// Kernel weight for that distance
    pub weight: f64,
}

/// How a functor consumes its samples
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FunctorShape {
    Convolution,
    Fitting,
}

/// Capability the local estimator is written against
pub trait SurfelFunctor<S, const N: usize> {
    /// Estimated quantity
    type Quantity;
    /// Embedder used to place surfels for the distance computation
    type Embedder: SurfelEmbedder<S, N>;

    fn embedder(&self) -> &Self::Embedder;

    fn shape(&self) -> FunctorShape;

    /// Estimate from a weighted neighbourhood, centre surfel first
    fn estimate(&self, samples: &[WeightedSurfel<S>]) -> Result<Self::Quantity>;
}

/// Incremental functor: `zero`, then `accumulate` per sample, then `finalize`
pub trait ConvolutionFunctor<S, const N: usize> {
    type Quantity;
    type Embedder: SurfelEmbedder<S, N>;
    type Accumulator;

    fn embedder(&self) -> &Self::Embedder;

    /// Fresh accumulator
    fn zero(&self) -> Self::Accumulator;

    fn accumulate(&self, acc: &mut Self::Accumulator, sample: &WeightedSurfel<S>);

    /// Produce the quantity; `total_weight` is the sum of accumulated weights
    fn finalize(&self, acc: Self::Accumulator, total_weight: f64) -> Result<Self::Quantity>;
}

/// Batch functor fitting a model to the whole weighted sample set
pub trait FittingFunctor<S, const N: usize> {
    type Quantity;
    type Embedder: SurfelEmbedder<S, N>;

    fn embedder(&self) -> &Self::Embedder;

    /// Fewest samples `fit` accepts
    fn min_samples(&self) -> usize {
        1
    }

    fn fit(&self, samples: &[WeightedSurfel<S>]) -> Result<Self::Quantity>;
}

/// Zero-cost adapter from [`ConvolutionFunctor`] to [`SurfelFunctor`]
#[derive(Clone, Copy, Debug, Default)]
pub struct Convolution<F>(F);

impl<F> Convolution<F> {
    #[inline]
    pub const fn new(functor: F) -> Self {
        Self(functor)
    }

    #[inline]
    pub const fn inner(&self) -> &F {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> F {
        self.0
    }
}

impl<S, F, const N: usize> SurfelFunctor<S, N> for Convolution<F>
where
    F: ConvolutionFunctor<S, N>,
{
    type Quantity = F::Quantity;
    type Embedder = F::Embedder;

    #[inline]
    fn embedder(&self) -> &Self::Embedder {
        self.0.embedder()
    }

    #[inline]
    fn shape(&self) -> FunctorShape {
        FunctorShape::Convolution
    }

    fn estimate(&self, samples: &[WeightedSurfel<S>]) -> Result<Self::Quantity> {
        let mut acc = self.0.zero();
        let mut total_weight = 0.0;
        for sample in samples {
            self.0.accumulate(&mut acc, sample);
            total_weight += sample.weight;
        }
        self.0.finalize(acc, total_weight)
    }
}

/// Zero-cost adapter from [`FittingFunctor`] to [`SurfelFunctor`]
#[derive(Clone, Copy, Debug, Default)]
pub struct Fitting<F>(F);

impl<F> Fitting<F> {
    #[inline]
    pub const fn new(functor: F) -> Self {
        Self(functor)
    }

    #[inline]
    pub const fn inner(&self) -> &F {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> F {
        self.0
    }
}

impl<S, F, const N: usize> SurfelFunctor<S, N> for Fitting<F>
where
    F: FittingFunctor<S, N>,
{
    type Quantity = F::Quantity;
    type Embedder = F::Embedder;

    #[inline]
    fn embedder(&self) -> &Self::Embedder {
        self.0.embedder()
    }

    #[inline]
    fn shape(&self) -> FunctorShape {
        FunctorShape::Fitting
    }

    fn estimate(&self, samples: &[WeightedSurfel<S>]) -> Result<Self::Quantity> {
        let needed = self.0.min_samples();
        if samples.len() < needed {
            return Err(Error::insufficient(needed, samples.len()));
        }
        self.0.fit(samples)
    }
}

/// Wrap a convolution functor
#[inline]
pub fn convolution<F>(functor: F) -> Convolution<F> {
    Convolution::new(functor)
}

/// Wrap a fitting functor
#[inline]
pub fn fitting<F>(functor: F) -> Fitting<F> {
    Fitting::new(functor)
}
