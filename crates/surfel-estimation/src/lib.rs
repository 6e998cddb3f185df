//! Local estimators on digital surfaces
//!
//! A local estimator computes one quantity per surfel (a normal vector, a
//! scalar, ...) from the surfels around it:
//!
//! 1. [`NeighborhoodEnumerator`] gathers the surfels within a metric radius,
//!    nearest first, by walking surface adjacency
//! 2. a [`WeightKernel`](surfel_core::WeightKernel) turns each distance into
//!    a weight
//! 3. an elementary functor ([`ConvolutionFunctor`] or [`FittingFunctor`],
//!    lifted by [`Convolution`] / [`Fitting`]) reduces the weighted
//!    neighbourhood to the quantity
//!
//! [`LocalEstimatorAdapter`] ties these together over a borrowed surface.
//!
//! # Features
//!
//! - `parallel`: `LocalEstimatorAdapter::par_eval` on the rayon pool

pub mod adapter;
pub mod functor;
pub mod neighborhood;
pub mod normal;
pub mod scalar;

pub use adapter::{AdapterState, EvalAll, LocalEstimatorAdapter, Ready, Unconfigured};
pub use functor::{
    convolution, fitting, Convolution, ConvolutionFunctor, Fitting, FittingFunctor, FunctorShape,
    SurfelFunctor, WeightedSurfel,
};
pub use neighborhood::{NeighborEntry, Neighborhood, NeighborhoodEnumerator};
pub use normal::{ElementaryConvolutionNormal, LinearLeastSquaresNormal};
pub use scalar::WeightedScalarMean;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        convolution, fitting, ConvolutionFunctor, ElementaryConvolutionNormal, FittingFunctor,
        LinearLeastSquaresNormal, LocalEstimatorAdapter, SurfelFunctor, WeightedScalarMean,
        WeightedSurfel,
    };
}
