//! Local estimator adapter
//!
//! Binds a surface, a metric, an elementary functor and a weight kernel into
//! a per-surfel estimator. Evaluation at a surfel enumerates its metric
//! neighbourhood, weights every neighbour by its distance, and hands the
//! weighted neighbourhood to the functor.
//!
//! The adapter only borrows its collaborators. Radius bounds are checked
//! once by [`LocalEstimatorAdapter::init`], which moves the adapter into the
//! [`Ready`] state; evaluation methods exist only on that state.
//!
//! # Example
//!
//! ```rust
//! use surfel_core::{DigitalSurface as _, GaussianKernel, L2Metric, Point};
//! use surfel_estimation::{convolution, ElementaryConvolutionNormal, LocalEstimatorAdapter};
//! use surfel_topology::{
//!     find_bel_along_axis, CanonicSurfelEmbedder, ImplicitDigitalSurface, ImplicitEllipsoid,
//!     KhalimskySpace, SurfelAdjacency,
//! };
//!
//! let space = KhalimskySpace::new(Point::<i32, 3>::diagonal(-10), Point::diagonal(10))?;
//! let shape = ImplicitEllipsoid::new(6.0, 4.5, 3.4)?;
//! let bel = find_bel_along_axis(&space, &shape, &Point::zero(), 0)?;
//! let surface = ImplicitDigitalSurface::new(space, shape, SurfelAdjacency::Interior, bel)?;
//!
//! let functor = convolution(ElementaryConvolutionNormal::new(
//!     CanonicSurfelEmbedder::<i32, 3>::new(),
//!     1.0,
//! )?);
//! let kernel = GaussianKernel::new(2.0)?;
//! let estimator = LocalEstimatorAdapter::new(&surface, &L2Metric, &functor, &kernel)
//!     .init(1.0, 5.0)?;
//!
//! let first = surface.surfels().next().unwrap();
//! let normal = estimator.eval(&first)?;
//! assert!((normal.norm() - 1.0).abs() < 1e-9);
//! # Ok::<(), surfel_core::Error>(())
//! ```

use std::fmt;
use std::marker::PhantomData;

use surfel_core::{
    DigitalSurface, Error, EstimatorConfig, Metric, RadiusBounds, Result, WeightKernel,
    DEFAULT_MAX_VISITED,
};
use tracing::{debug, instrument};

use crate::functor::{FunctorShape, SurfelFunctor, WeightedSurfel};
use crate::neighborhood::{Neighborhood, NeighborhoodEnumerator};

/// Type-state markers
pub mod state {
    use surfel_core::RadiusBounds;

    /// Radius bounds not set yet
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Unconfigured;

    /// Radius bounds validated; evaluation available
    #[derive(Clone, Copy, Debug)]
    pub struct Ready {
        pub(crate) bounds: RadiusBounds,
    }
}

pub use state::{Ready, Unconfigured};

/// Adapter state trait
pub trait AdapterState {}

impl AdapterState for Unconfigured {}
impl AdapterState for Ready {}

/// Per-surfel estimator over a borrowed surface
///
/// `N` is the dimension of the ambient space the functor embeds surfels in.
pub struct LocalEstimatorAdapter<'a, Surf, M, F, K, const N: usize, State = Unconfigured> {
    surface: &'a Surf,
    metric: &'a M,
    functor: &'a F,
    kernel: &'a K,
    max_visited: usize,
    state: State,
    _dimension: PhantomData<[(); N]>,
}

impl<'a, Surf, M, F, K, const N: usize> LocalEstimatorAdapter<'a, Surf, M, F, K, N, Unconfigured>
where
    Surf: DigitalSurface,
    M: Metric<N>,
    F: SurfelFunctor<Surf::Surfel, N>,
    K: WeightKernel,
{
    /// Bind the collaborators; call [`init`](Self::init) before evaluating
    pub fn new(surface: &'a Surf, metric: &'a M, functor: &'a F, kernel: &'a K) -> Self {
        Self {
            surface,
            metric,
            functor,
            kernel,
            max_visited: DEFAULT_MAX_VISITED,
            state: Unconfigured,
            _dimension: PhantomData,
        }
    }
}

impl<'a, Surf, M, F, K, const N: usize, State> LocalEstimatorAdapter<'a, Surf, M, F, K, N, State>
where
    Surf: DigitalSurface,
    M: Metric<N>,
    F: SurfelFunctor<Surf::Surfel, N>,
    K: WeightKernel,
    State: AdapterState,
{
    /// Set the radius bounds, from any state.
    ///
    /// Requires `0 < min <= max`, both finite; anything else is
    /// [`Error::InvalidRadius`].
    pub fn init(
        self,
        min: f64,
        max: f64,
    ) -> Result<LocalEstimatorAdapter<'a, Surf, M, F, K, N, Ready>> {
        let bounds = RadiusBounds::new(min, max)?;
        debug!(
            "Local estimator ready: radius [{}, {}], {:?} functor, kernel {}, metric {}",
            bounds.min(),
            bounds.max(),
            self.functor.shape(),
            self.kernel.name(),
            self.metric.name()
        );
        Ok(LocalEstimatorAdapter {
            surface: self.surface,
            metric: self.metric,
            functor: self.functor,
            kernel: self.kernel,
            max_visited: self.max_visited,
            state: Ready { bounds },
            _dimension: PhantomData,
        })
    }

    /// Radius bounds and visit cap from a configuration
    pub fn init_with_config(
        mut self,
        config: &EstimatorConfig,
    ) -> Result<LocalEstimatorAdapter<'a, Surf, M, F, K, N, Ready>> {
        let bounds = config.validate()?;
        self.max_visited = config.max_visited;
        self.init(bounds.min(), bounds.max())
    }

    /// Cap on the surfels gathered per neighbourhood
    pub fn with_max_visited(mut self, max_visited: usize) -> Self {
        self.max_visited = max_visited.max(1);
        self
    }

    pub fn surface(&self) -> &'a Surf {
        self.surface
    }

    pub fn metric(&self) -> &'a M {
        self.metric
    }

    pub fn functor(&self) -> &'a F {
        self.functor
    }

    pub fn kernel(&self) -> &'a K {
        self.kernel
    }

    /// Whether the bound functor folds samples or fits them as a batch
    pub fn functor_shape(&self) -> FunctorShape {
        self.functor.shape()
    }

    fn enumerator(&self) -> NeighborhoodEnumerator<'a, Surf, M, F::Embedder> {
        NeighborhoodEnumerator::new(self.surface, self.metric, self.functor.embedder())
            .with_max_visited(self.max_visited)
    }
}

impl<'a, Surf, M, F, K, const N: usize> LocalEstimatorAdapter<'a, Surf, M, F, K, N, Ready>
where
    Surf: DigitalSurface,
    M: Metric<N>,
    F: SurfelFunctor<Surf::Surfel, N>,
    K: WeightKernel,
{
    pub fn bounds(&self) -> RadiusBounds {
        self.state.bounds
    }

    pub fn min_radius(&self) -> f64 {
        self.state.bounds.min()
    }

    pub fn max_radius(&self) -> f64 {
        self.state.bounds.max()
    }

    /// Estimate the quantity at `surfel` using the maximal radius.
    ///
    /// Functor errors are returned unchanged.
    #[instrument(level = "trace", skip(self))]
    pub fn eval(&self, surfel: &Surf::Surfel) -> Result<F::Quantity> {
        self.eval_within(surfel, self.state.bounds.max())
    }

    /// Estimate with an explicit radius in `[min_radius, max_radius]`
    pub fn eval_at_radius(&self, surfel: &Surf::Surfel, radius: f64) -> Result<F::Quantity> {
        if !self.state.bounds.contains(radius) {
            return Err(Error::InvalidParameter(format!(
                "radius {radius} outside configured bounds [{}, {}]",
                self.min_radius(),
                self.max_radius()
            )));
        }
        self.eval_within(surfel, radius)
    }

    /// Neighbourhood `eval` would use at `surfel`
    pub fn neighborhood(&self, surfel: &Surf::Surfel) -> Result<Neighborhood<Surf::Surfel>> {
        self.enumerator()
            .enumerate::<N>(surfel, self.state.bounds.max())
    }

    /// Lazily evaluate every surfel of a fresh surface traversal
    pub fn eval_all(&self) -> EvalAll<'_, 'a, Surf, M, F, K, N> {
        EvalAll {
            adapter: self,
            surfels: self.surface.surfels(),
        }
    }

    /// Evaluate the given surfels in order
    pub fn eval_many<'s, I>(&self, surfels: I) -> Vec<Result<F::Quantity>>
    where
        I: IntoIterator<Item = &'s Surf::Surfel>,
        Surf::Surfel: 's,
    {
        surfels.into_iter().map(|s| self.eval(s)).collect()
    }

    fn eval_within(&self, surfel: &Surf::Surfel, radius: f64) -> Result<F::Quantity> {
        let neighborhood = self.enumerator().enumerate::<N>(surfel, radius)?;
        let mut samples = Vec::with_capacity(neighborhood.len());
        for entry in neighborhood.into_entries() {
            let weight = self.kernel.weight(entry.distance);
            if !weight.is_finite() {
                return Err(Error::non_finite("kernel weight"));
            }
            samples.push(WeightedSurfel {
                surfel: entry.surfel,
                distance: entry.distance,
                weight,
            });
        }
        self.functor.estimate(&samples)
    }
}

/// Iterator returned by [`LocalEstimatorAdapter::eval_all`]
pub struct EvalAll<'s, 'a, Surf, M, F, K, const N: usize>
where
    Surf: DigitalSurface + 'a,
{
    adapter: &'s LocalEstimatorAdapter<'a, Surf, M, F, K, N, Ready>,
    surfels: Surf::Surfels<'a>,
}

impl<Surf, M, F, K, const N: usize> Iterator for EvalAll<'_, '_, Surf, M, F, K, N>
where
    Surf: DigitalSurface,
    M: Metric<N>,
    F: SurfelFunctor<Surf::Surfel, N>,
    K: WeightKernel,
{
    type Item = (Surf::Surfel, Result<F::Quantity>);

    fn next(&mut self) -> Option<Self::Item> {
        let surfel = self.surfels.next()?;
        let quantity = self.adapter.eval(&surfel);
        Some((surfel, quantity))
    }
}

#[cfg(feature = "parallel")]
impl<'a, Surf, M, F, K, const N: usize> LocalEstimatorAdapter<'a, Surf, M, F, K, N, Ready>
where
    Surf: DigitalSurface + Sync,
    Surf::Surfel: Send + Sync,
    M: Metric<N> + Sync,
    F: SurfelFunctor<Surf::Surfel, N> + Sync,
    F::Embedder: Sync,
    F::Quantity: Send,
    K: WeightKernel + Sync,
{
    /// Evaluate `surfels` on the rayon pool; results keep the input order
    pub fn par_eval(&self, surfels: &[Surf::Surfel]) -> Vec<Result<F::Quantity>> {
        use rayon::prelude::*;

        debug!("Parallel evaluation of {} surfels", surfels.len());
        surfels.par_iter().map(|s| self.eval(s)).collect()
    }
}

impl<Surf, M, F, K, const N: usize> fmt::Debug
    for LocalEstimatorAdapter<'_, Surf, M, F, K, N, Unconfigured>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalEstimatorAdapter")
            .field("dimension", &N)
            .field("max_visited", &self.max_visited)
            .finish_non_exhaustive()
    }
}

impl<Surf, M, F, K, const N: usize> fmt::Debug
    for LocalEstimatorAdapter<'_, Surf, M, F, K, N, Ready>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalEstimatorAdapter")
            .field("dimension", &N)
            .field("bounds", &self.state.bounds)
            .field("max_visited", &self.max_visited)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functor::{convolution, ConvolutionFunctor};
    use surfel_core::{ConstantKernel, L2Metric, RealPoint, SurfelEmbedder};

    struct Ring(usize);

    impl DigitalSurface for Ring {
        type Surfel = usize;
        type Surfels<'a> = std::ops::Range<usize>;

        fn write_neighbors(&self, s: &usize, out: &mut Vec<usize>) {
            out.push((s + 1) % self.0);
            out.push((s + self.0 - 1) % self.0);
        }

        fn surfels(&self) -> Self::Surfels<'_> {
            0..self.0
        }
    }

    struct OnLine;

    impl SurfelEmbedder<usize, 1> for OnLine {
        fn embed(&self, s: &usize) -> RealPoint<1> {
            RealPoint::<1>::new(*s as f64)
        }
    }

    /// Counts neighbours and sums weights
    struct Census(OnLine);

    impl ConvolutionFunctor<usize, 1> for Census {
        type Quantity = (usize, f64);
        type Embedder = OnLine;
        type Accumulator = usize;

        fn embedder(&self) -> &OnLine {
            &self.0
        }

        fn zero(&self) -> usize {
            0
        }

        fn accumulate(&self, acc: &mut usize, _: &WeightedSurfel<usize>) {
            *acc += 1;
        }

        fn finalize(&self, acc: usize, total_weight: f64) -> Result<(usize, f64)> {
            Ok((acc, total_weight))
        }
    }

    #[test]
    fn test_init_validation() {
        let ring = Ring(10);
        let functor = convolution(Census(OnLine));
        let kernel = ConstantKernel::default();
        let adapter = LocalEstimatorAdapter::new(&ring, &L2Metric, &functor, &kernel);
        let invalid = [
            (0.0, 1.0),
            (-1.0, 1.0),
            (2.0, 1.0),
            (1.0, f64::NAN),
            (f64::INFINITY, f64::INFINITY),
        ];
        for (min, max) in invalid {
            let fresh = LocalEstimatorAdapter::new(&ring, &L2Metric, &functor, &kernel);
            assert!(matches!(fresh.init(min, max), Err(Error::InvalidRadius { .. })));
        }
        assert_eq!(adapter.functor_shape(), FunctorShape::Convolution);
        let ready = adapter.init(1.0, 1.0).unwrap();
        assert_eq!(ready.functor_shape(), FunctorShape::Convolution);
        assert_eq!(ready.min_radius(), 1.0);
        assert_eq!(ready.max_radius(), 1.0);
    }

    #[test]
    fn test_reinit() {
        let ring = Ring(20);
        let functor = convolution(Census(OnLine));
        let kernel = ConstantKernel::new(0.5);
        let ready = LocalEstimatorAdapter::new(&ring, &L2Metric, &functor, &kernel)
            .init(1.0, 2.0)
            .unwrap();
        assert_eq!(ready.eval(&10).unwrap(), (5, 2.5));
        let wider = ready.init(1.0, 4.0).unwrap();
        assert_eq!(wider.eval(&10).unwrap(), (9, 4.5));
    }

    #[test]
    fn test_eval_at_radius() {
        let ring = Ring(20);
        let functor = convolution(Census(OnLine));
        let kernel = |d: f64| 1.0 / (1.0 + d);
        let ready = LocalEstimatorAdapter::new(&ring, &L2Metric, &functor, &kernel)
            .init(1.0, 3.0)
            .unwrap();
        let (count, weight) = ready.eval_at_radius(&10, 1.0).unwrap();
        assert_eq!(count, 3);
        assert!((weight - 2.0).abs() < 1e-12);
        assert!(matches!(
            ready.eval_at_radius(&10, 0.5),
            Err(Error::InvalidParameter(_))
        ));
        assert!(ready.eval_at_radius(&10, 3.5).is_err());
    }

    #[test]
    fn test_eval_all_and_many() {
        let ring = Ring(8);
        let functor = convolution(Census(OnLine));
        let kernel = ConstantKernel::default();
        let ready = LocalEstimatorAdapter::new(&ring, &L2Metric, &functor, &kernel)
            .init(1.0, 1.0)
            .unwrap();
        let all: Vec<_> = ready.eval_all().collect();
        assert_eq!(all.len(), 8);
        // Surfels 0 and 7 are adjacent but far apart on the line.
        assert_eq!(all[0].1.as_ref().unwrap().0, 2);
        assert_eq!(all[3].1.as_ref().unwrap().0, 3);

        let picked = [3usize, 0];
        let many: Vec<_> = ready
            .eval_many(&picked)
            .into_iter()
            .map(|r| r.unwrap().0)
            .collect();
        assert_eq!(many, vec![3, 2]);
    }

    #[test]
    fn test_config_and_cap() {
        let ring = Ring(50);
        let functor = convolution(Census(OnLine));
        let kernel = ConstantKernel::default();
        let config = EstimatorConfig::default().with_radii(1.0, 10.0).with_max_visited(5);
        let ready = LocalEstimatorAdapter::new(&ring, &L2Metric, &functor, &kernel)
            .init_with_config(&config)
            .unwrap();
        assert_eq!(ready.eval(&25).unwrap().0, 5);
        assert!(ready.neighborhood(&25).unwrap().is_truncated());

        let bad = EstimatorConfig::default().with_radii(3.0, 1.0);
        let adapter = LocalEstimatorAdapter::new(&ring, &L2Metric, &functor, &kernel);
        assert!(adapter.init_with_config(&bad).is_err());
    }

    #[test]
    fn test_non_finite_weight() {
        let ring = Ring(8);
        let functor = convolution(Census(OnLine));
        let kernel = |_: f64| f64::NAN;
        let ready = LocalEstimatorAdapter::new(&ring, &L2Metric, &functor, &kernel)
            .init(1.0, 2.0)
            .unwrap();
        assert!(matches!(ready.eval(&3), Err(Error::Computation(_))));
    }
}
