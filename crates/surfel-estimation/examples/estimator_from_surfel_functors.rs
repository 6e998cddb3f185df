//! Normal estimation on a digital ellipsoid from elementary surfel functors
//!
//! Run with `RUST_LOG=debug` to see the estimator and enumeration logs.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use surfel_core::{
    ConstantKernel, DigitalSurface, GaussianKernel, L2Metric, Point, SurfelEmbedder,
};
use surfel_estimation::{
    convolution, fitting, ElementaryConvolutionNormal, LinearLeastSquaresNormal,
    LocalEstimatorAdapter,
};
use surfel_topology::{
    find_a_bel, CanonicSurfelEmbedder, DigitalSurface as OwnedSurface, ImplicitDigitalSurface,
    ImplicitEllipsoid, KhalimskySpace, SurfelAdjacency,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== Local estimators from surfel functors ===\n");

    // Digital ellipsoid in [-10, 10]^3
    let space = KhalimskySpace::new(Point::<i32, 3>::diagonal(-10), Point::diagonal(10))?;
    let shape = ImplicitEllipsoid::new(6.0, 4.5, 3.4)?;
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let bel = find_a_bel(&space, &shape, 10_000, &mut rng)?;
    println!("Starting bel: {bel}");

    let surface = OwnedSurface::acquire(Box::new(ImplicitDigitalSurface::new(
        space,
        shape,
        SurfelAdjacency::Interior,
        bel,
    )?));
    println!("Surface has {} surfels", surface.surfels().count());

    let embedder = CanonicSurfelEmbedder::<i32, 3>::new();
    let first = surface.surfels().next().ok_or("empty surface")?;
    let at = embedder.embed(&first);
    let expected = shape.outward_normal(&at);
    println!("First surfel {first} embedded at {:?}", at.as_slice());
    println!("  true normal:          {:?}", expected.as_slice());

    // 1. Convolution of trivial normals, Gaussian weights
    let functor = convolution(ElementaryConvolutionNormal::new(embedder, 1.0)?);
    let kernel = GaussianKernel::new(2.0)?;
    let estimator = LocalEstimatorAdapter::new(&surface, &L2Metric, &functor, &kernel)
        .init(1.0, 5.0)?;
    let normal = estimator.eval(&first)?;
    println!(
        "  convolution normal:   {:?} (angle {:.4} rad)",
        normal.as_slice(),
        normal.dot(&expected).clamp(-1.0, 1.0).acos()
    );

    // 2. Weighted plane fit, constant weights
    let functor = fitting(LinearLeastSquaresNormal::new(embedder, 1.0)?);
    let kernel = ConstantKernel::default();
    let estimator = LocalEstimatorAdapter::new(&surface, &L2Metric, &functor, &kernel)
        .init(1.0, 3.0)?;
    let normal = estimator.eval(&first)?;
    println!(
        "  least-squares normal: {:?} (angle {:.4} rad)",
        normal.as_slice(),
        normal.dot(&expected).clamp(-1.0, 1.0).acos()
    );

    let hood = estimator.neighborhood(&first)?;
    println!("\nNeighbourhood of the first surfel: {} surfels", hood.len());

    Ok(())
}
