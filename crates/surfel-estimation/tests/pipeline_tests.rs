//! Whole-pipeline tests: owned surfaces, configuration and error conversion

mod common;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use surfel_core::{EstimatorConfig, GaussianKernel, L2Metric, Point, RealVector};
use surfel_estimation::{convolution, ElementaryConvolutionNormal, LocalEstimatorAdapter};
use surfel_topology::{
    find_a_bel, find_bel_along_axis, DigitalSurface as OwnedSurface, ImplicitDigitalSurface,
    KhalimskySpace, SurfelAdjacency,
};
use tracing::info;

use common::*;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_owned_surface_pipeline() -> anyhow::Result<()> {
    init_logging();

    let space = KhalimskySpace::new(P3::diagonal(-10), P3::diagonal(10))?;
    let shape = ellipsoid();
    let bel = find_bel_along_axis(&space, &shape, &P3::zero(), 2)?;
    let surface = OwnedSurface::acquire(Box::new(ImplicitDigitalSurface::new(
        space,
        shape,
        SurfelAdjacency::Interior,
        bel,
    )?));

    let functor = convolution(ElementaryConvolutionNormal::new(Embedder::new(), 1.0)?);
    let kernel = GaussianKernel::new(2.0)?;
    let config = EstimatorConfig::default();
    let estimator = LocalEstimatorAdapter::new(&surface, &L2Metric, &functor, &kernel)
        .init_with_config(&config)?;

    // Top of the ellipsoid: the normal is +z.
    let normal = estimator.eval(&bel)?;
    info!("normal at {bel}: {:?}", normal.as_slice());
    assert_relative_eq!(normal, RealVector::<3>::new(0.0, 0.0, 1.0), epsilon = 1e-9);
    Ok(())
}

#[test]
fn test_errors_convert_to_anyhow() {
    init_logging();

    let run = || -> anyhow::Result<()> {
        let space = KhalimskySpace::new(Point::<i32, 2>::diagonal(-4), Point::diagonal(4))?;
        let nothing = |_: &Point<i32, 2>| false;
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        find_a_bel(&space, &nothing, 25, &mut rng)?;
        Ok(())
    };
    let err = run().unwrap_err();
    assert!(err.to_string().contains("25 tries"));
}
