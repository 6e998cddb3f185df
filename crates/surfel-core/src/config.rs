//! Configuration types for local estimators

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default cap on the number of surfels a single neighbourhood may report
pub const DEFAULT_MAX_VISITED: usize = 1_000_000;

/// Radius bounds of a configured estimator
///
/// Only constructed through [`RadiusBounds::new`], so `0 < min <= max` holds
/// for every value of this type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadiusBounds {
    min: f64,
    max: f64,
}

impl RadiusBounds {
    /// Validate and store a `(min, max)` pair
    pub fn new(min: f64, max: f64) -> Result<Self> {
        Error::check_radius_bounds(min, max)?;
        Ok(Self { min, max })
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// `true` when `min <= radius <= max`
    #[inline]
    pub fn contains(&self, radius: f64) -> bool {
        self.min <= radius && radius <= self.max
    }
}

/// Estimator configuration
///
/// ```rust
/// use surfel_core::config::EstimatorConfig;
///
/// let config = EstimatorConfig::default()
///     .with_radii(0.5, 3.0)
///     .with_max_visited(10_000);
/// let bounds = config.validate().unwrap();
/// assert_eq!(bounds.max(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Smallest admissible query radius
    pub min_radius: f64,

    /// Neighbourhood radius used by `eval`
    pub max_radius: f64,

    /// Hard cap on surfels reported per neighbourhood
    pub max_visited: usize,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            min_radius: 1.0,
            max_radius: 5.0,
            max_visited: DEFAULT_MAX_VISITED,
        }
    }
}

impl EstimatorConfig {
    pub fn with_radii(mut self, min_radius: f64, max_radius: f64) -> Self {
        self.min_radius = min_radius;
        self.max_radius = max_radius;
        self
    }

    pub fn with_max_visited(mut self, max_visited: usize) -> Self {
        self.max_visited = max_visited;
        self
    }

    /// Check the configuration and return its radius bounds
    pub fn validate(&self) -> Result<RadiusBounds> {
        if self.max_visited == 0 {
            return Err(Error::InvalidParameter(
                "max_visited must be at least 1".to_string(),
            ));
        }
        RadiusBounds::new(self.min_radius, self.max_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EstimatorConfig::default();
        let bounds = config.validate().unwrap();
        assert_eq!(bounds.min(), 1.0);
        assert_eq!(bounds.max(), 5.0);
        assert!(bounds.contains(2.5));
        assert!(!bounds.contains(5.5));
    }

    #[test]
    fn test_zero_cap_rejected() {
        let config = EstimatorConfig::default().with_max_visited(0);
        assert!(matches!(config.validate(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: EstimatorConfig = serde_json::from_str(r#"{"max_radius": 8.0}"#).unwrap();
        assert_eq!(config.min_radius, 1.0);
        assert_eq!(config.max_radius, 8.0);
        assert_eq!(config.max_visited, DEFAULT_MAX_VISITED);
    }

    proptest! {
        #[test]
        fn prop_bounds_accept_ordered_positive(min in 1e-6f64..100.0, extra in 0.0f64..100.0) {
            let bounds = RadiusBounds::new(min, min + extra).unwrap();
            prop_assert!(bounds.contains(min));
            prop_assert!(bounds.contains(min + extra));
        }

        #[test]
        fn prop_bounds_reject_invalid(min in -100.0f64..100.0, max in -100.0f64..100.0) {
            let result = RadiusBounds::new(min, max);
            prop_assert_eq!(result.is_ok(), min > 0.0 && min <= max);
        }
    }
}
