//! Grid Configuration and Builders
//!
//! This module provides validated builders for [`HexMetrics`] and for the
//! [`GridConfig`] a [`HexGrid`](crate::grid::HexGrid) is created from.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{HexError, Result};
use crate::mesh::{HexColor, WHITE};
use crate::metrics::HexMetrics;

/// Builder for [`HexMetrics`] with validation
///
/// Starts from [`HexMetrics::default`]. Setters that can reject a value return
/// `Result<Self>`.
///
/// # Example
///
/// ```rust
/// use hex_terrain::*;
///
/// let metrics = HexMetricsBuilder::new()
///     .outer_radius(5.0).unwrap()
///     .terraces_per_slope(3).unwrap()
///     .build().unwrap();
///
/// assert_eq!(metrics.inner_radius(), 5.0 * OUTER_TO_INNER);
/// assert_eq!(metrics.terrace_steps(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct HexMetricsBuilder {
    metrics: HexMetrics,
}

impl HexMetricsBuilder {
    /// Create a new builder with the default metrics
    ///
    /// Defaults:
    /// - outer_radius: 10
    /// - solid_factor: 0.8
    /// - elevation_step: 3
    /// - terraces_per_slope: 2
    /// - cell_perturb_strength: 4
    /// - noise_scale: 0.003
    pub fn new() -> Self {
        Self {
            metrics: HexMetrics::default(),
        }
    }

    /// Set the distance from a cell center to its corners
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if radius <= 0.0
    pub fn outer_radius(mut self, radius: f32) -> Result<Self> {
        if !(radius > 0.0) {
            return Err(HexError::InvalidConfig(format!(
                "outer radius must be positive (got {})",
                radius
            )));
        }
        self.metrics.outer_radius = radius;
        Ok(self)
    }

    /// Set the solid fraction of each cell
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless 0.0 < factor < 1.0
    pub fn solid_factor(mut self, factor: f32) -> Result<Self> {
        if !(factor > 0.0 && factor < 1.0) {
            return Err(HexError::InvalidConfig(format!(
                "solid factor must be in (0, 1) (got {})",
                factor
            )));
        }
        self.metrics.solid_factor = factor;
        Ok(self)
    }

    /// Set the height of one elevation level
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if step <= 0.0
    pub fn elevation_step(mut self, step: f32) -> Result<Self> {
        if !(step > 0.0) {
            return Err(HexError::InvalidConfig(format!(
                "elevation step must be positive (got {})",
                step
            )));
        }
        self.metrics.elevation_step = step;
        Ok(self)
    }

    /// Set the number of terraces per slope
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if terraces == 0
    pub fn terraces_per_slope(mut self, terraces: u32) -> Result<Self> {
        if terraces == 0 {
            return Err(HexError::InvalidConfig(
                "terraces per slope must be >= 1".to_string(),
            ));
        }
        self.metrics.terraces_per_slope = terraces;
        Ok(self)
    }

    /// Set the maximum horizontal perturbation
    ///
    /// 0.0 disables perturbation entirely.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if strength is negative
    pub fn cell_perturb_strength(mut self, strength: f32) -> Result<Self> {
        if !(strength >= 0.0) {
            return Err(HexError::InvalidConfig(format!(
                "perturb strength must be >= 0 (got {})",
                strength
            )));
        }
        self.metrics.cell_perturb_strength = strength;
        Ok(self)
    }

    /// Set the world-to-noise coordinate scale
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if scale <= 0.0
    pub fn noise_scale(mut self, scale: f32) -> Result<Self> {
        if !(scale > 0.0) {
            return Err(HexError::InvalidConfig(format!(
                "noise scale must be positive (got {})",
                scale
            )));
        }
        self.metrics.noise_scale = scale;
        Ok(self)
    }

    pub fn build(self) -> Result<HexMetrics> {
        Ok(self.metrics)
    }
}

impl Default for HexMetricsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for a rectangular hex grid
///
/// The same configuration always produces the same noise texture, so a grid
/// can be rebuilt from its configuration plus the edited cell values.
///
/// # Example
///
/// ```rust
/// use hex_terrain::*;
///
/// let config = GridConfigBuilder::new()
///     .size(6, 6).unwrap()
///     .noise_seed(7)
///     .build()
///     .unwrap();
///
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: GridConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Number of columns
    pub width: usize,

    /// Number of rows
    pub height: usize,

    /// Color given to every cell on creation
    pub default_color: HexColor,

    /// Seed of the perturbation noise texture
    pub noise_seed: u32,

    pub metrics: HexMetrics,
}

impl GridConfig {
    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 6,
            height: 6,
            default_color: WHITE,
            noise_seed: rand::random(),
            metrics: HexMetrics::default(),
        }
    }
}

/// Builder for creating GridConfig with validation
///
/// # Example
///
/// ```rust
/// use hex_terrain::*;
///
/// // Use defaults: 6 x 6 white cells
/// let config = GridConfigBuilder::new().build().unwrap();
/// assert_eq!(config.cell_count(), 36);
///
/// // Customize
/// let metrics = HexMetricsBuilder::new().elevation_step(5.0).unwrap().build().unwrap();
/// let config = GridConfigBuilder::new()
///     .size(10, 4)
///     .unwrap()
///     .default_color([0.2, 0.8, 0.2, 1.0])
///     .noise_seed(1234)
///     .metrics(metrics)
///     .build()
///     .unwrap();
/// assert_eq!(config.metrics.elevation_step, 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct GridConfigBuilder {
    width: usize,
    height: usize,
    default_color: HexColor,
    noise_seed: Option<u32>,
    metrics: HexMetrics,
}

impl GridConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - size: 6 x 6
    /// - default_color: white
    /// - noise_seed: Random (generated from thread_rng)
    /// - metrics: [`HexMetrics::default`]
    pub fn new() -> Self {
        Self {
            width: 6,
            height: 6,
            default_color: WHITE,
            noise_seed: None,
            metrics: HexMetrics::default(),
        }
    }

    /// Set the number of columns and rows
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either dimension is 0
    pub fn size(mut self, width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(HexError::InvalidConfig(format!(
                "grid size must be at least 1 x 1 (got {} x {})",
                width, height
            )));
        }
        self.width = width;
        self.height = height;
        Ok(self)
    }

    pub fn default_color(mut self, color: HexColor) -> Self {
        self.default_color = color;
        self
    }

    /// Set the seed of the perturbation noise
    ///
    /// Using the same seed always produces the same vertex jitter.
    pub fn noise_seed(mut self, seed: u32) -> Self {
        self.noise_seed = Some(seed);
        self
    }

    /// Use metrics built with [`HexMetricsBuilder`]
    pub fn metrics(mut self, metrics: HexMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Build the configuration
    ///
    /// If no noise seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> Result<GridConfig> {
        let noise_seed = self.noise_seed.unwrap_or_else(rand::random);

        Ok(GridConfig {
            width: self.width,
            height: self.height,
            default_color: self.default_color,
            noise_seed,
            metrics: self.metrics,
        })
    }
}

impl Default for GridConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_builder_defaults() {
        let metrics = HexMetricsBuilder::new().build().unwrap();
        assert_eq!(metrics, HexMetrics::default());
    }

    #[test]
    fn test_metrics_builder_custom() {
        let metrics = HexMetricsBuilder::new()
            .outer_radius(2.0)
            .unwrap()
            .solid_factor(0.75)
            .unwrap()
            .elevation_step(1.5)
            .unwrap()
            .terraces_per_slope(1)
            .unwrap()
            .cell_perturb_strength(0.0)
            .unwrap()
            .noise_scale(0.01)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(metrics.outer_radius, 2.0);
        assert_eq!(metrics.solid_factor, 0.75);
        assert_eq!(metrics.elevation_step, 1.5);
        assert_eq!(metrics.terrace_steps(), 3);
        assert_eq!(metrics.cell_perturb_strength, 0.0);
        assert_eq!(metrics.noise_scale, 0.01);
    }

    #[test]
    fn test_metrics_builder_rejects_invalid_values() {
        assert!(HexMetricsBuilder::new().outer_radius(0.0).is_err());
        assert!(HexMetricsBuilder::new().outer_radius(-1.0).is_err());
        assert!(HexMetricsBuilder::new().outer_radius(f32::NAN).is_err());
        assert!(HexMetricsBuilder::new().solid_factor(0.0).is_err());
        assert!(HexMetricsBuilder::new().solid_factor(1.0).is_err());
        assert!(HexMetricsBuilder::new().elevation_step(0.0).is_err());
        assert!(HexMetricsBuilder::new().terraces_per_slope(0).is_err());
        assert!(HexMetricsBuilder::new().cell_perturb_strength(-0.1).is_err());
        assert!(HexMetricsBuilder::new().noise_scale(0.0).is_err());
    }

    #[test]
    fn test_grid_builder_defaults() {
        let config = GridConfigBuilder::new().build().unwrap();
        assert_eq!(config.width, 6);
        assert_eq!(config.height, 6);
        assert_eq!(config.default_color, WHITE);
        assert_eq!(config.metrics, HexMetrics::default());
    }

    #[test]
    fn test_grid_builder_custom() {
        let config = GridConfigBuilder::new()
            .size(3, 2)
            .unwrap()
            .default_color([0.0, 1.0, 0.0, 1.0])
            .noise_seed(42)
            .build()
            .unwrap();

        assert_eq!(config.cell_count(), 6);
        assert_eq!(config.default_color, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(config.noise_seed, 42);
    }

    #[test]
    fn test_grid_builder_invalid_size() {
        assert!(GridConfigBuilder::new().size(0, 4).is_err());
        assert!(GridConfigBuilder::new().size(4, 0).is_err());
        assert!(GridConfigBuilder::new().size(1, 1).is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serialization() {
        let config = GridConfigBuilder::new()
            .size(4, 5)
            .unwrap()
            .noise_seed(12345)
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let restored: GridConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, restored);
    }
}
