//! Configuration for the placement stages

use std::path::Path;

use serde::Deserialize;

use super::error::ConfigError;

/// Configuration options for naive layout, relaxation and orientation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Distance between neighbouring stitch centres in a flat row
    pub stitch_spacing: f64,

    /// Vertical distance between rows
    pub row_spacing: f64,

    /// Arc length one stitch takes up on a round, used for the ring radius
    pub stitch_width: f64,

    /// Physical radius of a stitch; two touching stitches sit `2 * radius` apart
    pub stitch_radius: f64,

    /// Spring constant for the pairwise relaxation force
    pub spring_constant: f64,

    /// Iteration cap for relaxation
    pub max_iterations: usize,

    /// Relaxation stops once the summed squared displacement drops below this
    pub movement_threshold: f64,

    /// Largest distance a single stitch may move in one iteration
    pub max_step: f64,

    /// Weight of the forward neighbour when computing a stitch's local X axis
    pub forward_weight: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            stitch_spacing: 1.0,
            row_spacing: 1.0,
            stitch_width: 1.0,
            stitch_radius: 0.5,
            spring_constant: 0.5,
            max_iterations: 100,
            movement_threshold: 1e-4,
            max_step: 0.5,
            forward_weight: 9.0,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: LayoutConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable by the placement stages
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("stitch_spacing", self.stitch_spacing),
            ("row_spacing", self.row_spacing),
            ("stitch_width", self.stitch_width),
            ("stitch_radius", self.stitch_radius),
            ("spring_constant", self.spring_constant),
            ("max_step", self.max_step),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::invalid(field, "must be a positive number"));
            }
        }
        if !self.movement_threshold.is_finite() || self.movement_threshold < 0.0 {
            return Err(ConfigError::invalid(
                "movement_threshold",
                "must be a non-negative number",
            ));
        }
        if !self.forward_weight.is_finite() || self.forward_weight < 1.0 {
            return Err(ConfigError::invalid("forward_weight", "must be at least 1"));
        }
        Ok(())
    }

    /// Set the stitch and row spacing of the naive layout
    pub fn with_spacing(mut self, stitch_spacing: f64, row_spacing: f64) -> Self {
        self.stitch_spacing = stitch_spacing;
        self.row_spacing = row_spacing;
        self
    }

    /// Set the physical stitch radius
    pub fn with_stitch_radius(mut self, radius: f64) -> Self {
        self.stitch_radius = radius;
        self
    }

    /// Set the spring constant
    pub fn with_spring_constant(mut self, k: f64) -> Self {
        self.spring_constant = k;
        self
    }

    /// Set the relaxation iteration cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold
    pub fn with_movement_threshold(mut self, threshold: f64) -> Self {
        self.movement_threshold = threshold;
        self
    }

    /// Ideal distance between two linked stitches
    pub fn ideal_distance(&self) -> f64 {
        2.0 * self.stitch_radius
    }
}
