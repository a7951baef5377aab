//! Engine configuration
//!
//! Every field has a default, so a JSON document only needs the keys it
//! wants to change:
//!
//! ```
//! use pixlab::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "jpeg_quality": 75 }"#).unwrap();
//! assert_eq!(config.jpeg_quality, 75);
//! assert_eq!(config.green_margin, 25);
//! ```

use crate::{Error, Result};
use pixlab_color::IterativeThresholdOptions;
use serde::{Deserialize, Serialize};

/// Settings for iterative threshold selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IterativeConfig {
    /// Starting threshold
    pub initial: u8,
    /// Convergence tolerance
    pub tolerance: u8,
    /// Iteration cap
    pub max_iterations: u32,
}

impl Default for IterativeConfig {
    fn default() -> Self {
        let opts = IterativeThresholdOptions::default();
        Self {
            initial: opts.initial,
            tolerance: opts.tolerance,
            max_iterations: opts.max_iterations,
        }
    }
}

impl From<IterativeConfig> for IterativeThresholdOptions {
    fn from(c: IterativeConfig) -> Self {
        Self {
            initial: c.initial,
            tolerance: c.tolerance,
            max_iterations: c.max_iterations,
        }
    }
}

/// Engine-wide settings held by a [`Session`](crate::Session)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// JPEG export quality, 1..=100
    pub jpeg_quality: u8,
    /// Scale factor applied per zoom step
    pub zoom_factor: f64,
    /// Margin used by green coverage
    pub green_margin: u8,
    /// Iterative threshold settings
    pub iterative: IterativeConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 90,
            zoom_factor: 1.05,
            green_margin: pixlab_color::DEFAULT_GREEN_MARGIN,
            iterative: IterativeConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(Error::Config(format!(
                "jpeg_quality must be in 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        if !(self.zoom_factor > 0.0 && self.zoom_factor.is_finite()) {
            return Err(Error::Config(format!(
                "zoom_factor must be positive, got {}",
                self.zoom_factor
            )));
        }
        Ok(())
    }

    /// Iterative threshold options derived from this configuration.
    pub fn iterative_options(&self) -> IterativeThresholdOptions {
        self.iterative.into()
    }
}
