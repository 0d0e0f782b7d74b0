//! Trace configuration.
//!
//! The knobs that used to live on an interactive panel: recursion depth,
//! energy threshold and point-light falloff. A `TraceConfig` is passed
//! explicitly into every trace call.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Threshold must be within [0, 1], got {0}")]
    Threshold(f32),

    #[error("Attenuation coefficients must be non-negative, got ({constant}, {linear}, {quadratic})")]
    Attenuation {
        constant: f32,
        linear: f32,
        quadratic: f32,
    },
}

/// Point-light distance falloff `1 / (constant + linear*d + quadratic*d^2)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttenuationCoefficients {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for AttenuationCoefficients {
    fn default() -> Self {
        Self {
            constant: 1.0,
            linear: 0.0,
            quadratic: 0.0,
        }
    }
}

impl AttenuationCoefficients {
    pub fn new(constant: f32, linear: f32, quadratic: f32) -> Self {
        Self {
            constant,
            linear,
            quadratic,
        }
    }

    /// Falloff factor at distance `d`, never above 1.
    ///
    /// A zero denominator yields +inf, which the clamp turns into 1.
    pub fn falloff(&self, d: f32) -> f32 {
        let denominator = self.constant + self.linear * d + self.quadratic * d * d;
        (1.0 / denominator).min(1.0)
    }
}

/// Ray tracing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraceConfig {
    /// Maximum recursion depth for reflected/refracted rays (0 = local shading only)
    pub max_depth: u32,

    /// Per-channel contribution below which recursion stops
    pub threshold: f32,

    /// Point-light distance attenuation
    pub attenuation: AttenuationCoefficients,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            threshold: 0.01,
            attenuation: AttenuationCoefficients::default(),
        }
    }
}

impl TraceConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse a configuration from JSON text and validate it.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: TraceConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::Threshold(self.threshold));
        }

        let a = &self.attenuation;
        let non_negative = |c: f32| c >= 0.0;
        if !(non_negative(a.constant) && non_negative(a.linear) && non_negative(a.quadratic)) {
            return Err(ConfigError::Attenuation {
                constant: a.constant,
                linear: a.linear,
                quadratic: a.quadratic,
            });
        }

        Ok(())
    }
}
