use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layout::{FRICTION_PARAM_INDEX, PARAM_DIM};

/// Friction coefficients above this are accepted but unusual for legged contact.
const TYPICAL_FRICTION_MAX: f64 = 1.5;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_friction_coeff() -> f64 {
    0.5
}
const fn default_horizon() -> usize {
    12
}

// ---------------------------------------------------------------------------
// ConstraintConfig
// ---------------------------------------------------------------------------

/// Contact constraint configuration for one NMPC problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintConfig {
    /// Coulomb friction coefficient μ (default: 0.5).
    #[serde(default = "default_friction_coeff")]
    pub friction_coeff: f64,

    /// Minimum normal force for a stance leg in N (default: 0).
    #[serde(default)]
    pub fz_min: f64,

    /// Maximum normal force for a stance leg in N. Unbounded when absent.
    #[serde(default)]
    pub fz_max: Option<f64>,

    /// Number of shooting nodes in the prediction horizon (default: 12).
    #[serde(default = "default_horizon")]
    pub horizon: usize,
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        Self {
            friction_coeff: default_friction_coeff(),
            fz_min: 0.0,
            fz_max: None,
            horizon: default_horizon(),
        }
    }
}

impl ConstraintConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mu = self.friction_coeff;
        if !mu.is_finite() || mu < 0.0 {
            return Err(ConfigError::InvalidFriction(mu));
        }
        if mu > TYPICAL_FRICTION_MAX {
            tracing::warn!(friction_coeff = mu, "friction coefficient above typical range");
        }
        if !self.fz_min.is_finite() || self.fz_min < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "fz_min".into(),
                message: format!("{} (must be finite and >= 0)", self.fz_min),
            });
        }
        if let Some(max) = self.fz_max {
            if max.is_nan() || max < self.fz_min {
                return Err(ConfigError::InvalidForceLimits {
                    min: self.fz_min,
                    max,
                });
            }
        }
        if self.horizon == 0 {
            return Err(ConfigError::ZeroHorizon);
        }
        Ok(())
    }

    /// Upper normal-force bound, `+inf` when unbounded.
    pub fn fz_upper(&self) -> f64 {
        self.fz_max.unwrap_or(f64::INFINITY)
    }

    /// Parameter block carrying this configuration's friction coefficient.
    ///
    /// All other parameter entries belong to the dynamics model and are left
    /// at zero.
    pub fn params_vector(&self) -> [f64; PARAM_DIM] {
        let mut p = [0.0; PARAM_DIM];
        p[FRICTION_PARAM_INDEX] = self.friction_coeff;
        p
    }

    /// Parse and validate from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        tracing::debug!(
            friction_coeff = config.friction_coeff,
            fz_min = config.fz_min,
            fz_max = ?config.fz_max,
            horizon = config.horizon,
            "loaded contact constraint config"
        );
        Ok(config)
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
