use thiserror::Error;

use crate::layout::Slot;

/// Top-level error type for footing crates.
#[derive(Debug, Error)]
pub enum FootingError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid friction_coeff: {0} (must be finite and >= 0)")]
    InvalidFriction(f64),

    #[error("Invalid normal force limits: fz_min={min}, fz_max={max}")]
    InvalidForceLimits { min: f64, max: f64 },

    #[error("horizon must be > 0")]
    ZeroHorizon,

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Buffer shape errors raised by the checked evaluation entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("Block {slot} too short: expected at least {expected}, got {got}")]
    BlockTooShort {
        slot: Slot,
        expected: usize,
        got: usize,
    },

    #[error("Output buffer too short: expected at least {expected}, got {got}")]
    OutputTooShort { expected: usize, got: usize },

    #[error("Stage count mismatch: horizon has {expected} stages, got {got}")]
    StageCount { expected: usize, got: usize },

    #[error("Horizon buffer mismatch: {stages} stages need {expected} values, got {got}")]
    HorizonMismatch {
        stages: usize,
        expected: usize,
        got: usize,
    },
}
