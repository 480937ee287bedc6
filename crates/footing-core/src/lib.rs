// footing-core: stage layout, contact force types, config and errors for footing.

pub mod config;
pub mod error;
pub mod layout;
pub mod types;

pub use config::ConstraintConfig;
pub use error::{ConfigError, FootingError, ShapeError};
pub use layout::{
    ALGEBRAIC_DIM, CONSTRAINT_DIM, FORCE_OFFSET, FRICTION_PARAM_INDEX, INPUT_DIM, Leg, N_LEGS,
    PARAM_DIM, ROWS_PER_LEG, STATE_DIM, Slot,
};
pub use types::{ContactForce, LegForces};
