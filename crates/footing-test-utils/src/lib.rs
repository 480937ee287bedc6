//! Shared test fixtures and utilities for footing crates.
//!
//! Provides deterministic RNG setup and generators for contact forces,
//! input blocks and parameter blocks.

pub mod fixtures;
pub mod rng;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use fixtures::{
    feasible_force, params_with_friction, random_forces, random_input, standing_forces,
};
pub use rng::{deterministic_vec, seeded_rng};
