//! Contact force and stage-block fixtures.

use footing_core::{
    ContactForce, FRICTION_PARAM_INDEX, INPUT_DIM, Leg, LegForces, N_LEGS, PARAM_DIM,
};
use rand::Rng;

/// Parameter block with only the friction coefficient set.
pub fn params_with_friction(mu: f64) -> [f64; PARAM_DIM] {
    let mut p = [0.0; PARAM_DIM];
    p[FRICTION_PARAM_INDEX] = mu;
    p
}

/// Forces with every component drawn uniformly from `[-scale, scale)`.
pub fn random_forces(rng: &mut impl Rng, scale: f64) -> LegForces {
    let mut forces = LegForces::default();
    for leg in Leg::ALL {
        forces.set(
            leg,
            ContactForce::new(
                rng.gen_range(-scale..scale),
                rng.gen_range(-scale..scale),
                rng.gen_range(-scale..scale),
            ),
        );
    }
    forces
}

/// Full input block: random non-force entries and random forces.
pub fn random_input(rng: &mut impl Rng, scale: f64) -> [f64; INPUT_DIM] {
    let mut u = [0.0; INPUT_DIM];
    for v in &mut u {
        *v = rng.gen_range(-scale..scale);
    }
    random_forces(rng, scale).write_input(&mut u);
    u
}

/// A force strictly inside the friction pyramid with normal force in `[fz_lo, fz_hi)`.
pub fn feasible_force(rng: &mut impl Rng, mu: f64, fz_lo: f64, fz_hi: f64) -> ContactForce {
    let fz = rng.gen_range(fz_lo..fz_hi);
    let limit = mu * fz;
    // Half-open ranges need a non-empty interval.
    let fx = if limit > 0.0 { rng.gen_range(-limit..limit) } else { 0.0 };
    let fy = if limit > 0.0 { rng.gen_range(-limit..limit) } else { 0.0 };
    ContactForce::new(fx, fy, fz)
}

/// Vertical forces sharing `mass * gravity` equally between all legs.
#[allow(clippy::cast_precision_loss)]
pub fn standing_forces(mass: f64, gravity: f64) -> LegForces {
    LegForces::uniform(ContactForce::new(0.0, 0.0, mass * gravity / N_LEGS as f64))
}
