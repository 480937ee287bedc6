//! Contact force value types.

use nalgebra::Vector3;

use crate::layout::{INPUT_DIM, Leg, N_LEGS};

/// Ground reaction force `(fx, fy, fz)` on one foot, in world frame.
pub type ContactForce = Vector3<f64>;

/// One ground reaction force per leg, in [`Leg::ALL`] order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegForces(pub [ContactForce; N_LEGS]);

impl Default for LegForces {
    fn default() -> Self {
        Self([ContactForce::zeros(); N_LEGS])
    }
}

impl LegForces {
    /// The same force on every leg.
    pub fn uniform(force: ContactForce) -> Self {
        Self([force; N_LEGS])
    }

    /// Read the four force triples out of an input block.
    ///
    /// # Panics
    /// If `input` is shorter than [`INPUT_DIM`].
    pub fn from_input(input: &[f64]) -> Self {
        let mut forces = Self::default();
        for leg in Leg::ALL {
            forces.0[leg.index()] = ContactForce::from_column_slice(&input[leg.force_range()]);
        }
        forces
    }

    /// Write the four force triples into an input block, leaving other entries untouched.
    ///
    /// # Panics
    /// If `input` is shorter than [`INPUT_DIM`].
    pub fn write_input(&self, input: &mut [f64]) {
        for leg in Leg::ALL {
            input[leg.force_range()].copy_from_slice(self.0[leg.index()].as_slice());
        }
    }

    /// A zero-filled input block carrying these forces.
    pub fn to_input(&self) -> [f64; INPUT_DIM] {
        let mut input = [0.0; INPUT_DIM];
        self.write_input(&mut input);
        input
    }

    pub fn get(&self, leg: Leg) -> &ContactForce {
        &self.0[leg.index()]
    }

    pub fn set(&mut self, leg: Leg, force: ContactForce) {
        self.0[leg.index()] = force;
    }

    /// Sum of the normal components.
    pub fn total_normal(&self) -> f64 {
        self.0.iter().map(|f| f.z).sum()
    }
}
