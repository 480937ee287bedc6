//! Stage layout of the centroidal NMPC decision variables.
//!
//! Every horizon stage hands the constraint functions four blocks:
//!
//! ```text
//! x (state, 30) | u (input, 24) | z (algebraic, 0) | p (parameters, 29)
//! ```
//!
//! The ground reaction forces of the four legs live at the tail of `u`,
//! one `(fx, fy, fz)` triple per leg starting at [`FORCE_OFFSET`]. The
//! friction coefficient is element [`FRICTION_PARAM_INDEX`] of `p`.

use std::fmt;
use std::ops::Range;

/// Width of the state block.
pub const STATE_DIM: usize = 30;
/// Width of the input block.
pub const INPUT_DIM: usize = 24;
/// Width of the algebraic-variable block (unused by the centroidal model).
pub const ALGEBRAIC_DIM: usize = 0;
/// Width of the parameter block.
pub const PARAM_DIM: usize = 29;

/// Number of legs.
pub const N_LEGS: usize = 4;
/// Index of leg 0's `fx` inside the input block.
pub const FORCE_OFFSET: usize = 12;
/// Index of the friction coefficient inside the parameter block.
pub const FRICTION_PARAM_INDEX: usize = 4;

/// Constraint rows per leg: four pyramid faces plus the unilateral row.
pub const ROWS_PER_LEG: usize = 5;
/// Length of the per-stage constraint vector.
pub const CONSTRAINT_DIM: usize = ROWS_PER_LEG * N_LEGS;

/// Input slots of a stage function, in calling-convention order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    State,
    Input,
    Algebraic,
    Params,
}

impl Slot {
    /// All slots in calling-convention order.
    pub const ALL: [Self; 4] = [Self::State, Self::Input, Self::Algebraic, Self::Params];

    /// Position of this slot in the argument list.
    pub const fn index(self) -> usize {
        match self {
            Self::State => 0,
            Self::Input => 1,
            Self::Algebraic => 2,
            Self::Params => 3,
        }
    }

    /// Slot for an argument position, if there is one.
    pub const fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Self::State),
            1 => Some(Self::Input),
            2 => Some(Self::Algebraic),
            3 => Some(Self::Params),
            _ => None,
        }
    }

    /// Declared width of the block in this slot.
    pub const fn dim(self) -> usize {
        match self {
            Self::State => STATE_DIM,
            Self::Input => INPUT_DIM,
            Self::Algebraic => ALGEBRAIC_DIM,
            Self::Params => PARAM_DIM,
        }
    }

    /// Conventional NMPC symbol for the block (`x`, `u`, `z`, `p`).
    pub const fn label(self) -> &'static str {
        match self {
            Self::State => "x",
            Self::Input => "u",
            Self::Algebraic => "z",
            Self::Params => "p",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Quadruped leg, in the order the forces are stacked in the input block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Leg {
    /// Front left.
    FL,
    /// Front right.
    FR,
    /// Rear left.
    RL,
    /// Rear right.
    RR,
}

impl Leg {
    /// All legs in stacking order.
    pub const ALL: [Self; N_LEGS] = [Self::FL, Self::FR, Self::RL, Self::RR];

    pub const fn index(self) -> usize {
        match self {
            Self::FL => 0,
            Self::FR => 1,
            Self::RL => 2,
            Self::RR => 3,
        }
    }

    pub const fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Self::FL),
            1 => Some(Self::FR),
            2 => Some(Self::RL),
            3 => Some(Self::RR),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::FL => "FL",
            Self::FR => "FR",
            Self::RL => "RL",
            Self::RR => "RR",
        }
    }

    /// Input-block indices holding this leg's `(fx, fy, fz)`.
    pub const fn force_range(self) -> Range<usize> {
        let start = FORCE_OFFSET + 3 * self.index();
        start..start + 3
    }

    /// Constraint-vector indices owned by this leg.
    pub const fn row_range(self) -> Range<usize> {
        let start = ROWS_PER_LEG * self.index();
        start..start + ROWS_PER_LEG
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
