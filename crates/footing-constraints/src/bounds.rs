//! Constraint bounds `lower ≤ h ≤ upper` for one stage.
//!
//! The pyramid rows only describe the friction cone together with their
//! bounds. Per leg:
//!
//! | row | expression  | lower    | upper    |
//! |-----|-------------|----------|----------|
//! | 0   | fx - μ fz   | -inf     | 0        |
//! | 1   | fy - μ fz   | -inf     | 0        |
//! | 2   | fy + μ fz   | 0        | +inf     |
//! | 3   | fx + μ fz   | 0        | +inf     |
//! | 4   | fz          | fz_min   | fz_max   |
//!
//! Rows 0 and 3 give `-μ fz ≤ fx ≤ μ fz`, rows 1 and 2 the same for `fy`.
//! A swing leg pins `fz` to zero, which collapses its pyramid to the origin.

use footing_core::{CONSTRAINT_DIM, ConstraintConfig, Leg, N_LEGS, ROWS_PER_LEG};

/// Lower and upper bound vectors for one stage's constraint vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstraintBounds {
    pub lower: [f64; CONSTRAINT_DIM],
    pub upper: [f64; CONSTRAINT_DIM],
}

impl ConstraintBounds {
    /// Bounds for a stage with the given per-leg contact flags.
    pub fn for_contacts(contacts: [bool; N_LEGS], config: &ConstraintConfig) -> Self {
        let mut lower = [0.0; CONSTRAINT_DIM];
        let mut upper = [0.0; CONSTRAINT_DIM];
        for leg in Leg::ALL {
            let (lo, hi) = leg_bounds(contacts[leg.index()], config);
            lower[leg.row_range()].copy_from_slice(&lo);
            upper[leg.row_range()].copy_from_slice(&hi);
        }
        Self { lower, upper }
    }

    /// All four legs in stance.
    pub fn all_stance(config: &ConstraintConfig) -> Self {
        Self::for_contacts([true; N_LEGS], config)
    }

    /// Per-row distance outside the bounds (zero when satisfied).
    ///
    /// A NaN row is infinitely far outside.
    pub fn violation(&self, h: &[f64]) -> [f64; CONSTRAINT_DIM] {
        let mut v = [0.0; CONSTRAINT_DIM];
        for (i, out) in v.iter_mut().enumerate() {
            *out = if h[i].is_nan() {
                f64::INFINITY
            } else {
                (self.lower[i] - h[i]).max(h[i] - self.upper[i]).max(0.0)
            };
        }
        v
    }

    /// Largest bound violation over all rows.
    pub fn max_violation(&self, h: &[f64]) -> f64 {
        self.violation(h).into_iter().fold(0.0, f64::max)
    }

    /// Whether `h` lies inside the bounds up to `tol`.
    pub fn is_satisfied(&self, h: &[f64], tol: f64) -> bool {
        self.max_violation(h) <= tol
    }
}

type LegBounds = ([f64; ROWS_PER_LEG], [f64; ROWS_PER_LEG]);

fn leg_bounds(stance: bool, config: &ConstraintConfig) -> LegBounds {
    let inf = f64::INFINITY;
    let (fz_lo, fz_hi) = if stance {
        (config.fz_min, config.fz_upper())
    } else {
        (0.0, 0.0)
    };
    ([-inf, -inf, 0.0, 0.0, fz_lo], [0.0, 0.0, inf, inf, fz_hi])
}
