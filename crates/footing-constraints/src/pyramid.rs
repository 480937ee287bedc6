//! Per-leg pyramidal friction cone.
//!
//! The Coulomb cone `fx² + fy² ≤ μ² fz²` is replaced by its inscribed
//! four-sided pyramid `|fx| ≤ μ fz`, `|fy| ≤ μ fz`, plus the unilateral
//! row `fz`. Each leg contributes five affine rows, in this order:
//!
//! ```text
//! h0 = fx - μ fz
//! h1 = fy - μ fz
//! h2 = fy + μ fz
//! h3 = fx + μ fz
//! h4 = fz
//! ```
//!
//! [`PYRAMID_ROWS`] is the single description of this map. Values, force
//! partials, friction partials and the structural sparsity of the Jacobian
//! are all read from it.

use footing_core::{ContactForce, ROWS_PER_LEG};

/// Tangential force component a pyramid face bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Component index within `(fx, fy, fz)`.
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
        }
    }
}

/// Index of `fz` within `(fx, fy, fz)`.
pub const NORMAL: usize = 2;

/// One affine row of the per-leg map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PyramidRow {
    /// `f_axis + mu_sign · μ · fz`.
    Friction { axis: Axis, mu_sign: f64 },
    /// `fz`.
    Unilateral,
}

/// The five rows of one leg, in output order.
pub const PYRAMID_ROWS: [PyramidRow; ROWS_PER_LEG] = [
    PyramidRow::Friction {
        axis: Axis::X,
        mu_sign: -1.0,
    },
    PyramidRow::Friction {
        axis: Axis::Y,
        mu_sign: -1.0,
    },
    PyramidRow::Friction {
        axis: Axis::Y,
        mu_sign: 1.0,
    },
    PyramidRow::Friction {
        axis: Axis::X,
        mu_sign: 1.0,
    },
    PyramidRow::Unilateral,
];

impl PyramidRow {
    /// Row value for one leg's force.
    #[inline]
    pub fn value(self, force: &ContactForce, mu: f64) -> f64 {
        match self {
            Self::Friction { axis, mu_sign } => force[axis.index()] + mu_sign * (mu * force.z),
            Self::Unilateral => force.z,
        }
    }

    /// Whether the row structurally depends on force component `component`.
    pub const fn depends_on_force(self, component: usize) -> bool {
        match self {
            Self::Friction { axis, .. } => component == axis.index() || component == NORMAL,
            Self::Unilateral => component == NORMAL,
        }
    }

    /// `∂h/∂f[component]`.
    #[inline]
    pub fn force_partial(self, component: usize, mu: f64) -> f64 {
        match self {
            Self::Friction { axis, .. } if component == axis.index() => 1.0,
            Self::Friction { mu_sign, .. } if component == NORMAL => mu_sign * mu,
            Self::Unilateral if component == NORMAL => 1.0,
            _ => 0.0,
        }
    }

    /// Whether the row structurally depends on μ.
    pub const fn depends_on_friction(self) -> bool {
        matches!(self, Self::Friction { .. })
    }

    /// `∂h/∂μ`.
    #[inline]
    pub fn friction_partial(self, force: &ContactForce) -> f64 {
        match self {
            Self::Friction { mu_sign, .. } => mu_sign * force.z,
            Self::Unilateral => 0.0,
        }
    }
}

/// All five rows for one leg.
#[inline]
pub fn evaluate_leg(force: &ContactForce, mu: f64) -> [f64; ROWS_PER_LEG] {
    PYRAMID_ROWS.map(|row| row.value(force, mu))
}

/// Structural nonzeros of one leg's 5×3 force Jacobian.
pub fn leg_force_nnz() -> usize {
    PYRAMID_ROWS
        .iter()
        .map(|row| (0..3).filter(|&c| row.depends_on_force(c)).count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rows_match_closed_form() {
        let f = ContactForce::new(3.0, -2.0, 40.0);
        let mu = 0.6;
        let h = evaluate_leg(&f, mu);
        assert_relative_eq!(h[0], 3.0 - 24.0, epsilon = 1e-12);
        assert_relative_eq!(h[1], -2.0 - 24.0, epsilon = 1e-12);
        assert_relative_eq!(h[2], -2.0 + 24.0, epsilon = 1e-12);
        assert_relative_eq!(h[3], 3.0 + 24.0, epsilon = 1e-12);
        assert_relative_eq!(h[4], 40.0, epsilon = 1e-12);
    }

    #[test]
    fn saturated_friction() {
        // fx = fy = μ fz: the two upper faces are exactly active.
        let mu = 0.5;
        let fz = 10.0;
        let f = ContactForce::new(mu * fz, mu * fz, fz);
        let h = evaluate_leg(&f, mu);
        assert_eq!(h[0], 0.0);
        assert_eq!(h[1], 0.0);
        assert_relative_eq!(h[2], 2.0 * mu * fz, epsilon = 1e-12);
        assert_relative_eq!(h[3], 2.0 * mu * fz, epsilon = 1e-12);
        assert_eq!(h[4], fz);
    }

    #[test]
    fn frictionless_rows_collapse_to_tangential_forces() {
        let f = ContactForce::new(1.5, -0.5, 20.0);
        let h = evaluate_leg(&f, 0.0);
        assert_eq!(h, [1.5, -0.5, -0.5, 1.5, 20.0]);
    }

    #[test]
    fn partials_follow_structure() {
        let mu = 0.8;
        for row in PYRAMID_ROWS {
            for c in 0..3 {
                if !row.depends_on_force(c) {
                    assert_eq!(row.force_partial(c, mu), 0.0, "{row:?} c={c}");
                }
            }
        }
        assert_eq!(PYRAMID_ROWS[0].force_partial(0, mu), 1.0);
        assert_eq!(PYRAMID_ROWS[0].force_partial(NORMAL, mu), -mu);
        assert_eq!(PYRAMID_ROWS[2].force_partial(1, mu), 1.0);
        assert_eq!(PYRAMID_ROWS[2].force_partial(NORMAL, mu), mu);
        assert_eq!(PYRAMID_ROWS[4].force_partial(NORMAL, mu), 1.0);
    }

    #[test]
    fn friction_partials() {
        let f = ContactForce::new(0.0, 0.0, 12.0);
        let d: Vec<f64> = PYRAMID_ROWS.iter().map(|r| r.friction_partial(&f)).collect();
        assert_eq!(d, vec![-12.0, -12.0, 12.0, 12.0, 0.0]);
        assert!(!PYRAMID_ROWS[4].depends_on_friction());
    }

    #[test]
    fn at_most_two_nonzeros_per_row() {
        for row in PYRAMID_ROWS {
            let nnz = (0..3).filter(|&c| row.depends_on_force(c)).count();
            assert!((1..=2).contains(&nnz));
        }
        assert_eq!(leg_force_nnz(), 9);
    }
}
