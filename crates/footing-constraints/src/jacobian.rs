//! First derivatives of the stage constraints.
//!
//! Every row of `h` is affine in exactly one tangential force component and
//! the normal force of its leg, so `∂h/∂u` has at most two nonzeros per row
//! and the same pattern on every call. The pattern and the per-entry partials
//! both come from [`PYRAMID_ROWS`], the table the value function uses.
//!
//! `∂h/∂p` is kept as well: only the friction coefficient enters `h`, giving
//! one column of `∓fz` entries.

use clarabel::algebra::CscMatrix;
use footing_core::{CONSTRAINT_DIM, FRICTION_PARAM_INDEX, Leg, ShapeError, Slot};
use nalgebra::DMatrix;

use crate::block::StageArgs;
use crate::pyramid::{PYRAMID_ROWS, PyramidRow};
use crate::sparsity::Sparsity;

/// Which partial a nonzero carries.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Partial {
    /// `∂h/∂f[component]` of the row's own leg.
    Force(usize),
    /// `∂h/∂μ`.
    Friction,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Entry {
    leg: Leg,
    face: PyramidRow,
    partial: Partial,
}

/// Sparse Jacobian of the contact constraints with respect to one slot.
#[derive(Clone, Debug, PartialEq)]
pub struct ContactConstraintJacobian {
    wrt: Slot,
    sparsity: Sparsity,
    /// Nonzeros in storage order of `sparsity`.
    entries: Vec<Entry>,
}

impl ContactConstraintJacobian {
    /// `∂h/∂u`: 20 × 24, nine nonzeros per leg.
    pub fn wrt_input() -> Self {
        let mut triplets = Vec::new();
        for leg in Leg::ALL {
            let cols = leg.force_range();
            for (i, face) in PYRAMID_ROWS.into_iter().enumerate() {
                for component in 0..3 {
                    if face.depends_on_force(component) {
                        triplets.push((
                            (leg.row_range().start + i, cols.start + component),
                            Entry {
                                leg,
                                face,
                                partial: Partial::Force(component),
                            },
                        ));
                    }
                }
            }
        }
        Self::from_triplets(Slot::Input, triplets)
    }

    /// `∂h/∂p`: 20 × 29, nonzero only in the friction column.
    pub fn wrt_params() -> Self {
        let mut triplets = Vec::new();
        for leg in Leg::ALL {
            for (i, face) in PYRAMID_ROWS.into_iter().enumerate() {
                if face.depends_on_friction() {
                    triplets.push((
                        (leg.row_range().start + i, FRICTION_PARAM_INDEX),
                        Entry {
                            leg,
                            face,
                            partial: Partial::Friction,
                        },
                    ));
                }
            }
        }
        Self::from_triplets(Slot::Params, triplets)
    }

    fn from_triplets(wrt: Slot, mut triplets: Vec<((usize, usize), Entry)>) -> Self {
        // Column-major storage order.
        triplets.sort_by_key(|&((r, c), _)| (c, r));
        let coords: Vec<(usize, usize)> = triplets.iter().map(|&(rc, _)| rc).collect();
        let sparsity = Sparsity::from_triplets(CONSTRAINT_DIM, wrt.dim(), &coords);
        debug_assert_eq!(sparsity.nnz(), triplets.len(), "duplicate Jacobian entry");
        Self {
            wrt,
            sparsity,
            entries: triplets.into_iter().map(|(_, e)| e).collect(),
        }
    }

    /// Slot the derivative is taken with respect to.
    pub const fn wrt(&self) -> Slot {
        self.wrt
    }

    pub const fn sparsity(&self) -> &Sparsity {
        &self.sparsity
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Write the nonzero values, in storage order, into `out`.
    /// Nothing is written when `out` is `None`.
    ///
    /// # Panics
    /// If a present input or parameter block, or `out`, is too short.
    pub fn evaluate(&self, args: &StageArgs<'_>, out: Option<&mut [f64]>) {
        let Some(out) = out else {
            return;
        };
        assert!(out.len() >= self.entries.len(), "Jacobian output buffer too short");
        let mu = args.friction();
        for (slot, entry) in out.iter_mut().zip(&self.entries) {
            *slot = match entry.partial {
                Partial::Force(component) => entry.face.force_partial(component, mu),
                Partial::Friction => entry.face.friction_partial(&args.force(entry.leg)),
            };
        }
    }

    /// Nonzero values in storage order.
    pub fn values(&self, args: &StageArgs<'_>) -> Vec<f64> {
        let mut v = vec![0.0; self.nnz()];
        self.evaluate(args, Some(v.as_mut_slice()));
        v
    }

    /// Like [`Self::evaluate`], but validates every buffer first.
    pub fn try_evaluate(&self, args: &StageArgs<'_>, out: &mut [f64]) -> Result<(), ShapeError> {
        args.check_shapes()?;
        if out.len() < self.nnz() {
            return Err(ShapeError::OutputTooShort {
                expected: self.nnz(),
                got: out.len(),
            });
        }
        self.evaluate(args, Some(out));
        Ok(())
    }

    /// Dense `20 × dim(wrt)` matrix.
    pub fn dense(&self, args: &StageArgs<'_>) -> DMatrix<f64> {
        self.sparsity.to_dense(&self.values(args))
    }

    /// Clarabel sparse matrix with the fixed structural pattern.
    pub fn csc(&self, args: &StageArgs<'_>) -> CscMatrix<f64> {
        self.sparsity.to_csc(&self.values(args))
    }
}
