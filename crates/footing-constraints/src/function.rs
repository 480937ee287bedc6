//! Solver-facing function interface.
//!
//! An NLP solver drives every stage function through the same small
//! surface: argument and result counts, slot names, sparsity of each slot,
//! workspace sizes, and evaluation. The contact constraints need no
//! workspace and hold no memory, so there is nothing to allocate, check out
//! or release: the caller owns every buffer.

use footing_core::{CONSTRAINT_DIM, Slot};

use crate::block::StageArgs;
use crate::evaluator::ContactConstraintEvaluator;
use crate::jacobian::ContactConstraintJacobian;
use crate::sparsity::Sparsity;

/// Workspace a function needs per call, in elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkSize {
    /// Argument pointer slots.
    pub arg: usize,
    /// Result pointer slots.
    pub res: usize,
    /// Integer scratch words.
    pub iw: usize,
    /// Real scratch words.
    pub w: usize,
}

impl WorkSize {
    /// The same sizes in bytes.
    pub const fn bytes(&self) -> Self {
        Self {
            arg: self.arg * size_of::<*const f64>(),
            res: self.res * size_of::<*mut f64>(),
            iw: self.iw * size_of::<i64>(),
            w: self.w * size_of::<f64>(),
        }
    }
}

/// A stage function with the `(x, u, z, p) -> (o0)` calling convention.
pub trait ConstraintFunction {
    /// Function name, for diagnostics.
    fn name(&self) -> &'static str;

    /// Number of argument slots.
    fn n_in(&self) -> usize {
        Slot::ALL.len()
    }

    /// Number of result slots.
    fn n_out(&self) -> usize {
        1
    }

    /// Positional name of argument `i`.
    fn name_in(&self, i: usize) -> Option<&'static str> {
        const NAMES: [&str; 4] = ["i0", "i1", "i2", "i3"];
        NAMES.get(i).copied()
    }

    /// Positional name of result `i`.
    fn name_out(&self, i: usize) -> Option<&'static str> {
        (i == 0).then_some("o0")
    }

    /// Sparsity of argument `i`.
    fn sparsity_in(&self, i: usize) -> Option<Sparsity> {
        Slot::from_index(i).map(input_sparsity)
    }

    /// Sparsity of result `i`.
    fn sparsity_out(&self, i: usize) -> Option<Sparsity>;

    /// Value an absent argument reads as.
    fn default_in(&self, _i: usize) -> f64 {
        0.0
    }

    /// Per-call workspace.
    fn work_size(&self) -> WorkSize {
        WorkSize {
            arg: self.n_in(),
            res: self.n_out(),
            iw: 0,
            w: 0,
        }
    }

    /// Evaluate into the result buffer, holding nonzeros of `sparsity_out(0)`.
    /// `None` skips evaluation.
    fn eval(&self, args: &StageArgs<'_>, out: Option<&mut [f64]>);
}

/// Symbolic name (`x`, `u`, `z`, `p`) for argument `i`.
pub fn slot_label(i: usize) -> Option<&'static str> {
    Slot::from_index(i).map(Slot::label)
}

/// Declared pattern of an argument slot.
///
/// Blocks of zero width are `0 × 0`; all others are dense column vectors.
pub fn input_sparsity(slot: Slot) -> Sparsity {
    match slot.dim() {
        0 => Sparsity::empty(),
        n => Sparsity::dense_column(n),
    }
}

impl ConstraintFunction for ContactConstraintEvaluator {
    fn name(&self) -> &'static str {
        "contact_constr_h"
    }

    fn sparsity_out(&self, i: usize) -> Option<Sparsity> {
        (i == 0).then(|| Sparsity::dense_column(CONSTRAINT_DIM))
    }

    fn eval(&self, args: &StageArgs<'_>, out: Option<&mut [f64]>) {
        self.evaluate(args, out);
    }
}

impl ConstraintFunction for ContactConstraintJacobian {
    fn name(&self) -> &'static str {
        match self.wrt() {
            Slot::Params => "contact_constr_h_jac_p",
            _ => "contact_constr_h_jac_u",
        }
    }

    fn sparsity_out(&self, i: usize) -> Option<Sparsity> {
        (i == 0).then(|| self.sparsity().clone())
    }

    fn eval(&self, args: &StageArgs<'_>, out: Option<&mut [f64]>) {
        self.evaluate(args, out);
    }
}
