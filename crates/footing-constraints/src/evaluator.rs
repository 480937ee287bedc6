//! Stage constraint values.

use footing_core::{CONSTRAINT_DIM, Leg, ShapeError};

use crate::block::StageArgs;
use crate::pyramid::evaluate_leg;

/// Friction-cone and unilateral constraints for the four legs of one stage.
///
/// Produces `h` with five rows per leg, legs in [`Leg::ALL`] order. The
/// evaluator holds no state: every call is a pure function of its
/// arguments and may run concurrently with any other call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContactConstraintEvaluator;

impl ContactConstraintEvaluator {
    pub const fn new() -> Self {
        Self
    }

    /// Write `h` into `out`. Nothing is written when `out` is `None`.
    ///
    /// Absent blocks read as zeros. Block lengths are not checked; use
    /// [`Self::try_evaluate`] at untrusted boundaries.
    ///
    /// # Panics
    /// If a present input or parameter block, or `out`, is shorter than
    /// its declared width.
    pub fn evaluate(&self, args: &StageArgs<'_>, out: Option<&mut [f64]>) {
        let Some(out) = out else {
            return;
        };
        let mu = args.friction();
        for leg in Leg::ALL {
            let rows = evaluate_leg(&args.force(leg), mu);
            out[leg.row_range()].copy_from_slice(&rows);
        }
    }

    /// `h` as a fixed-size array.
    pub fn values(&self, args: &StageArgs<'_>) -> [f64; CONSTRAINT_DIM] {
        let mut h = [0.0; CONSTRAINT_DIM];
        self.evaluate(args, Some(&mut h[..]));
        h
    }

    /// Like [`Self::evaluate`], but validates every buffer first.
    pub fn try_evaluate(&self, args: &StageArgs<'_>, out: &mut [f64]) -> Result<(), ShapeError> {
        if let Err(err) = args.check_shapes() {
            tracing::debug!(%err, "rejected contact constraint arguments");
            return Err(err);
        }
        if out.len() < CONSTRAINT_DIM {
            return Err(ShapeError::OutputTooShort {
                expected: CONSTRAINT_DIM,
                got: out.len(),
            });
        }
        self.evaluate(args, Some(out));
        Ok(())
    }
}
