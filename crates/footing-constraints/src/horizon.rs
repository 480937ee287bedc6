//! Contact constraints over a whole prediction horizon.
//!
//! Stage `k` writes its constraint vector to `out[k * 20..(k + 1) * 20]`
//! and its Jacobian nonzeros to the `k`-th chunk of `nnz` values. Stages are
//! independent, so the parallel paths split the output into disjoint chunks
//! and fan them out with rayon.

use footing_core::{CONSTRAINT_DIM, ConstraintConfig, INPUT_DIM, PARAM_DIM, ShapeError};
use rayon::prelude::*;

use crate::block::StageArgs;
use crate::evaluator::ContactConstraintEvaluator;
use crate::jacobian::ContactConstraintJacobian;

/// Stage arguments from stacked `N × 24` inputs and `N × 29` parameters.
///
/// Returns `None` if the two buffers disagree on the stage count or are
/// not whole multiples of the block widths.
pub fn stages_from_stacked<'a>(
    inputs: &'a [f64],
    params: &'a [f64],
) -> Option<Vec<StageArgs<'a>>> {
    if inputs.len() % INPUT_DIM != 0 || params.len() % PARAM_DIM != 0 {
        return None;
    }
    if inputs.len() / INPUT_DIM != params.len() / PARAM_DIM {
        return None;
    }
    Some(
        inputs
            .chunks_exact(INPUT_DIM)
            .zip(params.chunks_exact(PARAM_DIM))
            .map(|(u, p)| StageArgs::new(u, p))
            .collect(),
    )
}

/// Evaluates the contact constraints and their input Jacobian stage by stage.
///
/// Built with [`Self::from_config`], the evaluator only accepts horizons of
/// exactly `config.horizon` stages. [`Self::new`] accepts any stage count.
#[derive(Clone, Debug)]
pub struct HorizonEvaluator {
    evaluator: ContactConstraintEvaluator,
    jacobian: ContactConstraintJacobian,
    horizon: Option<usize>,
}

impl Default for HorizonEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl HorizonEvaluator {
    pub fn new() -> Self {
        Self {
            evaluator: ContactConstraintEvaluator::new(),
            jacobian: ContactConstraintJacobian::wrt_input(),
            horizon: None,
        }
    }

    /// Evaluator fixed to the configured number of shooting nodes.
    pub fn from_config(config: &ConstraintConfig) -> Self {
        Self {
            horizon: Some(config.horizon),
            ..Self::new()
        }
    }

    /// Required stage count, if fixed.
    pub const fn horizon(&self) -> Option<usize> {
        self.horizon
    }

    /// The per-stage input Jacobian, for its sparsity pattern.
    pub const fn jacobian(&self) -> &ContactConstraintJacobian {
        &self.jacobian
    }

    /// Values per stage.
    pub const fn values_per_stage(&self) -> usize {
        CONSTRAINT_DIM
    }

    /// Jacobian nonzeros per stage.
    pub fn nnz_per_stage(&self) -> usize {
        self.jacobian.nnz()
    }

    /// Evaluate every stage sequentially into `out` (`stages.len() * 20` values).
    pub fn evaluate(&self, stages: &[StageArgs<'_>], out: &mut [f64]) -> Result<(), ShapeError> {
        self.check_stages(stages, out.len(), CONSTRAINT_DIM)?;
        tracing::trace!(stages = stages.len(), "evaluating contact constraints");
        for (args, chunk) in stages.iter().zip(out.chunks_exact_mut(CONSTRAINT_DIM)) {
            self.evaluator.evaluate(args, Some(chunk));
        }
        Ok(())
    }

    /// Parallel [`Self::evaluate`]. Produces bit-identical output.
    pub fn evaluate_par(
        &self,
        stages: &[StageArgs<'_>],
        out: &mut [f64],
    ) -> Result<(), ShapeError> {
        self.check_stages(stages, out.len(), CONSTRAINT_DIM)?;
        tracing::trace!(stages = stages.len(), "evaluating contact constraints in parallel");
        self.fill_values_par(stages, out);
        Ok(())
    }

    /// Jacobian nonzeros for every stage sequentially (`stages.len() * nnz` values).
    pub fn jacobian_values(
        &self,
        stages: &[StageArgs<'_>],
        out: &mut [f64],
    ) -> Result<(), ShapeError> {
        let nnz = self.nnz_per_stage();
        self.check_stages(stages, out.len(), nnz)?;
        for (args, chunk) in stages.iter().zip(out.chunks_exact_mut(nnz)) {
            self.jacobian.evaluate(args, Some(chunk));
        }
        Ok(())
    }

    /// Parallel [`Self::jacobian_values`].
    pub fn jacobian_values_par(
        &self,
        stages: &[StageArgs<'_>],
        out: &mut [f64],
    ) -> Result<(), ShapeError> {
        let nnz = self.nnz_per_stage();
        self.check_stages(stages, out.len(), nnz)?;
        out.par_chunks_exact_mut(nnz)
            .zip(stages.par_iter())
            .for_each(|(chunk, args)| self.jacobian.evaluate(args, Some(chunk)));
        Ok(())
    }

    /// Validate every stage's blocks, then evaluate in parallel.
    pub fn try_evaluate_par(
        &self,
        stages: &[StageArgs<'_>],
        out: &mut [f64],
    ) -> Result<(), ShapeError> {
        stages.iter().try_for_each(StageArgs::check_shapes)?;
        self.evaluate_par(stages, out)
    }

    /// Constraint values for all stages in a fresh buffer.
    pub fn values(&self, stages: &[StageArgs<'_>]) -> Result<Vec<f64>, ShapeError> {
        self.check_stage_count(stages)?;
        let mut out = vec![0.0; stages.len() * CONSTRAINT_DIM];
        self.fill_values_par(stages, &mut out);
        Ok(out)
    }

    fn fill_values_par(&self, stages: &[StageArgs<'_>], out: &mut [f64]) {
        out.par_chunks_exact_mut(CONSTRAINT_DIM)
            .zip(stages.par_iter())
            .for_each(|(chunk, args)| self.evaluator.evaluate(args, Some(chunk)));
    }

    fn check_stage_count(&self, stages: &[StageArgs<'_>]) -> Result<(), ShapeError> {
        match self.horizon {
            Some(expected) if expected != stages.len() => Err(ShapeError::StageCount {
                expected,
                got: stages.len(),
            }),
            _ => Ok(()),
        }
    }

    fn check_stages(
        &self,
        stages: &[StageArgs<'_>],
        got: usize,
        per_stage: usize,
    ) -> Result<(), ShapeError> {
        self.check_stage_count(stages)?;
        let expected = stages.len() * per_stage;
        if got == expected {
            Ok(())
        } else {
            Err(ShapeError::HorizonMismatch {
                stages: stages.len(),
                expected,
                got,
            })
        }
    }
}
