//! Friction-cone and unilateral contact constraints for quadruped centroidal NMPC.
//!
//! At every shooting node the NLP solver asks for `h(x, u, p)`, a vector of
//! five rows per leg that, with the bounds in [`bounds`], keeps each ground
//! reaction force inside a linearized friction cone and prevents the ground
//! from pulling on the foot:
//!
//! 1. **Evaluator**: the 20 stage constraint values
//! 2. **Jacobian**: sparse first derivatives w.r.t. inputs and parameters
//! 3. **Function interface**: shape, sparsity and workspace metadata
//! 4. **Bounds**: stance/swing lower and upper bounds
//! 5. **Horizon**: stacked evaluation over all shooting nodes
//!
//! # Architecture
//!
//! Everything is a pure function of the caller's buffers. The per-leg map is
//! described once in [`pyramid::PYRAMID_ROWS`]; values, partials and the
//! Jacobian sparsity pattern are all read from that table.

pub mod block;
pub mod bounds;
pub mod evaluator;
pub mod function;
pub mod horizon;
pub mod jacobian;
pub mod pyramid;
pub mod sparsity;

pub use block::{Block, StageArgs};
pub use bounds::ConstraintBounds;
pub use evaluator::ContactConstraintEvaluator;
pub use function::{ConstraintFunction, WorkSize, input_sparsity, slot_label};
pub use horizon::{HorizonEvaluator, stages_from_stacked};
pub use jacobian::ContactConstraintJacobian;
pub use pyramid::{Axis, PYRAMID_ROWS, PyramidRow, evaluate_leg};
pub use sparsity::Sparsity;
