//! Stage arguments handed to the constraint functions by the NLP solver.
//!
//! A solver probing structural zeros may leave any block out. An absent
//! block reads as a zero-filled vector of the slot's declared width.

use footing_core::{ContactForce, FRICTION_PARAM_INDEX, Leg, ShapeError, Slot};

/// One input block: either a borrowed buffer or absent (all zeros).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Block<'a> {
    Present(&'a [f64]),
    #[default]
    Absent,
}

impl<'a> Block<'a> {
    /// Element `i`, or `0.0` for an absent block.
    ///
    /// # Panics
    /// If the block is present and shorter than `i + 1`.
    #[inline]
    pub fn get(&self, i: usize) -> f64 {
        match self {
            Self::Present(data) => data[i],
            Self::Absent => 0.0,
        }
    }

    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// The borrowed data, if present.
    pub const fn as_slice(&self) -> Option<&'a [f64]> {
        match self {
            Self::Present(data) => Some(*data),
            Self::Absent => None,
        }
    }

    fn check(&self, slot: Slot) -> Result<(), ShapeError> {
        match self {
            Self::Present(data) if data.len() < slot.dim() => Err(ShapeError::BlockTooShort {
                slot,
                expected: slot.dim(),
                got: data.len(),
            }),
            _ => Ok(()),
        }
    }
}

impl<'a> From<&'a [f64]> for Block<'a> {
    fn from(data: &'a [f64]) -> Self {
        Self::Present(data)
    }
}

impl<'a> From<Option<&'a [f64]>> for Block<'a> {
    fn from(data: Option<&'a [f64]>) -> Self {
        data.map_or(Self::Absent, Self::Present)
    }
}

/// The four argument blocks of one stage evaluation: `(x, u, z, p)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StageArgs<'a> {
    pub state: Block<'a>,
    pub input: Block<'a>,
    pub algebraic: Block<'a>,
    pub params: Block<'a>,
}

impl<'a> StageArgs<'a> {
    /// All four blocks absent.
    pub const fn absent() -> Self {
        Self {
            state: Block::Absent,
            input: Block::Absent,
            algebraic: Block::Absent,
            params: Block::Absent,
        }
    }

    /// Input and parameter blocks present, state and algebraic absent.
    ///
    /// The contact constraints only read `u` and `p`, so this is the usual
    /// way to build arguments outside a solver.
    pub const fn new(input: &'a [f64], params: &'a [f64]) -> Self {
        Self {
            state: Block::Absent,
            input: Block::Present(input),
            algebraic: Block::Absent,
            params: Block::Present(params),
        }
    }

    #[must_use]
    pub const fn with_state(mut self, state: &'a [f64]) -> Self {
        self.state = Block::Present(state);
        self
    }

    #[must_use]
    pub const fn with_algebraic(mut self, algebraic: &'a [f64]) -> Self {
        self.algebraic = Block::Present(algebraic);
        self
    }

    /// Block in the given calling-convention slot.
    pub const fn block(&self, slot: Slot) -> &Block<'a> {
        match slot {
            Slot::State => &self.state,
            Slot::Input => &self.input,
            Slot::Algebraic => &self.algebraic,
            Slot::Params => &self.params,
        }
    }

    /// Friction coefficient μ from the parameter block.
    #[inline]
    pub fn friction(&self) -> f64 {
        self.params.get(FRICTION_PARAM_INDEX)
    }

    /// Ground reaction force of `leg` from the input block.
    #[inline]
    pub fn force(&self, leg: Leg) -> ContactForce {
        let r = leg.force_range();
        ContactForce::new(
            self.input.get(r.start),
            self.input.get(r.start + 1),
            self.input.get(r.start + 2),
        )
    }

    /// Check every present block against its declared width.
    pub fn check_shapes(&self) -> Result<(), ShapeError> {
        for slot in Slot::ALL {
            self.block(slot).check(slot)?;
        }
        Ok(())
    }
}
