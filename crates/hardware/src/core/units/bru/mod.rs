//! Branch resolution unit (BRU).
//!
//! Branches travel through the reservation station like any other
//! instruction. When one issues, the branch unit:
//! 1. **Predicts:** Reads the direction predictor.
//! 2. **Resolves:** Evaluates the branch condition against the flags operand.
//! 3. **Trains:** Updates the predictor with the real outcome.
//!
//! The outcome is written back on the common data bus as `value = taken`.

pub use self::branch_predictor::BranchPredictor;

/// Branch predictor trait.
pub mod branch_predictor;

/// Two-bit saturating counter predictor.
pub mod counter;

use self::counter::SaturatingCounter;
use crate::isa::opcode::BranchCondition;

/// Result of resolving one branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchOutcome {
    /// Direction the predictor guessed before resolution.
    pub predicted: bool,
    /// Direction the branch actually went.
    pub taken: bool,
}

impl BranchOutcome {
    /// Returns true if the prediction was wrong.
    #[inline]
    pub const fn mispredicted(&self) -> bool {
        self.predicted != self.taken
    }
}

/// Branch execution unit wrapping a direction predictor.
#[derive(Clone, Debug, Default)]
pub struct BranchUnit<P = SaturatingCounter> {
    predictor: P,
}

impl<P: BranchPredictor> BranchUnit<P> {
    /// Creates a branch unit around `predictor`.
    pub const fn new(predictor: P) -> Self {
        Self { predictor }
    }

    /// The underlying predictor.
    pub const fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Resolves a branch against its flags operand and trains the predictor.
    pub fn resolve(&mut self, cond: BranchCondition, flags: i32) -> BranchOutcome {
        let predicted = self.predictor.predict();
        let taken = cond.taken(flags);
        self.predictor.update(taken);
        BranchOutcome { predicted, taken }
    }
}
