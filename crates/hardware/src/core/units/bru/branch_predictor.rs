//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait implemented by direction
//! predictors. The core only models direction: there is no target buffer and no
//! fetch redirection.

/// Trait for branch direction predictors.
pub trait BranchPredictor {
    /// Predicts whether the next branch will be taken.
    ///
    /// This is a pure read of predictor state.
    fn predict(&self) -> bool;

    /// Trains the predictor with the resolved outcome of a branch.
    ///
    /// # Arguments
    ///
    /// * `taken` - Whether the branch was actually taken
    fn update(&mut self, taken: bool);
}
