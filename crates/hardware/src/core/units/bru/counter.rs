//! Two-bit Saturating Counter Predictor.
//!
//! The classic bimodal counter: states 0 and 1 predict not-taken, states 2 and
//! 3 predict taken. Each resolved branch moves the counter one step toward 3
//! (taken) or 0 (not taken), clamping at both ends, so a single anomalous
//! outcome never flips a strongly biased prediction.

use super::BranchPredictor;
use crate::common::ConfigError;

/// Highest counter state (strongly taken).
pub const COUNTER_MAX: u8 = 3;

/// Lowest state that predicts taken.
const TAKEN_THRESHOLD: u8 = 2;

/// A 2-bit saturating counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SaturatingCounter {
    state: u8,
}

impl SaturatingCounter {
    /// Creates a counter in state 0 (strongly not-taken).
    pub const fn new() -> Self {
        Self { state: 0 }
    }

    /// Creates a counter in `state`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PredictorState`] if `state > 3`.
    pub const fn with_state(state: u8) -> Result<Self, ConfigError> {
        if state > COUNTER_MAX {
            return Err(ConfigError::PredictorState(state));
        }
        Ok(Self { state })
    }

    /// Current counter state, always in `0..=3`.
    #[inline]
    pub const fn state(&self) -> u8 {
        self.state
    }
}

impl BranchPredictor for SaturatingCounter {
    #[inline]
    fn predict(&self) -> bool {
        self.state >= TAKEN_THRESHOLD
    }

    fn update(&mut self, taken: bool) {
        if taken && self.state < COUNTER_MAX {
            self.state += 1;
        } else if !taken && self.state > 0 {
            self.state -= 1;
        }
    }
}
