//! Core processor implementation.
//!
//! This module contains the scheduling pipeline and the execution units it
//! issues to.

/// Scheduling pipeline (reservation station, reorder buffer, CDB, step driver).
pub mod pipeline;

/// Execution units (ALU, branch unit and predictor).
pub mod units;

pub use self::pipeline::engine::{Core, DispatchStall, StepReport};
