//! Simulator: owns the core alongside the program it runs.
//!
//! The core only borrows its instruction source and retirement sink for the
//! duration of a step, so the simulator keeps both next to the core and lends
//! them out on every tick.

use std::collections::VecDeque;

use tracing::info;

use crate::common::{ConfigError, SimError};
use crate::config::Config;
use crate::core::pipeline::rob::RobEntry;
use crate::core::{Core, StepReport};
use crate::isa::instruction::DecodedInstruction;

use super::program::Program;

/// Top-level simulator: scheduling core plus program and retirement log.
#[derive(Debug)]
pub struct Simulator {
    /// The scheduling core.
    pub core: Core,
    /// Instructions not yet fetched.
    pub source: VecDeque<DecodedInstruction>,
    /// Instructions retired so far, oldest first.
    pub retired: Vec<RobEntry>,
    max_cycles: u64,
}

impl Simulator {
    /// Creates a simulator that will run `program` on a core built from `config`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`Core::new`].
    pub fn new(config: &Config, program: Program) -> Result<Self, ConfigError> {
        Ok(Self {
            core: Core::new(config)?,
            retired: Vec::with_capacity(program.len()),
            source: program.into_source(),
            max_cycles: config.general.max_cycles,
        })
    }

    /// Advances the simulator by one step.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Core`] if the core rejects an instruction.
    pub fn tick(&mut self) -> Result<StepReport, SimError> {
        Ok(self.core.step(&mut self.source, &mut self.retired)?)
    }

    /// True once every instruction has been fetched and the core has drained.
    pub fn is_finished(&self) -> bool {
        self.source.is_empty() && self.core.is_drained()
    }

    /// Runs until the program finishes, calling `on_step` after every step.
    ///
    /// Returns the number of steps taken.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::CycleLimit`] if the program has not finished after
    /// `general.max_cycles` steps, or [`SimError::Core`] if the core rejects
    /// an instruction.
    pub fn run_with<F>(&mut self, mut on_step: F) -> Result<u64, SimError>
    where
        F: FnMut(&StepReport),
    {
        while !self.is_finished() {
            if self.core.stats.cycles >= self.max_cycles {
                return Err(SimError::CycleLimit {
                    cycles: self.core.stats.cycles,
                });
            }
            let report = self.tick()?;
            on_step(&report);
        }
        info!(
            cycles = self.core.stats.cycles,
            retired = self.retired.len(),
            "simulation finished"
        );
        Ok(self.core.stats.cycles)
    }

    /// Runs until the program finishes.
    ///
    /// # Errors
    ///
    /// Same as [`run_with`](Self::run_with).
    pub fn run(&mut self) -> Result<u64, SimError> {
        self.run_with(|_| {})
    }
}
