//! Pipeline Collaborator Interfaces.
//!
//! The core is driven from both ends by collaborators it does not own:
//! 1. **Instruction Source:** Stands in for fetch/decode and hands over pre-tagged instructions.
//! 2. **Retire Sink:** Receives each instruction as it leaves the reorder buffer, in program order.

use std::collections::VecDeque;

use crate::isa::instruction::DecodedInstruction;

use super::rob::RobEntry;

/// Supplies decoded instructions to the dispatch phase.
///
/// The core asks for at most one instruction per step, and only when its
/// fetch latch is empty, so a source is never asked to hold an instruction the
/// core could not accept.
pub trait InstructionSource {
    /// Returns the next instruction in program order, or `None` if there is
    /// nothing to fetch this step.
    fn next_instruction(&mut self) -> Option<DecodedInstruction>;
}

/// Consumes retired instructions.
pub trait RetireSink {
    /// Called once per retired instruction, oldest first.
    ///
    /// # Arguments
    ///
    /// * `entry` - The reorder buffer entry as it was when it retired
    fn retire(&mut self, entry: &RobEntry);
}

impl InstructionSource for VecDeque<DecodedInstruction> {
    fn next_instruction(&mut self) -> Option<DecodedInstruction> {
        self.pop_front()
    }
}

impl RetireSink for Vec<RobEntry> {
    fn retire(&mut self, entry: &RobEntry) {
        self.push(*entry);
    }
}
