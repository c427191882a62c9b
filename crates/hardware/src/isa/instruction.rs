//! Instruction records passed between pipeline phases.
//!
//! This module defines the three shapes an instruction takes on its way
//! through the core:
//! 1. **Decoded:** [`DecodedInstruction`], produced by fetch/decode with operands pre-tagged.
//! 2. **Issued:** [`ExecRequest`], produced by the reservation station with operands resolved.
//! 3. **Completed:** [`Writeback`], produced by an execution unit and broadcast on the CDB.

use crate::common::{OperandSlot, Tag};

use super::opcode::Opcode;

/// An instruction as delivered by fetch/decode.
///
/// Renaming has already happened: every operand is either a known value or
/// the tag of the instruction that will produce it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedInstruction {
    /// Raw opcode.
    pub opcode: Opcode,
    /// Tag this instruction's own result will carry.
    pub tag_wb: Tag,
    /// First source operand.
    pub operand_a: OperandSlot,
    /// Second source operand.
    pub operand_b: OperandSlot,
    /// Flags operand, resolved from a producer's flags output.
    pub operand_f: OperandSlot,
}

impl DecodedInstruction {
    /// Creates an instruction whose operands are all resolved to zero.
    pub const fn new(opcode: Opcode, tag_wb: Tag) -> Self {
        Self {
            opcode,
            tag_wb,
            operand_a: OperandSlot::ready(0),
            operand_b: OperandSlot::ready(0),
            operand_f: OperandSlot::ready(0),
        }
    }

    /// Sets operand A.
    #[must_use]
    pub const fn with_a(mut self, slot: OperandSlot) -> Self {
        self.operand_a = slot;
        self
    }

    /// Sets operand B.
    #[must_use]
    pub const fn with_b(mut self, slot: OperandSlot) -> Self {
        self.operand_b = slot;
        self
    }

    /// Sets the flags operand.
    #[must_use]
    pub const fn with_f(mut self, slot: OperandSlot) -> Self {
        self.operand_f = slot;
        self
    }

    /// Mutable access to the three operand slots, in A, B, F order.
    pub const fn operands_mut(&mut self) -> [&mut OperandSlot; 3] {
        [
            &mut self.operand_a,
            &mut self.operand_b,
            &mut self.operand_f,
        ]
    }

    /// Returns true if no operand is waiting.
    pub const fn is_ready(&self) -> bool {
        !self.operand_a.waiting && !self.operand_b.waiting && !self.operand_f.waiting
    }
}

/// An issued instruction with all operands resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecRequest {
    /// Tag the result will be broadcast under.
    pub tag: Tag,
    /// Raw opcode.
    pub opcode: Opcode,
    /// Operand A value.
    pub operand_a: i32,
    /// Operand B value.
    pub operand_b: i32,
    /// Flags operand value.
    pub operand_f: i32,
}

/// A completed result on its way to every consumer of `tag`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Writeback {
    /// Producer tag.
    pub tag: Tag,
    /// Result value, delivered to waiting A/B operands.
    pub value: i32,
    /// Result flags, delivered to waiting F operands.
    pub flags: i32,
}
