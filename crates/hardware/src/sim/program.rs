//! Programs: ordered lists of decoded instructions.

use std::collections::VecDeque;

use crate::common::{OperandSlot, Tag};
use crate::isa::instruction::DecodedInstruction;
use crate::isa::opcode::AluOp;

/// An instruction stream in program order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<DecodedInstruction>,
}

impl Program {
    /// Wraps a list of instructions already in program order.
    pub const fn new(instructions: Vec<DecodedInstruction>) -> Self {
        Self { instructions }
    }

    /// The built-in three-instruction demonstration.
    ///
    /// ```text
    /// [0] <- 5 + 3
    /// [1] <- 7 - 4   (flags operand waits on [0])
    /// [2] <- 11 - 5  (flags operand waits on [1])
    /// ```
    ///
    /// Each instruction depends on the flags of the one before it, so the core
    /// issues them one per step as results come off the bus. The expected
    /// results are 8, 3 and 6 with no flags set.
    pub fn demo() -> Self {
        let a = DecodedInstruction::new(AluOp::Add.into(), Tag(0))
            .with_a(OperandSlot::ready(5))
            .with_b(OperandSlot::ready(3));
        let c = DecodedInstruction::new(AluOp::Sub.into(), Tag(1))
            .with_a(OperandSlot::ready(7))
            .with_b(OperandSlot::ready(4))
            .with_f(OperandSlot::waiting_on(Tag(0)));
        let b = DecodedInstruction::new(AluOp::Sub.into(), Tag(2))
            .with_a(OperandSlot::ready(11))
            .with_b(OperandSlot::ready(5))
            .with_f(OperandSlot::waiting_on(Tag(1)));
        Self::new(vec![a, c, b])
    }

    /// Number of instructions.
    pub const fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub const fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The instructions, in program order.
    pub fn instructions(&self) -> &[DecodedInstruction] {
        &self.instructions
    }

    /// Turns the program into a fetch queue for the core.
    pub fn into_source(self) -> VecDeque<DecodedInstruction> {
        self.instructions.into()
    }
}

impl FromIterator<DecodedInstruction> for Program {
    fn from_iter<I: IntoIterator<Item = DecodedInstruction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
