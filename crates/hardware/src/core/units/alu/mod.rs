//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU fed by reservation-station issue.
//! It is stateless: each call maps two resolved operands to a `(value, flags)`
//! pair.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub (with carry-out / borrow-out flags)
//! - [`logic`]:      And, Or, Nor, Not, Xor

/// Integer arithmetic operations (add, subtract).
pub mod arithmetic;

/// Bitwise logical operations (and, or, nor, not, xor).
pub mod logic;

use crate::isa::opcode::AluOp;

/// Arithmetic Logic Unit (ALU) for 32-bit integer operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand (ignored by `Not`)
    ///
    /// # Returns
    ///
    /// `(value, flags)`. Only `Add` and `Sub` produce non-zero flags.
    ///
    /// # Examples
    ///
    /// ```
    /// use tomasulo_core::core::units::alu::Alu;
    /// use tomasulo_core::isa::opcode::AluOp;
    /// use tomasulo_core::isa::opcodes::{FLAG_BORROW_OUT, FLAG_CARRY_OUT};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 5, 3), (8, 0));
    /// assert_eq!(Alu::execute(AluOp::Add, -1, 1), (0, FLAG_CARRY_OUT));
    /// assert_eq!(Alu::execute(AluOp::Sub, 4, 7), (-3, FLAG_BORROW_OUT));
    /// assert_eq!(Alu::execute(AluOp::Xor, 0b1100, 0b1010), (0b0110, 0));
    /// ```
    pub const fn execute(op: AluOp, a: i32, b: i32) -> (i32, i32) {
        match op {
            AluOp::Add | AluOp::Sub => arithmetic::execute(op, a, b),
            AluOp::And | AluOp::Or | AluOp::Nor | AluOp::Not | AluOp::Xor => {
                (logic::execute(op, a, b), 0)
            }
        }
    }
}
