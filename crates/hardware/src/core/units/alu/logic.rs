//! ALU logical operations.
//!
//! Bitwise operations never set flags. `Not` is unary and ignores operand B.

use crate::isa::opcode::AluOp;

/// Executes a bitwise operation.
///
/// [`Alu::execute`](super::Alu::execute) never routes arithmetic operations here;
/// they would yield `0`.
pub(crate) const fn execute(op: AluOp, a: i32, b: i32) -> i32 {
    match op {
        AluOp::And => a & b,
        AluOp::Or => a | b,
        AluOp::Nor => !(a | b),
        AluOp::Not => !a,
        AluOp::Xor => a ^ b,
        _ => 0,
    }
}
