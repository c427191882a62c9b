//! ALU arithmetic operations.
//!
//! Addition and subtraction are computed 64 bits wide so the overflow
//! condition can be observed before the result is truncated to 32 bits:
//! - Add zero-extends both operands; a sum above `u32::MAX` sets `FLAG_CARRY_OUT`.
//! - Sub sign-extends both operands; a negative difference sets `FLAG_BORROW_OUT`.

use crate::isa::opcode::AluOp;
use crate::isa::opcodes::{FLAG_BORROW_OUT, FLAG_CARRY_OUT};

/// Largest value representable in 32 unsigned bits, widened.
const WORD_MAX: u64 = u32::MAX as u64;

/// Executes an integer arithmetic operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform. [`Alu::execute`](super::Alu::execute)
///   only routes `Add` and `Sub` here.
/// * `a`  - First operand.
/// * `b`  - Second operand.
///
/// # Returns
///
/// `(value, flags)` with the value truncated to 32 bits. Returns `(0, 0)`
/// for non-arithmetic operations.
pub(crate) const fn execute(op: AluOp, a: i32, b: i32) -> (i32, i32) {
    match op {
        AluOp::Add => {
            let wide = (a as u32 as u64) + (b as u32 as u64);
            let flags = if wide > WORD_MAX { FLAG_CARRY_OUT } else { 0 };
            (wide as u32 as i32, flags)
        }
        AluOp::Sub => {
            let wide = (a as i64) - (b as i64);
            let flags = if wide < 0 { FLAG_BORROW_OUT } else { 0 };
            (wide as i32, flags)
        }
        _ => (0, 0),
    }
}
