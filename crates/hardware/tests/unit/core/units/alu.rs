//! ALU Operation Tests.
//!
//! Result and flag vectors for every ALU operation. Add reports carry out of
//! the unsigned 32-bit sum; sub reports a borrow when the signed difference is
//! negative. Results wrap to 32 bits.

use rstest::rstest;
use tomasulo_core::core::units::alu::Alu;
use tomasulo_core::isa::opcode::AluOp;
use tomasulo_core::isa::opcodes::{FLAG_BORROW_OUT, FLAG_CARRY_OUT};

// ─── Add ─────────────────────────────────────────────────────────────────────

#[rstest]
#[case(5, 3, 8, 0)]
#[case(0, 0, 0, 0)]
#[case(-1, 1, 0, FLAG_CARRY_OUT)]
#[case(-1, -1, -2, FLAG_CARRY_OUT)]
#[case(i32::MAX, 1, i32::MIN, 0)]
#[case(i32::MIN, i32::MIN, 0, FLAG_CARRY_OUT)]
fn add(#[case] a: i32, #[case] b: i32, #[case] value: i32, #[case] flags: i32) {
    assert_eq!(Alu::execute(AluOp::Add, a, b), (value, flags));
}

// ─── Sub ─────────────────────────────────────────────────────────────────────

#[rstest]
#[case(7, 4, 3, 0)]
#[case(11, 5, 6, 0)]
#[case(4, 7, -3, FLAG_BORROW_OUT)]
#[case(0, 0, 0, 0)]
#[case(-5, -5, 0, 0)]
#[case(i32::MIN, 1, i32::MAX, FLAG_BORROW_OUT)]
#[case(i32::MAX, -1, i32::MIN, 0)]
fn sub(#[case] a: i32, #[case] b: i32, #[case] value: i32, #[case] flags: i32) {
    assert_eq!(Alu::execute(AluOp::Sub, a, b), (value, flags));
}

// ─── Logic ───────────────────────────────────────────────────────────────────

#[rstest]
#[case(AluOp::And, 0b1100, 0b1010, 0b1000)]
#[case(AluOp::Or, 0b1100, 0b1010, 0b1110)]
#[case(AluOp::Xor, 0b1100, 0b1010, 0b0110)]
#[case(AluOp::Nor, 0b1100, 0b1010, !0b1110)]
#[case(AluOp::Not, 0, 12345, -1)]
#[case(AluOp::Not, -1, 0, 0)]
fn logic(#[case] op: AluOp, #[case] a: i32, #[case] b: i32, #[case] value: i32) {
    assert_eq!(Alu::execute(op, a, b), (value, 0));
}
