//! Instruction Disassembler.
//!
//! Renders instruction records as short human-readable strings for debug
//! tracing, the CLI trace, and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use tomasulo_core::common::{OperandSlot, Tag};
//! use tomasulo_core::isa::disasm::disassemble;
//! use tomasulo_core::isa::instruction::DecodedInstruction;
//! use tomasulo_core::isa::opcode::{AluOp, Opcode};
//!
//! let inst = DecodedInstruction::new(Opcode::from(AluOp::Sub), Tag(2))
//!     .with_a(OperandSlot::ready(11))
//!     .with_b(OperandSlot::ready(5))
//!     .with_f(OperandSlot::waiting_on(Tag(1)));
//! assert_eq!(disassemble(&inst), "sub [2] <- 11, 5 ? wait[1]");
//! ```

use super::instruction::{DecodedInstruction, ExecRequest};
use super::opcode::{AluOp, Operation};
use crate::common::OperandSlot;

/// Disassembles a decoded instruction, showing waiting operands by tag.
///
/// Returns `"unknown <opcode>"` for opcodes that do not decode.
pub fn disassemble(inst: &DecodedInstruction) -> String {
    let Some(operation) = inst.opcode.decode() else {
        return format!("unknown {} {}", inst.opcode, inst.tag_wb);
    };
    let mn = operation.mnemonic();
    let a = inst.operand_a;
    let b = inst.operand_b;
    let f = inst.operand_f;
    match operation {
        Operation::Alu(AluOp::Not) => format!("{mn} {} <- {a}{}", inst.tag_wb, flags_suffix(f)),
        Operation::Alu(_) => format!("{mn} {} <- {a}, {b}{}", inst.tag_wb, flags_suffix(f)),
        Operation::Branch(_) => format!("{mn} {} ? {f}", inst.tag_wb),
    }
}

/// Disassembles an issued instruction as an assignment, e.g. `[0] <- 5 + 3`.
pub fn disassemble_request(req: &ExecRequest) -> String {
    let tag = req.tag;
    match req.opcode.decode() {
        Some(Operation::Alu(AluOp::Not)) => format!("{tag} <- ~{}", req.operand_a),
        Some(Operation::Alu(AluOp::Nor)) => {
            format!("{tag} <- ~({} | {})", req.operand_a, req.operand_b)
        }
        Some(Operation::Alu(alu)) => format!(
            "{tag} <- {} {} {}",
            req.operand_a,
            alu.symbol(),
            req.operand_b
        ),
        Some(op @ Operation::Branch(_)) => {
            format!("{tag} <- {} flags={:#x}", op.mnemonic(), req.operand_f)
        }
        None => format!("{tag} <- unknown {}", req.opcode),
    }
}

/// Only waiting flags operands are interesting for ALU instructions.
fn flags_suffix(f: OperandSlot) -> String {
    if f.waiting {
        format!(" ? {f}")
    } else {
        String::new()
    }
}
