//! Instruction Set Definitions.
//!
//! Contains the opcode encoding, opcode decoding, the instruction records that
//! move between pipeline phases, and the disassembler.

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Decoded, issued, and completed instruction records.
pub mod instruction;

/// Opcode decoding into operations.
pub mod opcode;

/// Raw opcode and flag encodings.
pub mod opcodes;

pub use instruction::{DecodedInstruction, ExecRequest, Writeback};
pub use opcode::{AluOp, BranchCondition, Opcode, Operation};
