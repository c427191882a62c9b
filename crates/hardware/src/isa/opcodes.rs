//! Opcode Encodings.
//!
//! Opcodes are 32-bit words. The top byte selects the operation class; the
//! remaining bits are operation-specific (only branches use them).

/// Mask selecting the operation-class byte.
pub const CLASS_MASK: u32 = 0xFF00_0000;

/// Addition.
pub const OP_ADD: u32 = 0x0600_0000;

/// Subtraction.
pub const OP_SUB: u32 = 0x0700_0000;

/// Bitwise AND.
pub const OP_AND: u32 = 0x0A00_0000;

/// Bitwise OR.
pub const OP_OR: u32 = 0x0B00_0000;

/// Bitwise NOR.
pub const OP_NOR: u32 = 0x0C00_0000;

/// Bitwise NOT of operand A (operand B is ignored).
pub const OP_NOT: u32 = 0x0D00_0000;

/// Bitwise XOR.
pub const OP_XOR: u32 = 0x0E00_0000;

/// Conditional branch on the flags operand.
pub const OP_BRANCH: u32 = 0x0F00_0000;

/// Branch field: flags bits tested against operand F.
pub const BRANCH_MASK: u32 = 0x0000_00FF;

/// Branch field: invert the sense of the test.
pub const BRANCH_INVERT: u32 = 0x0000_0100;

/// Flags bit set by addition when the unsigned sum carries out of bit 31.
pub const FLAG_CARRY_OUT: i32 = 0x1;

/// Flags bit set by subtraction when the signed difference is negative.
pub const FLAG_BORROW_OUT: i32 = 0x2;
