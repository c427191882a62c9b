//! Opcode decoding.
//!
//! Fetch/decode hands the core raw 32-bit opcodes. Before an instruction is
//! accepted the opcode is decoded into an [`Operation`], which names the
//! execution unit and the operation it performs. Raw opcodes that decode to
//! nothing are rejected at dispatch.

use std::fmt;
use std::str::FromStr;

use super::opcodes as op;

/// A raw opcode word as produced by fetch/decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Opcode(pub u32);

impl Opcode {
    /// Operation-class byte of the opcode.
    #[inline]
    pub const fn class(self) -> u32 {
        self.0 & op::CLASS_MASK
    }

    /// Decodes the opcode, or `None` if no execution unit recognizes it.
    pub const fn decode(self) -> Option<Operation> {
        let alu = match self.class() {
            op::OP_ADD => AluOp::Add,
            op::OP_SUB => AluOp::Sub,
            op::OP_AND => AluOp::And,
            op::OP_OR => AluOp::Or,
            op::OP_NOR => AluOp::Nor,
            op::OP_NOT => AluOp::Not,
            op::OP_XOR => AluOp::Xor,
            op::OP_BRANCH => {
                return Some(Operation::Branch(BranchCondition {
                    mask: (self.0 & op::BRANCH_MASK) as i32,
                    invert: (self.0 & op::BRANCH_INVERT) != 0,
                }));
            }
            _ => return None,
        };
        Some(Operation::Alu(alu))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl From<AluOp> for Opcode {
    fn from(alu: AluOp) -> Self {
        Self(alu.encoding())
    }
}

impl From<BranchCondition> for Opcode {
    fn from(cond: BranchCondition) -> Self {
        let invert = if cond.invert { op::BRANCH_INVERT } else { 0 };
        Self(op::OP_BRANCH | (cond.mask as u32 & op::BRANCH_MASK) | invert)
    }
}

impl From<Operation> for Opcode {
    fn from(operation: Operation) -> Self {
        match operation {
            Operation::Alu(alu) => alu.into(),
            Operation::Branch(cond) => cond.into(),
        }
    }
}

/// ALU operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// `a + b`, sets the carry-out flag.
    Add,
    /// `a - b`, sets the borrow-out flag.
    Sub,
    /// `a & b`.
    And,
    /// `a | b`.
    Or,
    /// `!(a | b)`.
    Nor,
    /// `!a`.
    Not,
    /// `a ^ b`.
    Xor,
}

impl AluOp {
    /// Every ALU operation, in encoding order.
    pub const ALL: [Self; 7] = [
        Self::Add,
        Self::Sub,
        Self::And,
        Self::Or,
        Self::Nor,
        Self::Not,
        Self::Xor,
    ];

    /// Raw opcode for this operation.
    pub const fn encoding(self) -> u32 {
        match self {
            Self::Add => op::OP_ADD,
            Self::Sub => op::OP_SUB,
            Self::And => op::OP_AND,
            Self::Or => op::OP_OR,
            Self::Nor => op::OP_NOR,
            Self::Not => op::OP_NOT,
            Self::Xor => op::OP_XOR,
        }
    }

    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::And => "and",
            Self::Or => "or",
            Self::Nor => "nor",
            Self::Not => "not",
            Self::Xor => "xor",
        }
    }

    /// Infix symbol used by the disassembler.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::And => "&",
            Self::Or => "|",
            Self::Nor => "nor",
            Self::Not => "~",
            Self::Xor => "^",
        }
    }
}

/// Branch condition: taken when `(flags & mask) != 0`, inverted if `invert`.
///
/// A zero mask with `invert` set is an unconditional branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BranchCondition {
    /// Flags bits to test.
    pub mask: i32,
    /// Take the branch when the tested bits are all clear instead.
    pub invert: bool,
}

impl BranchCondition {
    /// Branch always taken.
    pub const ALWAYS: Self = Self {
        mask: 0,
        invert: true,
    };

    /// Evaluates the condition against a flags word.
    #[inline]
    pub const fn taken(self, flags: i32) -> bool {
        ((flags & self.mask) != 0) != self.invert
    }
}

/// A decoded operation together with the unit that executes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Executed by the ALU.
    Alu(AluOp),
    /// Executed by the branch unit.
    Branch(BranchCondition),
}

impl Operation {
    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Alu(alu) => alu.mnemonic(),
            Self::Branch(BranchCondition { mask: 0, invert: true }) => "br",
            Self::Branch(BranchCondition { mask: op::FLAG_CARRY_OUT, invert: false }) => "bcs",
            Self::Branch(BranchCondition { mask: op::FLAG_CARRY_OUT, invert: true }) => "bcc",
            Self::Branch(BranchCondition { mask: op::FLAG_BORROW_OUT, invert: false }) => "bbs",
            Self::Branch(BranchCondition { mask: op::FLAG_BORROW_OUT, invert: true }) => "bbc",
            Self::Branch(_) => "b",
        }
    }
}

/// Error returned when parsing an unknown mnemonic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMnemonic;

impl FromStr for Operation {
    type Err = UnknownMnemonic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        if let Some(alu) = AluOp::ALL.into_iter().find(|a| a.mnemonic() == lower) {
            return Ok(Self::Alu(alu));
        }
        let cond = |mask, invert| Self::Branch(BranchCondition { mask, invert });
        match lower.as_str() {
            "br" => Ok(Self::Branch(BranchCondition::ALWAYS)),
            "bcs" => Ok(cond(op::FLAG_CARRY_OUT, false)),
            "bcc" => Ok(cond(op::FLAG_CARRY_OUT, true)),
            "bbs" => Ok(cond(op::FLAG_BORROW_OUT, false)),
            "bbc" => Ok(cond(op::FLAG_BORROW_OUT, true)),
            _ => Err(UnknownMnemonic),
        }
    }
}
