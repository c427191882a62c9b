//! Error types for the scheduling core.
//!
//! Capacity conditions (a full reservation station, nothing ready to issue, a
//! retirement stall) are ordinary outcomes and are reported through `bool`,
//! `Option` and [`DispatchStall`](crate::core::pipeline::engine::DispatchStall)
//! values. The enums here cover everything else:
//! 1. **Configuration:** Capacities and widths that cannot form a working core.
//! 2. **Contract violations:** Opcodes that no execution unit recognizes.
//! 3. **Program loading:** I/O, JSON, and content errors in program files.
//! 4. **Simulation:** Run-level failures such as hitting the cycle limit.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::tag::Tag;
use crate::isa::opcode::Opcode;

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Tag width outside `1..=16`.
    #[error("tag width must be between 1 and 16 bits, got {0}")]
    TagBits(u32),

    /// Reservation station with no entries.
    #[error("reservation station needs at least one entry")]
    EmptyReservationStation,

    /// Reorder buffer too small to hold a single in-flight entry.
    #[error("reorder buffer needs at least 2 slots (one is kept free), got {0}")]
    ReorderBufferTooSmall(usize),

    /// More instructions could be in flight than tag ordering can distinguish.
    #[error(
        "{in_flight} in-flight instructions exceed the {window}-tag ordering window of a {bits}-bit tag"
    )]
    TagWindow {
        /// Maximum number of instructions in flight.
        in_flight: usize,
        /// Half the tag domain.
        window: u32,
        /// Configured tag width.
        bits: u32,
    },

    /// Predictor counter initialized outside `0..=3`.
    #[error("branch predictor initial state must be 0..=3, got {0}")]
    PredictorState(u8),
}

/// Violations of the core's caller contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// An opcode outside every execution unit's encoding.
    #[error("unrecognized opcode {opcode} for instruction {tag}")]
    UnrecognizedOpcode {
        /// Tag of the offending instruction.
        tag: Tag,
        /// Raw opcode.
        opcode: Opcode,
    },
}

/// Errors raised while reading a program description.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The program file could not be read.
    #[error("could not read program '{path}': {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The program is not valid JSON or does not match the expected shape.
    #[error("malformed program: {0}")]
    Json(#[from] serde_json::Error),

    /// An opcode mnemonic that does not name any operation.
    #[error("instruction {index}: unknown mnemonic '{mnemonic}'")]
    UnknownMnemonic {
        /// Position of the instruction in the program.
        index: usize,
        /// The mnemonic as written.
        mnemonic: String,
    },

    /// A numeric opcode that does not decode.
    #[error("instruction {index}: opcode {opcode} is not recognized")]
    BadOpcode {
        /// Position of the instruction in the program.
        index: usize,
        /// Raw opcode.
        opcode: Opcode,
    },

    /// A tag reused while its earlier holder could still be in flight.
    #[error("instruction {index}: tag {tag} is already used by instruction {previous}")]
    DuplicateTag {
        /// Position of the instruction in the program.
        index: usize,
        /// The repeated tag.
        tag: u32,
        /// Position of the earlier instruction with the same tag.
        previous: usize,
    },

    /// A tag value that does not fit the configured tag domain.
    #[error("instruction {index}: tag {tag} does not fit in {bits} bits")]
    TagOutOfRange {
        /// Position of the instruction in the program.
        index: usize,
        /// Tag as written.
        tag: u32,
        /// Configured tag width.
        bits: u32,
    },
}

/// Errors that end a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The core rejected or failed to execute an instruction.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The program did not drain within the configured number of cycles.
    #[error("simulation did not finish within {cycles} cycles")]
    CycleLimit {
        /// Cycles executed before giving up.
        cycles: u64,
    },
}
