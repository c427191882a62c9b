//! Common types shared by every part of the scheduling core.
//!
//! This module provides:
//! 1. **Tags:** Instruction identifiers and their wraparound-safe ordering.
//! 2. **Operand Slots:** Value cells that are either resolved or waiting on a tag.
//! 3. **Error Handling:** Configuration, contract, loader, and simulation errors.

/// Error types.
pub mod error;

/// Operand slot definition.
pub mod operand;

/// Tag domain, allocation, and age comparison.
pub mod tag;

pub use error::{ConfigError, CoreError, LoadError, SimError};
pub use operand::OperandSlot;
pub use tag::{Tag, TagAllocator, TagSpace};
