//! Tomasulo dynamic-scheduling core.
//!
//! This crate models the out-of-order heart of a processor using Tomasulo's
//! algorithm:
//! 1. **Common:** Wraparound-safe instruction tags, operand slots, and error types.
//! 2. **ISA:** Opcode encoding, decoded instruction records, and the disassembler.
//! 3. **Core:** Reservation station, reorder buffer, common data bus, ALU, and branch unit.
//! 4. **Simulation:** Configuration, program loading, the run loop, and statistics.
//!
//! # Examples
//!
//! ```
//! use tomasulo_core::{Config, Program, Simulator};
//!
//! let mut sim = Simulator::new(&Config::default(), Program::demo()).unwrap();
//! let cycles = sim.run().unwrap();
//! assert_eq!(cycles, 5);
//!
//! let results: Vec<i32> = sim.retired.iter().map(|e| e.value).collect();
//! assert_eq!(results, vec![8, 3, 6]);
//! ```

/// Common types (tags, operand slots, errors).
pub mod common;
/// Core configuration (defaults, structures, validation).
pub mod config;
/// Scheduling core (pipeline structures and execution units).
pub mod core;
/// Instruction set (opcodes, instruction records, disassembler).
pub mod isa;
/// Programs, loader, and simulator.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// The scheduling core; steps broadcast, retire, issue, and dispatch.
pub use crate::core::Core;
/// Ordered instruction stream.
pub use crate::sim::Program;
/// Run loop around a core and a program.
pub use crate::sim::Simulator;
