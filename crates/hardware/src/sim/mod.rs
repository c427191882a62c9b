//! Simulation driver and program loading.
//!
//! Provides the program representation, the JSON program loader, and the
//! simulator that feeds a program through the core until it drains.

/// JSON program loader.
pub mod loader;

/// Instruction streams and the built-in demonstration.
pub mod program;

/// Run loop with hang detection.
pub mod simulator;

pub use self::program::Program;
pub use self::simulator::Simulator;
