//! Execution units.
//!
//! Functional units fed by reservation-station issue. Each unit consumes an
//! operation with resolved operands and produces a result for the common data
//! bus.

/// Arithmetic Logic Unit.
pub mod alu;

/// Branch resolution unit and direction predictor.
pub mod bru;
