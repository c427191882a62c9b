//! Out-of-order scheduling pipeline.
//!
//! This module contains the structures of Tomasulo's algorithm and the driver
//! that steps them. It includes the following components:
//! 1. **Reservation Station:** Holds dispatched instructions until their operands resolve.
//! 2. **Reorder Buffer:** Retires instructions in program order.
//! 3. **Common Data Bus:** Broadcasts each result to every waiting consumer.
//! 4. **Engine:** Sequences broadcast, retire, issue, and dispatch within a step.
//! 5. **Committed Results:** Retired values for consumers that arrive after their producer left the ROB.
//! 6. **Traits:** Interfaces for the instruction source and retirement sink.

/// Common data bus latch and the transactional broadcast.
pub mod cdb;

/// Results of retired instructions, for consumers fetched after retirement.
pub mod commit;

/// Step driver and per-step reporting.
pub mod engine;

/// Reservation station with oldest-ready selection.
pub mod reservation_station;

/// Circular reorder buffer.
pub mod rob;

/// Instruction source and retirement sink interfaces.
pub mod traits;
