//! Common Data Bus (CDB).
//!
//! The CDB carries one result per cycle from the execution units back to every
//! structure waiting on it. Issue in cycle N latches its [`Writeback`] here; the
//! broadcast phase of cycle N+1 takes it off the bus and delivers it to the
//! reservation station and the reorder buffer together.

use std::fmt;

use tracing::debug;

use crate::isa::instruction::Writeback;

use super::reservation_station::ReservationStation;
use super::rob::ReorderBuffer;

/// What one broadcast changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Reservation station operand slots resolved.
    pub slots_resolved: usize,
    /// Whether a waiting ROB entry was completed.
    pub rob_completed: bool,
}

/// Delivers a writeback to the reservation station and reorder buffer.
///
/// Both structures are updated in this one call, so no other phase can observe
/// one of them updated and the other not. A tag nobody waits on is a silent
/// no-op, and broadcasting the same writeback twice changes nothing the second
/// time.
pub fn broadcast(
    wb: &Writeback,
    rs: &mut ReservationStation,
    rob: &mut ReorderBuffer,
) -> BroadcastReport {
    let slots_resolved = rs.broadcast(wb.tag, wb.value, wb.flags);
    let rob_completed = rob.complete(wb.tag, wb.value, wb.flags);
    debug!(
        tag = %wb.tag,
        value = wb.value,
        flags = wb.flags,
        slots_resolved,
        rob_completed,
        "cdb broadcast"
    );
    BroadcastReport {
        slots_resolved,
        rob_completed,
    }
}

/// One-deep latch between issue and broadcast.
#[derive(Clone, Debug, Default)]
pub struct CommonDataBus {
    value: Option<Writeback>,
}

impl CommonDataBus {
    /// Creates an idle bus.
    pub const fn new() -> Self {
        Self { value: None }
    }

    /// Latches a result for the next broadcast phase.
    ///
    /// Returns `false` without replacing anything if the bus is already
    /// carrying an undelivered result.
    pub fn set(&mut self, wb: Writeback) -> bool {
        if self.value.is_some() {
            return false;
        }
        self.value = Some(wb);
        true
    }

    /// The result currently on the bus.
    pub const fn peek(&self) -> Option<&Writeback> {
        self.value.as_ref()
    }

    /// Returns true if nothing is latched.
    pub const fn is_free(&self) -> bool {
        self.value.is_none()
    }

    /// Takes the latched result off the bus and broadcasts it.
    ///
    /// Returns the delivered writeback and what it changed, or `None` when
    /// the bus was idle.
    pub fn drive(
        &mut self,
        rs: &mut ReservationStation,
        rob: &mut ReorderBuffer,
    ) -> Option<(Writeback, BroadcastReport)> {
        let wb = self.value.take()?;
        let report = broadcast(&wb, rs, rob);
        Some((wb, report))
    }
}

impl fmt::Display for CommonDataBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(wb) => write!(f, "cdb {} value={} flags={}", wb.tag, wb.value, wb.flags),
            None => write!(f, "cdb idle"),
        }
    }
}
