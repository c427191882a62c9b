//! Reservation Station for out-of-order issue.
//!
//! The reservation station is a fixed arena of slots holding dispatched
//! instructions until their operands resolve. It provides:
//! 1. **Install:** Places a decoded instruction in the first free slot.
//! 2. **Wakeup:** Resolves every operand slot waiting on a broadcast tag in one pass.
//! 3. **Select:** Issues the oldest ready instruction, by tag age rather than slot position.
//!
//! Slot position carries no meaning. A freed slot is reused by the next
//! dispatch, so a younger instruction can sit in a lower slot than an older one.

use std::fmt;

use tracing::trace;

use crate::common::{OperandSlot, Tag, TagSpace};
use crate::isa::instruction::{DecodedInstruction, ExecRequest};
use crate::isa::opcode::Opcode;

/// A single reservation station slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RsEntry {
    /// Whether the slot holds an instruction.
    pub occupied: bool,
    /// Raw opcode.
    pub opcode: Opcode,
    /// Tag this instruction will write back under; also its age.
    pub tag_wb: Tag,
    /// First source operand.
    pub operand_a: OperandSlot,
    /// Second source operand.
    pub operand_b: OperandSlot,
    /// Flags operand.
    pub operand_f: OperandSlot,
}

impl RsEntry {
    /// An occupied entry is ready once none of its operands is waiting.
    #[inline]
    pub const fn is_ready(&self) -> bool {
        self.occupied
            && !self.operand_a.waiting
            && !self.operand_b.waiting
            && !self.operand_f.waiting
    }

    /// Applies a broadcast to this entry's operand slots.
    ///
    /// A/B slots take `value`, the F slot takes `flags`. Returns how many
    /// slots were resolved.
    fn wake(&mut self, tag: Tag, value: i32, flags: i32) -> usize {
        usize::from(self.operand_a.resolve(tag, value))
            + usize::from(self.operand_b.resolve(tag, value))
            + usize::from(self.operand_f.resolve(tag, flags))
    }
}

/// Fixed-capacity out-of-order issue buffer.
#[derive(Clone, Debug)]
pub struct ReservationStation {
    /// Slot arena; only `occupied` slots are live.
    entries: Vec<RsEntry>,
    /// Number of occupied slots.
    occupied: usize,
    /// Domain used to compare `tag_wb` ages.
    tags: TagSpace,
}

impl ReservationStation {
    /// Creates an empty reservation station with `capacity` slots.
    pub fn new(capacity: usize, tags: TagSpace) -> Self {
        Self {
            entries: vec![RsEntry::default(); capacity],
            occupied: 0,
            tags,
        }
    }

    /// Total number of slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of occupied slots.
    #[inline]
    pub const fn occupied(&self) -> usize {
        self.occupied
    }

    /// Returns true if no slot is occupied.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Returns true if every slot is occupied.
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.occupied == self.entries.len()
    }

    /// All slots, occupied or not, in storage order.
    pub fn slots(&self) -> &[RsEntry] {
        &self.entries
    }

    /// Occupied entries, in storage order.
    pub fn entries(&self) -> impl Iterator<Item = &RsEntry> {
        self.entries.iter().filter(|e| e.occupied)
    }

    /// Installs an instruction in the first free slot.
    ///
    /// Operand slots are copied verbatim, waiting or resolved. Returns `false`
    /// without touching any slot when the station is full.
    pub fn push(&mut self, instr: &DecodedInstruction) -> bool {
        let Some(slot) = self.entries.iter_mut().find(|e| !e.occupied) else {
            return false;
        };
        *slot = RsEntry {
            occupied: true,
            opcode: instr.opcode,
            tag_wb: instr.tag_wb,
            operand_a: instr.operand_a,
            operand_b: instr.operand_b,
            operand_f: instr.operand_f,
        };
        self.occupied += 1;
        true
    }

    /// Index of the oldest ready entry, if any.
    fn oldest_ready(&self) -> Option<usize> {
        let mut oldest: Option<(usize, Tag)> = None;
        for (idx, entry) in self.entries.iter().enumerate() {
            if !entry.is_ready() {
                continue;
            }
            match oldest {
                Some((_, age)) if !self.tags.older(entry.tag_wb, age) => {}
                _ => oldest = Some((idx, entry.tag_wb)),
            }
        }
        oldest.map(|(idx, _)| idx)
    }

    /// The entry [`issue_oldest_ready`](Self::issue_oldest_ready) would pick,
    /// left in place.
    pub fn peek_oldest_ready(&self) -> Option<&RsEntry> {
        self.oldest_ready().map(|idx| &self.entries[idx])
    }

    /// Frees and returns the oldest ready instruction.
    ///
    /// Returns `None` when nothing is both occupied and ready; this is the
    /// normal idle condition.
    pub fn issue_oldest_ready(&mut self) -> Option<ExecRequest> {
        let idx = self.oldest_ready()?;
        let entry = &mut self.entries[idx];
        entry.occupied = false;
        self.occupied -= 1;
        Some(ExecRequest {
            tag: entry.tag_wb,
            opcode: entry.opcode,
            operand_a: entry.operand_a.value,
            operand_b: entry.operand_b.value,
            operand_f: entry.operand_f.value,
        })
    }

    /// Delivers a result to every operand slot waiting on `tag`.
    ///
    /// All slots of all occupied entries are visited in one pass, so several
    /// consumers can wake from the same broadcast. Slots that are already
    /// resolved or wait on another tag are untouched. Returns the number of
    /// slots resolved.
    pub fn broadcast(&mut self, tag: Tag, value: i32, flags: i32) -> usize {
        let woken = self
            .entries
            .iter_mut()
            .filter(|e| e.occupied)
            .map(|e| e.wake(tag, value, flags))
            .sum();
        trace!(%tag, woken, "rs broadcast");
        woken
    }
}

impl fmt::Display for ReservationStation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, e) in self.entries.iter().enumerate() {
            if e.occupied {
                writeln!(
                    f,
                    "rs[{idx}] {} := {} a={} b={} f={}{}",
                    e.tag_wb,
                    e.opcode,
                    e.operand_a,
                    e.operand_b,
                    e.operand_f,
                    if e.is_ready() { " ready" } else { "" }
                )?;
            } else {
                writeln!(f, "rs[{idx}] free")?;
            }
        }
        Ok(())
    }
}
