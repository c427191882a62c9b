//! Reorder Buffer (ROB) for in-order retirement.
//!
//! The ROB is a circular buffer that tracks in-flight instructions from dispatch
//! through retirement. It provides:
//! 1. **Allocation:** Appends an entry at `head` in dispatch order.
//! 2. **Completion:** Marks the entry for a tag done when its writeback arrives.
//! 3. **In-order Retire:** Frees entries from `tail` only once they are complete.
//! 4. **Forwarding:** Exposes completed-but-unretired results to dispatch.
//!
//! One slot is always left empty so that `head == tail` unambiguously means
//! empty. A buffer of capacity C therefore holds at most C-1 entries.

use tracing::trace;

use crate::common::Tag;
use crate::isa::opcode::Opcode;

/// A single entry in the Reorder Buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RobEntry {
    /// True until the writeback for `tag` arrives.
    pub waiting: bool,
    /// Raw opcode, handed to the retirement sink.
    pub opcode: Opcode,
    /// Tag of the instruction.
    pub tag: Tag,
    /// Result value; meaningful once complete.
    pub value: i32,
    /// Result flags; meaningful once complete.
    pub flags: i32,
}

/// Reorder Buffer: circular buffer for in-order retirement.
#[derive(Clone, Debug)]
pub struct ReorderBuffer {
    /// Fixed-size entry array.
    entries: Vec<RobEntry>,
    /// Index where the next entry will be appended.
    head: usize,
    /// Index of the oldest entry (retire point).
    tail: usize,
}

impl ReorderBuffer {
    /// Creates an empty ROB with `capacity` slots.
    ///
    /// Capacities below 2 are raised to 2, the smallest buffer that can hold
    /// an entry. [`Config::validate`](crate::config::Config::validate) rejects
    /// such capacities before they get here.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: vec![RobEntry::default(); capacity.max(2)],
            head: 0,
            tail: 0,
        }
    }

    #[inline]
    const fn wrap(&self, idx: usize) -> usize {
        (idx + 1) % self.entries.len()
    }

    /// Returns the number of slots, including the one kept empty.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of in-flight entries.
    #[inline]
    pub const fn len(&self) -> usize {
        (self.head + self.entries.len() - self.tail) % self.entries.len()
    }

    /// Returns true if the ROB is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Returns true if the ROB is full.
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.wrap(self.head) == self.tail
    }

    /// Appends a waiting entry for `tag`. Returns `false` if the ROB is full.
    pub fn push(&mut self, opcode: Opcode, tag: Tag) -> bool {
        if self.is_full() {
            return false;
        }

        self.entries[self.head] = RobEntry {
            waiting: true,
            opcode,
            tag,
            value: 0,
            flags: 0,
        };
        self.head = self.wrap(self.head);
        true
    }

    /// Marks the waiting entry for `tag` complete with its result.
    ///
    /// Returns `false` if no in-flight entry is waiting on `tag`, which makes
    /// a repeated writeback a no-op.
    pub fn complete(&mut self, tag: Tag, value: i32, flags: i32) -> bool {
        let Some(entry) = self.find_entry_mut(tag) else {
            return false;
        };
        if !entry.waiting {
            return false;
        }
        entry.waiting = false;
        entry.value = value;
        entry.flags = flags;
        true
    }

    /// Returns a reference to the oldest entry, if the ROB is non-empty.
    pub fn peek_tail(&self) -> Option<&RobEntry> {
        if self.is_empty() {
            None
        } else {
            Some(&self.entries[self.tail])
        }
    }

    /// Retires the oldest entry if it is complete.
    ///
    /// Returns `None` if the ROB is empty or the oldest entry is still waiting.
    pub fn retire(&mut self) -> Option<RobEntry> {
        let entry = *self.peek_tail()?;
        if entry.waiting {
            trace!(tag = %entry.tag, "retire stalled on waiting tail");
            return None;
        }
        self.tail = self.wrap(self.tail);
        Some(entry)
    }

    /// Result of the in-flight entry for `tag`, if it has completed.
    pub fn lookup(&self, tag: Tag) -> Option<(i32, i32)> {
        self.iter()
            .find(|e| e.tag == tag && !e.waiting)
            .map(|e| (e.value, e.flags))
    }

    /// Iterates over in-flight entries from oldest to youngest.
    pub fn iter(&self) -> impl Iterator<Item = &RobEntry> {
        let cap = self.entries.len();
        (0..self.len()).map(move |i| &self.entries[(self.tail + i) % cap])
    }

    /// Finds a mutable reference to the in-flight entry with the given tag.
    fn find_entry_mut(&mut self, tag: Tag) -> Option<&mut RobEntry> {
        let mut idx = self.tail;
        while idx != self.head {
            if self.entries[idx].tag == tag {
                return Some(&mut self.entries[idx]);
            }
            idx = self.wrap(idx);
        }
        None
    }
}
