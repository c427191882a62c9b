//! Committed results.
//!
//! Once an instruction retires its ROB entry is gone, so a consumer fetched
//! after that point cannot be resolved by a broadcast or by ROB lookup. The
//! core keeps the retired `(value, flags)` of every tag here instead, playing
//! the role an architectural register file plays in a full pipeline.
//!
//! An entry lives until its tag is handed out again. Dispatching a new
//! instruction under a tag drops the old result, so a consumer can never pick
//! up a stale value from an earlier lap of the tag domain.

use std::collections::HashMap;

use crate::common::Tag;

/// Results of retired instructions, keyed by tag.
#[derive(Clone, Debug, Default)]
pub struct CommittedResults {
    results: HashMap<Tag, (i32, i32)>,
}

impl CommittedResults {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the result of a retired instruction.
    pub fn commit(&mut self, tag: Tag, value: i32, flags: i32) {
        let _ = self.results.insert(tag, (value, flags));
    }

    /// Forgets the result held under `tag` because the tag is live again.
    pub fn reclaim(&mut self, tag: Tag) {
        let _ = self.results.remove(&tag);
    }

    /// The committed `(value, flags)` for `tag`, if any.
    pub fn lookup(&self, tag: Tag) -> Option<(i32, i32)> {
        self.results.get(&tag).copied()
    }

    /// Number of tags with a committed result.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if nothing has been committed.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
