//! Operand slots.
//!
//! An operand slot is a value cell that is either resolved (holds its value) or
//! waiting on the tag of the instruction that will produce it. Slots travel on
//! the decoded instruction into the reservation station and are resolved there
//! by common data bus broadcasts.

use std::fmt;

use super::tag::Tag;

/// A value cell that is either resolved or waiting on a producer tag.
///
/// When `waiting` is false `value` is the operand. When `waiting` is true `tag`
/// names the producer and `value` is meaningless until a broadcast resolves it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct OperandSlot {
    /// True while the operand is still owed by a producer.
    pub waiting: bool,
    /// Producer tag; only meaningful while `waiting`.
    pub tag: Tag,
    /// Operand value; only meaningful once resolved.
    pub value: i32,
}

impl OperandSlot {
    /// A resolved operand holding `value`.
    pub const fn ready(value: i32) -> Self {
        Self {
            waiting: false,
            tag: Tag(0),
            value,
        }
    }

    /// An operand waiting on the producer named by `tag`.
    pub const fn waiting_on(tag: Tag) -> Self {
        Self {
            waiting: true,
            tag,
            value: 0,
        }
    }

    /// Returns true if the slot is waiting on exactly `tag`.
    #[inline]
    pub fn waits_on(&self, tag: Tag) -> bool {
        self.waiting && self.tag == tag
    }

    /// Resolves the slot if it is waiting on `tag`.
    ///
    /// Returns true if the slot changed. Resolved slots and slots waiting on
    /// other tags are left untouched, so repeating a broadcast is harmless.
    pub fn resolve(&mut self, tag: Tag, value: i32) -> bool {
        if !self.waits_on(tag) {
            return false;
        }
        self.value = value;
        self.waiting = false;
        true
    }

    /// The resolved value, or `None` while waiting.
    #[inline]
    pub const fn get(&self) -> Option<i32> {
        if self.waiting { None } else { Some(self.value) }
    }
}

impl fmt::Display for OperandSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.waiting {
            write!(f, "wait{}", self.tag)
        } else {
            write!(f, "{}", self.value)
        }
    }
}
