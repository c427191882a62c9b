//! Instruction tags and wraparound-safe age ordering.
//!
//! Every dispatched instruction is named by a tag drawn from a fixed-width,
//! circularly ordered domain. The tag serves two purposes:
//! 1. **Renaming:** Consumers wait on the tag of the producer whose result they need.
//! 2. **Age:** The reservation station picks the oldest ready instruction by comparing tags.
//!
//! Because tags wrap around, raw `<` is wrong once the allocator passes the end of
//! the domain. Ordering uses signed-difference comparison instead: `a` is older
//! than `b` when the forward distance from `a` to `b` is non-zero and smaller than
//! half the domain. This is the same rule used for stream sequence numbers.

use std::fmt;

use super::error::ConfigError;

/// Largest supported tag width in bits.
pub const MAX_TAG_BITS: u32 = 16;

/// Identifier assigned to an instruction at dispatch.
///
/// The wrapped value is always inside the [`TagSpace`] it was created from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Tag(pub u16);

impl Tag {
    /// Returns the raw tag value.
    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0)
    }
}

/// A circular tag domain of `2^bits` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagSpace {
    bits: u32,
}

impl TagSpace {
    /// Creates a tag domain of `2^bits` values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TagBits`] unless `1 <= bits <= 16`.
    pub fn new(bits: u32) -> Result<Self, ConfigError> {
        if bits == 0 || bits > MAX_TAG_BITS {
            return Err(ConfigError::TagBits(bits));
        }
        Ok(Self { bits })
    }

    /// Width of the domain in bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.bits
    }

    /// Number of distinct tags in the domain.
    #[inline]
    pub const fn size(self) -> u32 {
        1 << self.bits
    }

    /// Largest number of tags that can be in flight while `older` stays exact.
    #[inline]
    pub const fn window(self) -> u32 {
        1 << (self.bits - 1)
    }

    #[inline]
    const fn mask(self) -> u32 {
        self.size() - 1
    }

    /// Maps an arbitrary integer into the domain.
    #[inline]
    pub const fn tag(self, raw: u32) -> Tag {
        Tag((raw & self.mask()) as u16)
    }

    /// Returns true if `raw` is a valid tag value in this domain.
    #[inline]
    pub const fn contains(self, raw: u32) -> bool {
        raw <= self.mask()
    }

    /// Returns the tag allocated immediately after `tag`.
    #[inline]
    pub const fn next(self, tag: Tag) -> Tag {
        self.tag(tag.0 as u32 + 1)
    }

    /// Forward distance from `from` to `to`, modulo the domain size.
    #[inline]
    pub const fn distance(self, from: Tag, to: Tag) -> u32 {
        (to.0 as u32).wrapping_sub(from.0 as u32) & self.mask()
    }

    /// Returns true iff `a` was allocated strictly before `b`.
    ///
    /// Exact as long as fewer than [`window`](Self::window) tags separate the
    /// two; the reservation station and reorder buffer capacities keep the
    /// in-flight set inside that window.
    #[inline]
    pub const fn older(self, a: Tag, b: Tag) -> bool {
        let d = self.distance(a, b);
        d != 0 && d < self.window()
    }
}

/// Hands out tags in program order.
#[derive(Clone, Debug)]
pub struct TagAllocator {
    space: TagSpace,
    next: Tag,
}

impl TagAllocator {
    /// Creates an allocator whose first tag is 0.
    pub const fn new(space: TagSpace) -> Self {
        Self {
            space,
            next: Tag(0),
        }
    }

    /// Creates an allocator whose first tag is `first` (masked into the domain).
    pub const fn starting_at(space: TagSpace, first: u32) -> Self {
        Self {
            space,
            next: space.tag(first),
        }
    }

    /// The domain this allocator draws from.
    #[inline]
    pub const fn space(&self) -> TagSpace {
        self.space
    }

    /// Returns the next tag and advances, wrapping at the end of the domain.
    pub fn allocate(&mut self) -> Tag {
        let tag = self.next;
        self.next = self.space.next(tag);
        tag
    }

    /// The tag the next call to [`allocate`](Self::allocate) will return.
    #[inline]
    pub const fn peek(&self) -> Tag {
        self.next
    }
}
