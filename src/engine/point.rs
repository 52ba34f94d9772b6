//! Program points and their interning arena.
//!
//! A program point is an instruction offset within a block; offsets run from
//! `0` to the block's instruction count *inclusive*, with the final offset
//! denoting the block boundary where branching happens.
//!
//! Rather than interning points through a mutable dictionary, the
//! [`PointArena`] precomputes a dense index space from the graph's block
//! sizes once per CFG: each `(block, offset)` pair maps to a [`PointId`], and
//! point identity/equality is an O(1) integer comparison with no hidden
//! mutable state.

use std::fmt;

use crate::cfg::{BlockId, ControlFlowGraph};

/// A `(block, offset)` pair naming one location in the walk.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramPoint {
    /// The block this point lies in.
    pub block: BlockId,
    /// The instruction offset; equal to the block's instruction count when
    /// the point denotes the block boundary.
    pub offset: usize,
}

impl fmt::Debug for ProgramPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{}", self.block, self.offset)
    }
}

/// Dense identifier for an interned program point.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(u32);

impl PointId {
    /// Returns the dense index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Builds an id from a raw index, bypassing the arena.
    #[cfg(test)]
    pub(crate) const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Precomputed mapping between [`ProgramPoint`]s and dense [`PointId`]s.
///
/// Built once per control flow graph from cumulative block sizes; a block
/// with `n` instructions owns `n + 1` consecutive ids (offsets `0..=n`).
#[derive(Debug, Clone)]
pub struct PointArena {
    /// `base[i]` is the id of `(block i, offset 0)`; a trailing sentinel
    /// holds the total point count.
    base: Vec<u32>,
}

impl PointArena {
    /// Builds the arena for a graph.
    ///
    /// # Panics
    ///
    /// Panics if the graph holds more than `u32::MAX` program points.
    #[must_use]
    pub fn new(cfg: &ControlFlowGraph) -> Self {
        let mut base = Vec::with_capacity(cfg.block_count() + 1);
        let mut next: u32 = 0;
        for (_, block) in cfg.blocks() {
            base.push(next);
            let width = u32::try_from(block.instruction_count() + 1)
                .expect("block instruction count exceeds arena capacity");
            next = next
                .checked_add(width)
                .expect("program point count exceeds arena capacity");
        }
        base.push(next);
        Self { base }
    }

    /// Returns the total number of program points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.base[self.base.len() - 1] as usize
    }

    /// Returns `true` if the arena holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Interns a program point.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the offset exceeds the block's instruction
    /// count; walk-produced points are in range by construction.
    #[must_use]
    pub fn id(&self, point: ProgramPoint) -> PointId {
        let block = point.block.index();
        debug_assert!(
            self.base[block] as usize + point.offset < self.base[block + 1] as usize,
            "offset {} out of range for {:?}",
            point.offset,
            point.block
        );
        #[allow(clippy::cast_possible_truncation)]
        PointId(self.base[block] + point.offset as u32)
    }

    /// Recovers the `(block, offset)` pair for an id.
    #[must_use]
    pub fn resolve(&self, id: PointId) -> ProgramPoint {
        let raw = id.0;
        // partition_point finds the first base greater than raw; the point's
        // block is the slot before it.
        let block = self.base.partition_point(|&b| b <= raw) - 1;
        ProgramPoint {
            block: BlockId::new(block),
            offset: (raw - self.base[block]) as usize,
        }
    }
}
