//! The live-variable oracle consumed during state cleaning.
//!
//! A variable is *live* at a block's exit if some path from there may still
//! read its current value. The engine does not compute liveness itself - it is
//! a precomputed input, like the control flow graph - but it depends on it for
//! two things: bounding state size, and letting two paths that differ only in
//! a dead variable's value collapse into one worklist node.
//!
//! Callers with a real live-variable analysis populate a [`LiveVariableMap`]
//! from its results; callers without one can use
//! [`LiveVariableMap::all_live`], which trades merge opportunities for zero
//! setup.

use std::collections::BTreeSet;

use crate::{cfg::BlockId, symbols::VarId};

/// A set of variable identities.
pub type VarSet = BTreeSet<VarId>;

/// Per-block live-out sets, queried when the walker cleans a state before
/// handing it to successor blocks.
pub trait LivenessOracle {
    /// Returns the variables whose values may still be read after `block`.
    fn live_out(&self, block: BlockId) -> &VarSet;
}

/// A map-backed [`LivenessOracle`] filled in by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveVariableMap {
    sets: Vec<VarSet>,
    empty: VarSet,
}

impl LiveVariableMap {
    /// Creates an oracle reporting every variable dead at every block exit.
    ///
    /// # Arguments
    ///
    /// * `block_count` - Number of blocks in the graph
    #[must_use]
    pub fn new(block_count: usize) -> Self {
        Self {
            sets: vec![VarSet::new(); block_count],
            empty: VarSet::new(),
        }
    }

    /// Creates an oracle reporting every given variable live at every block
    /// exit.
    ///
    /// With nothing ever cleaned, distinct dead-variable values keep states
    /// distinct, so walks may explore more nodes than strictly necessary.
    #[must_use]
    pub fn all_live(block_count: usize, variables: impl IntoIterator<Item = VarId>) -> Self {
        let all: VarSet = variables.into_iter().collect();
        Self {
            sets: vec![all; block_count],
            empty: VarSet::new(),
        }
    }

    /// Sets the live-out set for one block.
    ///
    /// # Arguments
    ///
    /// * `block` - The block whose exit the set describes
    /// * `live` - The variables live at that exit
    pub fn set_live_out(&mut self, block: BlockId, live: impl IntoIterator<Item = VarId>) {
        if let Some(slot) = self.sets.get_mut(block.index()) {
            *slot = live.into_iter().collect();
        }
    }
}

impl LivenessOracle for LiveVariableMap {
    fn live_out(&self, block: BlockId) -> &VarSet {
        self.sets.get(block.index()).unwrap_or(&self.empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_by_default() {
        let map = LiveVariableMap::new(2);
        assert!(map.live_out(BlockId::new(0)).is_empty());
        assert!(map.live_out(BlockId::new(9)).is_empty());
    }

    #[test]
    fn test_set_live_out() {
        let mut map = LiveVariableMap::new(2);
        map.set_live_out(BlockId::new(1), [VarId::new(0), VarId::new(2)]);

        assert!(map.live_out(BlockId::new(0)).is_empty());
        let live = map.live_out(BlockId::new(1));
        assert!(live.contains(&VarId::new(0)));
        assert!(live.contains(&VarId::new(2)));
        assert!(!live.contains(&VarId::new(1)));
    }

    #[test]
    fn test_all_live() {
        let map = LiveVariableMap::all_live(3, [VarId::new(0), VarId::new(1)]);
        assert_eq!(map.live_out(BlockId::new(2)).len(), 2);
    }
}
