//! Control flow graph container and structural validation.
//!
//! The graph itself is built by an out-of-scope front end; this module only
//! stores it and validates the structural invariants the walker relies on, so
//! the walk itself can index blocks without re-checking bounds.

use crate::{
    cfg::{Block, BlockId},
    Error, Result,
};

/// A procedure's control flow graph: a block table plus an entry block.
///
/// # Construction
///
/// [`ControlFlowGraph::new`] validates that the entry index and every
/// successor index are in range and that at least one exit block exists. A
/// graph that passes validation can be walked without bounds failures.
///
/// # Example
///
/// ```rust
/// use symflow::cfg::{Block, BlockId, ControlFlowGraph};
///
/// let blocks = vec![Block::jump(vec![BlockId::new(1)]), Block::exit()];
/// let cfg = ControlFlowGraph::new(blocks, BlockId::new(0))?;
/// assert_eq!(cfg.block_count(), 2);
/// # Ok::<(), symflow::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlFlowGraph {
    blocks: Vec<Block>,
    entry: BlockId,
}

impl ControlFlowGraph {
    /// Creates a control flow graph after validating its structure.
    ///
    /// # Arguments
    ///
    /// * `blocks` - The block table; successors index into it
    /// * `entry` - The block where every walk starts
    ///
    /// # Errors
    ///
    /// Returns [`Error::Graph`] if the graph is empty, the entry or any
    /// successor index is out of range, or no exit block exists.
    pub fn new(blocks: Vec<Block>, entry: BlockId) -> Result<Self> {
        if blocks.is_empty() {
            return Err(Error::Graph("graph has no blocks".to_string()));
        }

        if entry.index() >= blocks.len() {
            return Err(Error::Graph(format!(
                "entry {:?} is out of range for {} blocks",
                entry,
                blocks.len()
            )));
        }

        let mut has_exit = false;
        for (idx, block) in blocks.iter().enumerate() {
            for successor in block.successors() {
                if successor.index() >= blocks.len() {
                    return Err(Error::Graph(format!(
                        "block b{idx} has out-of-range successor {successor:?}"
                    )));
                }
            }
            has_exit |= block.successors().is_empty();
        }

        if !has_exit {
            return Err(Error::Graph("graph has no exit block".to_string()));
        }

        Ok(Self { blocks, entry })
    }

    /// Returns the entry block identifier.
    #[must_use]
    pub const fn entry(&self) -> BlockId {
        self.entry
    }

    /// Returns the block for an identifier.
    ///
    /// # Panics
    ///
    /// Panics if the identifier did not come from this graph. Identifiers
    /// produced during a walk are always in range by construction.
    #[must_use]
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    /// Returns the number of blocks.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Iterates over all blocks with their identifiers.
    pub fn blocks(&self) -> impl Iterator<Item = (BlockId, &Block)> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(i, b)| (BlockId::new(i), b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::BranchCondition;

    #[test]
    fn test_valid_graph() {
        let blocks = vec![
            Block::branch(BranchCondition::Opaque, BlockId::new(1), BlockId::new(1)),
            Block::exit(),
        ];
        let cfg = ControlFlowGraph::new(blocks, BlockId::new(0)).unwrap();
        assert_eq!(cfg.block_count(), 2);
        assert_eq!(cfg.entry(), BlockId::new(0));
    }

    #[test]
    fn test_empty_graph_rejected() {
        assert!(ControlFlowGraph::new(Vec::new(), BlockId::new(0)).is_err());
    }

    #[test]
    fn test_out_of_range_entry_rejected() {
        let blocks = vec![Block::exit()];
        assert!(ControlFlowGraph::new(blocks, BlockId::new(5)).is_err());
    }

    #[test]
    fn test_out_of_range_successor_rejected() {
        let blocks = vec![Block::jump(vec![BlockId::new(9)]), Block::exit()];
        assert!(ControlFlowGraph::new(blocks, BlockId::new(0)).is_err());
    }

    #[test]
    fn test_graph_without_exit_rejected() {
        let blocks = vec![Block::jump(vec![BlockId::new(0)])];
        assert!(ControlFlowGraph::new(blocks, BlockId::new(0)).is_err());
    }
}
