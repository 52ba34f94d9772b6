//! Basic blocks and branch condition shapes.
//!
//! A block is an ordered instruction list plus a kind describing how control
//! leaves it: fall through to successors ([`BlockKind::Jump`]), split on a
//! condition ([`BlockKind::Branch`]), or terminate the procedure
//! ([`BlockKind::Exit`]).
//!
//! Branch blocks carry a [`BranchCondition`] *shape* rather than a full
//! expression tree: the walker only narrows constraints for a small recognized
//! set of syntactic shapes, and everything else is [`BranchCondition::Opaque`],
//! which explores both successors unconstrained. That fallback is the engine's
//! precision/soundness trade-off: it never claims a branch is infeasible
//! unless it understood the condition well enough to prove it.

use std::fmt;

use crate::{cfg::Instruction, symbols::VarId};

/// Unique identifier for a basic block within one control flow graph.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(usize);

impl BlockId {
    /// Creates a new block identifier.
    ///
    /// # Arguments
    ///
    /// * `index` - The index into the graph's block table
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the index into the graph's block table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

/// The syntactic shape of a branch block's condition.
///
/// Each recognized shape tells the walker which constraints to attach on the
/// two successors. The enum is closed on purpose: a new shape means a new
/// variant and an exhaustive-match error everywhere it must be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchCondition {
    /// A plain boolean identifier (`if (b)`).
    ///
    /// Splits on the canonical `true`/`false` constraints of the variable's
    /// symbolic value.
    BooleanVariable(VarId),

    /// A literal `true` or `false` condition.
    ///
    /// Exactly one successor is reachable; no constraint bookkeeping needed.
    BooleanLiteral(bool),

    /// An equality or inequality test against the null literal
    /// (`x == null`, `x != null`).
    NullCheck {
        /// The non-null operand.
        operand: VarId,
        /// `true` for `!=`, which flips which successor gets the `Null`
        /// constraint.
        negated: bool,
    },

    /// A "has a value" probe on a nullable-typed variable (`n.HasValue`).
    ///
    /// Splits on `NotNull`/`Null`, not on boolean truth.
    HasValue(VarId),

    /// An iteration-variable binding heading a loop (`foreach`-style).
    ///
    /// Inherently non-boolean: the loop variable gets a fresh symbolic value
    /// and both successors are explored unconstrained.
    IterationBinding(VarId),

    /// Any condition shape the front end did not recognize, including
    /// conjunctions/disjunctions, null-coalescing, and conditional member
    /// access.
    ///
    /// Both successors are explored with no constraint narrowing.
    Opaque,
}

/// How control leaves a basic block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// The procedure's exit; a path reaching it is complete.
    Exit,

    /// A two-way split gated by a condition.
    Branch {
        /// The condition's syntactic shape.
        condition: BranchCondition,
        /// Successor taken when the condition holds.
        true_successor: BlockId,
        /// Successor taken when the condition does not hold.
        false_successor: BlockId,
    },

    /// An unconditional block with one or more successors.
    Jump {
        /// The successor blocks, all enqueued with the same state.
        successors: Vec<BlockId>,
    },
}

/// A basic block: an ordered instruction list plus an exit kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    kind: BlockKind,
    instructions: Vec<Instruction>,
}

impl Block {
    /// Creates an exit block.
    #[must_use]
    pub const fn exit() -> Self {
        Self {
            kind: BlockKind::Exit,
            instructions: Vec::new(),
        }
    }

    /// Creates a branch block.
    ///
    /// # Arguments
    ///
    /// * `condition` - The condition's syntactic shape
    /// * `true_successor` - Successor when the condition holds
    /// * `false_successor` - Successor when it does not
    #[must_use]
    pub const fn branch(
        condition: BranchCondition,
        true_successor: BlockId,
        false_successor: BlockId,
    ) -> Self {
        Self {
            kind: BlockKind::Branch {
                condition,
                true_successor,
                false_successor,
            },
            instructions: Vec::new(),
        }
    }

    /// Creates an unconditional block with the given successors.
    #[must_use]
    pub const fn jump(successors: Vec<BlockId>) -> Self {
        Self {
            kind: BlockKind::Jump { successors },
            instructions: Vec::new(),
        }
    }

    /// Sets the block's instruction list, builder-style.
    #[must_use]
    pub fn with_instructions(mut self, instructions: Vec<Instruction>) -> Self {
        self.instructions = instructions;
        self
    }

    /// Returns the block's exit kind.
    #[must_use]
    pub const fn kind(&self) -> &BlockKind {
        &self.kind
    }

    /// Returns the block's instruction list.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Returns the number of instructions in the block.
    #[must_use]
    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }

    /// Returns all successor block identifiers.
    #[must_use]
    pub fn successors(&self) -> Vec<BlockId> {
        match &self.kind {
            BlockKind::Exit => Vec::new(),
            BlockKind::Branch {
                true_successor,
                false_successor,
                ..
            } => vec![*true_successor, *false_successor],
            BlockKind::Jump { successors } => successors.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successors() {
        let exit = Block::exit();
        assert!(exit.successors().is_empty());

        let branch = Block::branch(BranchCondition::Opaque, BlockId::new(1), BlockId::new(2));
        assert_eq!(branch.successors(), vec![BlockId::new(1), BlockId::new(2)]);

        let jump = Block::jump(vec![BlockId::new(3)]);
        assert_eq!(jump.successors(), vec![BlockId::new(3)]);
    }

    #[test]
    fn test_with_instructions() {
        let block = Block::jump(vec![BlockId::new(1)])
            .with_instructions(vec![Instruction::Other, Instruction::Other]);
        assert_eq!(block.instruction_count(), 2);
    }
}
