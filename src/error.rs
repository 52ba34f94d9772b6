use thiserror::Error;

use crate::cfg::BlockId;

/// The generic Error type, which provides coverage for all errors this library can
/// potentially return.
///
/// Note that *infeasible paths* are not errors: a constraint attempt that contradicts
/// existing knowledge is the engine's normal pruning mechanism and is expressed as an
/// `Option` return, never as an `Error`.
///
/// # Error Categories
///
/// ## Input Validation
/// - [`Error::Graph`] - A control flow graph failed structural validation
///
/// ## Engine Invariant Violations
/// - [`Error::MissingSymbolicValue`] - The walker's own bookkeeping is broken
#[derive(Error, Debug)]
pub enum Error {
    /// A control flow graph failed structural validation.
    ///
    /// Raised by [`ControlFlowGraph::new`](crate::cfg::ControlFlowGraph::new) when a
    /// successor or entry index is out of range, or the graph has no exit block.
    /// A graph that passes validation never produces this error during a walk.
    #[error("invalid control flow graph: {0}")]
    Graph(String),

    /// A branch condition reads a locally-scoped variable that has no symbolic value.
    ///
    /// Every locally-scoped variable must have been given a symbolic value (at its
    /// declaration, an assignment, or walk initialization for parameters) before a
    /// branch condition reads it. Hitting this means the walker's bookkeeping - not
    /// the analyzed program - is wrong, so the walk aborts hard.
    ///
    /// # Fields
    ///
    /// * `name` - The declared name of the variable
    /// * `block` - The branch block whose condition read the variable
    #[error("no symbolic value for locally-scoped variable `{name}` read by the condition of block {block:?}")]
    MissingSymbolicValue {
        /// The declared name of the variable
        name: String,
        /// The branch block whose condition read the variable
        block: BlockId,
    },
}
