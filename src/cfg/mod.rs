//! The control-flow representation the engine walks.
//!
//! Construction of this representation is the front end's job; the engine
//! consumes it read-only. The module is organized into:
//!
//! - [`block`] - Basic blocks, block kinds, and branch condition shapes
//! - [`graph`] - The validated [`ControlFlowGraph`] container
//! - [`instruction`] - The closed instruction vocabulary the walker interprets

pub mod block;
pub mod graph;
pub mod instruction;

pub use block::{Block, BlockId, BlockKind, BranchCondition};
pub use graph::ControlFlowGraph;
pub use instruction::{Constant, Instruction, Operand};
