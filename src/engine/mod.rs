//! The symbolic execution engine.
//!
//! This module is the heart of the crate: a worklist-driven walker over the
//! *exploded graph*, the product of control flow graph points and the program
//! states that reach them. The pieces compose as follows:
//!
//! - [`PointArena`] interns every `(block, offset)` position of a graph into
//!   dense [`PointId`]s up front, so states can count visits by copyable key.
//! - [`ProgramState`] is the persistent, structurally comparable map from
//!   variables to [`SymbolicValue`]s and from values to constraint sets.
//! - [`ExplodedNode`] pairs a point with a state; the walker's dedup set and
//!   worklist hold these.
//! - [`ExplodedGraph`] drives the walk, applying instruction effects,
//!   splitting states at branches, and pruning infeasible paths.
//! - [`ExplodedGraphCheck`] is the plugin contract: checks observe every
//!   instruction on every path and report [`Finding`]s.
//! - [`WalkEvent`] is the typed notification log the caller drains afterward.
//!
//! # Example
//!
//! ```rust
//! use symflow::cfg::{Block, BlockId, BranchCondition, ControlFlowGraph};
//! use symflow::engine::{ExplodedGraph, Termination, WalkEvent};
//! use symflow::liveness::LiveVariableMap;
//! use symflow::symbols::{Symbol, SymbolTable, TypeCategory};
//!
//! let mut symbols = SymbolTable::new();
//! let p = symbols.declare(Symbol::parameter("p", TypeCategory::Reference, false));
//!
//! // if (p == null) { b1 } else { b2 }
//! let blocks = vec![
//!     Block::branch(
//!         BranchCondition::NullCheck { operand: p, negated: false },
//!         BlockId::new(1),
//!         BlockId::new(2),
//!     ),
//!     Block::exit(),
//!     Block::exit(),
//! ];
//! let cfg = ControlFlowGraph::new(blocks, BlockId::new(0))?;
//! let liveness = LiveVariableMap::new(cfg.block_count());
//!
//! let mut graph = ExplodedGraph::new(&cfg, &symbols, &liveness);
//! assert_eq!(graph.walk()?, Termination::Completed);
//!
//! // Both branch outcomes were explored.
//! let taken: Vec<bool> = graph
//!     .events()
//!     .iter()
//!     .filter_map(|e| match e {
//!         WalkEvent::ConditionEvaluated { value, .. } => Some(*value),
//!         _ => None,
//!     })
//!     .collect();
//! assert_eq!(taken, vec![true, false]);
//! # Ok::<(), symflow::Error>(())
//! ```

mod check;
mod event;
mod node;
mod point;
mod state;
mod value;
mod walker;

pub use check::{CheckContext, CheckSet, ExplodedGraphCheck, Finding};
pub use event::{Termination, WalkEvent};
pub use node::ExplodedNode;
pub use point::{PointArena, PointId, ProgramPoint};
pub use state::{ConstraintSet, ProgramState};
pub use value::{SymbolicValue, ValueFactory};
pub use walker::{ExplodedGraph, WalkLimits};
