//! # symflow Prelude
//!
//! This module provides a convenient prelude for the most commonly used types
//! and traits of the library. Import it to get everything needed to build a
//! graph, run a walk, and consume the results.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all symflow operations
pub use crate::Error;

/// The result type used throughout symflow
pub use crate::Result;

// ================================================================================================
// Input Model
// ================================================================================================

/// Control flow graph building blocks
pub use crate::cfg::{
    Block, BlockId, BlockKind, BranchCondition, Constant, ControlFlowGraph, Instruction, Operand,
};

/// Resolved variables and the facts about them
pub use crate::symbols::{Symbol, SymbolTable, TypeCategory, VarId};

/// The live-variable oracle consumed during state cleaning
pub use crate::liveness::{LiveVariableMap, LivenessOracle, VarSet};

// ================================================================================================
// Engine
// ================================================================================================

/// The walker and its termination bounds
pub use crate::engine::{ExplodedGraph, Termination, WalkEvent, WalkLimits};

/// Program states and the values they track
pub use crate::engine::{ProgramPoint, ProgramState, SymbolicValue};

/// The check contract and its findings
pub use crate::engine::{CheckContext, CheckSet, ExplodedGraphCheck, Finding};

// ================================================================================================
// Constraint Domain
// ================================================================================================

/// Constraints attachable to symbolic values
pub use crate::domain::{BoolConstraint, Constraint, DistinctIntervalSet, Interval, ObjectConstraint};

// ================================================================================================
// Built-in Checks
// ================================================================================================

/// Null dereference detection
pub use crate::checks::NullDereferenceCheck;
