//! The constraint domain: intervals, interval sets, and attachable facts.
//!
//! This is the value-level vocabulary the engine's program states are built
//! from. Everything here is a pure, persistent value type with structural
//! equality; nothing references the control flow graph or the walk.
//!
//! - [`interval`] - Closed integer ranges
//! - [`set`] - Coalesced unions of disjoint ranges
//! - [`constraint`] - Boolean / nullability / numeric facts and their
//!   negation and implication relations

pub mod constraint;
pub mod interval;
pub mod set;

pub use constraint::{BoolConstraint, Constraint, ObjectConstraint};
pub use interval::Interval;
pub use set::DistinctIntervalSet;
