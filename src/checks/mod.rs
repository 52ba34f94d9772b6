//! Built-in bug detectors.
//!
//! Each check implements [`ExplodedGraphCheck`](crate::engine::ExplodedGraphCheck)
//! and is registered on an [`ExplodedGraph`](crate::engine::ExplodedGraph)
//! before the walk starts. External callers can mix these with their own
//! checks, or replace one by registering a check with the same name.

mod null_dereference;

pub use null_dereference::NullDereferenceCheck;
