// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # symflow
//!
//! A path-sensitive symbolic execution engine for static bug detection.
//!
//! `symflow` walks every execution path of a declaration's control flow graph,
//! carrying a persistent symbolic state per path: which symbolic value each
//! variable holds, and what is known about each value (boolean truth,
//! nullness, numeric ranges). Conditionals split the state, contradictory
//! branches are pruned as infeasible, and pluggable *checks* observe every
//! instruction on every surviving path to report defects.
//!
//! ## Features
//!
//! - **Path sensitivity** - `if (x == null) { } x.Length` is analyzed once per
//!   feasible path, with the nullness of `x` known on each
//! - **Infeasible path pruning** - a branch contradicting accumulated
//!   constraints is simply not explored
//! - **Guaranteed termination** - a global step bound and a per-point visit
//!   bound cap exploration on any input, loops included
//! - **Persistent states** - splitting a path is a cheap structural-sharing
//!   copy, and structurally equal states deduplicate automatically
//! - **Pluggable checks** - bug detectors implement one trait and compose
//!   into an ordered, keyed set
//!
//! ## Quick Start
//!
//! Add `symflow` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! symflow = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! ```rust
//! use symflow::prelude::*;
//!
//! // string s = null;
//! // if (flag) { s.Length; }
//! let mut symbols = SymbolTable::new();
//! let s = symbols.declare(Symbol::local("s", TypeCategory::Reference));
//! let flag = symbols.declare(Symbol::parameter("flag", TypeCategory::Boolean, false));
//!
//! let blocks = vec![
//!     Block::branch(
//!         BranchCondition::BooleanVariable(flag),
//!         BlockId::new(1),
//!         BlockId::new(2),
//!     )
//!     .with_instructions(vec![Instruction::Declaration {
//!         target: s,
//!         initializer: Some(Operand::Constant(Constant::Null)),
//!     }]),
//!     Block::jump(vec![BlockId::new(2)])
//!         .with_instructions(vec![Instruction::MemberAccess { receiver: s }]),
//!     Block::exit(),
//! ];
//! let cfg = ControlFlowGraph::new(blocks, BlockId::new(0))?;
//! let liveness = LiveVariableMap::all_live(cfg.block_count(), symbols.iter().map(|(v, _)| v));
//!
//! let mut graph = ExplodedGraph::new(&cfg, &symbols, &liveness)
//!     .with_check(Box::new(NullDereferenceCheck::new()));
//! graph.walk()?;
//!
//! let findings = graph.take_findings();
//! assert_eq!(findings.len(), 1);
//! assert_eq!(findings[0].check, "null-dereference");
//! # Ok::<(), symflow::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `symflow` is organized into several key modules:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`cfg`] - The input model: blocks, instructions, branch conditions
//! - [`symbols`] - Resolved variables and the semantic facts about them
//! - [`liveness`] - The live-variable oracle consumed during state cleaning
//! - [`domain`] - Constraints and the interval algebra beneath numeric ones
//! - [`engine`] - The worklist walker, program states, events, and the check
//!   contract
//! - [`checks`] - Built-in bug detectors
//! - [`Error`] and [`Result`] - Error handling
//!
//! The engine deliberately analyzes one declaration at a time and holds no
//! global state; batch callers run one [`engine::ExplodedGraph`] per
//! declaration, in parallel if they wish.
//!
//! ## Error Handling
//!
//! Errors are rare by design. An *infeasible path* is not an error but the
//! pruning mechanism working as intended, and hitting the step bound is a
//! normal [`engine::Termination`] outcome. [`Error`] covers only structural
//! graph validation and broken engine invariants.

pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use symflow::prelude::*;
///
/// let cfg = ControlFlowGraph::new(vec![Block::exit()], BlockId::new(0))?;
/// let symbols = SymbolTable::new();
/// let liveness = LiveVariableMap::new(cfg.block_count());
/// let mut graph = ExplodedGraph::new(&cfg, &symbols, &liveness);
/// assert_eq!(graph.walk()?, Termination::Completed);
/// # Ok::<(), symflow::Error>(())
/// ```
pub mod prelude;

pub mod cfg;
pub mod checks;
pub mod domain;
pub mod engine;
pub mod liveness;
pub mod symbols;

/// The result type used throughout `symflow`.
pub type Result<T> = std::result::Result<T, Error>;

pub use error::Error;
pub use symbols::SymbolTable;
