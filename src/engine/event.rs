//! Typed lifecycle notifications emitted during a walk.
//!
//! The engine appends [`WalkEvent`]s to an internal log that the caller
//! drains after (or between) walks. There is no hidden subscriber list: the
//! notification contract is this enum, and consumers observe exactly the
//! events in the order the walker produced them.

use strum::Display;

use crate::{
    cfg::BlockId,
    engine::ProgramPoint,
};

/// Why a walk stopped.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The worklist drained: every reachable path was explored to the exit or
    /// pruned.
    Completed,
    /// The global step bound was hit. A normal, expected outcome for
    /// pathological graphs, not an error.
    MaxStepsReached,
}

/// One observable occurrence during a walk, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEvent {
    /// The walk began; always the first event.
    ExplorationStarted,

    /// The worklist drained and the walk finished normally; always the last
    /// event of a completed walk.
    ExplorationEnded,

    /// The global step bound was reached and the walk aborted; always the
    /// last event of a bounded-off walk.
    MaxStepsReached,

    /// One explored path reached the exit block.
    ExitReached {
        /// The point at the exit block where the path ended.
        point: ProgramPoint,
    },

    /// A successor was dropped because its program point hit the per-point
    /// visit bound along this path.
    VisitLimitExceeded {
        /// The over-visited point.
        point: ProgramPoint,
    },

    /// An instruction was processed: all checks ran and the built-in symbolic
    /// effect was applied.
    InstructionProcessed {
        /// The instruction's program point.
        point: ProgramPoint,
    },

    /// A branch condition evaluated to a boolean on some successor, whether
    /// or not any constraint narrowing took place.
    ///
    /// Emitted once per successor taken - including for unrecognized
    /// condition shapes, where both values fire with unconstrained states.
    ConditionEvaluated {
        /// The branch block whose condition was evaluated.
        block: BlockId,
        /// The truth value taken on the enqueued successor.
        value: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_termination_display() {
        assert_eq!(Termination::Completed.to_string(), "Completed");
        assert_eq!(Termination::MaxStepsReached.to_string(), "MaxStepsReached");
    }
}
