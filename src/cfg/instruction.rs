//! The instruction forms the walker gives symbolic meaning to.
//!
//! The engine is deliberately not a full interpreter: it recognizes a small,
//! closed set of instruction shapes that affect what it knows about local
//! variables, and treats everything else as [`Instruction::Other`] (no effect).
//! The set is a closed enum so that adding a new shape is a compile-time
//! checked decision in the walker's dispatch, not a silent fallthrough.
//!
//! Instructions arrive from the front end with identifiers already resolved to
//! [`VarId`]s and compile-time constants already evaluated.

use crate::symbols::VarId;

/// A compile-time constant, as evaluated by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    /// A boolean literal.
    Bool(bool),
    /// The null literal.
    Null,
    /// An integral literal.
    Int(i64),
}

/// The right-hand side of a declaration or assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// A resolved reference to another variable; the target shares its
    /// symbolic value.
    Variable(VarId),
    /// A compile-time constant.
    Constant(Constant),
    /// Anything the front end could not resolve; the target gets a fresh
    /// symbolic value.
    Unknown,
}

/// One instruction within a basic block, in the shape vocabulary the walker
/// understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// A local variable declaration, with an optional initializer.
    ///
    /// The declared variable receives a symbolic value derived from the
    /// initializer when one is resolvable, otherwise a fresh value.
    Declaration {
        /// The declared variable.
        target: VarId,
        /// The initializer expression, if present.
        initializer: Option<Operand>,
    },

    /// A simple assignment to a local or parameter.
    ///
    /// Tracked only when the target is locally scoped; writes to captured
    /// variables are invisible to the engine.
    Assignment {
        /// The assigned variable.
        target: VarId,
        /// The assigned expression.
        source: Operand,
    },

    /// A compound assignment (`+=`, `-=`, `&=`, ...).
    ///
    /// The target gets a fresh symbolic value: knowledge about the old value
    /// is deliberately discarded rather than modeled.
    CompoundAssignment {
        /// The assigned variable.
        target: VarId,
    },

    /// A pre- or post- increment/decrement.
    ///
    /// Same conservative invalidation as [`Instruction::CompoundAssignment`].
    IncrementDecrement {
        /// The mutated variable.
        target: VarId,
    },

    /// An identifier passed as a by-reference or output argument.
    ///
    /// The callee may write anything; the target gets a fresh symbolic value.
    RefOrOutArgument {
        /// The variable passed by reference.
        target: VarId,
    },

    /// A member access (dereference) on a variable.
    ///
    /// Has no built-in symbolic effect, but is visible to checks - this is
    /// where a null-dereference detector fires.
    MemberAccess {
        /// The dereferenced variable.
        receiver: VarId,
    },

    /// Any instruction with no recognized symbolic effect.
    Other,
}

impl Instruction {
    /// Returns the variable this instruction writes, if it writes one.
    #[must_use]
    pub const fn written_variable(&self) -> Option<VarId> {
        match self {
            Self::Declaration { target, .. }
            | Self::Assignment { target, .. }
            | Self::CompoundAssignment { target }
            | Self::IncrementDecrement { target }
            | Self::RefOrOutArgument { target } => Some(*target),
            Self::MemberAccess { .. } | Self::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_written_variable() {
        let v = VarId::new(3);
        assert_eq!(
            Instruction::Declaration {
                target: v,
                initializer: None
            }
            .written_variable(),
            Some(v)
        );
        assert_eq!(Instruction::CompoundAssignment { target: v }.written_variable(), Some(v));
        assert_eq!(Instruction::MemberAccess { receiver: v }.written_variable(), None);
        assert_eq!(Instruction::Other.written_variable(), None);
    }
}
