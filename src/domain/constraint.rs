//! Constraints attachable to symbolic values.
//!
//! A constraint is one fact about a symbolic value, from one of three
//! families: boolean truth, nullability, or integral range. The families
//! matter because a value holds at most one fact per family - attaching a
//! second, contradictory fact from the same family is how infeasible paths
//! are detected.
//!
//! Two relations make constraints useful beyond storage:
//!
//! - [`Constraint::negated`] produces the exact logical-not complement, so a
//!   negated condition reuses the same split logic as its un-negated form.
//! - [`Constraint::implies`] lets checks reason about derived facts; notably,
//!   any concrete numeric constraint implies `NotNull`, since a value type
//!   cannot be null.

use strum::Display;

use crate::domain::DistinctIntervalSet;

/// A boolean-truth fact.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolConstraint {
    /// The value is `true`.
    True,
    /// The value is `false`.
    False,
}

impl BoolConstraint {
    /// Returns the complementary fact.
    #[must_use]
    pub const fn negated(self) -> Self {
        match self {
            Self::True => Self::False,
            Self::False => Self::True,
        }
    }
}

/// A nullability fact.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectConstraint {
    /// The value is null.
    Null,
    /// The value is not null.
    NotNull,
}

impl ObjectConstraint {
    /// Returns the complementary fact.
    #[must_use]
    pub const fn negated(self) -> Self {
        match self {
            Self::Null => Self::NotNull,
            Self::NotNull => Self::Null,
        }
    }
}

/// One attachable fact about a symbolic value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// A boolean-truth fact.
    Bool(BoolConstraint),
    /// A nullability fact.
    Object(ObjectConstraint),
    /// Membership in a union of integral ranges.
    Num(DistinctIntervalSet),
}

impl Constraint {
    /// The canonical "is true" constraint.
    pub const TRUE: Self = Self::Bool(BoolConstraint::True);
    /// The canonical "is false" constraint.
    pub const FALSE: Self = Self::Bool(BoolConstraint::False);
    /// The canonical "is null" constraint.
    pub const NULL: Self = Self::Object(ObjectConstraint::Null);
    /// The canonical "is not null" constraint.
    pub const NOT_NULL: Self = Self::Object(ObjectConstraint::NotNull);

    /// Creates a numeric constraint over a single closed range.
    #[must_use]
    pub fn range(min: i64, max: i64) -> Self {
        Self::Num(DistinctIntervalSet::of(crate::domain::Interval::new(min, max)))
    }

    /// Creates a numeric constraint pinning a single value.
    #[must_use]
    pub fn exact(value: i64) -> Self {
        Self::range(value, value)
    }

    /// Returns the constraint a logical-not of the condition would attach.
    ///
    /// Boolean and nullability facts flip to their complement; a numeric set
    /// becomes its integer-domain complement.
    #[must_use]
    pub fn negated(&self) -> Self {
        match self {
            Self::Bool(b) => Self::Bool(b.negated()),
            Self::Object(o) => Self::Object(o.negated()),
            Self::Num(set) => Self::Num(set.complement()),
        }
    }

    /// Returns `true` if this fact guarantees `other`.
    ///
    /// The relation is reflexive. Across families, a non-empty numeric fact
    /// implies `NotNull`: only value types carry ranges, and a value type
    /// cannot be null. Within the numeric family, a subset implies any
    /// superset.
    #[must_use]
    pub fn implies(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Num(a), Self::Num(b)) => !a.is_empty() && b.fully_contains(a),
            (Self::Num(a), Self::Object(ObjectConstraint::NotNull)) => !a.is_empty(),
            _ => false,
        }
    }
}
