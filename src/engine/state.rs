//! The persistent program state propagated along each explored path.
//!
//! A [`ProgramState`] is the engine's belief at one program point along one
//! path: which symbolic value each tracked variable currently holds, what is
//! known about those values, and how often each program point has been
//! visited on this path. It is a persistent value type - every operation
//! returns a new state, none mutate in place - so states can sit in worklist
//! dedup sets and be forked cheaply at branches.
//!
//! # Constraint storage
//!
//! Facts are stored per symbolic value as one optional slot per constraint
//! family ([`ConstraintSet`]). The slot structure makes the central invariant
//! structural: a value can never simultaneously carry `Null` and `NotNull`,
//! or `True` and `False` - attaching a contradictory fact *fails* instead,
//! and that failure ([`ProgramState::try_set_constraint`] returning `None`)
//! is precisely how infeasible branch successors are pruned.

use std::collections::BTreeMap;

use crate::{
    domain::{BoolConstraint, Constraint, DistinctIntervalSet, ObjectConstraint},
    engine::{PointId, SymbolicValue},
    liveness::VarSet,
    symbols::VarId,
};

/// The facts attached to one symbolic value: at most one per family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ConstraintSet {
    boolean: Option<BoolConstraint>,
    object: Option<ObjectConstraint>,
    numeric: Option<DistinctIntervalSet>,
}

impl ConstraintSet {
    /// Returns `true` if no facts are attached.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.boolean.is_none() && self.object.is_none() && self.numeric.is_none()
    }

    /// Returns `true` if any attached fact implies `constraint`.
    #[must_use]
    pub fn implies(&self, constraint: &Constraint) -> bool {
        let stored = [
            self.boolean.map(Constraint::Bool),
            self.object.map(Constraint::Object),
            self.numeric.clone().map(Constraint::Num),
        ];
        stored
            .into_iter()
            .flatten()
            .any(|fact| fact.implies(constraint))
    }

    /// Attempts to add a fact, merging within its family.
    ///
    /// # Returns
    ///
    /// `false` when the fact contradicts an attached one (opposite boolean or
    /// nullability, or a numeric intersection that comes out empty); the set
    /// is left unchanged in that case.
    fn try_add(&mut self, constraint: &Constraint) -> bool {
        match constraint {
            Constraint::Bool(b) => match self.boolean {
                Some(existing) => existing == *b,
                None => {
                    self.boolean = Some(*b);
                    true
                }
            },
            Constraint::Object(o) => {
                // A value carrying a concrete range cannot become null.
                if *o == ObjectConstraint::Null && self.numeric.is_some() {
                    return false;
                }
                match self.object {
                    Some(existing) => existing == *o,
                    None => {
                        self.object = Some(*o);
                        true
                    }
                }
            }
            Constraint::Num(set) => {
                if self.object == Some(ObjectConstraint::Null) {
                    return false;
                }
                let merged = match &self.numeric {
                    Some(existing) => existing.intersect(set),
                    None => set.clone(),
                };
                if merged.is_empty() {
                    return false;
                }
                self.numeric = Some(merged);
                true
            }
        }
    }
}

/// A persistent mapping from tracked variables to symbolic values, facts
/// about those values, and per-point visit counts.
///
/// Two states are equal iff all three mappings are equal; equality and
/// hashing are what lets the walker recognize an already-explored
/// `(point, state)` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProgramState {
    values: BTreeMap<VarId, SymbolicValue>,
    constraints: BTreeMap<SymbolicValue, ConstraintSet>,
    visits: BTreeMap<PointId, u32>,
}

impl ProgramState {
    /// Creates an empty state: nothing tracked, nothing known.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the symbolic value currently held by a variable.
    #[must_use]
    pub fn value_of(&self, var: VarId) -> Option<SymbolicValue> {
        self.values.get(&var).copied()
    }

    /// Returns a state in which `var` holds `value`, unconditionally
    /// overwriting any previous mapping.
    ///
    /// Used for fresh values after assignments and invalidating compound
    /// operations; existing facts about the *old* value are dropped once no
    /// variable references it (see [`clean`](Self::clean)).
    #[must_use]
    pub fn set_value(&self, var: VarId, value: SymbolicValue) -> Self {
        let mut next = self.clone();
        next.values.insert(var, value);
        next
    }

    /// Attempts to attach a fact to a symbolic value.
    ///
    /// # Returns
    ///
    /// The new state on success. `None` means the fact contradicts what the
    /// state already knows - the caller is standing on an infeasible path and
    /// must simply not pursue it. This is the engine's sole pruning
    /// mechanism, never an error.
    #[must_use]
    pub fn try_set_constraint(&self, value: SymbolicValue, constraint: &Constraint) -> Option<Self> {
        let mut slot = self.constraints.get(&value).cloned().unwrap_or_default();
        if !slot.try_add(constraint) {
            return None;
        }
        let mut next = self.clone();
        next.constraints.insert(value, slot);
        Some(next)
    }

    /// Returns `true` if the state's knowledge about `value` guarantees
    /// `constraint`.
    #[must_use]
    pub fn has_constraint(&self, value: SymbolicValue, constraint: &Constraint) -> bool {
        self.constraints
            .get(&value)
            .is_some_and(|set| set.implies(constraint))
    }

    /// Returns the boolean fact attached to `value`, if any.
    #[must_use]
    pub fn bool_constraint(&self, value: SymbolicValue) -> Option<BoolConstraint> {
        self.constraints.get(&value).and_then(|s| s.boolean)
    }

    /// Returns the nullability fact attached to `value`, if any.
    #[must_use]
    pub fn object_constraint(&self, value: SymbolicValue) -> Option<ObjectConstraint> {
        self.constraints.get(&value).and_then(|s| s.object)
    }

    /// Returns the numeric fact attached to `value`, if any.
    #[must_use]
    pub fn numeric_constraint(&self, value: SymbolicValue) -> Option<&DistinctIntervalSet> {
        self.constraints.get(&value).and_then(|s| s.numeric.as_ref())
    }

    /// Returns a state tracking only the variables in `keep`.
    ///
    /// Facts about symbolic values no longer referenced by any kept variable
    /// are dropped with them, so two paths that differed only in dead
    /// variables produce structurally equal states and merge in the dedup
    /// set.
    #[must_use]
    pub fn clean(&self, keep: &VarSet) -> Self {
        let values: BTreeMap<VarId, SymbolicValue> = self
            .values
            .iter()
            .filter(|(var, _)| keep.contains(var))
            .map(|(var, value)| (*var, *value))
            .collect();

        let constraints = self
            .constraints
            .iter()
            .filter(|(value, set)| !set.is_empty() && values.values().any(|v| v == *value))
            .map(|(value, set)| (*value, set.clone()))
            .collect();

        Self {
            values,
            constraints,
            visits: self.visits.clone(),
        }
    }

    /// Returns a state with one more recorded visit of `point`.
    #[must_use]
    pub fn add_visit(&self, point: PointId) -> Self {
        let mut next = self.clone();
        *next.visits.entry(point).or_insert(0) += 1;
        next
    }

    /// Returns how often `point` has been visited along this path.
    #[must_use]
    pub fn visit_count(&self, point: PointId) -> u32 {
        self.visits.get(&point).copied().unwrap_or(0)
    }

    /// Returns the number of tracked variables.
    #[must_use]
    pub fn tracked_count(&self) -> usize {
        self.values.len()
    }
}
