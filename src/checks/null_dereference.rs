//! Null dereference detection.

use crate::{
    cfg::Instruction,
    domain::{Constraint, ObjectConstraint},
    engine::{CheckContext, ExplodedGraphCheck, ProgramPoint, ProgramState},
};

/// Reports member accesses on receivers constrained to be null.
///
/// On every explored path, a [`MemberAccess`](Instruction::MemberAccess)
/// whose receiver currently carries the [`ObjectConstraint::Null`] constraint
/// is a defect: that path dereferences null. The check reports a finding and
/// drops the path, since everything after the dereference would execute in a
/// state the runtime can never reach.
///
/// A dereference that survives teaches the engine something: the receiver
/// must have been non-null, so the state is refined with
/// [`ObjectConstraint::NotNull`]. A later `if (x == null)` on the same value
/// then has an infeasible true successor, and the walker prunes it.
#[derive(Debug, Default)]
pub struct NullDereferenceCheck;

impl NullDereferenceCheck {
    /// Creates the check.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ExplodedGraphCheck for NullDereferenceCheck {
    fn name(&self) -> &'static str {
        "null-dereference"
    }

    fn process_instruction(
        &mut self,
        ctx: &mut CheckContext<'_>,
        instruction: &Instruction,
        point: ProgramPoint,
        state: &ProgramState,
    ) -> Option<ProgramState> {
        let Instruction::MemberAccess { receiver } = instruction else {
            return Some(state.clone());
        };

        // Receivers the engine does not track (captured variables, fields)
        // and non-nullable value types cannot trip this check.
        if !ctx.symbols.is_locally_scoped(*receiver) {
            return Some(state.clone());
        }
        if ctx
            .symbols
            .get(*receiver)
            .is_some_and(|s| !s.type_category.is_nullable())
        {
            return Some(state.clone());
        }
        let Some(value) = state.value_of(*receiver) else {
            return Some(state.clone());
        };

        match state.object_constraint(value) {
            Some(ObjectConstraint::Null) => {
                let name = ctx
                    .symbols
                    .get(*receiver)
                    .map_or_else(|| format!("{receiver:?}"), |s| s.name.clone());
                ctx.report(point, format!("`{name}` is null on this execution path"));
                None
            }
            Some(ObjectConstraint::NotNull) => Some(state.clone()),
            None => {
                // The dereference succeeded, so the receiver was not null.
                state
                    .try_set_constraint(value, &Constraint::NOT_NULL)
                    .or_else(|| Some(state.clone()))
            }
        }
    }
}
