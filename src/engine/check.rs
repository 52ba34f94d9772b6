//! The plugin contract through which bug detectors attach to the walk.
//!
//! A check sees every instruction on every explored path, with the state that
//! reached it. It can pass the state through, refine it, or - by returning
//! `None` - condemn the path: the accepted convention is that the check has
//! already reported a finding for the defect this path represents, and
//! dropping the path avoids duplicate or misleading downstream findings.
//!
//! Checks are composed into a [`CheckSet`] *before* the walk begins; the set
//! is an ordered list with keyed replacement (registering a check whose
//! [`name`](ExplodedGraphCheck::name) matches an existing one swaps it in
//! place), so a base check set can be specialized without disturbing run
//! order.

use crate::{
    cfg::Instruction,
    engine::{ProgramPoint, ProgramState},
    symbols::SymbolTable,
};

/// A defect reported by a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// The name of the check that reported it.
    pub check: &'static str,
    /// The program point of the offending instruction.
    pub point: ProgramPoint,
    /// Human-readable description of the defect.
    pub message: String,
}

/// What a check may touch while processing an instruction: the semantic
/// oracle, and the walk's finding sink.
pub struct CheckContext<'w> {
    /// The analyzed declaration's resolved symbols.
    pub symbols: &'w SymbolTable,
    check: &'static str,
    findings: &'w mut Vec<Finding>,
}

impl<'w> CheckContext<'w> {
    pub(crate) fn new(
        symbols: &'w SymbolTable,
        check: &'static str,
        findings: &'w mut Vec<Finding>,
    ) -> Self {
        Self {
            symbols,
            check,
            findings,
        }
    }

    /// Reports a finding at a program point.
    ///
    /// # Arguments
    ///
    /// * `point` - Where the defect manifests
    /// * `message` - Human-readable description
    pub fn report(&mut self, point: ProgramPoint, message: impl Into<String>) {
        self.findings.push(Finding {
            check: self.check,
            point,
            message: message.into(),
        });
    }
}

/// A per-instruction hook run on every explored path.
///
/// # Contract
///
/// `process_instruction` must behave as a function of its arguments: a
/// check may accumulate findings (through [`CheckContext::report`]) but must
/// not carry hidden state that changes its answer across calls. Checks run in
/// registration order, each seeing the previous check's resulting state. A
/// check is expected never to panic; if one does, the panic propagates out of
/// the walk uncaught.
pub trait ExplodedGraphCheck {
    /// A stable name identifying this check; doubles as the replacement key
    /// in a [`CheckSet`] and the `check` field of reported findings.
    fn name(&self) -> &'static str;

    /// Processes one instruction on one path.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Semantic oracle and finding sink
    /// * `instruction` - The instruction being visited
    /// * `point` - Its program point
    /// * `state` - The state that reached it (after earlier checks)
    ///
    /// # Returns
    ///
    /// The state to continue with, or `None` to stop exploring this path.
    fn process_instruction(
        &mut self,
        ctx: &mut CheckContext<'_>,
        instruction: &Instruction,
        point: ProgramPoint,
        state: &ProgramState,
    ) -> Option<ProgramState>;
}

/// An ordered, keyed collection of checks, fixed before the walk starts.
#[derive(Default)]
pub struct CheckSet {
    checks: Vec<Box<dyn ExplodedGraphCheck>>,
}

impl CheckSet {
    /// Creates an empty check set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a check.
    ///
    /// If a check with the same [`name`](ExplodedGraphCheck::name) is already
    /// registered, the new one replaces it *in place*, keeping the original
    /// run position; otherwise it is appended.
    pub fn register(&mut self, check: Box<dyn ExplodedGraphCheck>) {
        let name = check.name();
        match self.checks.iter_mut().find(|c| c.name() == name) {
            Some(slot) => *slot = check,
            None => self.checks.push(check),
        }
    }

    /// Returns the number of registered checks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Returns `true` if no checks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Iterates over the checks in run order.
    pub(crate) fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = &mut Box<dyn ExplodedGraphCheck>> {
        self.checks.iter_mut()
    }
}

impl std::fmt::Debug for CheckSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.checks.iter().map(|c| c.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl ExplodedGraphCheck for Named {
        fn name(&self) -> &'static str {
            self.0
        }

        fn process_instruction(
            &mut self,
            _ctx: &mut CheckContext<'_>,
            _instruction: &Instruction,
            _point: ProgramPoint,
            state: &ProgramState,
        ) -> Option<ProgramState> {
            Some(state.clone())
        }
    }

    #[test]
    fn test_register_appends_in_order() {
        let mut set = CheckSet::new();
        set.register(Box::new(Named("a")));
        set.register(Box::new(Named("b")));

        let names: Vec<_> = set.iter_mut().map(|c| c.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_register_replaces_same_name_in_place() {
        let mut set = CheckSet::new();
        set.register(Box::new(Named("a")));
        set.register(Box::new(Named("b")));
        set.register(Box::new(Named("a")));

        assert_eq!(set.len(), 2);
        let names: Vec<_> = set.iter_mut().map(|c| c.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
