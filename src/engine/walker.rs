//! The worklist-driven path exploration.
//!
//! [`ExplodedGraph`] dequeues `(program point, program state)` nodes from a
//! FIFO worklist, applies the built-in symbolic effect of the instruction at
//! the point (after giving every registered check a chance to veto the path),
//! splits states at branch conditions whose shape it recognizes, and enqueues
//! successors until the worklist drains or a bound trips.
//!
//! # Termination
//!
//! Loops make naive exploration unbounded, so two caps guarantee the walk
//! halts on any input graph:
//!
//! - a **global step bound** ([`WalkLimits::max_steps`]): one step per
//!   dequeue; hitting the bound aborts the whole walk with
//!   [`Termination::MaxStepsReached`] - an expected outcome, not an error;
//! - a **per-point visit bound** ([`WalkLimits::max_point_visits`]): a
//!   successor whose point was already visited that many times along its own
//!   path is dropped with a [`WalkEvent::VisitLimitExceeded`] notification,
//!   bounding loop unrolling while still letting *different* incoming states
//!   take their own visits.
//!
//! Independently of both bounds, a node structurally equal to one already
//! enqueued during this walk is never enqueued again: an exact revisit cannot
//! produce new information.
//!
//! # Scope
//!
//! One `ExplodedGraph` is scoped to one declaration's analysis. The walk is
//! single-threaded and runs to completion inside [`walk`](ExplodedGraph::walk);
//! analyzing independent declarations in parallel is the caller's business,
//! with one graph each.

use std::collections::{HashSet, VecDeque};

use log::{debug, trace};

use crate::{
    cfg::{
        BlockId, BlockKind, BranchCondition, Constant, ControlFlowGraph, Instruction, Operand,
    },
    domain::Constraint,
    engine::{
        CheckContext, CheckSet, ExplodedGraphCheck, ExplodedNode, Finding, PointArena,
        ProgramPoint, ProgramState, SymbolicValue, Termination, ValueFactory, WalkEvent,
    },
    liveness::LivenessOracle,
    symbols::VarId,
    Error, Result, SymbolTable,
};

/// The two bounds that guarantee a walk halts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkLimits {
    /// Maximum number of dequeued nodes per walk.
    pub max_steps: usize,
    /// Maximum visits of one program point along one path.
    pub max_point_visits: u32,
}

impl Default for WalkLimits {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            max_point_visits: 2,
        }
    }
}

/// The path-sensitive symbolic execution engine for one declaration.
///
/// # Example
///
/// ```rust
/// use symflow::cfg::{Block, BlockId, ControlFlowGraph};
/// use symflow::engine::{ExplodedGraph, Termination};
/// use symflow::liveness::LiveVariableMap;
/// use symflow::symbols::SymbolTable;
///
/// let blocks = vec![Block::jump(vec![BlockId::new(1)]), Block::exit()];
/// let cfg = ControlFlowGraph::new(blocks, BlockId::new(0))?;
/// let symbols = SymbolTable::new();
/// let liveness = LiveVariableMap::new(cfg.block_count());
///
/// let mut graph = ExplodedGraph::new(&cfg, &symbols, &liveness);
/// assert_eq!(graph.walk()?, Termination::Completed);
/// # Ok::<(), symflow::Error>(())
/// ```
pub struct ExplodedGraph<'a, L: LivenessOracle> {
    cfg: &'a ControlFlowGraph,
    symbols: &'a SymbolTable,
    liveness: &'a L,
    limits: WalkLimits,
    points: PointArena,
    checks: CheckSet,
    worklist: VecDeque<ExplodedNode>,
    seen: HashSet<ExplodedNode>,
    events: Vec<WalkEvent>,
    findings: Vec<Finding>,
    values: ValueFactory,
    steps: usize,
}

impl<'a, L: LivenessOracle> ExplodedGraph<'a, L> {
    /// Creates an engine for one declaration.
    ///
    /// # Arguments
    ///
    /// * `cfg` - The declaration's validated control flow graph
    /// * `symbols` - Its resolved variables and parameters
    /// * `liveness` - Precomputed per-block live-out sets
    #[must_use]
    pub fn new(cfg: &'a ControlFlowGraph, symbols: &'a SymbolTable, liveness: &'a L) -> Self {
        Self {
            cfg,
            symbols,
            liveness,
            limits: WalkLimits::default(),
            points: PointArena::new(cfg),
            checks: CheckSet::new(),
            worklist: VecDeque::new(),
            seen: HashSet::new(),
            events: Vec::new(),
            findings: Vec::new(),
            values: ValueFactory::new(),
            steps: 0,
        }
    }

    /// Overrides the termination bounds, builder-style.
    #[must_use]
    pub fn with_limits(mut self, limits: WalkLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Registers a check, builder-style.
    ///
    /// A check with the same name as an already-registered one replaces it in
    /// place; see [`CheckSet::register`].
    #[must_use]
    pub fn with_check(mut self, check: Box<dyn ExplodedGraphCheck>) -> Self {
        self.checks.register(check);
        self
    }

    /// Explores every reachable path of the declaration.
    ///
    /// Restarts from scratch on each call: the worklist, dedup set, event
    /// log, and findings of any previous walk are discarded.
    ///
    /// # Returns
    ///
    /// How the walk stopped. [`Termination::MaxStepsReached`] is a normal
    /// outcome for pathological graphs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSymbolicValue`] when a recognized branch
    /// condition reads a locally-scoped variable the state never gave a
    /// value - an engine bookkeeping bug, not a property of the analyzed
    /// program.
    pub fn walk(&mut self) -> Result<Termination> {
        self.worklist.clear();
        self.seen.clear();
        self.events.clear();
        self.findings.clear();
        self.values = ValueFactory::new();
        self.steps = 0;

        debug!("starting walk over {} blocks", self.cfg.block_count());
        self.events.push(WalkEvent::ExplorationStarted);

        let initial = self.initial_state();
        self.enqueue(
            ProgramPoint {
                block: self.cfg.entry(),
                offset: 0,
            },
            initial,
        );

        while let Some(node) = self.worklist.pop_front() {
            if self.steps >= self.limits.max_steps {
                debug!("step bound {} hit, aborting walk", self.limits.max_steps);
                self.events.push(WalkEvent::MaxStepsReached);
                return Ok(Termination::MaxStepsReached);
            }
            self.steps += 1;

            let point = self.points.resolve(node.point);
            let cfg = self.cfg;
            let block = cfg.block(point.block);

            match block.kind() {
                BlockKind::Exit => {
                    trace!("path complete at {point:?}");
                    self.events.push(WalkEvent::ExitReached { point });
                }
                _ if point.offset < block.instruction_count() => {
                    self.visit_instruction(point, &block.instructions()[point.offset], node.state);
                }
                BlockKind::Branch {
                    condition,
                    true_successor,
                    false_successor,
                } => {
                    self.visit_branch(
                        point.block,
                        *condition,
                        *true_successor,
                        *false_successor,
                        node.state,
                    )?;
                }
                BlockKind::Jump { successors } => {
                    let cleaned = self.cleaned(&node.state, point.block);
                    for successor in successors {
                        self.enqueue(
                            ProgramPoint {
                                block: *successor,
                                offset: 0,
                            },
                            cleaned.clone(),
                        );
                    }
                }
            }
        }

        debug!("walk completed after {} steps", self.steps);
        self.events.push(WalkEvent::ExplorationEnded);
        Ok(Termination::Completed)
    }

    /// Returns the events emitted so far, in emission order.
    #[must_use]
    pub fn events(&self) -> &[WalkEvent] {
        &self.events
    }

    /// Drains the event log.
    pub fn take_events(&mut self) -> Vec<WalkEvent> {
        std::mem::take(&mut self.events)
    }

    /// Returns the findings reported by checks so far.
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Drains the findings.
    pub fn take_findings(&mut self) -> Vec<Finding> {
        std::mem::take(&mut self.findings)
    }

    /// Returns the number of nodes dequeued by the last walk.
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Builds the entry state: every parameter holds a fresh symbolic value,
    /// so no locally-scoped read can ever find nothing.
    fn initial_state(&mut self) -> ProgramState {
        let symbols = self.symbols;
        let mut state = ProgramState::new();
        for (var, _) in symbols.parameters() {
            let value = self.values.fresh();
            state = state.set_value(var, value);
        }
        state
    }

    /// Runs checks and the built-in effect for one instruction, then enqueues
    /// the next point in the block.
    fn visit_instruction(
        &mut self,
        point: ProgramPoint,
        instruction: &Instruction,
        state: ProgramState,
    ) {
        let symbols = self.symbols;
        let mut current = state;

        for check in self.checks.iter_mut() {
            let name = check.name();
            let mut ctx = CheckContext::new(symbols, name, &mut self.findings);
            match check.process_instruction(&mut ctx, instruction, point, &current) {
                Some(next) => current = next,
                None => {
                    trace!("path at {point:?} dropped by check `{name}`");
                    return;
                }
            }
        }

        let next = self.apply_effect(instruction, current);
        self.events.push(WalkEvent::InstructionProcessed { point });
        self.enqueue(
            ProgramPoint {
                block: point.block,
                offset: point.offset + 1,
            },
            next,
        );
    }

    /// Applies the built-in symbolic effect of one instruction.
    fn apply_effect(&mut self, instruction: &Instruction, state: ProgramState) -> ProgramState {
        match instruction {
            Instruction::Declaration {
                target,
                initializer,
            } => {
                let (state, value) = match initializer {
                    Some(operand) => self.operand_value(state, *target, *operand),
                    None => {
                        let value = self.values.fresh();
                        (state, value)
                    }
                };
                state.set_value(*target, value)
            }

            Instruction::Assignment { target, source } => {
                if !self.symbols.is_locally_scoped(*target) {
                    return state;
                }
                let (state, value) = self.operand_value(state, *target, *source);
                state.set_value(*target, value)
            }

            // Conservative invalidation: whatever was known about the old
            // value no longer applies.
            Instruction::CompoundAssignment { target }
            | Instruction::IncrementDecrement { target }
            | Instruction::RefOrOutArgument { target } => {
                if self.symbols.is_locally_scoped(*target) {
                    let value = self.values.fresh();
                    state.set_value(*target, value)
                } else {
                    state
                }
            }

            Instruction::MemberAccess { .. } | Instruction::Other => state,
        }
    }

    /// Derives the symbolic value an initializer or assignment source gives
    /// its target, attaching constant-derived constraints where possible.
    fn operand_value(
        &mut self,
        state: ProgramState,
        target: VarId,
        operand: Operand,
    ) -> (ProgramState, SymbolicValue) {
        match operand {
            Operand::Variable(source) => match state.value_of(source) {
                Some(value) => (state, value),
                None => {
                    let value = self.values.fresh();
                    (state, value)
                }
            },

            Operand::Constant(Constant::Bool(literal)) => {
                let value = if literal {
                    SymbolicValue::TRUE
                } else {
                    SymbolicValue::FALSE
                };
                let constraint = if literal {
                    Constraint::TRUE
                } else {
                    Constraint::FALSE
                };
                match state.try_set_constraint(value, &constraint) {
                    Some(next) => (next, value),
                    None => {
                        let value = self.values.fresh();
                        (state, value)
                    }
                }
            }

            Operand::Constant(Constant::Null) => {
                let nullable = self
                    .symbols
                    .get(target)
                    .is_none_or(|s| s.type_category.is_nullable());
                if nullable {
                    match state.try_set_constraint(SymbolicValue::NULL, &Constraint::NULL) {
                        Some(next) => (next, SymbolicValue::NULL),
                        None => {
                            let value = self.values.fresh();
                            (state, value)
                        }
                    }
                } else {
                    // A null literal flowing into a non-nullable value type
                    // cannot happen at runtime; track a fresh not-null value.
                    let value = self.values.fresh();
                    match state.try_set_constraint(value, &Constraint::NOT_NULL) {
                        Some(next) => (next, value),
                        None => (state, value),
                    }
                }
            }

            Operand::Constant(Constant::Int(literal)) => {
                let value = self.values.fresh();
                match state.try_set_constraint(value, &Constraint::exact(literal)) {
                    Some(next) => (next, value),
                    None => (state, value),
                }
            }

            Operand::Unknown => {
                let value = self.values.fresh();
                (state, value)
            }
        }
    }

    /// Splits or forwards the state at a branch block, by condition shape.
    fn visit_branch(
        &mut self,
        block: BlockId,
        condition: BranchCondition,
        true_successor: BlockId,
        false_successor: BlockId,
        state: ProgramState,
    ) -> Result<()> {
        match condition {
            BranchCondition::BooleanLiteral(value) => {
                let successor = if value { true_successor } else { false_successor };
                self.events.push(WalkEvent::ConditionEvaluated { block, value });
                let cleaned = self.cleaned(&state, block);
                self.enqueue(
                    ProgramPoint {
                        block: successor,
                        offset: 0,
                    },
                    cleaned,
                );
            }

            BranchCondition::BooleanVariable(var) => {
                if !self.symbols.is_locally_scoped(var) {
                    self.explore_both(block, true_successor, false_successor, state);
                    return Ok(());
                }
                let value = self.condition_value(&state, var, block)?;
                self.split(
                    block,
                    value,
                    &Constraint::TRUE,
                    true_successor,
                    false_successor,
                    &state,
                );
            }

            BranchCondition::NullCheck { operand, negated } => {
                if !self.symbols.is_locally_scoped(operand) {
                    self.explore_both(block, true_successor, false_successor, state);
                    return Ok(());
                }
                let value = self.condition_value(&state, operand, block)?;
                let true_constraint = if negated {
                    Constraint::NOT_NULL
                } else {
                    Constraint::NULL
                };
                self.split(
                    block,
                    value,
                    &true_constraint,
                    true_successor,
                    false_successor,
                    &state,
                );
            }

            BranchCondition::HasValue(var) => {
                if !self.symbols.is_locally_scoped(var) {
                    self.explore_both(block, true_successor, false_successor, state);
                    return Ok(());
                }
                let value = self.condition_value(&state, var, block)?;
                self.split(
                    block,
                    value,
                    &Constraint::NOT_NULL,
                    true_successor,
                    false_successor,
                    &state,
                );
            }

            BranchCondition::IterationBinding(var) => {
                let state = if self.symbols.is_locally_scoped(var) {
                    let value = self.values.fresh();
                    state.set_value(var, value)
                } else {
                    state
                };
                self.explore_both(block, true_successor, false_successor, state);
            }

            BranchCondition::Opaque => {
                self.explore_both(block, true_successor, false_successor, state);
            }
        }
        Ok(())
    }

    /// Enqueues each successor whose required constraint is consistent with
    /// the state; the false successor gets the negated constraint.
    fn split(
        &mut self,
        block: BlockId,
        value: SymbolicValue,
        true_constraint: &Constraint,
        true_successor: BlockId,
        false_successor: BlockId,
        state: &ProgramState,
    ) {
        for (successor, constraint, taken) in [
            (true_successor, true_constraint.clone(), true),
            (false_successor, true_constraint.negated(), false),
        ] {
            match state.try_set_constraint(value, &constraint) {
                Some(next) => {
                    self.events
                        .push(WalkEvent::ConditionEvaluated { block, value: taken });
                    let cleaned = self.cleaned(&next, block);
                    self.enqueue(
                        ProgramPoint {
                            block: successor,
                            offset: 0,
                        },
                        cleaned,
                    );
                }
                None => trace!("{taken} successor of {block:?} infeasible"),
            }
        }
    }

    /// Enqueues both successors with the same unconstrained state; the
    /// precision fallback for condition shapes the engine does not model.
    fn explore_both(
        &mut self,
        block: BlockId,
        true_successor: BlockId,
        false_successor: BlockId,
        state: ProgramState,
    ) {
        let cleaned = self.cleaned(&state, block);
        for (successor, value) in [(true_successor, true), (false_successor, false)] {
            self.events.push(WalkEvent::ConditionEvaluated { block, value });
            self.enqueue(
                ProgramPoint {
                    block: successor,
                    offset: 0,
                },
                cleaned.clone(),
            );
        }
    }

    /// Looks up the symbolic value a recognized condition reads.
    ///
    /// A locally-scoped variable with no value at a branch is an engine
    /// bookkeeping bug and aborts the walk.
    fn condition_value(
        &self,
        state: &ProgramState,
        var: VarId,
        block: BlockId,
    ) -> Result<SymbolicValue> {
        state.value_of(var).ok_or_else(|| Error::MissingSymbolicValue {
            name: self
                .symbols
                .get(var)
                .map_or_else(|| format!("{var:?}"), |s| s.name.clone()),
            block,
        })
    }

    /// Drops dead variables before handing a state to successor blocks.
    ///
    /// Keeps the block's live-out set plus by-reference parameters, whose
    /// final values stay observable at exit regardless of liveness.
    fn cleaned(&self, state: &ProgramState, block: BlockId) -> ProgramState {
        let mut keep = self.liveness.live_out(block).clone();
        for (var, symbol) in self.symbols.parameters() {
            if symbol.is_by_ref_parameter() {
                keep.insert(var);
            }
        }
        state.clean(&keep)
    }

    /// Enqueues a node unless a bound or the dedup set rules it out.
    fn enqueue(&mut self, point: ProgramPoint, state: ProgramState) {
        let id = self.points.id(point);

        if state.visit_count(id) >= self.limits.max_point_visits {
            trace!("visit limit hit at {point:?}");
            self.events.push(WalkEvent::VisitLimitExceeded { point });
            return;
        }

        let node = ExplodedNode::new(id, state.add_visit(id));
        if !self.seen.contains(&node) {
            self.seen.insert(node.clone());
            self.worklist.push_back(node);
        }
    }
}
