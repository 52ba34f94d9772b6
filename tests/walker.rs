//! Walk integration tests.
//!
//! These tests exercise the complete pipeline through the public API:
//! 1. Declare symbols and build a control flow graph
//! 2. Run a walk, optionally with checks registered
//! 3. Verify termination, the event log, and reported findings

use symflow::prelude::*;

/// A two-block graph whose entry loops back to itself.
fn self_loop_cfg() -> ControlFlowGraph {
    let blocks = vec![
        Block::jump(vec![BlockId::new(0)]).with_instructions(vec![Instruction::Other]),
        Block::exit(),
    ];
    ControlFlowGraph::new(blocks, BlockId::new(0)).unwrap()
}

fn exit_count(events: &[WalkEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, WalkEvent::ExitReached { .. }))
        .count()
}

fn conditions_taken(events: &[WalkEvent]) -> Vec<bool> {
    events
        .iter()
        .filter_map(|e| match e {
            WalkEvent::ConditionEvaluated { value, .. } => Some(*value),
            _ => None,
        })
        .collect()
}

#[test_log::test]
fn test_null_check_splits_paths() {
    // if (p == null) { b1 } else { b2 }
    let mut symbols = SymbolTable::new();
    let p = symbols.declare(Symbol::parameter("p", TypeCategory::Reference, false));

    let blocks = vec![
        Block::branch(
            BranchCondition::NullCheck {
                operand: p,
                negated: false,
            },
            BlockId::new(1),
            BlockId::new(2),
        ),
        Block::exit(),
        Block::exit(),
    ];
    let cfg = ControlFlowGraph::new(blocks, BlockId::new(0)).unwrap();
    let liveness = LiveVariableMap::all_live(cfg.block_count(), [p]);

    let mut graph = ExplodedGraph::new(&cfg, &symbols, &liveness);
    assert_eq!(graph.walk().unwrap(), Termination::Completed);

    // An unconstrained parameter supports both outcomes.
    assert_eq!(conditions_taken(graph.events()), vec![true, false]);
    assert_eq!(exit_count(graph.events()), 2);
}

#[test_log::test]
fn test_contradicted_branch_is_pruned() {
    // string s = null; if (s == null) { b1 } else { b2 }
    // The else branch contradicts the initializer and must not be explored.
    let mut symbols = SymbolTable::new();
    let s = symbols.declare(Symbol::local("s", TypeCategory::Reference));

    let blocks = vec![
        Block::branch(
            BranchCondition::NullCheck {
                operand: s,
                negated: false,
            },
            BlockId::new(1),
            BlockId::new(2),
        )
        .with_instructions(vec![Instruction::Declaration {
            target: s,
            initializer: Some(Operand::Constant(Constant::Null)),
        }]),
        Block::exit(),
        Block::exit(),
    ];
    let cfg = ControlFlowGraph::new(blocks, BlockId::new(0)).unwrap();
    let liveness = LiveVariableMap::all_live(cfg.block_count(), [s]);

    let mut graph = ExplodedGraph::new(&cfg, &symbols, &liveness);
    assert_eq!(graph.walk().unwrap(), Termination::Completed);

    assert_eq!(conditions_taken(graph.events()), vec![true]);
    assert_eq!(exit_count(graph.events()), 1);
}

#[test_log::test]
fn test_boolean_literal_takes_one_successor() {
    let symbols = SymbolTable::new();

    let blocks = vec![
        Block::branch(
            BranchCondition::BooleanLiteral(false),
            BlockId::new(1),
            BlockId::new(2),
        ),
        Block::exit(),
        Block::exit(),
    ];
    let cfg = ControlFlowGraph::new(blocks, BlockId::new(0)).unwrap();
    let liveness = LiveVariableMap::new(cfg.block_count());

    let mut graph = ExplodedGraph::new(&cfg, &symbols, &liveness);
    assert_eq!(graph.walk().unwrap(), Termination::Completed);

    assert_eq!(conditions_taken(graph.events()), vec![false]);
    assert_eq!(exit_count(graph.events()), 1);
}

#[test_log::test]
fn test_has_value_on_null_initializer_takes_false_arm() {
    // int? n = null; if (n.HasValue) { b1 } else { b2 }
    let mut symbols = SymbolTable::new();
    let n = symbols.declare(Symbol::local("n", TypeCategory::NullableValue));

    let blocks = vec![
        Block::branch(
            BranchCondition::HasValue(n),
            BlockId::new(1),
            BlockId::new(2),
        )
        .with_instructions(vec![Instruction::Declaration {
            target: n,
            initializer: Some(Operand::Constant(Constant::Null)),
        }]),
        Block::exit(),
        Block::exit(),
    ];
    let cfg = ControlFlowGraph::new(blocks, BlockId::new(0)).unwrap();
    let liveness = LiveVariableMap::all_live(cfg.block_count(), [n]);

    let mut graph = ExplodedGraph::new(&cfg, &symbols, &liveness);
    assert_eq!(graph.walk().unwrap(), Termination::Completed);

    assert_eq!(conditions_taken(graph.events()), vec![false]);
}

#[test_log::test]
fn test_iteration_binding_rebinds_and_explores_both() {
    // foreach (var x in ...) { } with the binding as the loop condition.
    let mut symbols = SymbolTable::new();
    let x = symbols.declare(Symbol::local("x", TypeCategory::Reference));

    let blocks = vec![
        Block::branch(
            BranchCondition::IterationBinding(x),
            BlockId::new(1),
            BlockId::new(2),
        ),
        Block::jump(vec![BlockId::new(0)]),
        Block::exit(),
    ];
    let cfg = ControlFlowGraph::new(blocks, BlockId::new(0)).unwrap();
    let liveness = LiveVariableMap::all_live(cfg.block_count(), [x]);

    let mut graph = ExplodedGraph::new(&cfg, &symbols, &liveness);
    assert_eq!(graph.walk().unwrap(), Termination::Completed);
    assert!(exit_count(graph.events()) >= 1);
}

#[test_log::test]
fn test_self_loop_terminates_via_visit_bound() {
    let cfg = self_loop_cfg();
    let symbols = SymbolTable::new();
    let liveness = LiveVariableMap::new(cfg.block_count());

    let mut graph = ExplodedGraph::new(&cfg, &symbols, &liveness);
    assert_eq!(graph.walk().unwrap(), Termination::Completed);

    assert!(graph
        .events()
        .iter()
        .any(|e| matches!(e, WalkEvent::VisitLimitExceeded { .. })));
    assert_eq!(graph.events().last(), Some(&WalkEvent::ExplorationEnded));
}

#[test_log::test]
fn test_step_bound_aborts_walk() {
    let cfg = self_loop_cfg();
    let symbols = SymbolTable::new();
    let liveness = LiveVariableMap::new(cfg.block_count());

    // A visit bound loose enough that the step bound trips first.
    let limits = WalkLimits {
        max_steps: 3,
        max_point_visits: 100,
    };
    let mut graph = ExplodedGraph::new(&cfg, &symbols, &liveness).with_limits(limits);

    assert_eq!(graph.walk().unwrap(), Termination::MaxStepsReached);
    assert_eq!(graph.events().last(), Some(&WalkEvent::MaxStepsReached));
}

#[test_log::test]
fn test_identical_successor_states_merge() {
    // Both arms of an unrecognized condition reach b1 with the same cleaned
    // state, so b1's instruction is processed exactly once.
    let symbols = SymbolTable::new();

    let blocks = vec![
        Block::branch(
            BranchCondition::Opaque,
            BlockId::new(1),
            BlockId::new(1),
        ),
        Block::jump(vec![BlockId::new(2)]).with_instructions(vec![Instruction::Other]),
        Block::exit(),
    ];
    let cfg = ControlFlowGraph::new(blocks, BlockId::new(0)).unwrap();
    let liveness = LiveVariableMap::new(cfg.block_count());

    let mut graph = ExplodedGraph::new(&cfg, &symbols, &liveness);
    assert_eq!(graph.walk().unwrap(), Termination::Completed);

    let processed = graph
        .events()
        .iter()
        .filter(|e| matches!(e, WalkEvent::InstructionProcessed { .. }))
        .count();
    assert_eq!(processed, 1);
    assert_eq!(exit_count(graph.events()), 1);
}

#[test_log::test]
fn test_dead_variable_states_merge_after_cleaning() {
    // Branching on a dead flag leaves two states that differ only in the
    // flag's constraint; cleaning drops it and the paths collapse into one.
    let mut symbols = SymbolTable::new();
    let flag = symbols.declare(Symbol::parameter("flag", TypeCategory::Boolean, false));

    let blocks = vec![
        Block::branch(
            BranchCondition::BooleanVariable(flag),
            BlockId::new(1),
            BlockId::new(1),
        ),
        Block::jump(vec![BlockId::new(2)]).with_instructions(vec![Instruction::Other]),
        Block::exit(),
    ];
    let cfg = ControlFlowGraph::new(blocks, BlockId::new(0)).unwrap();
    // Nothing is live anywhere, so `flag` dies at the branch.
    let liveness = LiveVariableMap::new(cfg.block_count());

    let mut graph = ExplodedGraph::new(&cfg, &symbols, &liveness);
    assert_eq!(graph.walk().unwrap(), Termination::Completed);

    let processed = graph
        .events()
        .iter()
        .filter(|e| matches!(e, WalkEvent::InstructionProcessed { .. }))
        .count();
    assert_eq!(processed, 1);
}

#[test_log::test]
fn test_null_dereference_reported_on_feasible_path_only() {
    // string s = flag ? null : "";
    // s.Length;
    let mut symbols = SymbolTable::new();
    let flag = symbols.declare(Symbol::parameter("flag", TypeCategory::Boolean, false));
    let s = symbols.declare(Symbol::local("s", TypeCategory::Reference));

    let blocks = vec![
        Block::branch(
            BranchCondition::BooleanVariable(flag),
            BlockId::new(1),
            BlockId::new(2),
        ),
        Block::jump(vec![BlockId::new(3)]).with_instructions(vec![Instruction::Declaration {
            target: s,
            initializer: Some(Operand::Constant(Constant::Null)),
        }]),
        Block::jump(vec![BlockId::new(3)]).with_instructions(vec![Instruction::Declaration {
            target: s,
            initializer: Some(Operand::Unknown),
        }]),
        Block::jump(vec![BlockId::new(4)])
            .with_instructions(vec![Instruction::MemberAccess { receiver: s }]),
        Block::exit(),
    ];
    let cfg = ControlFlowGraph::new(blocks, BlockId::new(0)).unwrap();
    let liveness = LiveVariableMap::all_live(cfg.block_count(), [s]);

    let mut graph = ExplodedGraph::new(&cfg, &symbols, &liveness)
        .with_check(Box::new(NullDereferenceCheck::new()));
    assert_eq!(graph.walk().unwrap(), Termination::Completed);

    let findings = graph.take_findings();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].check, "null-dereference");
    assert!(findings[0].message.contains("`s`"));

    // The null path was condemned at the dereference; only the other path
    // reached the exit.
    assert_eq!(exit_count(graph.events()), 1);
}

#[test_log::test]
fn test_dereference_refines_later_null_check() {
    // p.Length; if (p == null) { b2 } else { b3 }
    // After the dereference, the null arm is infeasible.
    let mut symbols = SymbolTable::new();
    let p = symbols.declare(Symbol::parameter("p", TypeCategory::Reference, false));

    let blocks = vec![
        Block::jump(vec![BlockId::new(1)])
            .with_instructions(vec![Instruction::MemberAccess { receiver: p }]),
        Block::branch(
            BranchCondition::NullCheck {
                operand: p,
                negated: false,
            },
            BlockId::new(2),
            BlockId::new(3),
        ),
        Block::exit(),
        Block::exit(),
    ];
    let cfg = ControlFlowGraph::new(blocks, BlockId::new(0)).unwrap();
    let liveness = LiveVariableMap::all_live(cfg.block_count(), [p]);

    let mut graph = ExplodedGraph::new(&cfg, &symbols, &liveness)
        .with_check(Box::new(NullDereferenceCheck::new()));
    assert_eq!(graph.walk().unwrap(), Termination::Completed);

    assert!(graph.take_findings().is_empty());
    assert_eq!(conditions_taken(graph.events()), vec![false]);
}

#[test_log::test]
fn test_check_veto_drops_path() {
    struct VetoEverything;

    impl ExplodedGraphCheck for VetoEverything {
        fn name(&self) -> &'static str {
            "veto-everything"
        }

        fn process_instruction(
            &mut self,
            _ctx: &mut CheckContext<'_>,
            _instruction: &Instruction,
            _point: ProgramPoint,
            _state: &ProgramState,
        ) -> Option<ProgramState> {
            None
        }
    }

    let symbols = SymbolTable::new();
    let blocks = vec![
        Block::jump(vec![BlockId::new(1)]).with_instructions(vec![Instruction::Other]),
        Block::exit(),
    ];
    let cfg = ControlFlowGraph::new(blocks, BlockId::new(0)).unwrap();
    let liveness = LiveVariableMap::new(cfg.block_count());

    let mut graph =
        ExplodedGraph::new(&cfg, &symbols, &liveness).with_check(Box::new(VetoEverything));
    assert_eq!(graph.walk().unwrap(), Termination::Completed);

    // The only path died at the first instruction.
    assert_eq!(exit_count(graph.events()), 0);
    assert!(!graph
        .events()
        .iter()
        .any(|e| matches!(e, WalkEvent::InstructionProcessed { .. })));
}

#[test_log::test]
fn test_compound_assignment_invalidates_constraints() {
    // int i = 0; i += ...; if (i == ...) both arms stay reachable because the
    // compound assignment gave `i` a fresh unconstrained value.
    let mut symbols = SymbolTable::new();
    let b = symbols.declare(Symbol::local("b", TypeCategory::Boolean));

    let blocks = vec![
        Block::branch(
            BranchCondition::BooleanVariable(b),
            BlockId::new(1),
            BlockId::new(2),
        )
        .with_instructions(vec![
            Instruction::Declaration {
                target: b,
                initializer: Some(Operand::Constant(Constant::Bool(true))),
            },
            Instruction::CompoundAssignment { target: b },
        ]),
        Block::exit(),
        Block::exit(),
    ];
    let cfg = ControlFlowGraph::new(blocks, BlockId::new(0)).unwrap();
    let liveness = LiveVariableMap::all_live(cfg.block_count(), [b]);

    let mut graph = ExplodedGraph::new(&cfg, &symbols, &liveness);
    assert_eq!(graph.walk().unwrap(), Termination::Completed);

    assert_eq!(conditions_taken(graph.events()), vec![true, false]);
}

#[test_log::test]
fn test_boolean_initializer_fixes_branch_outcome() {
    // bool b = true; if (b) { b1 } else { b2 }
    let mut symbols = SymbolTable::new();
    let b = symbols.declare(Symbol::local("b", TypeCategory::Boolean));

    let blocks = vec![
        Block::branch(
            BranchCondition::BooleanVariable(b),
            BlockId::new(1),
            BlockId::new(2),
        )
        .with_instructions(vec![Instruction::Declaration {
            target: b,
            initializer: Some(Operand::Constant(Constant::Bool(true))),
        }]),
        Block::exit(),
        Block::exit(),
    ];
    let cfg = ControlFlowGraph::new(blocks, BlockId::new(0)).unwrap();
    let liveness = LiveVariableMap::all_live(cfg.block_count(), [b]);

    let mut graph = ExplodedGraph::new(&cfg, &symbols, &liveness);
    assert_eq!(graph.walk().unwrap(), Termination::Completed);

    assert_eq!(conditions_taken(graph.events()), vec![true]);
    assert_eq!(exit_count(graph.events()), 1);
}
