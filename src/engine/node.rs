//! Worklist nodes.

use crate::engine::{PointId, ProgramState};

/// One unit of exploration work: a program point paired with the state that
/// reached it.
///
/// Equality is the conjunction of both components; the walker keeps every
/// node it has ever enqueued in a set, so an identical `(point, state)` pair
/// is never processed twice - an exact revisit cannot produce new
/// information.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExplodedNode {
    /// The interned program point.
    pub point: PointId,
    /// The state that reached the point.
    pub state: ProgramState,
}

impl ExplodedNode {
    /// Creates a node.
    #[must_use]
    pub const fn new(point: PointId, state: ProgramState) -> Self {
        Self { point, state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::ValueFactory, symbols::VarId};

    #[test]
    fn test_node_equality_is_point_and_state() {
        let mut factory = ValueFactory::new();
        let sv = factory.fresh();

        let a = ExplodedNode::new(PointId::from_raw(0), ProgramState::new());
        let b = ExplodedNode::new(PointId::from_raw(0), ProgramState::new());
        assert_eq!(a, b);

        let other_point = ExplodedNode::new(PointId::from_raw(1), ProgramState::new());
        assert_ne!(a, other_point);

        let other_state = ExplodedNode::new(
            PointId::from_raw(0),
            ProgramState::new().set_value(VarId::new(0), sv),
        );
        assert_ne!(a, other_state);
    }
}
