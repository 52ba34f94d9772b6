//! Symbolic value identities.
//!
//! A symbolic value is not a concrete value: it is an opaque identity for
//! "whatever this expression evaluated to" along one path. Facts about it
//! live in the [`ProgramState`](crate::engine::ProgramState), keyed by this
//! identity. Equality is identity equality, except that the three canonical
//! constants `TRUE`, `FALSE`, and `NULL` are singleton-shared: every `true`
//! literal in a walk denotes the same symbolic value.

use std::fmt;

/// An opaque identity for the value of some expression along one path.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolicValue(u32);

impl SymbolicValue {
    /// The singleton value of the `true` literal.
    pub const TRUE: Self = Self(0);
    /// The singleton value of the `false` literal.
    pub const FALSE: Self = Self(1);
    /// The singleton value of the `null` literal.
    pub const NULL: Self = Self(2);

    const FIRST_FRESH: u32 = 3;
}

impl fmt::Debug for SymbolicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::TRUE => write!(f, "sv:true"),
            Self::FALSE => write!(f, "sv:false"),
            Self::NULL => write!(f, "sv:null"),
            Self(n) => write!(f, "sv{n}"),
        }
    }
}

/// Mints fresh symbolic values for one walk.
///
/// Each walk owns its own factory; identities are never shared across walks.
#[derive(Debug, Clone)]
pub struct ValueFactory {
    next: u32,
}

impl ValueFactory {
    /// Creates a factory whose first value follows the canonical singletons.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: SymbolicValue::FIRST_FRESH,
        }
    }

    /// Mints a symbolic value distinct from all previously minted ones.
    pub fn fresh(&mut self) -> SymbolicValue {
        let value = SymbolicValue(self.next);
        self.next += 1;
        value
    }
}

impl Default for ValueFactory {
    fn default() -> Self {
        Self::new()
    }
}
