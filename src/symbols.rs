//! Variable identities and the semantic oracle the engine consults.
//!
//! The engine does not resolve identifiers itself; that is the job of the front
//! end that builds the control flow graph. Instead, every identifier occurrence
//! arrives already resolved to a [`VarId`], and the [`SymbolTable`] answers the
//! semantic questions the walker needs: is this variable locally scoped, is it a
//! parameter, can its type hold `null`?
//!
//! # Design Rationale
//!
//! Variables are identified by a dense index into the symbol table, mirroring
//! how SSA variable tables index their variables: O(1) lookup, no semantic
//! information in the handle itself.

use std::fmt;

/// Unique identifier for a variable or parameter within one analyzed declaration.
///
/// This is a lightweight handle into the [`SymbolTable`]. It is unique within a
/// single declaration's analysis but not globally unique.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    /// Creates a new variable identifier.
    ///
    /// # Arguments
    ///
    /// * `index` - The index into the symbol table
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the index into the symbol table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// The declaration kind of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// A local variable declared inside the analyzed declaration.
    Local,
    /// A parameter of the analyzed declaration.
    Parameter {
        /// `true` for by-reference / output parameters, whose final value is
        /// observable by the caller and must survive state cleaning.
        by_ref: bool,
    },
}

/// A coarse classification of a symbol's declared type.
///
/// This is all the type information the engine needs: whether `null` is a
/// possible value, and whether the canonical boolean constants apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    /// A reference type; `null` is a possible value.
    Reference,
    /// A non-nullable value type; `null` is impossible.
    Value,
    /// A nullable wrapper over a value type; `null` is possible and the
    /// "has a value" probe applies.
    NullableValue,
    /// A boolean; the canonical `true`/`false` values apply.
    Boolean,
}

impl TypeCategory {
    /// Returns `true` if a value of this type can be `null`.
    #[must_use]
    pub const fn is_nullable(self) -> bool {
        matches!(self, Self::Reference | Self::NullableValue)
    }
}

/// A declared variable or parameter, as resolved by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// The declared name, used in findings and error messages.
    pub name: String,
    /// Local or parameter.
    pub kind: SymbolKind,
    /// Coarse type classification.
    pub type_category: TypeCategory,
    /// `true` if the symbol is declared within the analyzed declaration itself
    /// (not closed over from an enclosing scope). Only locally-scoped symbols
    /// are tracked by the engine.
    pub locally_scoped: bool,
}

impl Symbol {
    /// Creates a locally-scoped local variable symbol.
    ///
    /// # Arguments
    ///
    /// * `name` - The declared name
    /// * `type_category` - Coarse type classification
    #[must_use]
    pub fn local(name: impl Into<String>, type_category: TypeCategory) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Local,
            type_category,
            locally_scoped: true,
        }
    }

    /// Creates a parameter symbol.
    ///
    /// # Arguments
    ///
    /// * `name` - The declared name
    /// * `type_category` - Coarse type classification
    /// * `by_ref` - `true` for by-reference / output parameters
    #[must_use]
    pub fn parameter(name: impl Into<String>, type_category: TypeCategory, by_ref: bool) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Parameter { by_ref },
            type_category,
            locally_scoped: true,
        }
    }

    /// Creates a symbol closed over from an enclosing scope.
    ///
    /// Captured variables are never tracked: any path may observe writes the
    /// engine cannot see.
    #[must_use]
    pub fn captured(name: impl Into<String>, type_category: TypeCategory) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Local,
            type_category,
            locally_scoped: false,
        }
    }

    /// Returns `true` if this symbol is a parameter.
    #[must_use]
    pub const fn is_parameter(&self) -> bool {
        matches!(self.kind, SymbolKind::Parameter { .. })
    }

    /// Returns `true` if this symbol is a by-reference / output parameter.
    #[must_use]
    pub const fn is_by_ref_parameter(&self) -> bool {
        matches!(self.kind, SymbolKind::Parameter { by_ref: true })
    }
}

/// The resolved symbols of one analyzed declaration.
///
/// Stands in for the semantic-resolution service: the front end declares every
/// variable and parameter up front, and the walker queries this table for
/// scoping and type facts during the walk.
///
/// # Example
///
/// ```rust
/// use symflow::symbols::{Symbol, SymbolTable, TypeCategory};
///
/// let mut symbols = SymbolTable::new();
/// let x = symbols.declare(Symbol::parameter("x", TypeCategory::Reference, false));
/// let b = symbols.declare(Symbol::local("b", TypeCategory::Boolean));
/// assert_ne!(x, b);
/// assert!(symbols.get(x).unwrap().is_parameter());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    /// Creates an empty symbol table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a symbol and returns its identifier.
    pub fn declare(&mut self, symbol: Symbol) -> VarId {
        let id = VarId::new(self.symbols.len());
        self.symbols.push(symbol);
        id
    }

    /// Returns the symbol for an identifier, if declared.
    #[must_use]
    pub fn get(&self, var: VarId) -> Option<&Symbol> {
        self.symbols.get(var.index())
    }

    /// Returns `true` if the identifier names a locally-scoped symbol.
    ///
    /// Unknown identifiers are treated as not locally scoped, so the walker
    /// conservatively refuses to track them.
    #[must_use]
    pub fn is_locally_scoped(&self, var: VarId) -> bool {
        self.get(var).is_some_and(|s| s.locally_scoped)
    }

    /// Returns the number of declared symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` if no symbols are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterates over all declared parameters.
    pub fn parameters(&self) -> impl Iterator<Item = (VarId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_parameter())
            .map(|(i, s)| (VarId::new(i), s))
    }

    /// Iterates over all declared symbols.
    pub fn iter(&self) -> impl Iterator<Item = (VarId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (VarId::new(i), s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_lookup() {
        let mut table = SymbolTable::new();
        let x = table.declare(Symbol::parameter("x", TypeCategory::Reference, false));
        let n = table.declare(Symbol::local("n", TypeCategory::NullableValue));

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(x).unwrap().name, "x");
        assert_eq!(table.get(n).unwrap().type_category, TypeCategory::NullableValue);
        assert!(table.get(VarId::new(7)).is_none());
    }

    #[test]
    fn test_locally_scoped() {
        let mut table = SymbolTable::new();
        let local = table.declare(Symbol::local("a", TypeCategory::Value));
        let captured = table.declare(Symbol::captured("c", TypeCategory::Reference));

        assert!(table.is_locally_scoped(local));
        assert!(!table.is_locally_scoped(captured));
        assert!(!table.is_locally_scoped(VarId::new(99)));
    }

    #[test]
    fn test_parameters_iterator() {
        let mut table = SymbolTable::new();
        table.declare(Symbol::local("a", TypeCategory::Value));
        let p = table.declare(Symbol::parameter("out", TypeCategory::Value, true));

        let params: Vec<_> = table.parameters().collect();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].0, p);
        assert!(params[0].1.is_by_ref_parameter());
    }

    #[test]
    fn test_nullability() {
        assert!(TypeCategory::Reference.is_nullable());
        assert!(TypeCategory::NullableValue.is_nullable());
        assert!(!TypeCategory::Value.is_nullable());
        assert!(!TypeCategory::Boolean.is_nullable());
    }
}
