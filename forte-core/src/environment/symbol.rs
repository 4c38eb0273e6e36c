use std::{fmt::Display, hash::Hash};

use super::value::ValueType;

/// Session-unique identity of a declared variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub fn next(self) -> Self {
        SymbolId(self.0 + 1)
    }
}

/// A declared variable. Two symbols are equal only when they come from the
/// same declaration, even if name and type match.
#[derive(Debug, Clone)]
pub struct VariableSymbol {
    pub id: SymbolId,
    pub name: String,
    pub is_read_only: bool,
    pub value_type: ValueType,
}

impl VariableSymbol {
    pub fn new(id: SymbolId, name: impl Into<String>, is_read_only: bool, value_type: ValueType) -> Self {
        Self {
            id,
            name: name.into(),
            is_read_only,
            value_type,
        }
    }
}

impl PartialEq for VariableSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for VariableSymbol {}

impl Hash for VariableSymbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for VariableSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.value_type)
    }
}
