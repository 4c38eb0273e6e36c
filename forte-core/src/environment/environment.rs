use std::collections::HashMap;

use super::prelude::{SymbolId, Value, VariableSymbol};

/// Runtime variable store, keyed by symbol identity. Outlives every scope chain
/// of the session it belongs to.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Environment {
    store: HashMap<VariableSymbol, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
        }
    }

    pub fn get(&self, variable: &VariableSymbol) -> Option<&Value> {
        self.store.get(variable)
    }

    pub fn set(&mut self, variable: VariableSymbol, value: Value) {
        self.store.insert(variable, value);
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Drops every variable whose id is `first` or later.
    pub fn forget_from(&mut self, first: SymbolId) {
        self.store.retain(|variable, _| variable.id < first);
    }
}
