use std::collections::HashMap;

use crate::environment::prelude::VariableSymbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(usize);

#[derive(Debug, Default)]
struct Scope {
    parent: Option<ScopeId>,
    variables: HashMap<String, VariableSymbol>,
}

/// Scopes of one bind, addressed by index. A scope only knows its parent.
#[derive(Debug, Default)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl ScopeArena {
    pub fn new() -> Self {
        Self { scopes: vec![] }
    }

    pub fn push(&mut self, parent: Option<ScopeId>) -> ScopeId {
        self.scopes.push(Scope { parent, variables: HashMap::new() });

        ScopeId(self.scopes.len() - 1)
    }

    /// Declares `variable` in `scope` itself. Fails if that scope already has the name.
    pub fn try_declare(&mut self, scope: ScopeId, variable: VariableSymbol) -> bool {
        let Some(scope) = self.scopes.get_mut(scope.0) else {
            return false;
        };

        if scope.variables.contains_key(&variable.name) {
            return false;
        }

        scope.variables.insert(variable.name.clone(), variable);
        true
    }

    /// Resolves `name` from `scope` outwards.
    pub fn try_lookup(&self, scope: ScopeId, name: &str) -> Option<&VariableSymbol> {
        let mut current = Some(scope);

        while let Some(id) = current {
            let scope = self.scopes.get(id.0)?;

            if let Some(variable) = scope.variables.get(name) {
                return Some(variable);
            }

            current = scope.parent;
        }

        None
    }

    /// Variables declared directly in `scope`, in declaration order.
    pub fn declared_variables(&self, scope: ScopeId) -> Vec<VariableSymbol> {
        let mut variables = self.scopes.get(scope.0)
            .map(|scope| scope.variables.values().cloned().collect::<Vec<_>>())
            .unwrap_or_default();

        variables.sort_by_key(|variable| variable.id);
        variables
    }
}
