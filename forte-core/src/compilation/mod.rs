pub mod session;

pub mod prelude {
    pub use super::{
        session::*,
        Compilation,
        EvaluationResult
    };
}

use std::{rc::Rc, sync::atomic::AtomicBool};

use log::debug;

use crate::{
    binder::prelude::{bind_global_scope, BoundGlobalScope},
    environment::prelude::{Environment, Value},
    eval::eval,
    parser::prelude::SyntaxTree,
    utils::prelude::{Diagnostic, Error},
};

/// Outcome of evaluating a fragment that did not fail at runtime.
///
/// `value` is present only when `diagnostics` is empty and the fragment
/// ran at least one expression statement or declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub diagnostics: Vec<Diagnostic>,
    pub value: Option<Value>,
}

/// A parsed fragment bound on top of the fragments compiled before it.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub tree: SyntaxTree,
    global_scope: Rc<BoundGlobalScope>,
}

impl Compilation {
    pub fn new(tree: SyntaxTree) -> Self {
        Self::bind(None, tree)
    }

    /// Compiles `tree` so it sees every variable declared by `self` and its predecessors.
    pub fn continue_with(&self, tree: SyntaxTree) -> Self {
        Self::bind(Some(self.global_scope.clone()), tree)
    }

    fn bind(previous: Option<Rc<BoundGlobalScope>>, tree: SyntaxTree) -> Self {
        let global_scope = Rc::new(bind_global_scope(previous, &tree));

        Self { tree, global_scope }
    }

    pub fn global_scope(&self) -> &BoundGlobalScope {
        &self.global_scope
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.global_scope.diagnostics
    }

    pub fn evaluate(&self, env: &mut Environment) -> Result<EvaluationResult, Error> {
        self.evaluate_with_interrupt(env, None)
    }

    /// Evaluates only when binding produced no diagnostics.
    pub fn evaluate_with_interrupt(
        &self,
        env: &mut Environment,
        interrupt: Option<&AtomicBool>
    ) -> Result<EvaluationResult, Error> {
        let diagnostics = self.diagnostics().to_vec();

        if !diagnostics.is_empty() {
            debug!("skipping evaluation of {}: {} diagnostics", self.tree.source.name(), diagnostics.len());
            return Ok(EvaluationResult { diagnostics, value: None });
        }

        let value = eval(&self.global_scope.statement, env, interrupt)?;

        Ok(EvaluationResult { diagnostics, value })
    }
}

#[cfg(test)]
mod tests;
