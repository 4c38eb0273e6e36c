use std::sync::{atomic::AtomicBool, Arc};

use log::debug;

use crate::{
    environment::prelude::Environment,
    parser::prelude::SyntaxTree,
    utils::prelude::{Error, SourceText},
};
use super::{Compilation, EvaluationResult};

/// Everything one interactive session keeps between fragments: the variable
/// store and the last fragment that compiled and ran cleanly.
///
/// Fragments must be submitted one after another.
#[derive(Debug, Default)]
pub struct SessionState {
    environment: Environment,
    previous: Option<Compilation>,
    interrupt: Option<Arc<AtomicBool>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session whose loops stop with [`Error::Interrupted`] once `flag` is raised.
    pub fn with_interrupt(flag: Arc<AtomicBool>) -> Self {
        Self {
            interrupt: Some(flag),
            ..Self::default()
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn previous(&self) -> Option<&Compilation> {
        self.previous.as_ref()
    }

    pub fn submit(&mut self, text: &str) -> Result<EvaluationResult, Error> {
        self.submit_source(SourceText::from_text(text))
    }

    pub fn submit_source(&mut self, source: SourceText) -> Result<EvaluationResult, Error> {
        self.submit_tree(SyntaxTree::parse(source))
    }

    /// Compiles and runs one parsed fragment.
    ///
    /// The fragment becomes visible to later ones only if it produced no
    /// diagnostics and ran without error. On a runtime error the variables it
    /// declared are dropped from the store; writes to older variables remain.
    pub fn submit_tree(&mut self, tree: SyntaxTree) -> Result<EvaluationResult, Error> {
        let compilation = match &self.previous {
            Some(previous) => previous.continue_with(tree),
            None => Compilation::new(tree),
        };

        let first_new_symbol = self.previous.as_ref()
            .map(|previous| previous.global_scope().next_symbol)
            .unwrap_or_default();

        match compilation.evaluate_with_interrupt(&mut self.environment, self.interrupt.as_deref()) {
            Ok(result) => {
                if result.diagnostics.is_empty() {
                    debug!("committed {}", compilation.tree.source.name());
                    self.previous = Some(compilation);
                }

                Ok(result)
            },
            Err(err) => {
                debug!("evaluation of {} failed: {err}", compilation.tree.source.name());
                self.environment.forget_from(first_new_symbol);

                Err(err)
            }
        }
    }

    /// Forgets every variable and earlier fragment.
    pub fn reset(&mut self) {
        self.environment = Environment::new();
        self.previous = None;
    }
}

/// Submits `text` to `state`, or to a fresh session when `state` is `None`.
pub fn submit(text: &str, state: Option<SessionState>) -> (Result<EvaluationResult, Error>, SessionState) {
    let mut state = state.unwrap_or_default();
    let result = state.submit(text);

    (result, state)
}
