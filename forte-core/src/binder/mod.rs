pub mod error;
pub mod operators;
pub mod bound_tree;
pub mod scope;
pub mod binder;

pub mod prelude {
    pub use super::{
        binder::*,
        bound_tree::*,
        error::*,
        operators::*,
        scope::*,
        bind_global_scope,
        BoundGlobalScope
    };
}

use std::rc::Rc;

use log::debug;

use crate::{
    environment::prelude::{SymbolId, VariableSymbol},
    parser::prelude::SyntaxTree,
    utils::prelude::{Diagnostic, DiagnosticBag},
};
use self::{binder::Binder, bound_tree::BoundStatement};

/// Result of binding one fragment on top of the fragments before it.
#[derive(Debug)]
pub struct BoundGlobalScope {
    pub previous: Option<Rc<BoundGlobalScope>>,
    /// Diagnostics of every fragment in the chain, oldest first.
    pub diagnostics: Vec<Diagnostic>,
    /// Variables this fragment declared at its top level.
    pub variables: Vec<VariableSymbol>,
    pub statement: BoundStatement,
    pub next_symbol: SymbolId,
}

pub fn bind_global_scope(previous: Option<Rc<BoundGlobalScope>>, tree: &SyntaxTree) -> BoundGlobalScope {
    let mut binder = Binder::new(tree.source.clone(), previous.as_deref());
    let statement = binder.bind_statement(&tree.root.statement);
    let (variables, next_symbol, bind_diagnostics) = binder.finish();

    let mut diagnostics = DiagnosticBag::new(tree.source.clone());
    diagnostics.extend(tree.diagnostics.iter().cloned());
    diagnostics.extend(bind_diagnostics);

    if let Some(previous) = &previous {
        diagnostics.prepend_all(previous.diagnostics.iter().cloned());
    }

    debug!(
        "bound {} ({} variables declared, {} diagnostics)",
        tree.source.name(), variables.len(), diagnostics.len()
    );

    BoundGlobalScope {
        previous,
        diagnostics: diagnostics.into_vec(),
        variables,
        statement,
        next_symbol,
    }
}
