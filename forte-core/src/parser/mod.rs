pub mod error;
pub mod parser;
pub mod ast;
pub mod syntax_node;

pub mod prelude {
    pub use super::{
        error::*,
        parser::*,
        ast::*,
        syntax_node::*
    };
}

#[cfg(test)]
mod tests;
