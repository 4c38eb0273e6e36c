pub mod lexer;
pub mod parser;
pub mod environment;
pub mod binder;
pub mod eval;
pub mod compilation;
pub mod utils;
