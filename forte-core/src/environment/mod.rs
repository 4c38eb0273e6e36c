pub mod environment;
pub mod symbol;
pub mod value;

pub mod prelude {
    pub use super::{
        environment::*,
        symbol::*,
        value::*
    };
}

#[cfg(test)]
mod tests;
