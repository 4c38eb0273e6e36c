pub mod text_span;
pub mod source_text;
pub mod diagnostic;
pub mod error;
pub mod report;

pub mod prelude {
    pub use super::{
        text_span::*,
        source_text::*,
        diagnostic::*,
        error::*,
        report::*
    };
}
