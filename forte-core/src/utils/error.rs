use codespan_reporting::files;
use termcolor::Buffer;
use thiserror::Error;

use crate::environment::prelude::ValueType;
use super::report::{pretty_string, Level, Report};

/// Failure that is not a user diagnostic.
///
/// Runtime errors stop an evaluation that bound cleanly. Internal errors
/// mean an earlier stage broke its own guarantees and are never shown as
/// if the user made a mistake (see [`Error::is_internal`]).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("attempt to divide by zero")]
    DivideByZero,
    #[error("evaluation was interrupted")]
    Interrupted,
    #[error("IO operation failed")]
    StdIo {
        err: std::io::ErrorKind
    },
    /// The evaluator read a variable the store never received.
    #[error("variable `{name}` was read before it was assigned")]
    UnassignedVariable {
        name: String
    },
    /// An operator received a value of a type the binder ruled out.
    #[error("expected a value of type {expected}, found {found}")]
    OperandType {
        expected: ValueType,
        found: ValueType
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::StdIo { err: err.kind() }
    }
}

impl Error {
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::UnassignedVariable { .. } | Error::OperandType { .. })
    }

    pub fn pretty_string(&self) -> String {
        pretty_string(|buf| self.pretty(buf))
    }

    pub fn pretty(&self, buf: &mut Buffer) -> Result<(), files::Error> {
        use std::io::Write;

        self.to_report().write(buf)?;
        writeln!(buf)?;

        Ok(())
    }

    pub fn to_report(&self) -> Report<'static> {
        let (title, text) = match self {
            Error::DivideByZero => ("Runtime error".to_string(), self.to_string()),
            Error::Interrupted => ("Interrupted".to_string(), self.to_string()),
            Error::StdIo { err } => ("Standard IO error".to_string(), format!("{err}")),
            Error::UnassignedVariable { .. }
            | Error::OperandType { .. } => ("Internal compiler error".to_string(), self.to_string()),
        };

        Report {
            title,
            text,
            level: if self.is_internal() { Level::Bug } else { Level::Error },
            location: None,
        }
    }
}
