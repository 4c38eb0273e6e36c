use std::fmt::Display;

use crate::lexer::prelude::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A required token was not found; the parser inserted a placeholder
    /// of the `expected` kind and carried on.
    ///
    /// ```text
    /// (1 + 2
    ///       ^ expected <CloseParenthesis>
    /// ```
    UnexpectedToken {
        found: TokenKind,
        expected: TokenKind,
    },
    /// Statements or expressions nested deeper than `limit`. The rest of the
    /// fragment is skipped.
    NestingTooDeep {
        limit: usize,
    },
}

impl ParseError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self {
            ParseError::UnexpectedToken { found: TokenKind::EndOfFile, expected } => (
                "Unexpected end of input",
                vec![match expected.as_literal() {
                    Some(literal) => format!("Hint: the fragment may be missing a `{literal}`."),
                    None => format!("Hint: the fragment may be missing a {expected}."),
                }]
            ),
            ParseError::UnexpectedToken { found, .. } => match found.as_literal() {
                Some(_) if found.is_keyword() => ("Unexpected keyword", vec![]),
                _ => ("Not expected this", vec![]),
            },
            ParseError::NestingTooDeep { .. } => (
                "Nesting too deep",
                vec!["Hint: split the fragment or introduce variables for inner parts.".to_string()]
            ),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnexpectedToken { found, expected } => {
                write!(f, "Unexpected token <{found}>, expected <{expected}>.")
            },
            ParseError::NestingTooDeep { limit } => {
                write!(f, "Statements and expressions may be nested at most {limit} levels deep.")
            }
        }
    }
}
