use std::fmt::Display;

use crate::{environment::prelude::Value, utils::prelude::TextSpan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Bad,
    Whitespace,
    EndOfFile,

    Number,
    Identifier,

    // Operators
    Plus, // +
    Minus, // -
    Star, // *
    Slash, // /
    Bang, // !
    Tilde, // ~
    AmpersandAmpersand, // &&
    PipePipe, // ||
    EqualsEquals, // ==
    BangEquals, // !=
    Less, // <
    LessEquals, // <=
    Greater, // >
    GreaterEquals, // >=
    Equals, // =

    // Delimiters
    OpenParenthesis,
    CloseParenthesis,
    OpenBrace,
    CloseBrace,

    // Keywords
    True,
    False,
    If,
    Else,
    While,
    For,
    To,
    Let,
    Var,
}

pub fn str_to_keyword(word: &str) -> Option<TokenKind> {
    Some(match word {
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "while" => TokenKind::While,
        "for" => TokenKind::For,
        "to" => TokenKind::To,
        "let" => TokenKind::Let,
        "var" => TokenKind::Var,
        _ => return None
    })
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::True
            | TokenKind::False
            | TokenKind::If
            | TokenKind::Else
            | TokenKind::While
            | TokenKind::For
            | TokenKind::To
            | TokenKind::Let
            | TokenKind::Var
        )
    }

    /// Tokens the parser never sees.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Bad)
    }

    /// Fixed source text of the kind, if it has one.
    pub fn as_literal(&self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Bang => "!",
            TokenKind::Tilde => "~",
            TokenKind::AmpersandAmpersand => "&&",
            TokenKind::PipePipe => "||",
            TokenKind::EqualsEquals => "==",
            TokenKind::BangEquals => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEquals => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEquals => ">=",
            TokenKind::Equals => "=",

            TokenKind::OpenParenthesis => "(",
            TokenKind::CloseParenthesis => ")",
            TokenKind::OpenBrace => "{",
            TokenKind::CloseBrace => "}",

            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::To => "to",
            TokenKind::Let => "let",
            TokenKind::Var => "var",

            TokenKind::Bad
            | TokenKind::Whitespace
            | TokenKind::EndOfFile
            | TokenKind::Number
            | TokenKind::Identifier => return None
        })
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: TextSpan,
    pub text: String,
    pub value: Option<Value>,
}

impl Token {
    pub fn new(kind: TokenKind, span: TextSpan, text: impl Into<String>, value: Option<Value>) -> Self {
        Self { kind, span, text: text.into(), value }
    }

    /// Zero-width placeholder the parser inserts where a required token is absent.
    pub fn missing(kind: TokenKind, position: usize) -> Self {
        Self::new(kind, TextSpan::new(position, 0), "", None)
    }

    pub fn is_missing(&self) -> bool {
        self.text.is_empty() && self.kind != TokenKind::EndOfFile
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} '{}' at {}", self.kind, self.text.escape_debug(), self.span)?;

        if let Some(value) = &self.value {
            write!(f, " = {value}")?;
        }

        Ok(())
    }
}
