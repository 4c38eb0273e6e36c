use log::debug;

use crate::{
    lexer::prelude::{Lexer, Token, TokenKind},
    utils::prelude::{Diagnostic, DiagnosticBag, SourceText, TextSpan},
};
use super::{ast::CompilationUnit, error::ParseError};

/// Grammar rule that always produces a node, reporting problems to the parser
/// instead of failing.
pub trait Parse
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser,
        precedence: Option<Precedence>
    ) -> Self;
}

/// Deepest statement/expression nesting accepted. Binding and evaluation
/// recurse along the same tree, so this bounds their stack use as well.
pub const MAX_NESTING_DEPTH: usize = 128;

pub struct Parser {
    tokens: Vec<Token>,
    end_of_file: Token,
    position: usize,
    depth: usize,
    abandoned: bool,
    diagnostics: DiagnosticBag,
}

impl Parser {
    /// Lexes all of `source` up front, dropping whitespace and bad tokens.
    pub fn new(source: &SourceText) -> Self {
        let mut lexer = Lexer::new(source);

        let tokens = lexer.by_ref()
            .filter(|token| !token.kind.is_trivia())
            .collect::<Vec<Token>>();

        let end_of_file = tokens.last()
            .filter(|token| token.kind == TokenKind::EndOfFile)
            .cloned()
            .unwrap_or_else(|| Token::new(TokenKind::EndOfFile, TextSpan::new(source.len(), 0), "", None));

        Self {
            tokens,
            end_of_file,
            position: 0,
            depth: 0,
            abandoned: false,
            diagnostics: lexer.into_diagnostics(),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Token `offset` places ahead. Offsets past the end yield end-of-file.
    pub fn peek(&self, offset: usize) -> &Token {
        self.tokens
            .get(self.position + offset)
            .unwrap_or(&self.end_of_file)
    }

    pub fn current(&self) -> &Token {
        self.peek(0)
    }

    pub fn next_token(&mut self) -> Token {
        let token = self.current().clone();
        self.position += 1;

        token
    }

    /// Consumes the current token if it has `kind`. Otherwise reports it and
    /// returns a zero-width placeholder of `kind` without consuming anything.
    pub fn expect_one(&mut self, kind: TokenKind) -> Token {
        if self.current().kind == kind {
            return self.next_token();
        }

        let current = self.current();
        let span = current.span;

        if self.abandoned {
            return Token::missing(kind, span.start);
        }

        let error = ParseError::UnexpectedToken {
            found: current.kind,
            expected: kind,
        };

        self.diagnostics.report_syntax(span, error);

        Token::missing(kind, span.start)
    }

    /// Opens one nesting level. Past [`MAX_NESTING_DEPTH`] it reports once,
    /// skips to end-of-file and returns `false`; the caller then builds a
    /// placeholder instead of recursing.
    pub fn enter_nested(&mut self) -> bool {
        if self.abandoned {
            return false;
        }

        if self.depth >= MAX_NESTING_DEPTH {
            let span = self.current().span;
            self.diagnostics.report_syntax(span, ParseError::NestingTooDeep { limit: MAX_NESTING_DEPTH });
            self.position = self.tokens.len();
            self.abandoned = true;

            return false;
        }

        self.depth += 1;
        true
    }

    pub fn leave_nested(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn diagnostics(&self) -> &DiagnosticBag {
        &self.diagnostics
    }

    pub fn parse(mut self) -> (CompilationUnit, DiagnosticBag) {
        let root = CompilationUnit::parse(&mut self, None);

        (root, self.diagnostics)
    }
}

/// Binding power of an operator. Later variants bind tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    LogicalOr,
    LogicalAnd,
    Equals,
    Sum,
    Product,
    Prefix
}

impl Precedence {
    pub fn unary(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Bang
            | TokenKind::Tilde => Self::Prefix,
            _ => Self::Lowest,
        }
    }

    pub fn binary(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Star | TokenKind::Slash => Self::Product,
            TokenKind::Plus | TokenKind::Minus => Self::Sum,
            TokenKind::EqualsEquals | TokenKind::BangEquals |
            TokenKind::Less | TokenKind::LessEquals |
            TokenKind::Greater | TokenKind::GreaterEquals => Self::Equals,
            TokenKind::AmpersandAmpersand => Self::LogicalAnd,
            TokenKind::PipePipe => Self::LogicalOr,
            _ => Self::Lowest,
        }
    }
}

/// A parsed fragment with the diagnostics found while lexing and parsing it.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    pub source: SourceText,
    pub root: CompilationUnit,
    pub diagnostics: Vec<Diagnostic>,
}

impl SyntaxTree {
    pub fn parse(source: SourceText) -> Self {
        let parser = Parser::new(&source);
        let token_count = parser.tokens().len();
        let (root, diagnostics) = parser.parse();

        debug!(
            "parsed {} ({} tokens, {} diagnostics)",
            source.name(), token_count, diagnostics.len()
        );

        Self {
            source,
            root,
            diagnostics: diagnostics.into_vec(),
        }
    }

    pub fn parse_text(text: &str) -> Self {
        Self::parse(SourceText::from_text(text))
    }
}
