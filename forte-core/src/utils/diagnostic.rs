use std::fmt::Display;

use codespan_reporting::files::{self, Files, Location};

use crate::{
    binder::prelude::BindError,
    lexer::prelude::LexicalError,
    parser::prelude::ParseError,
};
use super::{source_text::SourceText, text_span::TextSpan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lexical(LexicalError),
    Syntax(ParseError),
    Semantic(BindError),
}

impl DiagnosticKind {
    pub fn title(&self) -> &'static str {
        match self {
            DiagnosticKind::Lexical(_) => "Lexical error",
            DiagnosticKind::Syntax(_) => "Syntax error",
            DiagnosticKind::Semantic(_) => "Semantic error",
        }
    }

    /// Short label for the underlined span and optional extra notes.
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self {
            DiagnosticKind::Lexical(error) => error.details(),
            DiagnosticKind::Syntax(error) => error.details(),
            DiagnosticKind::Semantic(error) => error.details(),
        }
    }
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::Lexical(error) => write!(f, "{error}"),
            DiagnosticKind::Syntax(error) => write!(f, "{error}"),
            DiagnosticKind::Semantic(error) => write!(f, "{error}"),
        }
    }
}

/// A recoverable problem found while lexing, parsing or binding one fragment.
///
/// The diagnostic keeps the fragment it was reported against, so positions
/// stay meaningful after later fragments are submitted to the same session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: TextSpan,
    source: SourceText,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: TextSpan, source: SourceText) -> Self {
        Self { kind, span, source }
    }

    pub fn span(&self) -> TextSpan {
        self.span
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn source(&self) -> &SourceText {
        &self.source
    }

    pub fn line_index(&self) -> Result<usize, files::Error> {
        self.source.line_index(self.span.start)
    }

    /// 1-based line and column of the span start.
    pub fn location(&self) -> Result<Location, files::Error> {
        Files::location(&self.source, (), self.span.start)
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.location() {
            Ok(Location { line_number, column_number }) => {
                write!(f, "({line_number}, {column_number}): {}", self.kind)
            },
            Err(_) => write!(f, "{}: {}", self.span, self.kind),
        }
    }
}

/// Ordered collection of diagnostics reported against one fragment.
#[derive(Debug, Clone)]
pub struct DiagnosticBag {
    source: SourceText,
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new(source: SourceText) -> Self {
        Self { source, diagnostics: vec![] }
    }

    pub fn source(&self) -> &SourceText {
        &self.source
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// Splices `earlier` in front of the diagnostics collected so far.
    pub fn prepend_all(&mut self, earlier: impl IntoIterator<Item = Diagnostic>) {
        let current = std::mem::take(&mut self.diagnostics);
        self.diagnostics.extend(earlier);
        self.diagnostics.extend(current);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn report_lexical(&mut self, span: TextSpan, error: LexicalError) {
        self.report(span, DiagnosticKind::Lexical(error));
    }

    pub fn report_syntax(&mut self, span: TextSpan, error: ParseError) {
        self.report(span, DiagnosticKind::Syntax(error));
    }

    pub fn report_semantic(&mut self, span: TextSpan, error: BindError) {
        self.report(span, DiagnosticKind::Semantic(error));
    }

    fn report(&mut self, span: TextSpan, kind: DiagnosticKind) {
        let diagnostic = Diagnostic::new(kind, span, self.source.clone());
        self.diagnostics.push(diagnostic);
    }
}

impl IntoIterator for DiagnosticBag {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticBag {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}
