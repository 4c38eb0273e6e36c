use std::fmt::Display;
use std::str::CharIndices;

use log::debug;

use super::error::LexicalError;
use super::token::{str_to_keyword, Token, TokenKind};
use crate::environment::prelude::Value;
use crate::utils::prelude::{DiagnosticBag, SourceText, TextSpan};

/// Produces tokens one at a time from a [`SourceText`].
///
/// Every call to [`Lexer::next_token`] consumes at least one character until the end of
/// input, after which it keeps returning the end-of-file token.
#[derive(Debug)]
pub struct Lexer<'a> {
	source: &'a SourceText,
	input: CharIndices<'a>,

	position: usize,
	next_position: usize,
	ch: Option<char>,
	next_ch: Option<char>,

	diagnostics: DiagnosticBag,
	finished: bool,
}

impl<'a> Display for Lexer<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f,
			"Lexer {{\n\tposition: {},\n\tnext_position: {},\n\tch: {:?}, next_ch: {:?}\n}}",
			self.position, self.next_position, self.ch, self.next_ch
		)
	}
}

impl<'a> Lexer<'a> {
	pub fn new(source: &'a SourceText) -> Self {
		let mut lexer = Self {
			source,
			input: source.text().char_indices(),

			position: 0,
			next_position: 0,
			ch: None,
			next_ch: None,

			diagnostics: DiagnosticBag::new(source.clone()),
			finished: false,
		};

		lexer.next_char();
		lexer.next_char();

		lexer
	}

	pub fn diagnostics(&self) -> &DiagnosticBag {
		&self.diagnostics
	}

	pub fn into_diagnostics(self) -> DiagnosticBag {
		self.diagnostics
	}

	pub fn next_token(&mut self) -> Token {
		let ch = match self.ch {
			Some(ch) => ch,
			None => return self.token_at(self.position, TokenKind::EndOfFile, None),
		};

		match ch {
			'0'..='9' => self.lex_number(),
			c if c.is_alphabetic() => self.lex_word(),
			c if c.is_whitespace() => self.lex_whitespace(),

			'+' => self.eat_one_char(TokenKind::Plus),
			'-' => self.eat_one_char(TokenKind::Minus),
			'*' => self.eat_one_char(TokenKind::Star),
			'/' => self.eat_one_char(TokenKind::Slash),
			'~' => self.eat_one_char(TokenKind::Tilde),
			'(' => self.eat_one_char(TokenKind::OpenParenthesis),
			')' => self.eat_one_char(TokenKind::CloseParenthesis),
			'{' => self.eat_one_char(TokenKind::OpenBrace),
			'}' => self.eat_one_char(TokenKind::CloseBrace),

			'&' if self.next_ch == Some('&') => self.eat_two_chars(TokenKind::AmpersandAmpersand),
			'|' if self.next_ch == Some('|') => self.eat_two_chars(TokenKind::PipePipe),
			'=' if self.next_ch == Some('=') => self.eat_two_chars(TokenKind::EqualsEquals),
			'=' => self.eat_one_char(TokenKind::Equals),
			'!' if self.next_ch == Some('=') => self.eat_two_chars(TokenKind::BangEquals),
			'!' => self.eat_one_char(TokenKind::Bang),
			'<' if self.next_ch == Some('=') => self.eat_two_chars(TokenKind::LessEquals),
			'<' => self.eat_one_char(TokenKind::Less),
			'>' if self.next_ch == Some('=') => self.eat_two_chars(TokenKind::GreaterEquals),
			'>' => self.eat_one_char(TokenKind::Greater),

			character => {
				let token = self.eat_one_char(TokenKind::Bad);
				self.diagnostics.report_lexical(token.span, LexicalError::BadCharacter { character });

				token
			}
		}
	}

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		self.position = self.next_position;
		self.ch = self.next_ch;

		match self.input.next() {
			Some((pos, next)) => {
				self.next_position = pos;
				self.next_ch = Some(next);
			},
			None => {
				self.next_position = self.source.len();
				self.next_ch = None;
			}
		}

		ch
	}

	fn token_at(&self, start: usize, kind: TokenKind, value: Option<Value>) -> Token {
		let span = TextSpan::from_bounds(start, self.position);
		Token::new(kind, span, self.source.slice(span), value)
	}

	fn eat_one_char(&mut self, kind: TokenKind) -> Token {
		let start = self.position;
		self.next_char();

		self.token_at(start, kind, None)
	}

	fn eat_two_chars(&mut self, kind: TokenKind) -> Token {
		let start = self.position;
		self.next_char();
		self.next_char();

		self.token_at(start, kind, None)
	}

	fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
		while matches!(self.ch, Some(ch) if predicate(ch)) {
			self.next_char();
		}
	}

	fn lex_whitespace(&mut self) -> Token {
		let start = self.position;
		self.eat_while(char::is_whitespace);

		self.token_at(start, TokenKind::Whitespace, None)
	}

	fn lex_word(&mut self) -> Token {
		let start = self.position;
		self.eat_while(char::is_alphabetic);

		let span = TextSpan::from_bounds(start, self.position);
		match str_to_keyword(self.source.slice(span)) {
			Some(TokenKind::True) => self.token_at(start, TokenKind::True, Some(Value::Boolean { value: true })),
			Some(TokenKind::False) => self.token_at(start, TokenKind::False, Some(Value::Boolean { value: false })),
			Some(keyword) => self.token_at(start, keyword, None),
			None => self.token_at(start, TokenKind::Identifier, None),
		}
	}

	fn lex_number(&mut self) -> Token {
		let start = self.position;
		self.eat_while(|ch| ch.is_ascii_digit());

		let span = TextSpan::from_bounds(start, self.position);
		let text = self.source.slice(span);

		let value = match text.parse::<i32>() {
			Ok(value) => Some(Value::Integer { value }),
			Err(_) => {
				self.diagnostics.report_lexical(span, LexicalError::InvalidNumber { text: text.to_string() });
				None
			}
		};

		self.token_at(start, TokenKind::Number, value)
	}
}

impl<'a> Iterator for Lexer<'a> {
	type Item = Token;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		let token = self.next_token();
		self.finished = token.kind == TokenKind::EndOfFile;

		Some(token)
	}
}

/// Every token of `source` in order, trivia included, ending with end-of-file.
pub fn lex_tokens(source: &SourceText) -> (Vec<Token>, DiagnosticBag) {
	let mut lexer = Lexer::new(source);
	let tokens = lexer.by_ref().collect::<Vec<_>>();

	debug!("lexed {} tokens with {} diagnostics", tokens.len(), lexer.diagnostics().len());

	(tokens, lexer.into_diagnostics())
}
