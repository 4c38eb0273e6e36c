use std::{io::BufRead, ops::Range, rc::Rc};

use codespan_reporting::files::{self, Files};
use utf8_chars::BufReadCharsExt;

use super::text_span::TextSpan;

pub const DEFAULT_SOURCE_NAME: &str = "<repl>";

/// Immutable fragment text together with the byte offsets of its line starts.
///
/// Clones share the underlying buffers, so diagnostics can keep a handle on the
/// fragment they were reported against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
	name: Rc<str>,
	text: Rc<str>,
	line_starts: Rc<[usize]>,
}

impl SourceText {
	pub fn from_text(text: impl Into<Rc<str>>) -> Self {
		Self::with_name(DEFAULT_SOURCE_NAME, text)
	}

	pub fn with_name(name: impl Into<Rc<str>>, text: impl Into<Rc<str>>) -> Self {
		let text = text.into();
		let line_starts = compute_line_starts(&text).into();

		Self { name: name.into(), text, line_starts }
	}

	/// Reads the whole stream char by char. Fails on I/O errors and invalid UTF-8.
	pub fn from_reader<R: BufRead>(name: impl Into<Rc<str>>, reader: &mut R) -> std::io::Result<Self> {
		let mut text = String::new();

		for ch in reader.chars() {
			text.push(ch?);
		}

		Ok(Self::with_name(name, text))
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn len(&self) -> usize {
		self.text.len()
	}

	pub fn is_empty(&self) -> bool {
		self.text.is_empty()
	}

	pub fn char_at(&self, offset: usize) -> Option<char> {
		self.text.get(offset..)?.chars().next()
	}

	/// Text covered by `span`, or `""` when the span does not fall on char boundaries.
	pub fn slice(&self, span: TextSpan) -> &str {
		self.text.get(span.range()).unwrap_or_default()
	}

	pub fn line_count(&self) -> usize {
		self.line_starts.len()
	}

	/// Index of the line containing `offset`. `offset == len()` belongs to the last line.
	pub fn line_index(&self, offset: usize) -> Result<usize, files::Error> {
		if offset > self.len() {
			return Err(files::Error::IndexTooLarge {
				given: offset,
				max: self.len(),
			});
		}

		Ok(match self.line_starts.binary_search(&offset) {
			Ok(line) => line,
			Err(next_line) => next_line - 1,
		})
	}

	pub fn line_start(&self, line: usize) -> Option<usize> {
		self.line_starts.get(line).copied()
	}

	/// Span of the line's content, without its terminator.
	pub fn line_span(&self, line: usize) -> Option<TextSpan> {
		let range = self.line_range_with_break(line)?;
		let content = &self.text[range.clone()];
		let trimmed = content
			.strip_suffix("\r\n")
			.or_else(|| content.strip_suffix('\n'))
			.or_else(|| content.strip_suffix('\r'))
			.unwrap_or(content);

		Some(TextSpan::new(range.start, trimmed.len()))
	}

	fn line_range_with_break(&self, line: usize) -> Option<Range<usize>> {
		let start = self.line_start(line)?;
		let end = self.line_start(line + 1).unwrap_or(self.len());

		Some(start..end)
	}
}

fn compute_line_starts(text: &str) -> Vec<usize> {
	let bytes = text.as_bytes();
	let mut starts = vec![0];
	let mut position = 0;

	while position < bytes.len() {
		match bytes[position] {
			b'\r' if bytes.get(position + 1) == Some(&b'\n') => {
				position += 2;
				starts.push(position);
			},
			b'\r' | b'\n' => {
				position += 1;
				starts.push(position);
			},
			_ => position += 1,
		}
	}

	starts
}

impl<'a> Files<'a> for SourceText {
	type FileId = ();
	type Name = &'a str;
	type Source = &'a str;

	fn name(&'a self, _: ()) -> Result<Self::Name, files::Error> {
		Ok(&*self.name)
	}

	fn source(&'a self, _: ()) -> Result<Self::Source, files::Error> {
		Ok(&*self.text)
	}

	fn line_index(&'a self, _: (), byte_index: usize) -> Result<usize, files::Error> {
		SourceText::line_index(self, byte_index)
	}

	fn line_range(&'a self, _: (), line_index: usize) -> Result<Range<usize>, files::Error> {
		self.line_range_with_break(line_index)
			.ok_or(files::Error::LineTooLarge {
				given: line_index,
				max: self.line_count() - 1,
			})
	}
}
