use std::{fmt::Display, ops::Range};

/// Half-open byte range `start..start + length` into a [`SourceText`](super::source_text::SourceText).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextSpan {
	pub start: usize,
	pub length: usize,
}

impl TextSpan {
	pub fn new(start: usize, length: usize) -> Self {
		Self { start, length }
	}

	pub fn from_bounds(start: usize, end: usize) -> Self {
		Self { start, length: end.saturating_sub(start) }
	}

	pub fn end(&self) -> usize {
		self.start + self.length
	}

	/// Smallest span containing both `self` and `other`.
	pub fn cover(self, other: TextSpan) -> Self {
		Self::from_bounds(self.start.min(other.start), self.end().max(other.end()))
	}

	pub fn range(&self) -> Range<usize> {
		self.start..self.end()
	}
}

impl Display for TextSpan {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}..{}", self.start, self.end())
	}
}
