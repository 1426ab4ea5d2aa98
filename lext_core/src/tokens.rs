use std::fmt::Display;

use derive_more::Deref;

/// Opens a container: `name (`.
pub const CONTAINER_OPEN: char = '(';
/// Separates container entries.
pub const ENTRY_DELIMITER: char = ',';
/// Closes a container.
pub const CONTAINER_CLOSE: char = ')';
/// Opens a generator body: `name <`.
pub const GENERATOR_OPEN: char = '<';
/// Closes a generator body.
pub const GENERATOR_CLOSE: char = '>';
/// Starts a comment running to the end of the line.
pub const COMMENT: char = '#';
/// Introduces a variable inside a generator body.
pub const VARIABLE: char = '@';

/// A borrowed view into pattern text.
///
/// Tokens never own memory. Names, entries and bodies all point back into the
/// pattern they were lexed from, so a compiled template lives exactly as long
/// as its pattern.
///
/// ```text
///  ↓       |     (before trim)
/// [••text•••]
///    ↓  |        (after trim)
/// [••text•••]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deref)]
pub struct Token<'a>(&'a str);

impl<'a> Token<'a> {
	pub const fn new(text: &'a str) -> Self {
		Self(text)
	}

	pub const fn as_str(&self) -> &'a str {
		self.0
	}

	/// Strip leading and trailing pattern whitespace.
	#[must_use]
	pub fn trim(self) -> Self {
		Self(self.0.trim_matches(is_pattern_whitespace))
	}

	/// Whether every character is an ASCII letter, digit or `_`.
	///
	/// The empty token is trivially an identifier; callers decide what an
	/// empty name means.
	pub fn is_identifier(&self) -> bool {
		self.0.bytes().all(is_identifier_byte)
	}
}

impl Display for Token<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// ASCII whitespace plus vertical tab, which `char::is_ascii_whitespace`
/// leaves out.
pub(crate) fn is_pattern_whitespace(c: char) -> bool {
	c.is_ascii_whitespace() || c == '\x0B'
}

pub(crate) fn is_identifier_byte(byte: u8) -> bool {
	byte.is_ascii_alphanumeric() || byte == b'_'
}
