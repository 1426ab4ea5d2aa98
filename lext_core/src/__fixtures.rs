use crate::GenerateOptions;
use crate::LextResult;
use crate::generate_string;
use crate::lexer::Lexeme;
use crate::lexer::LexemeKind;
use crate::tokens::Token;

/// Buffer size used by most generation tests.
pub(crate) const CAPACITY: usize = 64;

/// Expand `pattern` with default options into a `CAPACITY` byte buffer.
pub(crate) fn expand(pattern: &str) -> LextResult<String> {
	expand_with(pattern, CAPACITY, GenerateOptions::default())
}

pub(crate) fn expand_with(
	pattern: &str,
	capacity: usize,
	options: GenerateOptions<'_>,
) -> LextResult<String> {
	generate_string(pattern, capacity, options)
}

pub(crate) fn lexeme(kind: LexemeKind, text: &'static str, offset: usize) -> Lexeme<'static> {
	Lexeme {
		kind,
		token: Token::new(text),
		offset,
	}
}

/// Pattern whose single container holds the digits one to nine.
pub(crate) const DIGITS: &str = "n (1, 2, 3, 4, 5, 6, 7, 8, 9) g <@n@n@n>";
