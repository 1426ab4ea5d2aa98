use std::ops::Range;

use logos::Logos;

use crate::LextError;
use crate::LextResult;
use crate::tokens::Token;
use crate::tokens::is_pattern_whitespace;

/// Raw tokens produced by logos for flat tokenization of pattern text. The
/// walker decides what each one means based on the current context.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
	#[token("(")]
	ContainerOpen,
	#[token(",")]
	EntryDelimiter,
	#[token(")")]
	ContainerClose,
	#[token("<")]
	GeneratorOpen,
	#[token(">")]
	GeneratorClose,
	#[token("#")]
	CommentMarker,
	#[token("\n")]
	Newline,
	#[regex(r"[ \t\r\x0B\x0C]+")]
	Whitespace,
	#[regex(r"[^(),<># \t\r\n\x0B\x0C]+")]
	Text,
}

/// Tokens of a generator body, scanned every time the generator expands.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum SequenceToken {
	#[regex(r"@[A-Za-z0-9_]*")]
	Variable,
	#[regex(r"[^@]+")]
	Text,
}

/// What a lexeme declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexemeKind {
	/// The name of a new container.
	Container,
	/// One entry of the most recently opened container.
	Entry,
	/// The name of a new generator.
	Generator,
	/// The body of the most recently opened generator.
	Body,
}

/// A classified, trimmed token from the top level grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'a> {
	pub kind: LexemeKind,
	pub token: Token<'a>,
	/// Byte offset of the trimmed token in the pattern.
	pub offset: usize,
}

/// One run of a generator body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
	/// Literal bytes, copied verbatim.
	Text(Token<'a>),
	/// A reference to a generator or container, without the leading `@`.
	Variable(Token<'a>),
}

enum LexerContext {
	/// Between definitions, collecting the next name.
	Definitions,
	/// Inside `( ... )`, collecting entries.
	Container,
	/// Inside `< ... >`, collecting the body.
	Generator,
}

/// Walks the logos token stream, switching between the top level and bracket
/// content rules.
struct DefinitionWalker<'a> {
	source: &'a str,
	raw_tokens: Vec<(Result<RawToken, ()>, Range<usize>)>,
	cursor: usize,
	context: LexerContext,
	/// Span from the first to the last text token of the pending name.
	name: Option<Range<usize>>,
	/// Name of the container currently open, for error reporting.
	open_container: Token<'a>,
	/// Where the current entry or body started.
	content_start: usize,
	lexemes: Vec<Lexeme<'a>>,
}

impl<'a> DefinitionWalker<'a> {
	fn new(source: &'a str) -> Self {
		let raw_tokens: Vec<_> = RawToken::lexer(source).spanned().collect();

		Self {
			source,
			raw_tokens,
			cursor: 0,
			context: LexerContext::Definitions,
			name: None,
			open_container: Token::new(""),
			content_start: 0,
			lexemes: vec![],
		}
	}

	fn current_span(&self) -> Range<usize> {
		self.raw_tokens[self.cursor].1.clone()
	}

	fn push_lexeme(&mut self, kind: LexemeKind, range: Range<usize>) {
		let raw = &self.source[range.clone()];
		let token = Token::new(raw).trim();
		let leading = raw.len() - raw.trim_start_matches(is_pattern_whitespace).len();

		self.lexemes.push(Lexeme {
			kind,
			token,
			offset: range.start + leading,
		});
	}

	/// Turn the pending name into a definition and enter its bracket context.
	fn open_definition(&mut self, kind: LexemeKind) {
		let span = self.current_span();
		let range = self.name.take().unwrap_or(span.start..span.start);

		self.push_lexeme(kind, range.clone());
		self.content_start = span.end;

		if kind == LexemeKind::Container {
			self.open_container = Token::new(&self.source[range]).trim();
			self.context = LexerContext::Container;
		} else {
			self.context = LexerContext::Generator;
		}
	}

	/// Emit the content between the last opening delimiter and the current one.
	fn close_content(&mut self, kind: LexemeKind) {
		let span = self.current_span();
		self.push_lexeme(kind, self.content_start..span.start);
		self.content_start = span.end;
	}

	fn extend_name(&mut self) {
		let span = self.current_span();
		self.name = Some(match self.name.take() {
			Some(name) => name.start..span.end,
			None => span,
		});
	}

	/// Skip everything up to and including the next newline.
	fn skip_comment(&mut self) {
		while self.cursor < self.raw_tokens.len() {
			let (result, _) = &self.raw_tokens[self.cursor];
			let newline = matches!(result, Ok(RawToken::Newline));
			self.cursor += 1;

			if newline {
				return;
			}
		}
	}

	fn process(&mut self) -> LextResult<()> {
		while self.cursor < self.raw_tokens.len() {
			// Every byte is covered by some raw token; treat anything logos
			// rejects as text.
			let raw = match self.raw_tokens[self.cursor].0 {
				Ok(raw) => raw,
				Err(()) => RawToken::Text,
			};

			match self.context {
				LexerContext::Definitions => {
					match raw {
						RawToken::ContainerOpen => self.open_definition(LexemeKind::Container),
						RawToken::GeneratorOpen => self.open_definition(LexemeKind::Generator),
						RawToken::EntryDelimiter
						| RawToken::ContainerClose
						| RawToken::GeneratorClose => {
							let span = self.current_span();
							let delimiter = self.source[span.clone()].chars().next().unwrap_or(',');
							return Err(LextError::UnexpectedDelimiter {
								delimiter,
								offset: span.start,
							});
						}
						RawToken::CommentMarker => {
							self.skip_comment();
							continue;
						}
						RawToken::Newline | RawToken::Whitespace => {}
						RawToken::Text => self.extend_name(),
					}
				}
				LexerContext::Container => {
					match raw {
						RawToken::EntryDelimiter => self.close_content(LexemeKind::Entry),
						RawToken::ContainerClose => {
							self.close_content(LexemeKind::Entry);
							self.context = LexerContext::Definitions;
						}
						_ => {}
					}
				}
				LexerContext::Generator => {
					if raw == RawToken::GeneratorClose {
						self.close_content(LexemeKind::Body);
						self.context = LexerContext::Definitions;
					}
				}
			}

			self.cursor += 1;
		}

		match self.context {
			LexerContext::Definitions => {
				if let Some(range) = self.name.take() {
					return Err(LextError::DanglingName {
						name: self.source[range.clone()].to_string(),
						offset: range.start,
					});
				}
			}
			LexerContext::Container => {
				return Err(LextError::UnclosedContainer {
					name: self.open_container.to_string(),
				});
			}
			// A generator left open has no body; the template rejects it.
			LexerContext::Generator => {}
		}

		Ok(())
	}
}

/// Split pattern text into container, entry, generator and body lexemes.
///
/// Comments (`#` to end of line) are only recognized between definitions.
/// Inside brackets every character other than the closing delimiters is
/// literal content.
pub fn tokenize(pattern: &str) -> LextResult<Vec<Lexeme<'_>>> {
	let mut walker = DefinitionWalker::new(pattern);
	walker.process()?;

	Ok(walker.lexemes)
}

/// Scan a generator body into text runs and variable references.
///
/// A variable is `@` followed by the longest run of identifier characters, so
/// its name ends at whitespace, punctuation, another `@` or the end of the
/// body. There are no escapes: a backslash is ordinary text and every `@`
/// starts a variable.
pub fn sequence<'a>(body: Token<'a>) -> impl Iterator<Item = Segment<'a>> {
	let source = body.as_str();

	SequenceToken::lexer(source)
		.spanned()
		.map(move |(result, span)| {
			let slice = &source[span];
			match result {
				Ok(SequenceToken::Variable) => Segment::Variable(Token::new(&slice[1..])),
				Ok(SequenceToken::Text) | Err(()) => Segment::Text(Token::new(slice)),
			}
		})
}
