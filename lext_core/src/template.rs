use serde::Deserialize;
use serde::Serialize;

use crate::LextError;
use crate::LextResult;
use crate::lexer::Lexeme;
use crate::lexer::LexemeKind;
use crate::lexer::Segment;
use crate::lexer::sequence;
use crate::lexer::tokenize;
use crate::random::Seed;
use crate::tokens::CONTAINER_CLOSE;
use crate::tokens::GENERATOR_CLOSE;
use crate::tokens::Token;

/// Default maximum number of containers in one pattern.
pub const DEFAULT_MAX_CONTAINERS: usize = 64;
/// Default maximum number of generators in one pattern.
pub const DEFAULT_MAX_GENERATORS: usize = 64;
/// Default maximum number of entries in one container.
pub const DEFAULT_MAX_ENTRIES: usize = 128;

/// Capacities of a compiled template. Exceeding any of them fails the parse.
///
/// ```toml
/// [limits]
/// max_containers = 64
/// max_generators = 64
/// max_entries = 128
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
	pub max_containers: usize,
	pub max_generators: usize,
	pub max_entries: usize,
}

impl Default for Limits {
	fn default() -> Self {
		Self {
			max_containers: DEFAULT_MAX_CONTAINERS,
			max_generators: DEFAULT_MAX_GENERATORS,
			max_entries: DEFAULT_MAX_ENTRIES,
		}
	}
}

/// A named set of literal choices, e.g. `color (red, green, blue)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container<'a> {
	name: Token<'a>,
	entries: Vec<Token<'a>>,
}

impl<'a> Container<'a> {
	pub fn name(&self) -> Token<'a> {
		self.name
	}

	/// Entries in declaration order. Never contains an empty entry.
	pub fn entries(&self) -> &[Token<'a>] {
		&self.entries
	}

	/// Draw one entry. An empty container yields nothing and leaves the seed
	/// untouched.
	pub fn pick(&self, seed: &mut Seed) -> Option<Token<'a>> {
		if self.entries.is_empty() {
			return None;
		}

		self.entries.get(seed.index(self.entries.len())).copied()
	}
}

/// A named expansion rule, e.g. `greeting <hello @name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generator<'a> {
	name: Token<'a>,
	body: Token<'a>,
}

impl<'a> Generator<'a> {
	pub fn name(&self) -> Token<'a> {
		self.name
	}

	/// The trimmed text between `<` and `>`.
	pub fn body(&self) -> Token<'a> {
		self.body
	}

	/// Scan the body into text and variable segments. The body is scanned
	/// anew on every call.
	pub fn segments(&self) -> impl Iterator<Item = Segment<'a>> + use<'a> {
		sequence(self.body)
	}
}

/// A compiled pattern: every container and generator it declares, in
/// declaration order, borrowing from the pattern text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template<'a> {
	containers: Vec<Container<'a>>,
	generators: Vec<Generator<'a>>,
}

impl<'a> Template<'a> {
	/// Compile pattern text, enforcing `limits`.
	pub fn parse(pattern: &'a str, limits: &Limits) -> LextResult<Self> {
		let mut builder = TemplateBuilder::new(*limits);

		for lexeme in tokenize(pattern)? {
			builder.push(lexeme)?;
		}

		builder.finish()
	}

	pub fn containers(&self) -> &[Container<'a>] {
		&self.containers
	}

	pub fn generators(&self) -> &[Generator<'a>] {
		&self.generators
	}

	/// The first generator declared as `name`.
	pub fn find_generator(&self, name: &str) -> Option<&Generator<'a>> {
		self.generators
			.iter()
			.find(|generator| generator.name.as_str() == name)
	}

	/// The first container declared as `name`.
	pub fn find_container(&self, name: &str) -> Option<&Container<'a>> {
		self.containers
			.iter()
			.find(|container| container.name.as_str() == name)
	}

	/// Choose the generator to expand.
	///
	/// A requested name that is declared wins without drawing from the seed.
	/// Otherwise one generator is drawn at random, so a missing name falls
	/// back to random selection. Returns `None` only when no generator is
	/// declared.
	pub fn select_generator(&self, name: Option<&str>, seed: &mut Seed) -> Option<&Generator<'a>> {
		if self.generators.is_empty() {
			return None;
		}

		if let Some(generator) = name.and_then(|name| self.find_generator(name)) {
			return Some(generator);
		}

		self.generators.get(seed.index(self.generators.len()))
	}
}

/// The definition whose content the next lexemes belong to.
enum Open<'a> {
	Nothing,
	Container,
	Generator(Token<'a>),
	/// A definition without a name; its content is discarded.
	Anonymous,
}

struct TemplateBuilder<'a> {
	limits: Limits,
	template: Template<'a>,
	open: Open<'a>,
}

impl<'a> TemplateBuilder<'a> {
	fn new(limits: Limits) -> Self {
		Self {
			limits,
			template: Template::default(),
			open: Open::Nothing,
		}
	}

	fn push(&mut self, lexeme: Lexeme<'a>) -> LextResult<()> {
		match lexeme.kind {
			LexemeKind::Container | LexemeKind::Generator => self.push_definition(lexeme),
			LexemeKind::Entry => self.push_entry(lexeme),
			LexemeKind::Body => self.push_body(lexeme),
		}
	}

	fn push_definition(&mut self, lexeme: Lexeme<'a>) -> LextResult<()> {
		self.ensure_body()?;

		let name = lexeme.token;

		if name.is_empty() {
			tracing::debug!(offset = lexeme.offset, "skipping anonymous definition");
			self.open = Open::Anonymous;
			return Ok(());
		}

		if !name.is_identifier() {
			return Err(LextError::InvalidName {
				name: name.to_string(),
				offset: lexeme.offset,
			});
		}

		if lexeme.kind == LexemeKind::Container {
			if self.template.containers.len() >= self.limits.max_containers {
				return Err(LextError::TooManyContainers {
					limit: self.limits.max_containers,
				});
			}

			self.template.containers.push(Container {
				name,
				entries: vec![],
			});
			self.open = Open::Container;
		} else {
			if self.template.generators.len() >= self.limits.max_generators {
				return Err(LextError::TooManyGenerators {
					limit: self.limits.max_generators,
				});
			}

			self.open = Open::Generator(name);
		}

		Ok(())
	}

	fn push_entry(&mut self, lexeme: Lexeme<'a>) -> LextResult<()> {
		match self.open {
			Open::Container => {}
			Open::Anonymous => return Ok(()),
			Open::Nothing | Open::Generator(_) => {
				return Err(LextError::UnexpectedDelimiter {
					delimiter: CONTAINER_CLOSE,
					offset: lexeme.offset,
				});
			}
		}

		if lexeme.token.is_empty() {
			return Ok(());
		}

		let limit = self.limits.max_entries;
		let Some(container) = self.template.containers.last_mut() else {
			return Err(LextError::UnexpectedDelimiter {
				delimiter: CONTAINER_CLOSE,
				offset: lexeme.offset,
			});
		};

		if container.entries.len() >= limit {
			return Err(LextError::TooManyEntries {
				container: container.name.to_string(),
				limit,
			});
		}

		container.entries.push(lexeme.token);

		Ok(())
	}

	fn push_body(&mut self, lexeme: Lexeme<'a>) -> LextResult<()> {
		match std::mem::replace(&mut self.open, Open::Nothing) {
			Open::Generator(name) => {
				self.template.generators.push(Generator {
					name,
					body: lexeme.token,
				});
				Ok(())
			}
			Open::Anonymous => Ok(()),
			Open::Nothing | Open::Container => {
				Err(LextError::UnexpectedDelimiter {
					delimiter: GENERATOR_CLOSE,
					offset: lexeme.offset,
				})
			}
		}
	}

	/// A generator must receive its body before anything else is declared.
	fn ensure_body(&self) -> LextResult<()> {
		if let Open::Generator(name) = self.open {
			return Err(LextError::MissingBody {
				name: name.to_string(),
			});
		}

		Ok(())
	}

	fn finish(self) -> LextResult<Template<'a>> {
		self.ensure_body()?;

		Ok(self.template)
	}
}
