use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum LextError {
	#[error(transparent)]
	#[diagnostic(code(lext::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(lext::config_parse),
		help("check that lext.toml is valid TOML with top-level options and an optional [limits] table")
	)]
	ConfigParse(String),

	#[error("invalid name `{name}` at byte {offset}")]
	#[diagnostic(
		code(lext::invalid_name),
		help("container and generator names may only contain ASCII letters, digits and `_`")
	)]
	InvalidName { name: String, offset: usize },

	#[error("unexpected `{delimiter}` at byte {offset} outside of any container or generator")]
	#[diagnostic(
		code(lext::unexpected_delimiter),
		help("open a container with `name (` or a generator with `name <` first")
	)]
	UnexpectedDelimiter { delimiter: char, offset: usize },

	#[error("name `{name}` at byte {offset} is not followed by `(` or `<`")]
	#[diagnostic(code(lext::dangling_name))]
	DanglingName { name: String, offset: usize },

	#[error("container `{name}` is never closed")]
	#[diagnostic(code(lext::unclosed_container), help("add `)` after the last entry"))]
	UnclosedContainer { name: String },

	#[error("generator `{name}` has no body")]
	#[diagnostic(code(lext::missing_body), help("close the generator body with `>`"))]
	MissingBody { name: String },

	#[error("too many containers (limit: {limit})")]
	#[diagnostic(code(lext::too_many_containers), help("raise `limits.max_containers` in lext.toml"))]
	TooManyContainers { limit: usize },

	#[error("too many generators (limit: {limit})")]
	#[diagnostic(code(lext::too_many_generators), help("raise `limits.max_generators` in lext.toml"))]
	TooManyGenerators { limit: usize },

	#[error("container `{container}` has too many entries (limit: {limit})")]
	#[diagnostic(code(lext::too_many_entries), help("raise `limits.max_entries` in lext.toml"))]
	TooManyEntries { container: String, limit: usize },

	#[error("the template does not declare any generator")]
	#[diagnostic(
		code(lext::generator_not_found),
		help("declare at least one generator, e.g. `greeting <hello @name>`")
	)]
	GeneratorNotFound,

	#[error("no generator named `{0}`")]
	#[diagnostic(code(lext::unknown_generator))]
	UnknownGenerator(String),

	#[error("variable `@{name}` does not match any generator or container")]
	#[diagnostic(code(lext::unresolved_variable))]
	UnresolvedVariable { name: String },

	#[error("expansion of `{generator}` exceeded the recursion limit of {limit}")]
	#[diagnostic(
		code(lext::recursion_limit),
		help("generators that reference each other form a cycle; break it or raise `max_depth`")
	)]
	RecursionLimit { generator: String, limit: usize },

	#[error("max_depth {max_depth} exceeds the ceiling of {ceiling}")]
	#[diagnostic(
		code(lext::max_depth_too_large),
		help("lower `max_depth`; deeper nesting is not supported")
	)]
	MaxDepthTooLarge { max_depth: usize, ceiling: usize },

	#[error("output was truncated to fit a {capacity} byte buffer")]
	#[diagnostic(code(lext::truncated), help("increase the output capacity"))]
	Truncated { capacity: usize },

	#[error("the output buffer has no room for a terminator")]
	#[diagnostic(code(lext::empty_buffer))]
	EmptyBuffer,
}

impl LextError {
	/// Returns true for grammar and structural violations found while compiling
	/// a pattern.
	pub fn is_invalid_template(&self) -> bool {
		matches!(
			self,
			Self::InvalidName { .. }
				| Self::UnexpectedDelimiter { .. }
				| Self::DanglingName { .. }
				| Self::UnclosedContainer { .. }
				| Self::MissingBody { .. }
				| Self::TooManyContainers { .. }
				| Self::TooManyGenerators { .. }
				| Self::TooManyEntries { .. }
		)
	}

	/// Returns true for failures that only occur when strict mode is enabled.
	pub fn is_strict_only(&self) -> bool {
		matches!(
			self,
			Self::UnknownGenerator(_)
				| Self::UnresolvedVariable { .. }
				| Self::RecursionLimit { .. }
				| Self::Truncated { .. }
		)
	}
}

pub type LextResult<T> = Result<T, LextError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
