use serde::Deserialize;
use serde::Serialize;

use crate::LextError;
use crate::LextResult;
use crate::cursor::Cursor;
use crate::random::Seed;
use crate::resolver::Interrupt;
use crate::resolver::Resolver;
use crate::template::Limits;
use crate::template::Template;

/// Default limit on how deeply generators may expand inside each other.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Largest accepted `max_depth`. Each level of nesting holds one frame of
/// expansion state, so the limit bounds the memory a cyclic pattern can take.
pub const MAX_DEPTH_CEILING: usize = 1024;

/// Output capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 256;

/// How the resolver avoids expanding a generator inside itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleGuard {
	/// Skip a variable that names the generator currently being expanded.
	/// Cycles through two or more generators still recurse until
	/// `max_depth`.
	#[default]
	Direct,
	/// Skip a variable that names any generator currently being expanded.
	Stack,
}

/// Settings for a single call to [`generate`].
#[derive(Debug)]
pub struct GenerateOptions<'a> {
	/// Generator to expand. When `None`, or when no generator has this name,
	/// one is drawn at random.
	pub generator: Option<&'a str>,
	/// Seed to draw from. It is advanced in place, so reusing it across calls
	/// gives a reproducible stream of different results. When `None`, a fresh
	/// [`Seed::default`] is used.
	pub seed: Option<&'a mut Seed>,
	/// Report unresolved variables, recursion limits, truncation and unknown
	/// generator names as errors instead of keeping the partial output.
	pub strict: bool,
	pub cycle_guard: CycleGuard,
	pub max_depth: usize,
	pub limits: Limits,
}

impl Default for GenerateOptions<'_> {
	fn default() -> Self {
		Self {
			generator: None,
			seed: None,
			strict: false,
			cycle_guard: CycleGuard::default(),
			max_depth: DEFAULT_MAX_DEPTH,
			limits: Limits::default(),
		}
	}
}

impl<'a> GenerateOptions<'a> {
	/// Expand the generator called `name`.
	#[must_use]
	pub fn generator(mut self, name: &'a str) -> Self {
		self.generator = Some(name);
		self
	}

	/// Draw from, and advance, the caller's seed.
	#[must_use]
	pub fn seed(mut self, seed: &'a mut Seed) -> Self {
		self.seed = Some(seed);
		self
	}

	#[must_use]
	pub fn strict(mut self, strict: bool) -> Self {
		self.strict = strict;
		self
	}
}

/// Report of a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
	/// Number of bytes written before the terminator.
	pub len: usize,
	/// Whether the expansion was cut short, by the buffer running out of room
	/// or by an unresolved variable or recursion limit in lenient mode.
	pub truncated: bool,
	/// Name of the generator that was expanded.
	pub generator: String,
}

/// Expand `pattern` into `buffer` and terminate the output with a NUL byte.
///
/// The last byte of `buffer` is reserved for the terminator, so at most
/// `buffer.len() - 1` bytes of output are written and nothing is ever written
/// past the end of `buffer`. Output that does not fit is silently clamped
/// unless `options.strict` is set.
///
/// ```rust
/// use lext_core::GenerateOptions;
/// use lext_core::Seed;
/// use lext_core::generate;
///
/// let mut buffer = [0u8; 64];
/// let mut seed = Seed::new(1234);
/// let generated = generate(
/// 	&mut buffer,
/// 	"word (World, Hello) hello <@word @word>",
/// 	GenerateOptions::default().seed(&mut seed),
/// )
/// .unwrap();
///
/// assert_eq!(&buffer[..generated.len], b"Hello World");
/// assert_eq!(buffer[generated.len], 0);
/// ```
pub fn generate(
	buffer: &mut [u8],
	pattern: &str,
	options: GenerateOptions<'_>,
) -> LextResult<Generated> {
	let GenerateOptions {
		generator: requested,
		seed,
		strict,
		cycle_guard,
		max_depth,
		limits,
	} = options;

	if buffer.is_empty() {
		return Err(LextError::EmptyBuffer);
	}

	check_max_depth(max_depth)?;

	let template = Template::parse(pattern, &limits)?;

	if template.generators().is_empty() {
		return Err(LextError::GeneratorNotFound);
	}

	let mut fallback = Seed::default();
	let seed = match seed {
		Some(seed) => seed,
		None => &mut fallback,
	};

	if strict {
		if let Some(name) = requested {
			if template.find_generator(name).is_none() {
				return Err(LextError::UnknownGenerator(name.to_string()));
			}
		}
	}

	let Some(generator) = template.select_generator(requested, seed) else {
		return Err(LextError::GeneratorNotFound);
	};

	tracing::debug!(generator = %generator.name(), seed = **seed, "expanding generator");

	let capacity = buffer.len();
	let mut cursor = Cursor::new(&mut buffer[..capacity - 1]);
	let interrupt = Resolver::new(&template, seed, cycle_guard, max_depth)
		.resolve(generator, &mut cursor)
		.err();
	let len = cursor.offset();
	let truncated = cursor.truncated() || interrupt.is_some();

	buffer[len] = 0;

	let generated = Generated {
		len,
		truncated,
		generator: generator.name().to_string(),
	};

	match interrupt {
		None if strict && truncated => Err(LextError::Truncated { capacity }),
		None => Ok(generated),
		Some(interrupt) if strict => Err(strict_error(interrupt, capacity, max_depth)),
		Some(interrupt) => {
			tracing::debug!(?interrupt, len, "expansion stopped early");
			Ok(generated)
		}
	}
}

/// Reject a depth limit above [`MAX_DEPTH_CEILING`].
pub fn check_max_depth(max_depth: usize) -> LextResult<()> {
	if max_depth > MAX_DEPTH_CEILING {
		return Err(LextError::MaxDepthTooLarge {
			max_depth,
			ceiling: MAX_DEPTH_CEILING,
		});
	}

	Ok(())
}

fn strict_error(interrupt: Interrupt, capacity: usize, max_depth: usize) -> LextError {
	match interrupt {
		Interrupt::Exhausted => LextError::Truncated { capacity },
		Interrupt::Unresolved(name) => LextError::UnresolvedVariable { name },
		Interrupt::DepthExceeded { generator } => {
			LextError::RecursionLimit {
				generator,
				limit: max_depth,
			}
		}
	}
}

/// Expand `pattern` into a fresh buffer of `capacity` bytes and return the
/// output as a string.
///
/// When truncation splits a multi-byte character, the partial character is
/// dropped.
pub fn generate_string(
	pattern: &str,
	capacity: usize,
	options: GenerateOptions<'_>,
) -> LextResult<String> {
	let mut buffer = vec![0u8; capacity];
	let generated = generate(&mut buffer, pattern, options)?;

	Ok(valid_prefix(&buffer[..generated.len]).to_string())
}

/// The longest prefix of `bytes` that is valid UTF-8.
///
/// Patterns are always UTF-8, so only a character split by truncation can
/// make generated bytes invalid, and it can only sit at the very end.
pub fn valid_prefix(bytes: &[u8]) -> &str {
	match std::str::from_utf8(bytes) {
		Ok(text) => text,
		Err(error) => std::str::from_utf8(&bytes[..error.valid_up_to()]).unwrap_or_default(),
	}
}
