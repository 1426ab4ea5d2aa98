use crate::CycleGuard;
use crate::cursor::Cursor;
use crate::cursor::Exhausted;
use crate::lexer::Segment;
use crate::random::Seed;
use crate::template::Generator;
use crate::template::Template;

/// Why a resolution stopped before the end of the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Interrupt {
	/// The cursor had no room left.
	Exhausted,
	/// A variable matched neither a generator nor a container.
	Unresolved(String),
	/// Expanding `generator` would nest deeper than the configured limit.
	DepthExceeded { generator: String },
}

impl From<Exhausted> for Interrupt {
	fn from(_: Exhausted) -> Self {
		Self::Exhausted
	}
}

/// Expands generator bodies into a cursor.
///
/// Nested generators are walked with an explicit frame stack on the heap, so
/// the depth of an expansion never depends on the native call stack.
pub(crate) struct Resolver<'t, 'a> {
	template: &'t Template<'a>,
	seed: &'t mut Seed,
	guard: CycleGuard,
	max_depth: usize,
}

impl<'t, 'a> Resolver<'t, 'a> {
	pub(crate) fn new(
		template: &'t Template<'a>,
		seed: &'t mut Seed,
		guard: CycleGuard,
		max_depth: usize,
	) -> Self {
		Self {
			template,
			seed,
			guard,
			max_depth,
		}
	}

	/// Write the expansion of `generator` into `cursor`.
	///
	/// Everything written before an interrupt stays in the cursor.
	pub(crate) fn resolve(
		&mut self,
		generator: &Generator<'a>,
		cursor: &mut Cursor<'_>,
	) -> Result<(), Interrupt> {
		if self.max_depth == 0 {
			return Err(Interrupt::DepthExceeded {
				generator: generator.name().to_string(),
			});
		}

		// Generators currently being expanded, outermost first, each with the
		// rest of its body still to scan.
		let mut frames = vec![(generator.name(), generator.segments())];

		loop {
			let Some((current, segments)) = frames.last_mut() else {
				return Ok(());
			};
			let current = *current;

			match segments.next() {
				None => {
					frames.pop();
				}
				Some(Segment::Text(text)) => cursor.write(text.as_bytes())?,
				Some(Segment::Variable(name)) => {
					if name.is_empty() {
						continue;
					}

					let guarded = match self.guard {
						CycleGuard::Direct => current == name,
						CycleGuard::Stack => frames.iter().any(|(open, _)| *open == name),
					};

					if guarded {
						tracing::debug!(
							generator = %current,
							variable = %name,
							"skipping recursive reference"
						);
						continue;
					}

					let template = self.template;

					if let Some(nested) = template.find_generator(name.as_str()) {
						if frames.len() >= self.max_depth {
							return Err(Interrupt::DepthExceeded {
								generator: nested.name().to_string(),
							});
						}

						frames.push((nested.name(), nested.segments()));
						continue;
					}

					let Some(container) = template.find_container(name.as_str()) else {
						return Err(Interrupt::Unresolved(name.to_string()));
					};

					if let Some(entry) = container.pick(self.seed) {
						cursor.write(entry.as_bytes())?;
					}
				}
			}
		}
	}
}
