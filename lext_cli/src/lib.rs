use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use lext_core::CycleGuard;
use lext_core::LextConfig;
use lext_core::LextError;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Generate seeded random text from compact lext patterns.",
	long_about = "lext (lexical templates) expands a pattern of named choice sets and named \
	              rules into random text that is reproducible from a 32-bit seed.\n\nPattern \
	              syntax:\n  name (a, b, c)     A container of literal entries\n  name <text \
	              @var>   A generator mixing text with @references\n  # comment          \
	              Ignored up to the end of the line\n\nExample:\n  lext 3 -p \"animal (fox, \
	              cat) say <the @animal>\""
)]
pub struct LextCli {
	/// Number of results to generate. All generations share one seed, so
	/// each result differs from the last.
	#[arg(default_value_t = 1)]
	pub count: usize,

	/// Pattern text to expand.
	#[arg(long, short, conflicts_with = "file", required_unless_present = "file")]
	pub pattern: Option<String>,

	/// Read the pattern from a file.
	#[arg(long, short)]
	pub file: Option<PathBuf>,

	/// Generator to expand. A random generator is used when absent or when
	/// the pattern declares no generator with this name.
	#[arg(long, short)]
	pub generator: Option<String>,

	/// Starting seed. Defaults to the current time in seconds.
	#[arg(long, short)]
	pub seed: Option<u32>,

	/// Output buffer size in bytes, including the terminator. Longer output
	/// is truncated.
	#[arg(long, short)]
	pub capacity: Option<usize>,

	/// Fail on unresolved variables, recursion limits, truncation and unknown
	/// generator names instead of printing partial output.
	#[arg(long, default_value_t = false)]
	pub strict: bool,

	/// Which self references are skipped during expansion.
	#[arg(long, value_enum)]
	pub cycle_guard: Option<CycleGuardArg>,

	/// Maximum number of generators expanding inside each other, at most
	/// 1024.
	#[arg(long)]
	pub max_depth: Option<usize>,

	/// Output format for the generated results.
	#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,

	/// Path to a config file. Defaults to the first of `lext.toml`,
	/// `.lext.toml` and `.config/lext.toml` in the current directory.
	#[arg(long)]
	pub config: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

impl LextCli {
	/// Override the loaded config with every option set on the command line.
	pub fn apply(&self, config: &mut LextConfig) {
		if let Some(generator) = &self.generator {
			config.generator = Some(generator.clone());
		}

		if let Some(seed) = self.seed {
			config.seed = Some(seed);
		}

		if let Some(capacity) = self.capacity {
			config.capacity = capacity;
		}

		if self.strict {
			config.strict = true;
		}

		if let Some(cycle_guard) = self.cycle_guard {
			config.cycle_guard = cycle_guard.into();
		}

		if let Some(max_depth) = self.max_depth {
			config.max_depth = max_depth;
		}
	}
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// One generated result per line.
	Text,
	/// One JSON object per line with the index, generator name, output and
	/// truncation flag of each result.
	Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CycleGuardArg {
	/// Skip references to the generator being expanded.
	Direct,
	/// Skip references to any generator on the expansion stack.
	Stack,
}

impl From<CycleGuardArg> for CycleGuard {
	fn from(value: CycleGuardArg) -> Self {
		match value {
			CycleGuardArg::Direct => CycleGuard::Direct,
			CycleGuardArg::Stack => CycleGuard::Stack,
		}
	}
}

/// Process exit code for a failed run.
///
/// Configuration and I/O failures, including an out of range depth limit,
/// exit with `2`; everything caused by the pattern itself exits with `1`.
pub fn exit_code(error: &LextError) -> i32 {
	match error {
		LextError::Io(_) | LextError::ConfigParse(_) | LextError::MaxDepthTooLarge { .. } => {
			2
		}
		_ => 1,
	}
}
