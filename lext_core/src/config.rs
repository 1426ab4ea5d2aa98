use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::CycleGuard;
use crate::DEFAULT_CAPACITY;
use crate::DEFAULT_MAX_DEPTH;
use crate::GenerateOptions;
use crate::LextError;
use crate::LextResult;
use crate::check_max_depth;
use crate::template::Limits;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["lext.toml", ".lext.toml", ".config/lext.toml"];

/// Configuration loaded from a `lext.toml` file.
///
/// ```toml
/// capacity = 256
/// strict = false
/// cycle_guard = "direct"
/// max_depth = 64
/// generator = "greeting"
/// seed = 1234
///
/// [limits]
/// max_containers = 64
/// max_generators = 64
/// max_entries = 128
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LextConfig {
	/// Size in bytes of the output buffer for each generation, including the
	/// terminator.
	pub capacity: usize,
	/// Fail on unresolved variables, recursion limits, truncation and unknown
	/// generator names.
	pub strict: bool,
	pub cycle_guard: CycleGuard,
	/// Maximum number of generators expanding inside each other, at most
	/// [`MAX_DEPTH_CEILING`](crate::MAX_DEPTH_CEILING).
	pub max_depth: usize,
	/// Generator to expand instead of a random one.
	pub generator: Option<String>,
	/// Starting seed. When absent the command line picks one.
	pub seed: Option<u32>,
	pub limits: Limits,
}

impl Default for LextConfig {
	fn default() -> Self {
		Self {
			capacity: DEFAULT_CAPACITY,
			strict: false,
			cycle_guard: CycleGuard::default(),
			max_depth: DEFAULT_MAX_DEPTH,
			generator: None,
			seed: None,
			limits: Limits::default(),
		}
	}
}

impl LextConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if the file does not exist.
	pub fn load(root: &Path) -> LextResult<Option<LextConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		Self::load_file(&config_path).map(Some)
	}

	/// Load the config from an explicit path.
	pub fn load_file(path: &Path) -> LextResult<LextConfig> {
		let content = std::fs::read_to_string(path)?;
		let config = Self::parse(&content)?;

		tracing::debug!(path = %path.display(), "loaded config");

		Ok(config)
	}

	/// Parse config text. A `max_depth` above [`MAX_DEPTH_CEILING`](crate::MAX_DEPTH_CEILING) is
	/// rejected here rather than at generation time.
	pub fn parse(content: &str) -> LextResult<LextConfig> {
		let config: LextConfig =
			toml::from_str(content).map_err(|e| LextError::ConfigParse(e.to_string()))?;
		check_max_depth(config.max_depth)?;

		Ok(config)
	}

	/// Options for one generation. The seed is left for the caller to attach.
	pub fn options(&self) -> GenerateOptions<'_> {
		GenerateOptions {
			generator: self.generator.as_deref(),
			seed: None,
			strict: self.strict,
			cycle_guard: self.cycle_guard,
			max_depth: self.max_depth,
			limits: self.limits,
		}
	}
}
