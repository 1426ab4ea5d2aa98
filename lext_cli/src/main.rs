use std::io::Write;
use std::path::Path;
use std::process;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use clap::Parser;
use lext_cli::LextCli;
use lext_cli::OutputFormat;
use lext_cli::exit_code;
use lext_core::AnyEmptyResult;
use lext_core::DEFAULT_SEED;
use lext_core::LextConfig;
use lext_core::LextError;
use lext_core::Seed;
use lext_core::generate;
use lext_core::valid_prefix;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
}

/// One line of `--format json` output.
#[derive(Serialize)]
struct GenerationRecord<'a> {
	index: usize,
	generator: &'a str,
	output: &'a str,
	truncated: bool,
}

fn main() {
	let args = LextCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	if let Err(e) = run(&args) {
		// Render lext errors through miette for diagnostic codes and help.
		match e.downcast::<LextError>() {
			Ok(lext_err) => {
				let code = exit_code(&lext_err);
				let report: miette::Report = (*lext_err).into();
				eprintln!("{report:?}");
				process::exit(code);
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
				process::exit(2);
			}
		}
	}
}

/// Log to stderr. `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_filter = if verbose {
		"lext=debug,lext_core=debug"
	} else {
		"warn"
	};

	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
		.with(
			tracing_subscriber::fmt::layer()
				.with_writer(std::io::stderr)
				.with_ansi(use_color),
		)
		.init();
}

fn run(args: &LextCli) -> AnyEmptyResult {
	let mut config = load_config(args)?;
	args.apply(&mut config);

	let pattern = match (&args.pattern, &args.file) {
		(Some(pattern), _) => pattern.clone(),
		(None, Some(path)) => read_pattern(path)?,
		(None, None) => return Err("either --pattern or --file is required".into()),
	};

	let mut seed = Seed::new(config.seed.unwrap_or_else(time_seed));
	tracing::debug!(seed = *seed, count = args.count, "starting generation");

	let mut buffer = vec![0u8; config.capacity];
	let mut stdout = std::io::stdout().lock();

	for index in 0..args.count {
		let generated = generate(&mut buffer, &pattern, config.options().seed(&mut seed))?;
		let output = valid_prefix(&buffer[..generated.len]);

		tracing::debug!(
			index,
			generator = %generated.generator,
			truncated = generated.truncated,
			"generated"
		);

		match args.format {
			OutputFormat::Text => writeln!(stdout, "{output}")?,
			OutputFormat::Json => {
				let record = GenerationRecord {
					index,
					generator: &generated.generator,
					output,
					truncated: generated.truncated,
				};
				writeln!(stdout, "{}", serde_json::to_string(&record)?)?;
			}
		}
	}

	Ok(())
}

fn load_config(args: &LextCli) -> Result<LextConfig, LextError> {
	if let Some(path) = &args.config {
		return LextConfig::load_file(path);
	}

	let root = std::env::current_dir()?;

	Ok(LextConfig::load(&root)?.unwrap_or_default())
}

fn read_pattern(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
	std::fs::read_to_string(path)
		.map_err(|e| format!("failed to read pattern file `{}`: {e}", path.display()).into())
}

/// Seconds since the Unix epoch, truncated to 32 bits.
fn time_seed() -> u32 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map_or(DEFAULT_SEED, |elapsed| elapsed.as_secs() as u32)
}
