//! Generate a few sentences from a pattern file.
//!
//! ```sh
//! cargo run -p lext_core --example simple -- [PATTERN_FILE] [COUNT]
//! ```

use std::path::PathBuf;

use lext_core::AnyEmptyResult;
use lext_core::GenerateOptions;
use lext_core::Seed;
use lext_core::generate_string;

fn main() -> AnyEmptyResult {
	let mut args = std::env::args().skip(1);
	let path = args.next().map_or_else(
		|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("examples/simple.lext"),
		PathBuf::from,
	);
	let count: usize = args.next().map_or(Ok(5), |count| count.parse())?;

	let pattern = std::fs::read_to_string(&path)?;
	let mut seed = Seed::default();

	for _ in 0..count {
		let options = GenerateOptions::default().generator("sentence").seed(&mut seed);
		println!("{}", generate_string(&pattern, 256, options)?);
	}

	Ok(())
}
