//! Expand a two-word greeting with a fixed seed.
//!
//! ```sh
//! cargo run -p lext_core --example hello
//! ```

use lext_core::GenerateOptions;
use lext_core::LextResult;
use lext_core::Seed;
use lext_core::generate;

fn main() -> LextResult<()> {
	let mut buffer = [0u8; 256];
	let mut seed = Seed::new(1234);

	let generated = generate(
		&mut buffer,
		"word (World, Hello) hello <@word @word>",
		GenerateOptions::default().seed(&mut seed),
	)?;

	println!("{}", String::from_utf8_lossy(&buffer[..generated.len]));

	Ok(())
}
