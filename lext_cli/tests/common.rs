use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

/// Pattern whose single generator prints three digits.
pub const DIGITS: &str = "n (1, 2, 3, 4, 5, 6, 7, 8, 9) g <@n@n@n>";

pub fn lext_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("lext"));
	cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
	cmd
}
