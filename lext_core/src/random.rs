use derive_more::Deref;
use derive_more::DerefMut;
use derive_more::From;

/// Seed used when the caller does not provide one.
pub const DEFAULT_SEED: u32 = 2_463_534_242;

/// The state of the 32-bit xorshift generator driving every random choice.
///
/// Each draw overwrites the seed with the value it returns, so sharing one
/// `Seed` between calls yields a reproducible stream that does not repeat the
/// same generation. A seed of `0` is a fixed point and always draws `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deref, DerefMut, From)]
pub struct Seed(u32);

impl Seed {
	pub const fn new(value: u32) -> Self {
		Self(value)
	}

	/// Advance the generator and return the new state.
	pub fn next_u32(&mut self) -> u32 {
		let mut x = self.0;

		x ^= x << 13;
		x ^= x >> 17;
		x ^= x << 5;

		self.0 = x;

		x
	}

	/// Draw an index in `0..bound`. `bound` must not be zero.
	pub(crate) fn index(&mut self, bound: usize) -> usize {
		self.next_u32() as usize % bound
	}
}

impl Default for Seed {
	fn default() -> Self {
		Self(DEFAULT_SEED)
	}
}
