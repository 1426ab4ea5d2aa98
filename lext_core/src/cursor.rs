use thiserror::Error;

/// The cursor had no capacity left for a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("output buffer exhausted")]
pub struct Exhausted;

/// An append-only writer over a caller-owned buffer.
///
/// The capacity is the length of the borrowed slice and `offset` never moves
/// past it. Writes that do not fit are clamped to whatever room is left.
///
/// ```text
///      |     (capacity = 5)
/// [•••••]    (buffer)
///  ^         (offset = 0)
/// ```
#[derive(Debug)]
pub struct Cursor<'b> {
	buffer: &'b mut [u8],
	offset: usize,
	truncated: bool,
}

impl<'b> Cursor<'b> {
	pub fn new(buffer: &'b mut [u8]) -> Self {
		Self {
			buffer,
			offset: 0,
			truncated: false,
		}
	}

	pub fn offset(&self) -> usize {
		self.offset
	}

	pub fn capacity(&self) -> usize {
		self.buffer.len()
	}

	pub fn remaining(&self) -> usize {
		self.capacity() - self.offset
	}

	/// Whether any write was clamped or rejected.
	pub fn truncated(&self) -> bool {
		self.truncated
	}

	/// The bytes written so far.
	pub fn written(&self) -> &[u8] {
		&self.buffer[..self.offset]
	}

	/// Append `bytes`, copying only what fits.
	///
	/// Fails when there is no capacity left at all. Empty writes always
	/// succeed.
	pub fn write(&mut self, bytes: &[u8]) -> Result<(), Exhausted> {
		if bytes.is_empty() {
			return Ok(());
		}

		let remaining = self.remaining();

		if remaining == 0 {
			self.truncated = true;
			return Err(Exhausted);
		}

		let length = if bytes.len() > remaining {
			tracing::trace!(requested = bytes.len(), remaining, "clamping write");
			self.truncated = true;
			remaining
		} else {
			bytes.len()
		};

		self.buffer[self.offset..self.offset + length].copy_from_slice(&bytes[..length]);
		self.offset += length;

		Ok(())
	}
}
