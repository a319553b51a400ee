use crate::chunk::{CHUNK_HEADER_SIZE, FORMAT_TAG_SIZE, FourCC};
use crate::error::Result;
use crate::macros::err;

/// A chunk that has been started, but not yet ended
///
/// The size grows as payload bytes are written, or as child chunks are ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(super) struct OpenChunk {
	pub(super) id: FourCC,
	// Absolute offset of the chunk header
	pub(super) offset: u64,
	pub(super) size: u32,
	pub(super) group: bool,
}

impl OpenChunk {
	pub(super) fn leaf(id: FourCC, offset: u64) -> Self {
		Self {
			id,
			offset,
			size: 0,
			group: false,
		}
	}

	/// A group chunk, the format tag is already counted
	pub(super) fn group(id: FourCC, offset: u64) -> Self {
		Self {
			id,
			offset,
			size: FORMAT_TAG_SIZE as u32,
			group: true,
		}
	}

	/// The size after adding `len` bytes
	pub(super) fn grown_by(&self, len: u64) -> Result<u32> {
		match u64::from(self.size)
			.checked_add(len)
			.and_then(|size| u32::try_from(size).ok())
		{
			Some(size) => Ok(size),
			None => err!(TooMuchData),
		}
	}

	/// The number of bytes the chunk occupies in its parent, including the header and padding
	pub(super) fn footprint(&self) -> u64 {
		footprint_of(self.size)
	}

	pub(super) fn padding(&self) -> u64 {
		u64::from(self.size % 2)
	}
}

/// The footprint of a chunk of `size` bytes
pub(super) fn footprint_of(size: u32) -> u64 {
	CHUNK_HEADER_SIZE + u64::from(size) + u64::from(size % 2)
}

/// Verify that a child with a footprint of `footprint` bytes fits into every chunk in `ancestors`
///
/// `ancestors` is ordered outermost first, the child belongs to the last one. Each ancestor is
/// checked with the footprint it would have once everything below it is ended.
pub(super) fn check_room(ancestors: &[OpenChunk], mut footprint: u64) -> Result<()> {
	for chunk in ancestors.iter().rev() {
		footprint = footprint_of(chunk.grown_by(footprint)?);
	}

	Ok(())
}
