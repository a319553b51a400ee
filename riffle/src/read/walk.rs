use super::{ChunkReader, SavedPosition};
use crate::chunk::ChunkHeader;
use crate::error::Result;

use std::io::{Read, Seek};

/// A depth-first, pre-order walk over a chunk tree
///
/// Created by [`ChunkReader::walk`]. The walk starts by yielding the chunk that was current when
/// it was created, followed by its subtree, and then every following sibling (and their subtrees).
///
/// The reader's own cursor is used to walk the tree, so the walk holds a mutable borrow of the
/// reader. Once the walk is exhausted, fails, or is dropped, the reader is returned to the
/// position it had before the walk started.
///
/// # Examples
///
/// ```rust,no_run
/// # fn main() -> riffle::error::Result<()> {
/// use riffle::config::ParseOptions;
/// use riffle::read::ChunkReader;
///
/// let mut reader = ChunkReader::open("test.avi", ParseOptions::new())?;
///
/// let mut walk = reader.walk()?;
/// while let Some(chunk) = walk.next() {
/// 	let chunk = chunk?;
/// 	println!("{:indent$}{}", "", chunk.id(), indent = walk.depth() * 2);
/// }
/// # Ok(()) }
/// ```
pub struct Walk<'a, R>
where
	R: Read + Seek,
{
	reader: &'a mut ChunkReader<R>,
	saved: Option<SavedPosition>,
	base_depth: usize,
	started: bool,
}

impl<'a, R> Walk<'a, R>
where
	R: Read + Seek,
{
	pub(super) fn new(reader: &'a mut ChunkReader<R>, saved: SavedPosition) -> Self {
		Self {
			base_depth: saved.depth(),
			reader,
			saved: Some(saved),
			started: false,
		}
	}

	/// The depth of the most recently yielded chunk, the root chunk is at depth 0
	pub fn depth(&self) -> usize {
		self.reader.depth()
	}

	fn advance(&mut self) -> Result<Option<ChunkHeader>> {
		if !self.started {
			self.started = true;
			return self.reader.current_chunk().map(Some);
		}

		if self.reader.has_subchunks()? {
			return self.reader.enter_group().map(Some);
		}

		loop {
			if self.reader.has_next_chunk()? {
				return self.reader.next_chunk().map(Some);
			}

			// Never climb above the starting chunk's level
			if self.reader.depth() <= self.base_depth {
				return Ok(None);
			}

			self.reader.exit_group()?;
		}
	}

	fn finish(&mut self) {
		let Some(saved) = self.saved.take() else {
			return;
		};

		if let Err(e) = self.reader.restore_position(&saved) {
			log::warn!("Failed to restore the reader position after a walk: {e}");
		}
	}
}

impl<R> Iterator for Walk<'_, R>
where
	R: Read + Seek,
{
	type Item = Result<ChunkHeader>;

	fn next(&mut self) -> Option<Self::Item> {
		self.saved.as_ref()?;

		match self.advance() {
			Ok(Some(chunk)) => Some(Ok(chunk)),
			Ok(None) => {
				self.finish();
				None
			},
			Err(e) => {
				self.finish();
				Some(Err(e))
			},
		}
	}
}

impl<R> Drop for Walk<'_, R>
where
	R: Read + Seek,
{
	fn drop(&mut self) {
		self.finish();
	}
}
