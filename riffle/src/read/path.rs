use crate::chunk::ChunkHeader;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Ancestor {
	header: ChunkHeader,
	// Absolute stream position to return to when the group is exited
	resume_at: u64,
}

/// The chain of chunks from the root down to the current chunk
///
/// The root is always present, so the current chunk is never missing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ChunkPath {
	ancestors: Vec<Ancestor>,
	current: ChunkHeader,
}

impl ChunkPath {
	pub(crate) fn new(root: ChunkHeader) -> Self {
		Self {
			ancestors: Vec::new(),
			current: root,
		}
	}

	pub(crate) fn current(&self) -> &ChunkHeader {
		&self.current
	}

	pub(crate) fn parent(&self) -> Option<&ChunkHeader> {
		self.ancestors.last().map(|ancestor| &ancestor.header)
	}

	/// The number of ancestors of the current chunk, the root is at depth 0
	pub(crate) fn depth(&self) -> usize {
		self.ancestors.len()
	}

	/// Descend into `child`, which must be the first subchunk of the current chunk
	pub(crate) fn push(&mut self, child: ChunkHeader, resume_at: u64) {
		let parent = std::mem::replace(&mut self.current, child);
		self.ancestors.push(Ancestor {
			header: parent,
			resume_at,
		});
	}

	/// Move to a sibling of the current chunk
	pub(crate) fn replace(&mut self, sibling: ChunkHeader) {
		self.current = sibling;
	}

	/// Return to the parent chunk, yielding the stream position saved by [`ChunkPath::push`]
	///
	/// Returns `None` at the root.
	pub(crate) fn pop(&mut self) -> Option<u64> {
		let ancestor = self.ancestors.pop()?;
		self.current = ancestor.header;
		Some(ancestor.resume_at)
	}

	/// Every chunk on the path, root first
	pub(crate) fn iter(&self) -> impl Iterator<Item = &ChunkHeader> {
		self.ancestors
			.iter()
			.map(|ancestor| &ancestor.header)
			.chain(std::iter::once(&self.current))
	}
}

/// A saved reader position
///
/// Created by [`ChunkReader::save_position`](super::ChunkReader::save_position), this captures
/// the full path from the root to the current chunk along with the stream position. It can be
/// restored any number of times with [`ChunkReader::restore_position`](super::ChunkReader::restore_position).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SavedPosition {
	pub(crate) path: ChunkPath,
	pub(crate) offset: u64,
}

impl SavedPosition {
	/// The chunk that was current when the position was saved
	pub fn chunk(&self) -> ChunkHeader {
		*self.path.current()
	}

	/// The depth of the saved chunk, the root is at depth 0
	pub fn depth(&self) -> usize {
		self.path.depth()
	}
}
