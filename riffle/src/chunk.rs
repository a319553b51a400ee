//! Chunk identities and headers
//!
//! A RIFF file is a tree of chunks. Every chunk starts with an 8 byte header (a [`FourCC`] ID
//! followed by a 32-bit payload size), and group chunks (the root `RIFF`/`RIFX` chunk and `LIST`
//! chunks) begin their payload with a second [`FourCC`], the format tag.

use crate::config::ParsingMode;
use crate::error::Result;
use crate::io::{Endianness, read_u32};
use crate::macros::decode_err;

use std::fmt::{Debug, Display, Formatter};
use std::io::Read;

/// The size of a chunk header (ID + size)
pub const CHUNK_HEADER_SIZE: u64 = 8;

/// The size of a group chunk's format tag
pub const FORMAT_TAG_SIZE: u64 = 4;

/// A four character code, used for chunk IDs and format tags
///
/// Constructing a `FourCC` does not validate it. Validation happens whenever a tag is read
/// from or written to a file, see [`is_valid_fourcc`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FourCC([u8; 4]);

impl FourCC {
	/// The root tag of a little-endian file
	pub const RIFF: FourCC = FourCC(*b"RIFF");
	/// The root tag of a big-endian file
	pub const RIFX: FourCC = FourCC(*b"RIFX");
	/// The ID of a nested group chunk
	pub const LIST: FourCC = FourCC(*b"LIST");

	/// Create a new `FourCC`
	///
	/// # Examples
	///
	/// ```rust
	/// use riffle::chunk::FourCC;
	///
	/// let wave = FourCC::new(*b"WAVE");
	/// assert_eq!(wave.to_string(), "WAVE");
	/// ```
	pub const fn new(bytes: [u8; 4]) -> Self {
		Self(bytes)
	}

	/// The raw bytes of the tag
	pub const fn as_bytes(&self) -> &[u8; 4] {
		&self.0
	}

	/// Consume the tag, returning its raw bytes
	pub const fn into_bytes(self) -> [u8; 4] {
		self.0
	}

	/// Whether the tag is valid under `mode`, see [`is_valid_fourcc`]
	pub fn is_valid(&self, mode: ParsingMode) -> bool {
		is_valid_fourcc(self.0, mode)
	}

	/// Whether this is one of the root tags, `RIFF` or `RIFX`
	pub fn is_root(&self) -> bool {
		*self == Self::RIFF || *self == Self::RIFX
	}

	/// Whether chunks with this ID are group chunks
	///
	/// Only the root tags and `LIST` introduce groups.
	///
	/// # Examples
	///
	/// ```rust
	/// use riffle::chunk::FourCC;
	///
	/// assert!(FourCC::LIST.is_group());
	/// assert!(FourCC::RIFX.is_group());
	/// assert!(!FourCC::new(*b"data").is_group());
	/// ```
	pub fn is_group(&self) -> bool {
		self.is_root() || *self == Self::LIST
	}
}

impl From<[u8; 4]> for FourCC {
	fn from(bytes: [u8; 4]) -> Self {
		Self(bytes)
	}
}

impl PartialEq<[u8; 4]> for FourCC {
	fn eq(&self, other: &[u8; 4]) -> bool {
		self.0 == *other
	}
}

impl PartialEq<&[u8; 4]> for FourCC {
	fn eq(&self, other: &&[u8; 4]) -> bool {
		self.0 == **other
	}
}

impl Display for FourCC {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0.escape_ascii())
	}
}

impl Debug for FourCC {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "FourCC(\"{}\")", self.0.escape_ascii())
	}
}

/// Check whether `tag` is a valid four character code
///
/// A tag must be exactly 4 bytes long. Once a space is encountered, every following byte must
/// also be a space (short tags are right-padded, e.g. `"PAD "`). With [`ParsingMode::Strict`],
/// every other byte must be an ASCII alphanumeric character. With [`ParsingMode::Relaxed`],
/// any other byte is accepted.
///
/// # Examples
///
/// ```rust
/// use riffle::chunk::is_valid_fourcc;
/// use riffle::config::ParsingMode;
///
/// assert!(is_valid_fourcc("RIFF", ParsingMode::Strict));
/// assert!(is_valid_fourcc("fmt ", ParsingMode::Strict));
/// assert!(!is_valid_fourcc("A BC", ParsingMode::Strict));
///
/// assert!(!is_valid_fourcc("MOD!", ParsingMode::Strict));
/// assert!(is_valid_fourcc("MOD!", ParsingMode::Relaxed));
/// ```
pub fn is_valid_fourcc(tag: impl AsRef<[u8]>, mode: ParsingMode) -> bool {
	let tag = tag.as_ref();
	if tag.len() != 4 {
		return false;
	}

	let mut padding = false;
	for &b in tag {
		if b == b' ' {
			padding = true;
			continue;
		}

		if padding {
			return false;
		}

		if mode == ParsingMode::Strict && !b.is_ascii_alphanumeric() {
			return false;
		}
	}

	true
}

/// Whether a chunk holds data or further chunks
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ChunkKind {
	/// A chunk holding raw payload data
	Leaf,
	/// A `RIFF`, `RIFX`, or `LIST` chunk, holding a format tag followed by subchunks
	Group {
		/// The format tag, describing the contents of the group
		format: FourCC,
	},
}

/// The header of a chunk, as read from a file
///
/// The size is the payload size as stored on disk. It excludes the 8 byte header and any
/// padding byte, but includes the format tag of group chunks.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ChunkHeader {
	pub(crate) id: FourCC,
	pub(crate) size: u32,
	pub(crate) offset: u64,
	pub(crate) kind: ChunkKind,
}

impl ChunkHeader {
	/// The chunk ID
	pub fn id(&self) -> FourCC {
		self.id
	}

	/// The payload size, as stored in the header
	pub fn size(&self) -> u32 {
		self.size
	}

	/// The absolute offset of the chunk header in the file
	pub fn offset(&self) -> u64 {
		self.offset
	}

	/// Whether this is a leaf or a group chunk
	pub fn kind(&self) -> ChunkKind {
		self.kind
	}

	/// The format tag of a group chunk
	///
	/// This is always `None` for leaf chunks.
	pub fn format(&self) -> Option<FourCC> {
		match self.kind {
			ChunkKind::Group { format } => Some(format),
			ChunkKind::Leaf => None,
		}
	}

	/// Whether this is a group chunk
	pub fn is_group(&self) -> bool {
		matches!(self.kind, ChunkKind::Group { .. })
	}

	/// The absolute offset of the first payload byte
	///
	/// For group chunks, this is the first byte after the format tag.
	pub fn payload_start(&self) -> u64 {
		let start = self.offset + CHUNK_HEADER_SIZE;
		if self.is_group() {
			start + FORMAT_TAG_SIZE
		} else {
			start
		}
	}

	/// The number of payload bytes following [`ChunkHeader::payload_start`]
	pub fn payload_len(&self) -> u64 {
		if self.is_group() {
			u64::from(self.size).saturating_sub(FORMAT_TAG_SIZE)
		} else {
			u64::from(self.size)
		}
	}

	/// The absolute offset one past the last payload byte, excluding padding
	pub fn end(&self) -> u64 {
		self.offset + CHUNK_HEADER_SIZE + u64::from(self.size)
	}

	/// The absolute offset of the next sibling, accounting for the padding byte
	pub fn padded_end(&self) -> u64 {
		self.end() + u64::from(self.size % 2)
	}

	/// Read a chunk header located at `offset`, the reader must already be positioned there
	///
	/// On success, the reader is left at the start of the payload (after the format tag for groups).
	pub(crate) fn read<R>(
		reader: &mut R,
		offset: u64,
		endianness: Endianness,
		mode: ParsingMode,
	) -> Result<Self>
	where
		R: Read,
	{
		let mut id = [0; 4];
		reader.read_exact(&mut id)?;

		if !is_valid_fourcc(id, mode) {
			decode_err!(@BAIL "Found an invalid chunk ID", id);
		}

		let id = FourCC(id);
		let size = read_u32(reader, endianness)?;

		let kind = if id.is_group() {
			if u64::from(size) < FORMAT_TAG_SIZE {
				decode_err!(@BAIL "Group chunk is too small to hold a format tag", id.0);
			}

			let mut format = [0; 4];
			reader.read_exact(&mut format)?;

			if !is_valid_fourcc(format, mode) {
				decode_err!(@BAIL "Found an invalid format tag", format);
			}

			ChunkKind::Group {
				format: FourCC(format),
			}
		} else {
			ChunkKind::Leaf
		};

		log::trace!("Read chunk header: {id} (size: {size}, offset: {offset})");

		Ok(Self {
			id,
			size,
			offset,
			kind,
		})
	}
}
