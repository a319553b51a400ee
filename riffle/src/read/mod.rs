//! Reading RIFF/RIFX files
//!
//! A [`ChunkReader`] holds a single cursor into the chunk tree. It starts at the root chunk, and
//! is moved with [`ChunkReader::enter_group`], [`ChunkReader::next_chunk`], and
//! [`ChunkReader::exit_group`]. All data access is relative to, and bounded by, the current chunk.
//!
//! # Examples
//!
//! ```rust
//! # fn main() -> riffle::error::Result<()> {
//! use riffle::config::{ParseOptions, WriteOptions};
//! use riffle::chunk::FourCC;
//! use riffle::io::Endianness;
//! use riffle::read::ChunkReader;
//! use riffle::write::ChunkWriter;
//! use std::io::Cursor;
//!
//! # let mut writer = ChunkWriter::new(
//! # 	Cursor::new(Vec::new()),
//! # 	FourCC::new(*b"WAVE"),
//! # 	Endianness::Little,
//! # 	WriteOptions::new(),
//! # )?;
//! # writer.begin_chunk(FourCC::new(*b"fmt "))?;
//! # writer.write(1_u16)?;
//! # let file = Cursor::new(writer.finish()?.into_inner());
//! let mut reader = ChunkReader::new(file, ParseOptions::new())?;
//! assert_eq!(reader.format(), FourCC::new(*b"WAVE"));
//!
//! if reader.has_subchunks()? {
//! 	let fmt = reader.enter_group()?;
//! 	assert_eq!(fmt.id(), *b"fmt ");
//!
//! 	let format_tag = reader.read::<u16>()?;
//! 	assert_eq!(format_tag, 1);
//! }
//! # Ok(()) }
//! ```

mod path;
mod walk;

pub use path::SavedPosition;
pub use walk::Walk;

use crate::chunk::{CHUNK_HEADER_SIZE, ChunkHeader, ChunkKind, FORMAT_TAG_SIZE, FourCC};
use crate::config::ParseOptions;
use crate::error::Result;
use crate::io::{Endianness, Primitive, decode_slice, read_u32};
use crate::macros::{decode_err, err, try_vec};
use path::ChunkPath;

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

// Bulk reads into caller buffers are decoded through a stack buffer of this size
const READ_BLOCK_SIZE: usize = 4096;

/// A forward-reading cursor over a RIFF/RIFX chunk tree
///
/// See the [module documentation](self) for an overview.
///
/// A `ChunkReader` owns its stream. Once [`ChunkReader::close`] is called, every operation fails
/// with [`ErrorKind::Closed`](crate::error::ErrorKind::Closed).
pub struct ChunkReader<R> {
	reader: Option<R>,
	endianness: Endianness,
	format: FourCC,
	path: ChunkPath,
	// Absolute position of the stream, kept in sync with every read and seek
	pos: u64,
	parse_options: ParseOptions,
}

impl ChunkReader<BufReader<File>> {
	/// Open the file at `path`
	///
	/// The file is wrapped in a [`BufReader`] of [`ParseOptions::buffer_size`] bytes.
	///
	/// # Errors
	///
	/// * `path` cannot be opened
	/// * See [`ChunkReader::new`]
	pub fn open<P>(path: P, parse_options: ParseOptions) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		let file = File::open(path)?;
		Self::new(
			BufReader::with_capacity(parse_options.buffer_size, file),
			parse_options,
		)
	}
}

impl<R> ChunkReader<R>
where
	R: Read + Seek,
{
	/// Create a `ChunkReader` from a stream positioned at the start of a root chunk
	///
	/// This reads the root chunk header, which determines the byte order of the rest of the file.
	///
	/// # Errors
	///
	/// * The root tag is neither `RIFF` nor `RIFX`
	/// * The root chunk is too small to hold its format tag
	/// * The format tag is invalid
	pub fn new(mut reader: R, parse_options: ParseOptions) -> Result<Self> {
		let offset = reader.stream_position()?;

		let mut tag = [0; 4];
		reader.read_exact(&mut tag)?;

		let Some(endianness) = Endianness::from_root_tag(tag) else {
			decode_err!(@BAIL "File doesn't start with a RIFF or RIFX chunk", tag);
		};

		let size = read_u32(&mut reader, endianness)?;
		if u64::from(size) < FORMAT_TAG_SIZE {
			decode_err!(@BAIL "Root chunk is too small to hold a format tag", tag);
		}

		let mut format = [0; 4];
		reader.read_exact(&mut format)?;

		let format = FourCC::new(format);
		if !format.is_valid(parse_options.parsing_mode) {
			decode_err!(@BAIL "Found an invalid format tag", format.into_bytes());
		}

		let root = ChunkHeader {
			id: FourCC::new(tag),
			size,
			offset,
			kind: ChunkKind::Group { format },
		};

		log::debug!(
			"Opened {} file (format: {format}, size: {size}, byte order: {endianness:?})",
			root.id
		);

		Ok(Self {
			reader: Some(reader),
			endianness,
			format,
			pos: root.payload_start(),
			path: ChunkPath::new(root),
			parse_options,
		})
	}

	/// The byte order of the file, determined by the root tag
	pub fn endianness(&self) -> Endianness {
		self.endianness
	}

	/// The format tag of the root chunk (e.g. `WAVE`)
	pub fn format(&self) -> FourCC {
		self.format
	}

	/// The depth of the current chunk, the root chunk is at depth 0
	pub fn depth(&self) -> usize {
		self.path.depth()
	}

	/// The header of the current chunk
	pub fn current_chunk(&self) -> Result<ChunkHeader> {
		self.ensure_open()?;
		Ok(*self.path.current())
	}

	/// Every chunk from the root down to the current chunk, root first
	pub fn path(&self) -> Result<Vec<ChunkHeader>> {
		self.ensure_open()?;
		Ok(self.path.iter().copied().collect())
	}

	/// Whether the current chunk is a group with at least one byte of content after its format tag
	pub fn has_subchunks(&self) -> Result<bool> {
		self.ensure_open()?;

		let current = self.path.current();
		Ok(current.is_group() && u64::from(current.size) > FORMAT_TAG_SIZE)
	}

	/// Descend into the first subchunk of the current group chunk
	///
	/// The previous stream position is remembered, and restored by [`ChunkReader::exit_group`].
	///
	/// # Errors
	///
	/// * The current chunk is not a group, or has no subchunks ([`ErrorKind::OutOfBounds`])
	/// * The subchunk header is invalid, or extends past the current chunk
	///
	/// [`ErrorKind::OutOfBounds`]: crate::error::ErrorKind::OutOfBounds
	pub fn enter_group(&mut self) -> Result<ChunkHeader> {
		self.ensure_open()?;

		let current = *self.path.current();
		if !current.is_group() {
			err!(OutOfBounds("Current chunk is not a group"));
		}

		if !self.has_subchunks()? {
			err!(OutOfBounds("Current group has no subchunks"));
		}

		let resume_at = self.pos;
		let child = self.read_header_at(current.payload_start(), current.end())?;

		self.path.push(child, resume_at);
		Ok(child)
	}

	/// Whether another chunk follows the current one within its parent
	///
	/// This is always `false` for the root chunk.
	pub fn has_next_chunk(&self) -> Result<bool> {
		self.ensure_open()?;

		let Some(parent) = self.path.parent() else {
			return Ok(false);
		};

		let next = self.path.current().padded_end();
		Ok(next + CHUNK_HEADER_SIZE <= parent.end())
	}

	/// Move to the next sibling of the current chunk
	///
	/// # Errors
	///
	/// * There is no next sibling ([`ErrorKind::OutOfBounds`])
	/// * The sibling's header is invalid, or extends past the parent chunk
	///
	/// [`ErrorKind::OutOfBounds`]: crate::error::ErrorKind::OutOfBounds
	pub fn next_chunk(&mut self) -> Result<ChunkHeader> {
		if !self.has_next_chunk()? {
			err!(OutOfBounds("No chunks remain in the current group"));
		}

		let next = self.path.current().padded_end();
		let Some(parent_end) = self.path.parent().map(ChunkHeader::end) else {
			err!(OutOfBounds("No chunks remain in the current group"));
		};

		let sibling = self.read_header_at(next, parent_end)?;

		self.path.replace(sibling);
		Ok(sibling)
	}

	/// Return to the parent of the current chunk
	///
	/// The stream position is restored to where it was before the matching
	/// [`ChunkReader::enter_group`] call.
	///
	/// # Errors
	///
	/// * The current chunk is the root ([`ErrorKind::OutOfBounds`])
	///
	/// [`ErrorKind::OutOfBounds`]: crate::error::ErrorKind::OutOfBounds
	pub fn exit_group(&mut self) -> Result<()> {
		self.ensure_open()?;

		let Some(resume_at) = self.path.pop() else {
			err!(OutOfBounds("Cannot exit the root chunk"));
		};

		let parent = self.path.current();
		if !parent.is_group() {
			decode_err!(@BAIL "Exited into a chunk that is not a group", parent.id.into_bytes());
		}

		self.seek_absolute(resume_at)
	}

	/// The number of readable payload bytes in the current chunk
	///
	/// For group chunks, this excludes the format tag.
	pub fn payload_len(&self) -> Result<u64> {
		self.ensure_open()?;
		Ok(self.path.current().payload_len())
	}

	/// The position within the current chunk's payload
	///
	/// Position 0 is the first byte after the header (and format tag, for group chunks).
	pub fn position(&self) -> Result<u32> {
		self.ensure_open()?;

		let start = self.path.current().payload_start();
		Ok(self.pos.saturating_sub(start) as u32)
	}

	/// Seek within the current chunk's payload
	///
	/// [`SeekFrom::End`] is relative to the end of the payload, so `SeekFrom::End(-1)` is the last byte.
	/// Returns the new position.
	///
	/// # Errors
	///
	/// The resulting position is negative, or not less than [`ChunkReader::payload_len`]
	/// ([`ErrorKind::OutOfBounds`]).
	///
	/// [`ErrorKind::OutOfBounds`]: crate::error::ErrorKind::OutOfBounds
	pub fn set_position(&mut self, pos: SeekFrom) -> Result<u32> {
		let current = *self.path.current();
		let relative = i64::from(self.position()?);
		let len = current.payload_len() as i64;

		let target = match pos {
			SeekFrom::Start(offset) => i64::try_from(offset).ok(),
			SeekFrom::Current(offset) => relative.checked_add(offset),
			SeekFrom::End(offset) => len.checked_add(offset),
		};

		let target = match target {
			Some(target) if (0..len).contains(&target) => target as u64,
			_ => err!(OutOfBounds(
				"Attempted to seek outside the bounds of the current chunk"
			)),
		};

		self.seek_absolute(current.payload_start() + target)?;
		Ok(target as u32)
	}

	/// Walk the chunk tree, depth first, starting at the current chunk
	///
	/// See [`Walk`] for details.
	pub fn walk(&mut self) -> Result<Walk<'_, R>> {
		let saved = self.save_position()?;
		Ok(Walk::new(self, saved))
	}

	/// Save the current position, to be restored with [`ChunkReader::restore_position`]
	pub fn save_position(&self) -> Result<SavedPosition> {
		self.ensure_open()?;

		Ok(SavedPosition {
			path: self.path.clone(),
			offset: self.pos,
		})
	}

	/// Restore a position saved with [`ChunkReader::save_position`]
	///
	/// The saved position is not consumed, and may be restored again later.
	pub fn restore_position(&mut self, saved: &SavedPosition) -> Result<()> {
		self.ensure_open()?;

		self.path = saved.path.clone();
		self.seek_absolute(saved.offset)
	}

	/// Close the reader, releasing the underlying stream
	///
	/// # Errors
	///
	/// The reader is already closed.
	pub fn close(&mut self) -> Result<()> {
		match self.reader.take() {
			Some(_) => {
				log::debug!("Closed reader at offset {}", self.pos);
				Ok(())
			},
			None => err!(Closed),
		}
	}

	/// Read a single value
	///
	/// # Errors
	///
	/// The value extends past the end of the current chunk ([`ErrorKind::OutOfBounds`]).
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// # fn main() -> riffle::error::Result<()> {
	/// use riffle::config::ParseOptions;
	/// use riffle::read::ChunkReader;
	///
	/// let mut reader = ChunkReader::open("test.wav", ParseOptions::new())?;
	/// let fmt = reader.enter_group()?;
	///
	/// let format_tag: u16 = reader.read()?;
	/// let channels = reader.read::<u16>()?;
	/// # Ok(()) }
	/// ```
	///
	/// [`ErrorKind::OutOfBounds`]: crate::error::ErrorKind::OutOfBounds
	pub fn read<T: Primitive>(&mut self) -> Result<T> {
		let mut buf = [0; 8];
		self.read_bytes_into(&mut buf[..T::SIZE])?;

		Ok(T::decode(&buf[..T::SIZE], self.endianness))
	}

	/// Fill `values` with consecutive values
	///
	/// The values are decoded straight into `values`, so this is not subject to the
	/// [allocation limit](crate::config::GlobalOptions::allocation_limit).
	pub fn read_into<T: Primitive>(&mut self, values: &mut [T]) -> Result<()> {
		let Some(len) = values.len().checked_mul(T::SIZE) else {
			err!(TooMuchData);
		};

		self.check_remaining(len as u64)?;

		let mut block = [0; READ_BLOCK_SIZE];
		for values in values.chunks_mut(READ_BLOCK_SIZE / T::SIZE) {
			let block = &mut block[..values.len() * T::SIZE];
			self.read_bytes_into(block)?;
			decode_slice(block, values, self.endianness);
		}

		Ok(())
	}

	/// Read `count` consecutive values
	pub fn read_array<T: Primitive>(&mut self, count: usize) -> Result<Vec<T>> {
		if let Some(len) = count.checked_mul(T::SIZE) {
			self.check_remaining(len as u64)?;
		}

		let mut values = try_vec![T::default(); count];
		self.read_into(&mut values)?;

		Ok(values)
	}

	/// Read exactly `buf.len()` bytes
	pub fn read_bytes_into(&mut self, buf: &mut [u8]) -> Result<()> {
		self.check_remaining(buf.len() as u64)?;

		self.stream()?.read_exact(buf)?;
		self.pos += buf.len() as u64;

		Ok(())
	}

	/// Read `len` bytes
	pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
		self.check_remaining(len as u64)?;

		let mut bytes = try_vec![0; len];
		self.read_bytes_into(&mut bytes)?;

		Ok(bytes)
	}

	/// Read a fixed-length string field of `len` bytes
	///
	/// Fixed-length fields are NUL padded, the returned bytes stop before the first NUL.
	/// The position always advances by `len`.
	pub fn read_fixed_str(&mut self, len: usize) -> Result<Vec<u8>> {
		let mut bytes = self.read_bytes(len)?;
		if let Some(nul) = bytes.iter().position(|&b| b == 0) {
			bytes.truncate(nul);
		}

		Ok(bytes)
	}

	/// Read a string prefixed by its length as a `u8`
	pub fn read_u8_prefixed_str(&mut self) -> Result<Vec<u8>> {
		self.read_prefixed_str(LengthPrefix::U8, false)
	}

	/// Read a string prefixed by its length as a `u16`
	pub fn read_u16_prefixed_str(&mut self) -> Result<Vec<u8>> {
		self.read_prefixed_str(LengthPrefix::U16, false)
	}

	/// Read a `u8` length-prefixed string, followed by a NUL terminator
	///
	/// The prefix does not count the terminator, which is skipped.
	pub fn read_u8_prefixed_cstr(&mut self) -> Result<Vec<u8>> {
		self.read_prefixed_str(LengthPrefix::U8, true)
	}

	/// Read a `u16` length-prefixed string, followed by a NUL terminator
	///
	/// The prefix does not count the terminator, which is skipped.
	pub fn read_u16_prefixed_cstr(&mut self) -> Result<Vec<u8>> {
		self.read_prefixed_str(LengthPrefix::U16, true)
	}

	/// Read a NUL terminated string
	///
	/// The terminator is consumed, but not included in the returned bytes.
	///
	/// # Errors
	///
	/// The end of the chunk is reached before a terminator ([`ErrorKind::OutOfBounds`]).
	/// The position is left unchanged.
	///
	/// [`ErrorKind::OutOfBounds`]: crate::error::ErrorKind::OutOfBounds
	pub fn read_cstr(&mut self) -> Result<Vec<u8>> {
		let start = self.pos;
		let end = self.path.current().payload_start() + self.path.current().payload_len();

		let mut bytes = Vec::new();
		loop {
			if self.pos >= end {
				self.seek_absolute(start)?;
				err!(OutOfBounds("Reached the end of the chunk before a NUL terminator"));
			}

			match self.read::<u8>()? {
				0 => break,
				b => bytes.push(b),
			}
		}

		Ok(bytes)
	}

	/// Read a NUL terminated UTF-8 string
	///
	/// See [`ChunkReader::read_cstr`].
	pub fn read_cstr_utf8(&mut self) -> Result<String> {
		let bytes = self.read_cstr()?;
		Ok(String::from_utf8(bytes)?)
	}

	fn read_prefixed_str(&mut self, prefix: LengthPrefix, terminated: bool) -> Result<Vec<u8>> {
		let start = self.pos;
		let len = match prefix {
			LengthPrefix::U8 => usize::from(self.read::<u8>()?),
			LengthPrefix::U16 => usize::from(self.read::<u16>()?),
		};

		if let Err(e) = self.check_remaining((len + usize::from(terminated)) as u64) {
			self.seek_absolute(start)?;
			return Err(e);
		}

		let bytes = self.read_bytes(len)?;
		if terminated {
			self.read::<u8>()?;
		}

		Ok(bytes)
	}

	fn ensure_open(&self) -> Result<()> {
		if self.reader.is_none() {
			err!(Closed);
		}

		Ok(())
	}

	fn stream(&mut self) -> Result<&mut R> {
		match self.reader.as_mut() {
			Some(reader) => Ok(reader),
			None => err!(Closed),
		}
	}

	fn check_remaining(&self, len: u64) -> Result<()> {
		self.ensure_open()?;

		let current = self.path.current();
		let end = current.payload_start() + current.payload_len();
		if self.pos.saturating_add(len) > end {
			err!(OutOfBounds("Attempted to read past the end of the current chunk"));
		}

		Ok(())
	}

	fn seek_absolute(&mut self, pos: u64) -> Result<()> {
		self.stream()?.seek(SeekFrom::Start(pos))?;
		self.pos = pos;
		Ok(())
	}

	// Reads the header at `offset`, which must end before `parent_end`
	//
	// On failure, the stream is moved back to where it was.
	fn read_header_at(&mut self, offset: u64, parent_end: u64) -> Result<ChunkHeader> {
		let previous = self.pos;
		let endianness = self.endianness;
		let parsing_mode = self.parse_options.parsing_mode;

		let stream = self.stream()?;
		let header = stream
			.seek(SeekFrom::Start(offset))
			.map_err(Into::into)
			.and_then(|_| ChunkHeader::read(stream, offset, endianness, parsing_mode))
			.and_then(|header| {
				if header.end() > parent_end {
					decode_err!(@BAIL "Chunk extends past the end of its parent", header.id.into_bytes());
				}

				Ok(header)
			});

		match header {
			Ok(header) => {
				self.pos = header.payload_start();
				Ok(header)
			},
			Err(e) => {
				if let Err(seek_err) = stream.seek(SeekFrom::Start(previous)) {
					log::warn!("Failed to restore the stream position after a bad header: {seek_err}");
				}

				Err(e)
			},
		}
	}
}

#[derive(Copy, Clone)]
enum LengthPrefix {
	U8,
	U16,
}
