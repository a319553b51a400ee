//! Writing RIFF/RIFX files
//!
//! A [`ChunkWriter`] keeps a stack of open chunks. Chunks are started with
//! [`ChunkWriter::begin_chunk`] or [`ChunkWriter::begin_group_chunk`], and ended with
//! [`ChunkWriter::end_chunk`], at which point their final size is written back into their header.
//!
//! The sizes of the root chunk, and of any chunk still open, are only written once
//! [`ChunkWriter::close`] (or [`ChunkWriter::finish`]) is called. Dropping a writer without
//! closing it leaves placeholder sizes in the file.
//!
//! # Examples
//!
//! ```rust
//! # fn main() -> riffle::error::Result<()> {
//! use riffle::chunk::FourCC;
//! use riffle::config::WriteOptions;
//! use riffle::io::Endianness;
//! use riffle::write::ChunkWriter;
//! use std::io::Cursor;
//!
//! let mut writer = ChunkWriter::new(
//! 	Cursor::new(Vec::new()),
//! 	FourCC::new(*b"WAVE"),
//! 	Endianness::Little,
//! 	WriteOptions::new(),
//! )?;
//!
//! writer.begin_group_chunk(FourCC::new(*b"INFO"))?;
//! writer.begin_chunk(FourCC::new(*b"ISFT"))?;
//! writer.write_cstr("riffle")?;
//! writer.end_chunk()?;
//! writer.end_chunk()?;
//!
//! let file = writer.finish()?.into_inner();
//! assert_eq!(&file[..4], b"RIFF");
//! // "WAVE" + LIST header + "INFO" + ISFT header + "riffle\0" + padding
//! assert_eq!(u32::from_le_bytes(file[4..8].try_into().unwrap()), 32);
//! # Ok(()) }
//! ```

mod frame;

use crate::chunk::{CHUNK_HEADER_SIZE, FORMAT_TAG_SIZE, FourCC};
use crate::config::WriteOptions;
use crate::error::Result;
use crate::io::{Endianness, Primitive, encode_slice, write_u32};
use crate::macros::{encode_err, err};
use frame::{OpenChunk, check_room, footprint_of};

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

// Written in place of a chunk's size until the chunk is ended
const PLACEHOLDER_SIZE: u32 = 0;

/// A writer for RIFF/RIFX chunk trees
///
/// See the [module documentation](self) for an overview.
pub struct ChunkWriter<W> {
	writer: Option<W>,
	endianness: Endianness,
	frames: Vec<OpenChunk>,
	// Absolute position of the stream, always the end of the data written so far
	pos: u64,
	write_options: WriteOptions,
}

impl ChunkWriter<BufWriter<File>> {
	/// Create (or truncate) the file at `path`, and write the root chunk header
	///
	/// The file is wrapped in a [`BufWriter`] of [`WriteOptions::buffer_size`] bytes.
	///
	/// # Errors
	///
	/// * `path` cannot be created
	/// * See [`ChunkWriter::new`]
	pub fn create<P>(
		path: P,
		format: FourCC,
		endianness: Endianness,
		write_options: WriteOptions,
	) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		let file = File::create(path)?;
		Self::new(
			BufWriter::with_capacity(write_options.buffer_size, file),
			format,
			endianness,
			write_options,
		)
	}
}

impl<W> ChunkWriter<W>
where
	W: Write + Seek,
{
	/// Create a `ChunkWriter`, writing the root chunk header at the current stream position
	///
	/// The root tag is `RIFF` for [`Endianness::Little`] and `RIFX` for [`Endianness::Big`].
	///
	/// # Errors
	///
	/// * `format` is not a valid [`FourCC`] under [`WriteOptions::validation_mode`]
	pub fn new(
		mut writer: W,
		format: FourCC,
		endianness: Endianness,
		write_options: WriteOptions,
	) -> Result<Self> {
		if !format.is_valid(write_options.validation_mode) {
			encode_err!(@BAIL "Invalid format tag", format.into_bytes());
		}

		let offset = writer.stream_position()?;
		let root_tag = endianness.root_tag();

		writer.write_all(root_tag.as_bytes())?;
		write_u32(&mut writer, endianness, PLACEHOLDER_SIZE)?;
		writer.write_all(format.as_bytes())?;

		log::debug!("Started {root_tag} file (format: {format}, byte order: {endianness:?})");

		Ok(Self {
			writer: Some(writer),
			endianness,
			frames: vec![OpenChunk::group(root_tag, offset)],
			pos: offset + CHUNK_HEADER_SIZE + FORMAT_TAG_SIZE,
			write_options,
		})
	}

	/// The byte order of the file
	pub fn endianness(&self) -> Endianness {
		self.endianness
	}

	/// The number of open chunks, including the root chunk
	pub fn depth(&self) -> usize {
		self.frames.len()
	}

	/// Start a new leaf chunk inside the innermost open group
	///
	/// # Errors
	///
	/// * The innermost open chunk is not a group (or no chunk is open)
	/// * `id` is reserved for group chunks (`RIFF`, `RIFX`, or `LIST`)
	/// * `id` is not a valid [`FourCC`] under [`WriteOptions::validation_mode`]
	/// * An open chunk's size would exceed `u32::MAX` ([`ErrorKind::TooMuchData`])
	///
	/// [`ErrorKind::TooMuchData`]: crate::error::ErrorKind::TooMuchData
	pub fn begin_chunk(&mut self, id: FourCC) -> Result<()> {
		self.check_accepts_children()?;

		if id.is_group() {
			encode_err!(@BAIL "Chunk ID is reserved for group chunks", id.into_bytes());
		}

		if !id.is_valid(self.write_options.validation_mode) {
			encode_err!(@BAIL "Invalid chunk ID", id.into_bytes());
		}

		check_room(&self.frames, CHUNK_HEADER_SIZE)?;

		let offset = self.pos;
		self.write_header(id, None)?;
		self.frames.push(OpenChunk::leaf(id, offset));

		log::trace!("Began chunk {id} at offset {offset}");
		Ok(())
	}

	/// Start a new `LIST` chunk with the format tag `format`, inside the innermost open group
	///
	/// # Errors
	///
	/// * The innermost open chunk is not a group (or no chunk is open)
	/// * `format` is not a valid [`FourCC`] under [`WriteOptions::validation_mode`]
	/// * An open chunk's size would exceed `u32::MAX` ([`ErrorKind::TooMuchData`])
	///
	/// [`ErrorKind::TooMuchData`]: crate::error::ErrorKind::TooMuchData
	pub fn begin_group_chunk(&mut self, format: FourCC) -> Result<()> {
		self.check_accepts_children()?;

		if !format.is_valid(self.write_options.validation_mode) {
			encode_err!(@BAIL "Invalid format tag", format.into_bytes());
		}

		check_room(&self.frames, CHUNK_HEADER_SIZE + FORMAT_TAG_SIZE)?;

		let offset = self.pos;
		self.write_header(FourCC::LIST, Some(format))?;
		self.frames.push(OpenChunk::group(FourCC::LIST, offset));

		log::trace!("Began group chunk LIST:{format} at offset {offset}");
		Ok(())
	}

	/// End the innermost open chunk
	///
	/// This pads the chunk to an even length, writes its final size into its header, and adds
	/// its total size to its parent.
	///
	/// # Errors
	///
	/// * No chunk is open
	/// * An ancestor's size would exceed `u32::MAX` ([`ErrorKind::TooMuchData`]). The chunk
	///   stays open, and nothing is written.
	///
	/// [`ErrorKind::TooMuchData`]: crate::error::ErrorKind::TooMuchData
	pub fn end_chunk(&mut self) -> Result<()> {
		self.ensure_open()?;

		let Some((&chunk, ancestors)) = self.frames.split_last() else {
			encode_err!(@BAIL "No open chunk to end");
		};

		check_room(ancestors, chunk.footprint())?;
		let parent_size = ancestors
			.last()
			.map(|parent| parent.grown_by(chunk.footprint()))
			.transpose()?;

		let endianness = self.endianness;
		let end = self.pos + chunk.padding();

		let writer = self.stream()?;
		if chunk.padding() == 1 {
			writer.write_all(&[0])?;
		}

		writer.seek(SeekFrom::Start(chunk.offset + 4))?;
		write_u32(writer, endianness, chunk.size)?;
		writer.seek(SeekFrom::Start(end))?;

		self.pos = end;
		self.frames.pop();

		if let (Some(parent), Some(size)) = (self.frames.last_mut(), parent_size) {
			parent.size = size;
		}

		log::trace!(
			"Ended chunk {} at offset {} (size: {})",
			chunk.id,
			chunk.offset,
			chunk.size
		);

		Ok(())
	}

	/// End every open chunk, including the root, and release the underlying stream
	///
	/// # Errors
	///
	/// * The writer is already closed ([`ErrorKind::Closed`])
	/// * See [`ChunkWriter::end_chunk`]
	///
	/// [`ErrorKind::Closed`]: crate::error::ErrorKind::Closed
	pub fn close(&mut self) -> Result<()> {
		self.drain().map(drop)
	}

	/// Same as [`ChunkWriter::close`], returning the underlying stream
	pub fn finish(mut self) -> Result<W> {
		self.drain()
	}

	/// Write a single value, in the file's byte order
	///
	/// # Errors
	///
	/// * The innermost open chunk is a group (or no chunk is open)
	/// * The size of the chunk, or of one of its ancestors, would exceed `u32::MAX`
	///   ([`ErrorKind::TooMuchData`])
	///
	/// [`ErrorKind::TooMuchData`]: crate::error::ErrorKind::TooMuchData
	pub fn write<T: Primitive>(&mut self, value: T) -> Result<()> {
		let mut buf = [0; 8];
		value.encode(&mut buf[..T::SIZE], self.endianness);

		self.write_payload(&buf[..T::SIZE])
	}

	/// Write consecutive values, in the file's byte order
	pub fn write_slice<T: Primitive>(&mut self, values: &[T]) -> Result<()> {
		let bytes = encode_slice(values, self.endianness);
		self.write_payload(&bytes)
	}

	/// Write raw bytes
	pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
		self.write_payload(bytes)
	}

	/// Write a fixed-length string field of `len` bytes, padded with NULs
	///
	/// # Errors
	///
	/// `value` is longer than `len`
	pub fn write_fixed_str(&mut self, value: impl AsRef<[u8]>, len: usize) -> Result<()> {
		let value = value.as_ref();
		if value.len() > len {
			encode_err!(@BAIL "String is longer than its fixed-length field");
		}

		let mut bytes = Vec::with_capacity(len);
		bytes.extend_from_slice(value);
		bytes.resize(len, 0);

		self.write_payload(&bytes)
	}

	/// Write a string prefixed by its length as a `u8`
	///
	/// # Errors
	///
	/// `value` is longer than 255 bytes
	pub fn write_u8_prefixed_str(&mut self, value: impl AsRef<[u8]>) -> Result<()> {
		self.write_prefixed_str(value.as_ref(), LengthPrefix::U8, false)
	}

	/// Write a string prefixed by its length as a `u16`
	///
	/// # Errors
	///
	/// `value` is longer than 65535 bytes
	pub fn write_u16_prefixed_str(&mut self, value: impl AsRef<[u8]>) -> Result<()> {
		self.write_prefixed_str(value.as_ref(), LengthPrefix::U16, false)
	}

	/// Write a `u8` length-prefixed string, followed by a NUL terminator
	///
	/// The prefix does not count the terminator.
	pub fn write_u8_prefixed_cstr(&mut self, value: impl AsRef<[u8]>) -> Result<()> {
		self.write_prefixed_str(value.as_ref(), LengthPrefix::U8, true)
	}

	/// Write a `u16` length-prefixed string, followed by a NUL terminator
	///
	/// The prefix does not count the terminator.
	pub fn write_u16_prefixed_cstr(&mut self, value: impl AsRef<[u8]>) -> Result<()> {
		self.write_prefixed_str(value.as_ref(), LengthPrefix::U16, true)
	}

	/// Write a NUL terminated string
	///
	/// # Errors
	///
	/// `value` contains a NUL byte
	pub fn write_cstr(&mut self, value: impl AsRef<[u8]>) -> Result<()> {
		let value = value.as_ref();
		if value.contains(&0) {
			encode_err!(@BAIL "String contains a NUL byte");
		}

		let mut bytes = Vec::with_capacity(value.len() + 1);
		bytes.extend_from_slice(value);
		bytes.push(0);

		self.write_payload(&bytes)
	}

	fn write_prefixed_str(
		&mut self,
		value: &[u8],
		prefix: LengthPrefix,
		terminated: bool,
	) -> Result<()> {
		let mut bytes = Vec::with_capacity(value.len() + 3);
		match prefix {
			LengthPrefix::U8 => {
				let Ok(len) = u8::try_from(value.len()) else {
					encode_err!(@BAIL "String is too long for a 1-byte length prefix");
				};
				bytes.push(len);
			},
			LengthPrefix::U16 => {
				let Ok(len) = u16::try_from(value.len()) else {
					encode_err!(@BAIL "String is too long for a 2-byte length prefix");
				};
				bytes.resize(2, 0);
				len.encode(&mut bytes, self.endianness);
			},
		}

		bytes.extend_from_slice(value);
		if terminated {
			bytes.push(0);
		}

		self.write_payload(&bytes)
	}

	// Every payload write goes through here, and is counted towards the innermost chunk.
	// Nothing is written unless every open chunk can still hold the result.
	fn write_payload(&mut self, bytes: &[u8]) -> Result<()> {
		self.ensure_open()?;

		let new_size = match self.frames.split_last() {
			Some((chunk, _)) if chunk.group => {
				encode_err!(@BAIL "Cannot write data directly into a group chunk", chunk.id.into_bytes())
			},
			Some((chunk, ancestors)) => {
				let size = chunk.grown_by(bytes.len() as u64)?;
				check_room(ancestors, footprint_of(size))?;
				size
			},
			None => encode_err!(@BAIL "No open chunk to write to"),
		};

		self.stream()?.write_all(bytes)?;
		self.pos += bytes.len() as u64;

		if let Some(chunk) = self.frames.last_mut() {
			chunk.size = new_size;
		}

		Ok(())
	}

	// Headers are not payload, and are not counted towards any chunk until it is ended
	fn write_header(&mut self, id: FourCC, format: Option<FourCC>) -> Result<()> {
		let endianness = self.endianness;
		let writer = self.stream()?;

		writer.write_all(id.as_bytes())?;
		write_u32(writer, endianness, PLACEHOLDER_SIZE)?;
		self.pos += CHUNK_HEADER_SIZE;

		if let Some(format) = format {
			self.stream()?.write_all(format.as_bytes())?;
			self.pos += FORMAT_TAG_SIZE;
		}

		Ok(())
	}

	fn check_accepts_children(&self) -> Result<()> {
		self.ensure_open()?;

		match self.frames.last() {
			Some(chunk) if chunk.group => Ok(()),
			Some(chunk) => {
				encode_err!(@BAIL "Cannot begin a chunk inside a leaf chunk", chunk.id.into_bytes())
			},
			None => encode_err!(@BAIL "No open group to begin a chunk in"),
		}
	}

	fn drain(&mut self) -> Result<W> {
		self.ensure_open()?;

		while !self.frames.is_empty() {
			self.end_chunk()?;
		}

		let Some(mut writer) = self.writer.take() else {
			err!(Closed);
		};

		writer.flush()?;

		log::debug!("Closed writer, {} bytes written", self.pos);
		Ok(writer)
	}

	fn ensure_open(&self) -> Result<()> {
		if self.writer.is_none() {
			err!(Closed);
		}

		Ok(())
	}

	fn stream(&mut self) -> Result<&mut W> {
		match self.writer.as_mut() {
			Some(writer) => Ok(writer),
			None => err!(Closed),
		}
	}
}

impl<W> Drop for ChunkWriter<W> {
	fn drop(&mut self) {
		if self.writer.is_some() && !self.frames.is_empty() {
			log::warn!(
				"Writer dropped with {} open chunk(s), their sizes were never written",
				self.frames.len()
			);
		}
	}
}

#[derive(Copy, Clone)]
enum LengthPrefix {
	U8,
	U16,
}
