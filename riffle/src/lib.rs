//! Read and write RIFF/RIFX chunk trees.
//!
//! RIFF is a container format made of tagged, length-prefixed chunks. Chunks tagged `RIFF`,
//! `RIFX`, or `LIST` are groups holding further chunks, every other chunk holds raw data.
//! It is used by WAV, AVI, WebP, and many other formats.
//!
//! Riffle does not know about any of these formats. It provides a streaming [`ChunkReader`]
//! that walks the tree with a single cursor, and a [`ChunkWriter`] that builds a tree while
//! keeping track of chunk sizes and padding.
//!
//! # Examples
//!
//! ## Writing a file
//!
//! ```rust
//! # fn main() -> riffle::error::Result<()> {
//! use riffle::prelude::*;
//! use std::io::Cursor;
//!
//! let mut writer = ChunkWriter::new(
//! 	Cursor::new(Vec::new()),
//! 	FourCC::new(*b"WAVE"),
//! 	Endianness::Little,
//! 	WriteOptions::new(),
//! )?;
//!
//! writer.begin_chunk(FourCC::new(*b"fmt "))?;
//! writer.write(1_u16)?; // PCM
//! writer.write(2_u16)?; // Channels
//! writer.write(44100_u32)?; // Sample rate
//! writer.end_chunk()?;
//!
//! writer.begin_chunk(FourCC::new(*b"data"))?;
//! writer.write_slice(&[0_i16, 100, -100, 0])?;
//! writer.end_chunk()?;
//!
//! let file = writer.finish()?;
//! # assert_eq!(file.get_ref().len(), 12 + 16 + 16);
//! # Ok(()) }
//! ```
//!
//! ## Walking a file
//!
//! ```rust,no_run
//! # fn main() -> riffle::error::Result<()> {
//! use riffle::fourcc::chunk_name;
//! use riffle::prelude::*;
//!
//! let mut reader = ChunkReader::open("test.wav", ParseOptions::new())?;
//!
//! let mut walk = reader.walk()?;
//! while let Some(chunk) = walk.next() {
//! 	let chunk = chunk?;
//! 	let name = chunk_name(chunk.id()).unwrap_or("Unknown");
//! 	println!("{}: {name} ({} bytes)", chunk.id(), chunk.size());
//! }
//! # Ok(()) }
//! ```
//!
//! ## Reading chunk data
//!
//! ```rust,no_run
//! # fn main() -> riffle::error::Result<()> {
//! use riffle::prelude::*;
//!
//! let mut reader = ChunkReader::open("test.wav", ParseOptions::new())?;
//! assert_eq!(reader.format(), FourCC::new(*b"WAVE"));
//!
//! if reader.has_subchunks()? {
//! 	let mut chunk = reader.enter_group()?;
//! 	loop {
//! 		if chunk.id() == *b"fmt " {
//! 			let format_tag = reader.read::<u16>()?;
//! 			let channels = reader.read::<u16>()?;
//! 			println!("Format: {format_tag}, channels: {channels}");
//! 		}
//!
//! 		if !reader.has_next_chunk()? {
//! 			break;
//! 		}
//! 		chunk = reader.next_chunk()?;
//! 	}
//! }
//! # Ok(()) }
//! ```
//!
//! [`ChunkReader`]: read::ChunkReader
//! [`ChunkWriter`]: write::ChunkWriter
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod chunk;
pub mod config;
pub mod error;
pub mod fourcc;
pub mod io;
pub(crate) mod macros;
pub mod read;
mod util;
pub mod write;

pub mod prelude {
	//! A prelude for commonly used items in the library.
	//!
	//! This module is intended to be wildcard imported.
	//!
	//! ```rust
	//! use riffle::prelude::*;
	//! ```

	pub use crate::chunk::{ChunkHeader, ChunkKind, FourCC};
	pub use crate::config::{ParseOptions, ParsingMode, WriteOptions};
	pub use crate::io::Endianness;
	pub use crate::read::ChunkReader;
	pub use crate::write::ChunkWriter;
}
