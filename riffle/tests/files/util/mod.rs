use riffle::chunk::{ChunkHeader, FourCC};
use riffle::config::{ParseOptions, WriteOptions};
use riffle::error::Result;
use riffle::io::Endianness;
use riffle::read::ChunkReader;
use riffle::write::ChunkWriter;

use std::io::{Cursor, Read, Seek, Write};

/// A writer over an in-memory buffer, with the format tag `test`
pub fn memory_writer(endianness: Endianness) -> ChunkWriter<Cursor<Vec<u8>>> {
	ChunkWriter::new(
		Cursor::new(Vec::new()),
		FourCC::new(*b"test"),
		endianness,
		WriteOptions::new(),
	)
	.unwrap()
}

/// Close `writer`, and open a reader over the written bytes
pub fn reopen(writer: ChunkWriter<Cursor<Vec<u8>>>) -> ChunkReader<Cursor<Vec<u8>>> {
	let file = writer.finish().unwrap().into_inner();
	ChunkReader::new(Cursor::new(file), ParseOptions::new()).unwrap()
}

/// `(depth, id, format)` for every chunk in a full walk
pub fn walk_tree<R>(reader: &mut ChunkReader<R>) -> Vec<(usize, FourCC, Option<FourCC>)>
where
	R: Read + Seek,
{
	let mut chunks = Vec::new();

	let mut walk = reader.walk().unwrap();
	while let Some(chunk) = walk.next() {
		let chunk = chunk.unwrap();
		chunks.push((walk.depth(), chunk.id(), chunk.format()));
	}

	chunks
}

/// Call `f` with every chunk below the reader's current group, in pre-order
///
/// The reader is positioned at the chunk being visited, so `f` is free to read its payload.
pub fn visit<R, F>(reader: &mut ChunkReader<R>, f: &mut F)
where
	R: Read + Seek,
	F: FnMut(&mut ChunkReader<R>, ChunkHeader),
{
	if !reader.has_subchunks().unwrap() {
		return;
	}

	let mut chunk = reader.enter_group().unwrap();
	loop {
		f(reader, chunk);
		if chunk.is_group() {
			visit(reader, f);
		}

		if !reader.has_next_chunk().unwrap() {
			break;
		}
		chunk = reader.next_chunk().unwrap();
	}

	reader.exit_group().unwrap();
}

/// The id and payload of every leaf chunk, in pre-order
pub fn leaf_payloads<R>(reader: &mut ChunkReader<R>) -> Vec<(FourCC, Vec<u8>)>
where
	R: Read + Seek,
{
	let mut leaves = Vec::new();
	visit(reader, &mut |reader, chunk| {
		if !chunk.is_group() {
			let len = reader.payload_len().unwrap() as usize;
			leaves.push((chunk.id(), reader.read_bytes(len).unwrap()));
		}
	});

	leaves
}

/// Verify that every group's size is its format tag plus the padded footprint of its children
pub fn assert_group_sizes<R>(reader: &mut ChunkReader<R>)
where
	R: Read + Seek,
{
	let group = reader.current_chunk().unwrap();
	assert!(group.is_group());

	let mut expected = 4;
	if reader.has_subchunks().unwrap() {
		let mut chunk = reader.enter_group().unwrap();
		loop {
			expected += 8 + chunk.size() + chunk.size() % 2;
			if chunk.is_group() {
				assert_group_sizes(reader);
			}

			if !reader.has_next_chunk().unwrap() {
				break;
			}
			chunk = reader.next_chunk().unwrap();
		}
		reader.exit_group().unwrap();
	}

	assert_eq!(group.size(), expected, "size mismatch for {}", group.id());
}

/// Copy the children of the reader's current group into the writer's innermost open group
///
/// Leaf payloads are copied in blocks of `block_size` bytes.
pub fn copy_children<R, W>(
	reader: &mut ChunkReader<R>,
	writer: &mut ChunkWriter<W>,
	block_size: usize,
) -> Result<()>
where
	R: Read + Seek,
	W: Write + Seek,
{
	if !reader.has_subchunks()? {
		return Ok(());
	}

	let mut block = vec![0; block_size];
	let mut chunk = reader.enter_group()?;
	loop {
		match chunk.format() {
			Some(format) => {
				writer.begin_group_chunk(format)?;
				copy_children(reader, writer, block_size)?;
			},
			None => {
				writer.begin_chunk(chunk.id())?;

				let mut remaining = reader.payload_len()?;
				while remaining > 0 {
					let len = remaining.min(block_size as u64) as usize;
					reader.read_bytes_into(&mut block[..len])?;
					writer.write_bytes(&block[..len])?;
					remaining -= len as u64;
				}
			},
		}
		writer.end_chunk()?;

		if !reader.has_next_chunk()? {
			break;
		}
		chunk = reader.next_chunk()?;
	}

	reader.exit_group()
}
