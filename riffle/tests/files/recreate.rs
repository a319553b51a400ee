use crate::scenario::write_scenario;
use crate::util::{copy_children, walk_tree};

use riffle::chunk::FourCC;
use riffle::config::{ParseOptions, WriteOptions};
use riffle::io::Endianness;
use riffle::read::ChunkReader;
use riffle::write::ChunkWriter;

use tempfile::NamedTempFile;

use std::path::Path;

fn recreate(input: &Path, output: &Path, block_size: usize) {
	let mut reader = ChunkReader::open(input, ParseOptions::new()).unwrap();
	let mut writer = ChunkWriter::create(
		output,
		reader.format(),
		reader.endianness(),
		WriteOptions::new(),
	)
	.unwrap();

	copy_children(&mut reader, &mut writer, block_size).unwrap();
	writer.close().unwrap();
	reader.close().unwrap();
}

#[test_log::test]
fn structural_copy_is_byte_identical() {
	for endianness in [Endianness::Little, Endianness::Big] {
		let input = NamedTempFile::new().unwrap();
		let mut writer = ChunkWriter::create(
			input.path(),
			FourCC::new(*b"test"),
			endianness,
			WriteOptions::new(),
		)
		.unwrap();
		write_scenario(&mut writer);
		writer.close().unwrap();

		for block_size in [1, 777, 4096] {
			let output = NamedTempFile::new().unwrap();
			recreate(input.path(), output.path(), block_size);

			let original = std::fs::read(input.path()).unwrap();
			let copy = std::fs::read(output.path()).unwrap();
			assert_eq!(original.len(), copy.len());
			assert!(original == copy, "copy differs with a block size of {block_size}");
		}
	}
}

#[test_log::test]
fn copy_walks_the_same() {
	let input = NamedTempFile::new().unwrap();
	let mut writer = ChunkWriter::create(
		input.path(),
		FourCC::new(*b"test"),
		Endianness::Little,
		WriteOptions::new(),
	)
	.unwrap();
	write_scenario(&mut writer);
	writer.close().unwrap();

	let output = NamedTempFile::new().unwrap();
	recreate(input.path(), output.path(), 512);

	let mut original = ChunkReader::open(input.path(), ParseOptions::new()).unwrap();
	let mut copy = ChunkReader::open(output.path(), ParseOptions::new().buffer_size(64)).unwrap();
	assert_eq!(walk_tree(&mut original), walk_tree(&mut copy));
}
