use crate::util::{assert_group_sizes, leaf_payloads, memory_writer, reopen, walk_tree};

use riffle::chunk::FourCC;
use riffle::io::Endianness;
use riffle::write::ChunkWriter;

use std::io::Cursor;

fn tag(bytes: &[u8; 4]) -> FourCC {
	FourCC::new(*bytes)
}

// RIFF "test"
// ├── LIST "INFO"
// │   ├── "INAM"
// │   └── "IART"
// ├── "odd "
// ├── LIST "nest"
// │   ├── LIST "deep"
// │   │   └── "leaf"
// │   └── "tail"
// ├── LIST "empt"
// └── "last"
fn write_tree(writer: &mut ChunkWriter<Cursor<Vec<u8>>>) {
	writer.begin_group_chunk(tag(b"INFO")).unwrap();
	writer.begin_chunk(tag(b"INAM")).unwrap();
	writer.write_cstr("Riffle").unwrap();
	writer.end_chunk().unwrap();
	writer.begin_chunk(tag(b"IART")).unwrap();
	writer.write_cstr("Someone").unwrap();
	writer.end_chunk().unwrap();
	writer.end_chunk().unwrap();

	writer.begin_chunk(tag(b"odd ")).unwrap();
	writer.write_bytes(&[1, 2, 3]).unwrap();
	writer.end_chunk().unwrap();

	writer.begin_group_chunk(tag(b"nest")).unwrap();
	writer.begin_group_chunk(tag(b"deep")).unwrap();
	writer.begin_chunk(tag(b"leaf")).unwrap();
	writer.write_bytes(&[9; 5]).unwrap();
	writer.end_chunk().unwrap();
	writer.end_chunk().unwrap();
	writer.begin_chunk(tag(b"tail")).unwrap();
	writer.write(42_u32).unwrap();
	writer.end_chunk().unwrap();
	writer.end_chunk().unwrap();

	writer.begin_group_chunk(tag(b"empt")).unwrap();
	writer.end_chunk().unwrap();

	// Left open, `finish` takes care of it
	writer.begin_chunk(tag(b"last")).unwrap();
	writer.write_u16_prefixed_str("hello").unwrap();
}

#[test_log::test]
fn walk_reproduces_tree() {
	for endianness in [Endianness::Little, Endianness::Big] {
		let mut writer = memory_writer(endianness);
		write_tree(&mut writer);

		let mut reader = reopen(writer);
		assert_eq!(reader.endianness(), endianness);

		let expected = [
			(0, endianness.root_tag(), Some(tag(b"test"))),
			(1, FourCC::LIST, Some(tag(b"INFO"))),
			(2, tag(b"INAM"), None),
			(2, tag(b"IART"), None),
			(1, tag(b"odd "), None),
			(1, FourCC::LIST, Some(tag(b"nest"))),
			(2, FourCC::LIST, Some(tag(b"deep"))),
			(3, tag(b"leaf"), None),
			(2, tag(b"tail"), None),
			(1, FourCC::LIST, Some(tag(b"empt"))),
			(1, tag(b"last"), None),
		];

		assert_eq!(walk_tree(&mut reader), expected);
	}
}

#[test_log::test]
fn leaf_payloads_are_identical() {
	for endianness in [Endianness::Little, Endianness::Big] {
		let mut writer = memory_writer(endianness);
		write_tree(&mut writer);

		let mut reader = reopen(writer);

		let (tail, last_prefix) = match endianness {
			Endianness::Little => (42_u32.to_le_bytes(), [5, 0]),
			Endianness::Big => (42_u32.to_be_bytes(), [0, 5]),
		};

		let mut last = last_prefix.to_vec();
		last.extend_from_slice(b"hello");

		let expected = vec![
			(tag(b"INAM"), b"Riffle\0".to_vec()),
			(tag(b"IART"), b"Someone\0".to_vec()),
			(tag(b"odd "), vec![1, 2, 3]),
			(tag(b"leaf"), vec![9; 5]),
			(tag(b"tail"), tail.to_vec()),
			(tag(b"last"), last),
		];

		assert_eq!(leaf_payloads(&mut reader), expected);

		// The visit leaves the reader back at the root
		assert_eq!(reader.depth(), 0);
	}
}

#[test_log::test]
fn group_sizes_add_up() {
	let mut writer = memory_writer(Endianness::Little);
	write_tree(&mut writer);

	let mut reader = reopen(writer);
	assert_group_sizes(&mut reader);

	// INFO: 4 + (8 + 7 + 1) + (8 + 8)
	reader.enter_group().unwrap();
	assert_eq!(reader.current_chunk().unwrap().size(), 36);
	assert!(reader.next_chunk().unwrap().size() % 2 == 1);
}

#[test_log::test]
fn typed_reads_match_writes() {
	let mut writer = memory_writer(Endianness::Big);
	writer.begin_chunk(tag(b"vals")).unwrap();
	writer.write(-7_i8).unwrap();
	writer.write(-300_i16).unwrap();
	writer.write(i64::MIN).unwrap();
	writer.write(-0.25_f32).unwrap();
	writer.write_slice(&[1_u16, 2, 3]).unwrap();
	writer.write_fixed_str("abc", 8).unwrap();
	writer.write_u8_prefixed_cstr("pre").unwrap();
	writer.write_u8_prefixed_str("").unwrap();
	writer.end_chunk().unwrap();

	let mut reader = reopen(writer);
	reader.enter_group().unwrap();

	assert_eq!(reader.read::<i8>().unwrap(), -7);
	assert_eq!(reader.read::<i16>().unwrap(), -300);
	assert_eq!(reader.read::<i64>().unwrap(), i64::MIN);
	assert_eq!(reader.read::<f32>().unwrap(), -0.25);
	assert_eq!(reader.read_array::<u16>(3).unwrap(), [1, 2, 3]);
	assert_eq!(reader.read_fixed_str(8).unwrap(), b"abc");
	assert_eq!(reader.read_u8_prefixed_cstr().unwrap(), b"pre");
	assert!(reader.read_u8_prefixed_str().unwrap().is_empty());

	assert!(reader.read::<u8>().is_err());
}
