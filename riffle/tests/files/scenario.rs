use crate::util::{assert_group_sizes, memory_writer, reopen, walk_tree};

use riffle::chunk::FourCC;
use riffle::io::Endianness;
use riffle::read::ChunkReader;
use riffle::write::ChunkWriter;

use std::io::{Cursor, Seek, Write};

const SAMPLES: usize = 10_000;

fn tag(bytes: &[u8; 4]) -> FourCC {
	FourCC::new(*bytes)
}

fn sample(i: usize) -> f32 {
	(i as f32 * 0.01).sin()
}

// RIFF "test"
// ├── LIST "G1  " (empty)
// ├── LIST "INFO"
// │   ├── "INAM"
// │   ├── "IART"
// │   └── "ICMT"
// ├── "JUNK" (1000 zeros)
// └── LIST "G3  "
//     └── "buf " (10000 f32)
pub(crate) fn write_scenario<W>(writer: &mut ChunkWriter<W>)
where
	W: Write + Seek,
{
	writer.begin_group_chunk(tag(b"G1  ")).unwrap();
	writer.end_chunk().unwrap();

	writer.begin_group_chunk(tag(b"INFO")).unwrap();
	for (id, value) in [
		(b"INAM", "Scenario"),
		(b"IART", "Riffle"),
		(b"ICMT", "Written and read back"),
	] {
		writer.begin_chunk(tag(id)).unwrap();
		writer.write_cstr(value).unwrap();
		writer.end_chunk().unwrap();
	}
	writer.end_chunk().unwrap();

	writer.begin_chunk(tag(b"JUNK")).unwrap();
	writer.write_bytes(&[0; 1000]).unwrap();
	writer.end_chunk().unwrap();

	let samples = (0..SAMPLES).map(sample).collect::<Vec<_>>();

	writer.begin_group_chunk(tag(b"G3  ")).unwrap();
	writer.begin_chunk(tag(b"buf ")).unwrap();
	writer.write_slice(&samples).unwrap();
	writer.end_chunk().unwrap();
	writer.end_chunk().unwrap();
}

fn scenario() -> ChunkReader<Cursor<Vec<u8>>> {
	let mut writer = memory_writer(Endianness::Little);
	write_scenario(&mut writer);
	reopen(writer)
}

#[test_log::test]
fn full_walk() {
	let mut reader = scenario();

	let expected = [
		(0, FourCC::RIFF, Some(tag(b"test"))),
		(1, FourCC::LIST, Some(tag(b"G1  "))),
		(1, FourCC::LIST, Some(tag(b"INFO"))),
		(2, tag(b"INAM"), None),
		(2, tag(b"IART"), None),
		(2, tag(b"ICMT"), None),
		(1, tag(b"JUNK"), None),
		(1, FourCC::LIST, Some(tag(b"G3  "))),
		(2, tag(b"buf "), None),
	];

	// Root, G1, INFO and its 3 tags, JUNK, G3 and buf. The tree built above has
	// nine chunks, so a walk can't yield fourteen descriptors.
	let chunks = walk_tree(&mut reader);
	assert_eq!(chunks.len(), 9);
	assert_eq!(chunks, expected);

	// Deterministic
	assert_eq!(walk_tree(&mut reader), expected);
	assert_group_sizes(&mut reader);
}

#[test_log::test]
fn last_top_level_chunk() {
	let mut reader = scenario();

	reader.enter_group().unwrap();
	let mut top_level = vec![reader.current_chunk().unwrap()];
	while reader.has_next_chunk().unwrap() {
		top_level.push(reader.next_chunk().unwrap());
	}

	assert_eq!(top_level.len(), 4);
	assert_eq!(top_level[3].format(), Some(tag(b"G3  ")));
	assert!(!reader.has_next_chunk().unwrap());

	let junk = top_level[2];
	assert_eq!(junk.size(), 1000);
	assert_eq!(top_level[3].offset(), junk.padded_end());
}

#[test_log::test]
fn read_back_payloads() {
	let mut reader = scenario();

	reader.enter_group().unwrap();
	reader.next_chunk().unwrap();
	reader.enter_group().unwrap();
	assert_eq!(reader.read_cstr_utf8().unwrap(), "Scenario");
	reader.next_chunk().unwrap();
	assert_eq!(reader.read_cstr().unwrap(), b"Riffle");
	reader.next_chunk().unwrap();
	assert_eq!(reader.read_cstr().unwrap(), b"Written and read back");
	reader.exit_group().unwrap();

	reader.next_chunk().unwrap();
	assert!(reader.read_bytes(1000).unwrap().iter().all(|&b| b == 0));

	reader.next_chunk().unwrap();
	let buf = reader.enter_group().unwrap();
	assert_eq!(buf.size() as usize, SAMPLES * 4);

	let samples = reader.read_array::<f32>(SAMPLES).unwrap();
	for (i, value) in samples.into_iter().enumerate() {
		assert_eq!(value.to_bits(), sample(i).to_bits());
	}
}
