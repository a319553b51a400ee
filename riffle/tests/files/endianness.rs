use crate::util::memory_writer;

use riffle::chunk::FourCC;
use riffle::config::ParseOptions;
use riffle::io::Endianness;
use riffle::read::ChunkReader;

use std::io::Cursor;

const INT: u32 = 0xDEAD_BEEF;
const FLOAT: f64 = 987_654.765_432_123_4;

fn numbers(endianness: Endianness) -> Vec<u8> {
	let mut writer = memory_writer(endianness);
	writer.begin_chunk(FourCC::new(*b"nums")).unwrap();
	writer.write(INT).unwrap();
	writer.write(FLOAT).unwrap();

	writer.finish().unwrap().into_inner()
}

#[test_log::test]
fn values_survive_both_byte_orders() {
	for endianness in [Endianness::Little, Endianness::Big] {
		let file = numbers(endianness);
		let mut reader = ChunkReader::new(Cursor::new(file), ParseOptions::new()).unwrap();
		assert_eq!(reader.endianness(), endianness);

		let nums = reader.enter_group().unwrap();
		assert_eq!(nums.size(), 12);

		assert_eq!(reader.read::<u32>().unwrap(), INT);
		assert_eq!(reader.read::<f64>().unwrap().to_bits(), FLOAT.to_bits());
	}
}

#[test_log::test]
fn root_tag_selects_byte_order() {
	let little = numbers(Endianness::Little);
	assert_eq!(&little[..4], b"RIFF");
	assert_eq!(&little[4..8], &24_u32.to_le_bytes());
	assert_eq!(&little[20..24], &[0xEF, 0xBE, 0xAD, 0xDE]);
	assert_eq!(&little[24..32], &FLOAT.to_le_bytes());

	let big = numbers(Endianness::Big);
	assert_eq!(&big[..4], b"RIFX");
	assert_eq!(&big[4..8], &24_u32.to_be_bytes());
	assert_eq!(&big[20..24], &[0xDE, 0xAD, 0xBE, 0xEF]);
	assert_eq!(&big[24..32], &FLOAT.to_be_bytes());

	// Same payload, different reading of it
	let mut swapped = big.clone();
	swapped[..4].copy_from_slice(b"RIFF");
	swapped[4..8].copy_from_slice(&24_u32.to_le_bytes());
	swapped[16..20].copy_from_slice(&12_u32.to_le_bytes());

	let mut reader = ChunkReader::new(Cursor::new(swapped), ParseOptions::new()).unwrap();
	reader.enter_group().unwrap();
	assert_eq!(reader.read::<u32>().unwrap(), INT.swap_bytes());
}
