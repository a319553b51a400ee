use crate::util::walk_tree;

use riffle::chunk::FourCC;
use riffle::config::{ParseOptions, WriteOptions};
use riffle::io::Endianness;
use riffle::read::ChunkReader;
use riffle::write::ChunkWriter;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use std::io::Cursor;

const SAMPLE_RATE: u32 = 8000;

fn tone(len: usize) -> Vec<i16> {
	(0..len).map(|i| ((i % 64) as i16 - 32) * 512).collect()
}

#[test_log::test]
fn read_hound_wav() {
	let spec = WavSpec {
		channels: 2,
		sample_rate: 44100,
		bits_per_sample: 16,
		sample_format: SampleFormat::Int,
	};

	let samples = tone(2000);

	let mut file = Cursor::new(Vec::new());
	let mut wav_writer = WavWriter::new(&mut file, spec).unwrap();
	for sample in &samples {
		wav_writer.write_sample(*sample).unwrap();
	}
	wav_writer.finalize().unwrap();

	file.set_position(0);
	let mut reader = ChunkReader::new(file, ParseOptions::new()).unwrap();
	assert_eq!(reader.endianness(), Endianness::Little);
	assert_eq!(reader.format(), FourCC::new(*b"WAVE"));

	let ids = walk_tree(&mut reader)
		.into_iter()
		.map(|(_, id, _)| id)
		.collect::<Vec<_>>();
	assert!(ids.contains(&FourCC::new(*b"fmt ")));
	assert!(ids.contains(&FourCC::new(*b"data")));

	let mut chunk = reader.enter_group().unwrap();
	loop {
		if chunk.id() == *b"fmt " {
			let format_tag = reader.read::<u16>().unwrap();
			assert!(matches!(format_tag, 1 | 0xFFFE));
			assert_eq!(reader.read::<u16>().unwrap(), spec.channels);
			assert_eq!(reader.read::<u32>().unwrap(), spec.sample_rate);
		}

		if chunk.id() == *b"data" {
			assert_eq!(reader.payload_len().unwrap(), samples.len() as u64 * 2);
			assert_eq!(reader.read_array::<i16>(samples.len()).unwrap(), samples);
		}

		if !reader.has_next_chunk().unwrap() {
			break;
		}
		chunk = reader.next_chunk().unwrap();
	}
}

#[test_log::test]
fn hound_reads_written_wav() {
	let samples = tone(1001);

	let mut writer = ChunkWriter::new(
		Cursor::new(Vec::new()),
		FourCC::new(*b"WAVE"),
		Endianness::Little,
		WriteOptions::new(),
	)
	.unwrap();

	writer.begin_chunk(FourCC::new(*b"fmt ")).unwrap();
	writer.write(1_u16).unwrap(); // PCM
	writer.write(1_u16).unwrap(); // Channels
	writer.write(SAMPLE_RATE).unwrap();
	writer.write(SAMPLE_RATE * 2).unwrap(); // Byte rate
	writer.write(2_u16).unwrap(); // Block align
	writer.write(16_u16).unwrap(); // Bits per sample
	writer.end_chunk().unwrap();

	writer.begin_chunk(FourCC::new(*b"data")).unwrap();
	writer.write_slice(&samples).unwrap();
	writer.end_chunk().unwrap();

	let mut file = writer.finish().unwrap();
	file.set_position(0);

	let mut wav_reader = WavReader::new(file).unwrap();
	let spec = wav_reader.spec();
	assert_eq!(spec.channels, 1);
	assert_eq!(spec.sample_rate, SAMPLE_RATE);
	assert_eq!(spec.bits_per_sample, 16);

	let read = wav_reader
		.samples::<i16>()
		.collect::<Result<Vec<_>, _>>()
		.unwrap();
	assert_eq!(read, samples);
}
