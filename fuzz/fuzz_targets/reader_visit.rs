#![no_main]

use std::io::{Cursor, Read, Seek};

use libfuzzer_sys::fuzz_target;
use riffle::config::ParseOptions;
use riffle::error::Result;
use riffle::read::ChunkReader;

// Read every leaf payload, exercising bounded reads alongside navigation
fn visit<R: Read + Seek>(reader: &mut ChunkReader<R>) -> Result<()> {
	if !reader.has_subchunks()? {
		let len = reader.payload_len()?.min(1024) as usize;
		let _ = reader.read_bytes(len)?;
		let _ = reader.read_cstr();
		return Ok(());
	}

	reader.enter_group()?;
	loop {
		visit(reader)?;
		if !reader.has_next_chunk()? {
			break;
		}
		reader.next_chunk()?;
	}

	reader.exit_group()
}

fuzz_target!(|data: Vec<u8>| {
	if let Ok(mut reader) = ChunkReader::new(Cursor::new(data), ParseOptions::new()) {
		let _ = visit(&mut reader);
	}
});
