#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use riffle::config::{ParseOptions, ParsingMode};
use riffle::read::ChunkReader;

fuzz_target!(|data: Vec<u8>| {
	let options = ParseOptions::new().parsing_mode(ParsingMode::Relaxed);
	if let Ok(mut reader) = ChunkReader::new(Cursor::new(data), options) {
		if let Ok(walk) = reader.walk() {
			for chunk in walk {
				if chunk.is_err() {
					break;
				}
			}
		}

		// The walk always leaves the reader at the root
		assert_eq!(reader.depth(), 0);
	}
});
