#![allow(missing_docs)]

use riffle::config::ParsingMode;
use riffle::fourcc::{chunk_name, form_type_name, info_tag_name};
use riffle::prelude::*;

use structopt::StructOpt;

use std::path::PathBuf;

#[derive(Debug, StructOpt)]
#[structopt(name = "print_tree", about = "Print the chunk tree of a RIFF/RIFX file")]
struct Opt {
	/// Accept chunk IDs with non-alphanumeric characters
	#[structopt(short, long)]
	relaxed: bool,

	#[structopt(parse(from_os_str))]
	path: PathBuf,
}

fn describe(chunk: &ChunkHeader, in_info: bool) -> Option<&'static str> {
	if let Some(format) = chunk.format() {
		return form_type_name(format);
	}

	if in_info {
		return info_tag_name(chunk.id());
	}

	chunk_name(chunk.id())
}

fn main() {
	env_logger::init();

	let opt = Opt::from_args();

	let parsing_mode = if opt.relaxed {
		ParsingMode::Relaxed
	} else {
		ParsingMode::Strict
	};

	let mut reader = ChunkReader::open(&opt.path, ParseOptions::new().parsing_mode(parsing_mode))
		.expect("ERROR: Failed to open file!");

	println!("Byte order: {:?}", reader.endianness());

	// The format tag of the innermost group at each depth
	let mut formats: Vec<FourCC> = Vec::new();

	let mut walk = reader.walk().expect("ERROR: Failed to walk file!");
	while let Some(chunk) = walk.next() {
		let chunk = match chunk {
			Ok(chunk) => chunk,
			Err(e) => {
				eprintln!("ERROR: {e}");
				std::process::exit(1);
			},
		};

		let depth = walk.depth();
		formats.truncate(depth);

		let in_info = formats.last().is_some_and(|format| *format == *b"INFO");
		let name = describe(&chunk, in_info).unwrap_or("");

		let label = match chunk.format() {
			Some(format) => format!("{}:{format}", chunk.id()),
			None => chunk.id().to_string(),
		};

		println!(
			"{:indent$}{label:<9} {:>10} bytes @ {:<10} {name}",
			"",
			chunk.size(),
			chunk.offset(),
			indent = depth * 2
		);

		if let Some(format) = chunk.format() {
			formats.push(format);
		}
	}
}
