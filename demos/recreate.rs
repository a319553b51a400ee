#![allow(missing_docs)]

use riffle::config::ParsingMode;
use riffle::error::Result;
use riffle::prelude::*;

use structopt::StructOpt;

use std::io::{Read, Seek, Write};
use std::path::PathBuf;

#[derive(Debug, StructOpt)]
#[structopt(
	name = "recreate",
	about = "Copy a RIFF/RIFX file chunk by chunk, recomputing every size"
)]
struct Opt {
	#[structopt(parse(from_os_str))]
	input: PathBuf,

	#[structopt(parse(from_os_str))]
	output: PathBuf,
}

const BLOCK_SIZE: usize = 4096;

// Copy the children of the reader's current group into the writer's innermost open group
fn copy_children<R, W>(reader: &mut ChunkReader<R>, writer: &mut ChunkWriter<W>) -> Result<()>
where
	R: Read + Seek,
	W: Write + Seek,
{
	if !reader.has_subchunks()? {
		return Ok(());
	}

	let mut chunk = reader.enter_group()?;
	loop {
		match chunk.format() {
			Some(format) => {
				writer.begin_group_chunk(format)?;
				copy_children(reader, writer)?;
			},
			None => {
				writer.begin_chunk(chunk.id())?;

				let mut block = [0; BLOCK_SIZE];
				let mut remaining = reader.payload_len()?;
				while remaining > 0 {
					let len = remaining.min(BLOCK_SIZE as u64) as usize;
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

fn main() {
	env_logger::init();

	let opt = Opt::from_args();

	let mut reader = ChunkReader::open(
		&opt.input,
		ParseOptions::new().parsing_mode(ParsingMode::Relaxed),
	)
	.expect("ERROR: Failed to open input file!");

	let mut writer = ChunkWriter::create(
		&opt.output,
		reader.format(),
		reader.endianness(),
		WriteOptions::new().validation_mode(ParsingMode::Relaxed),
	)
	.expect("ERROR: Failed to create output file!");

	copy_children(&mut reader, &mut writer).expect("ERROR: Failed to copy file!");
	writer.close().expect("ERROR: Failed to finish output file!");

	println!(
		"INFO: Copied {} to {}",
		opt.input.display(),
		opt.output.display()
	);
}
