use super::ParsingMode;

/// Options to control how Riffle writes a file
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
	pub(crate) validation_mode: ParsingMode,
	pub(crate) buffer_size: usize,
}

impl WriteOptions {
	/// Default validation mode for chunk IDs and format tags
	pub const DEFAULT_VALIDATION_MODE: ParsingMode = ParsingMode::Strict;

	/// Default size of the write buffer used by [`ChunkWriter::create`](crate::write::ChunkWriter::create)
	pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

	/// Creates a new `WriteOptions`, alias for `Default` implementation
	///
	/// See also: [`WriteOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use riffle::config::WriteOptions;
	///
	/// let write_options = WriteOptions::new();
	/// ```
	pub const fn new() -> Self {
		Self {
			validation_mode: Self::DEFAULT_VALIDATION_MODE,
			buffer_size: Self::DEFAULT_BUFFER_SIZE,
		}
	}

	/// How strictly to validate chunk IDs and format tags before writing them
	///
	/// # Examples
	///
	/// ```rust
	/// use riffle::config::{ParsingMode, WriteOptions};
	///
	/// // I need to write a "MOD!" chunk
	/// let options = WriteOptions::new().validation_mode(ParsingMode::Relaxed);
	/// ```
	pub fn validation_mode(mut self, validation_mode: ParsingMode) -> Self {
		self.validation_mode = validation_mode;
		self
	}

	/// The size of the write buffer, in bytes
	///
	/// This only applies to files created with [`ChunkWriter::create`](crate::write::ChunkWriter::create).
	///
	/// # Examples
	///
	/// ```rust
	/// use riffle::config::WriteOptions;
	///
	/// let options = WriteOptions::new().buffer_size(64 * 1024);
	/// ```
	pub fn buffer_size(mut self, buffer_size: usize) -> Self {
		self.buffer_size = buffer_size;
		self
	}
}

impl Default for WriteOptions {
	/// The default implementation for `WriteOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// WriteOptions {
	/// 	validation_mode: ParsingMode::Strict,
	/// 	buffer_size: 8192,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}
