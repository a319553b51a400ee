/// The FourCC validation strictness
///
/// Every chunk ID and format tag is validated against this mode, whether it was read from disk
/// or handed to a [`ChunkWriter`](crate::write::ChunkWriter).
///
/// # Examples
///
/// ```rust
/// use riffle::config::{ParseOptions, ParsingMode};
///
/// // Some trackers write tags such as "MOD!", accept them
/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Relaxed);
/// ```
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Only ASCII alphanumerics and trailing spaces are accepted
	///
	/// ## Examples of behavior
	///
	/// * `"PAD "` - Accepted
	/// * `"A BC"` - Rejected, a space may only be followed by spaces
	/// * `"MOD!"` - Rejected, `'!'` is not alphanumeric
	#[default]
	Strict,
	/// Any byte is accepted, the trailing space rule still applies
	///
	/// ## Examples of behavior
	///
	/// * `"MOD!"` - Accepted
	/// * `"A BC"` - Rejected
	Relaxed,
}

/// Options to control how Riffle reads a file
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) parsing_mode: ParsingMode,
	pub(crate) buffer_size: usize,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	parsing_mode: ParsingMode::Strict,
	/// 	buffer_size: 8192,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Default parsing mode
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::Strict;

	/// Default size of the read buffer used by [`ChunkReader::open`](crate::read::ChunkReader::open)
	pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// See also: [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use riffle::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			parsing_mode: Self::DEFAULT_PARSING_MODE,
			buffer_size: Self::DEFAULT_BUFFER_SIZE,
		}
	}

	/// The parsing mode to use, see [`ParsingMode`] for details
	///
	/// # Examples
	///
	/// ```rust
	/// use riffle::config::{ParseOptions, ParsingMode};
	///
	/// // By default, `parsing_mode` is ParsingMode::Strict. Here, we accept any tag bytes.
	/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Relaxed);
	/// ```
	pub fn parsing_mode(&mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		*self
	}

	/// The size of the read buffer, in bytes
	///
	/// This only applies to files opened with [`ChunkReader::open`](crate::read::ChunkReader::open).
	/// Readers passed to [`ChunkReader::new`](crate::read::ChunkReader::new) are used as-is.
	///
	/// # Examples
	///
	/// ```rust
	/// use riffle::config::ParseOptions;
	///
	/// // Mostly skipping over large `data` chunks, a small buffer will do
	/// let parsing_options = ParseOptions::new().buffer_size(512);
	/// ```
	pub fn buffer_size(&mut self, buffer_size: usize) -> Self {
		self.buffer_size = buffer_size;
		*self
	}
}
