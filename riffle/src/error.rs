//! Contains the errors that can arise within Riffle
//!
//! The primary error is [`RiffError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, RiffError>`
pub type Result<T> = std::result::Result<T, RiffError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Structure related errors
	/// Errors that occur while decoding the chunk tree
	Decoding(ChunkDecodingError),
	/// Errors that occur while encoding the chunk tree
	Encoding(ChunkEncodingError),
	/// Attempted to move or access data outside the bounds of the current chunk
	///
	/// This covers reads, writes, and seeks that cross the end of a chunk, as well as
	/// navigation with no destination (no next sibling, no children, or no parent).
	/// The instance remains usable after this error.
	OutOfBounds(&'static str),
	/// Attempted to use a reader or writer that has already been closed
	Closed,

	// Data related errors
	/// Attempting to read/write an abnormally large amount of data
	///
	/// This is also raised when a chunk's size would no longer fit in its 32-bit size field.
	TooMuchData,

	// Conversions for external errors
	/// Unable to convert bytes to a String
	StringFromUtf8(std::string::FromUtf8Error),
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
	/// Failure to allocate enough memory
	Alloc(TryReserveError),
}

/// An error that arises while decoding the chunk tree
pub struct ChunkDecodingError {
	description: &'static str,
	fourcc: Option<[u8; 4]>,
}

impl ChunkDecodingError {
	/// Create a `ChunkDecodingError` from a description
	#[must_use]
	pub const fn new(description: &'static str) -> Self {
		Self {
			description,
			fourcc: None,
		}
	}

	/// Create a `ChunkDecodingError` bound to the offending tag
	///
	/// # Examples
	///
	/// ```rust
	/// use riffle::error::ChunkDecodingError;
	///
	/// let err = ChunkDecodingError::with_fourcc("Found an invalid chunk ID", *b"MOD!");
	/// assert_eq!(err.fourcc(), Some(*b"MOD!"));
	/// ```
	#[must_use]
	pub const fn with_fourcc(description: &'static str, fourcc: [u8; 4]) -> Self {
		Self {
			description,
			fourcc: Some(fourcc),
		}
	}

	/// Returns the tag that caused the error, if one exists
	pub fn fourcc(&self) -> Option<[u8; 4]> {
		self.fourcc
	}

	/// Returns the error description
	pub fn description(&self) -> &str {
		self.description
	}
}

impl Debug for ChunkDecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.fourcc {
			Some(fourcc) => write!(f, "{:?} ({:x?})", self.description, fourcc),
			None => write!(f, "{:?}", self.description),
		}
	}
}

impl Display for ChunkDecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.fourcc {
			Some(fourcc) => write!(
				f,
				"{}: \"{}\"",
				self.description,
				fourcc.escape_ascii()
			),
			None => write!(f, "{}", self.description),
		}
	}
}

/// An error that arises while encoding the chunk tree
pub struct ChunkEncodingError {
	description: &'static str,
	fourcc: Option<[u8; 4]>,
}

impl ChunkEncodingError {
	/// Create a `ChunkEncodingError` from a description
	///
	/// # Examples
	///
	/// ```rust
	/// use riffle::error::ChunkEncodingError;
	///
	/// let err = ChunkEncodingError::new("No open chunk to end");
	/// assert_eq!(err.description(), "No open chunk to end");
	/// ```
	#[must_use]
	pub const fn new(description: &'static str) -> Self {
		Self {
			description,
			fourcc: None,
		}
	}

	/// Create a `ChunkEncodingError` bound to the offending tag
	#[must_use]
	pub const fn with_fourcc(description: &'static str, fourcc: [u8; 4]) -> Self {
		Self {
			description,
			fourcc: Some(fourcc),
		}
	}

	/// Returns the tag that caused the error, if one exists
	pub fn fourcc(&self) -> Option<[u8; 4]> {
		self.fourcc
	}

	/// Returns the error description
	pub fn description(&self) -> &str {
		self.description
	}
}

impl Debug for ChunkEncodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.fourcc {
			Some(fourcc) => write!(f, "{:?} ({:x?})", self.description, fourcc),
			None => write!(f, "{:?}", self.description),
		}
	}
}

impl Display for ChunkEncodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.fourcc {
			Some(fourcc) => write!(
				f,
				"{}: \"{}\"",
				self.description,
				fourcc.escape_ascii()
			),
			None => write!(f, "{}", self.description),
		}
	}
}

/// Errors that could occur within Riffle
pub struct RiffError {
	pub(crate) kind: ErrorKind,
}

impl RiffError {
	/// Create a `RiffError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use riffle::error::{ErrorKind, RiffError};
	///
	/// let closed = RiffError::new(ErrorKind::Closed);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use riffle::error::{ErrorKind, RiffError};
	///
	/// let closed = RiffError::new(ErrorKind::Closed);
	/// if let ErrorKind::Closed = closed.kind() {
	/// 	println!("Open a new reader!");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}
}

impl std::error::Error for RiffError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self.kind {
			ErrorKind::Io(ref err) => Some(err),
			ErrorKind::StringFromUtf8(ref err) => Some(err),
			ErrorKind::Alloc(ref err) => Some(err),
			_ => None,
		}
	}
}

impl Debug for RiffError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<ChunkDecodingError> for RiffError {
	fn from(input: ChunkDecodingError) -> Self {
		Self {
			kind: ErrorKind::Decoding(input),
		}
	}
}

impl From<ChunkEncodingError> for RiffError {
	fn from(input: ChunkEncodingError) -> Self {
		Self {
			kind: ErrorKind::Encoding(input),
		}
	}
}

impl From<std::io::Error> for RiffError {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<std::string::FromUtf8Error> for RiffError {
	fn from(input: std::string::FromUtf8Error) -> Self {
		Self {
			kind: ErrorKind::StringFromUtf8(input),
		}
	}
}

impl From<TryReserveError> for RiffError {
	fn from(input: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(input),
		}
	}
}

impl Display for RiffError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::StringFromUtf8(ref err) => write!(f, "{err}"),
			ErrorKind::Io(ref err) => write!(f, "{err}"),
			ErrorKind::Alloc(ref err) => write!(f, "{err}"),

			ErrorKind::Decoding(ref decode_err) => write!(f, "Decoding: {decode_err}"),
			ErrorKind::Encoding(ref encode_err) => write!(f, "Encoding: {encode_err}"),
			ErrorKind::OutOfBounds(message) => write!(f, "Out of bounds: {message}"),
			ErrorKind::Closed => write!(f, "Attempted to use a closed reader or writer"),
			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to read/write an abnormally large amount of data"
			),
		}
	}
}
