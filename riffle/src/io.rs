//! Byte order handling and fixed-width value codecs
//!
//! RIFF files store every multi-byte value in a single, file-wide byte order, selected by
//! the root tag. [`Endianness`] carries that choice at runtime, and the [`Primitive`] trait
//! describes the numeric types that can be read and written through it.

use crate::chunk::FourCC;

use std::io::{Read, Write};

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};

/// The byte order of a RIFF file
///
/// `RIFF` files are little-endian, `RIFX` files are big-endian.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Endianness {
	/// Little-endian, the root chunk is tagged `RIFF`
	#[default]
	Little,
	/// Big-endian, the root chunk is tagged `RIFX`
	Big,
}

impl Endianness {
	/// The root chunk tag for this byte order
	///
	/// # Examples
	///
	/// ```rust
	/// use riffle::chunk::FourCC;
	/// use riffle::io::Endianness;
	///
	/// assert_eq!(Endianness::Little.root_tag(), FourCC::RIFF);
	/// assert_eq!(Endianness::Big.root_tag(), FourCC::RIFX);
	/// ```
	pub const fn root_tag(self) -> FourCC {
		match self {
			Endianness::Little => FourCC::RIFF,
			Endianness::Big => FourCC::RIFX,
		}
	}

	/// Determine the byte order from a root chunk tag
	///
	/// Returns `None` if `tag` is neither `RIFF` nor `RIFX`.
	pub fn from_root_tag(tag: [u8; 4]) -> Option<Self> {
		match &tag {
			b"RIFF" => Some(Endianness::Little),
			b"RIFX" => Some(Endianness::Big),
			_ => None,
		}
	}
}

mod sealed {
	pub trait Sealed {}
}

/// A fixed-width numeric type that can be read from and written to a chunk
///
/// This is implemented for `u8`, `i8`, `u16`, `i16`, `u32`, `i32`, `u64`, `i64`, `f32`, and `f64`.
/// Floating point values are IEEE-754 binary32/binary64.
///
/// This trait is sealed and cannot be implemented outside of Riffle.
pub trait Primitive: sealed::Sealed + Copy + Default {
	/// The encoded size in bytes
	const SIZE: usize;

	#[doc(hidden)]
	fn decode(bytes: &[u8], endianness: Endianness) -> Self;

	#[doc(hidden)]
	fn encode(self, bytes: &mut [u8], endianness: Endianness);
}

impl sealed::Sealed for u8 {}
impl Primitive for u8 {
	const SIZE: usize = 1;

	fn decode(bytes: &[u8], _: Endianness) -> Self {
		bytes[0]
	}

	fn encode(self, bytes: &mut [u8], _: Endianness) {
		bytes[0] = self;
	}
}

impl sealed::Sealed for i8 {}
impl Primitive for i8 {
	const SIZE: usize = 1;

	fn decode(bytes: &[u8], _: Endianness) -> Self {
		bytes[0] as i8
	}

	fn encode(self, bytes: &mut [u8], _: Endianness) {
		bytes[0] = self as u8;
	}
}

macro_rules! impl_primitive {
	($($ty:ty => $read:ident, $write:ident);+ $(;)?) => {
		$(
			impl sealed::Sealed for $ty {}
			impl Primitive for $ty {
				const SIZE: usize = size_of::<$ty>();

				fn decode(bytes: &[u8], endianness: Endianness) -> Self {
					match endianness {
						Endianness::Little => LittleEndian::$read(bytes),
						Endianness::Big => BigEndian::$read(bytes),
					}
				}

				fn encode(self, bytes: &mut [u8], endianness: Endianness) {
					match endianness {
						Endianness::Little => LittleEndian::$write(bytes, self),
						Endianness::Big => BigEndian::$write(bytes, self),
					}
				}
			}
		)+
	};
}

impl_primitive!(
	u16 => read_u16, write_u16;
	i16 => read_i16, write_i16;
	u32 => read_u32, write_u32;
	i32 => read_i32, write_i32;
	u64 => read_u64, write_u64;
	i64 => read_i64, write_i64;
	f32 => read_f32, write_f32;
	f64 => read_f64, write_f64;
);

/// Decode `bytes` into `values`, `bytes` must be exactly `values.len() * T::SIZE` long
pub(crate) fn decode_slice<T: Primitive>(bytes: &[u8], values: &mut [T], endianness: Endianness) {
	for (value, raw) in values.iter_mut().zip(bytes.chunks_exact(T::SIZE)) {
		*value = T::decode(raw, endianness);
	}
}

pub(crate) fn encode_slice<T: Primitive>(values: &[T], endianness: Endianness) -> Vec<u8> {
	let mut bytes = vec![0; values.len() * T::SIZE];
	for (value, raw) in values.iter().zip(bytes.chunks_exact_mut(T::SIZE)) {
		value.encode(raw, endianness);
	}

	bytes
}

pub(crate) fn read_u32<R>(reader: &mut R, endianness: Endianness) -> std::io::Result<u32>
where
	R: Read,
{
	match endianness {
		Endianness::Little => reader.read_u32::<LittleEndian>(),
		Endianness::Big => reader.read_u32::<BigEndian>(),
	}
}

pub(crate) fn write_u32<W>(writer: &mut W, endianness: Endianness, value: u32) -> std::io::Result<()>
where
	W: Write,
{
	match endianness {
		Endianness::Little => writer.write_u32::<LittleEndian>(value),
		Endianness::Big => writer.write_u32::<BigEndian>(value),
	}
}
