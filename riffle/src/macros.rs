macro_rules! try_vec {
	($elem:expr; $size:expr) => {{ $crate::util::alloc::fallible_vec_from_element($elem, $size)? }};
}

// Shorthand for return Err(RiffError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(RiffError::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(RiffError::new(ErrorKind::Variant(Message)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::RiffError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:literal)) => {
		return Err(crate::error::RiffError::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

// Shorthand for ChunkDecodingError::new("Message")
//
// Usage:
//
// - decode_err!(Message)
// - decode_err!(Message, fourcc)
//
// or bail:
//
// - decode_err!(@BAIL Message)
// - decode_err!(@BAIL Message, fourcc)
macro_rules! decode_err {
	($reason:literal) => {
		Into::<crate::error::RiffError>::into(crate::error::ChunkDecodingError::new($reason))
	};
	($reason:literal, $fourcc:expr) => {
		Into::<crate::error::RiffError>::into(crate::error::ChunkDecodingError::with_fourcc(
			$reason, $fourcc,
		))
	};
	(@BAIL $reason:literal $(, $fourcc:expr)?) => {
		return Err(decode_err!($reason $(, $fourcc)?))
	};
}

// Same as `decode_err!`, producing a `ChunkEncodingError`
macro_rules! encode_err {
	($reason:literal) => {
		Into::<crate::error::RiffError>::into(crate::error::ChunkEncodingError::new($reason))
	};
	($reason:literal, $fourcc:expr) => {
		Into::<crate::error::RiffError>::into(crate::error::ChunkEncodingError::with_fourcc(
			$reason, $fourcc,
		))
	};
	(@BAIL $reason:literal $(, $fourcc:expr)?) => {
		return Err(encode_err!($reason $(, $fourcc)?))
	};
}

pub(crate) use {decode_err, encode_err, err, try_vec};
