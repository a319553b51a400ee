use crate::config::global_options;
use crate::error::Result;
use crate::macros::err;

/// Create a `Vec` of `len` copies of `element`, without aborting on allocation failure
///
/// The total size in bytes is checked against [`GlobalOptions::allocation_limit`] first, so a
/// corrupt length field cannot make a reader allocate an unreasonable amount of memory.
/// Use through [`try_vec!`](crate::macros::try_vec).
///
/// [`GlobalOptions::allocation_limit`]: crate::config::GlobalOptions::allocation_limit
pub(crate) fn fallible_vec_from_element<T>(element: T, len: usize) -> Result<Vec<T>>
where
	T: Clone,
{
	let mut values = Vec::new();
	if len == 0 {
		return Ok(values);
	}

	if len.saturating_mul(size_of::<T>()) > global_options().allocation_limit {
		err!(TooMuchData);
	}

	values.try_reserve_exact(len)?;
	values.resize(len, element);

	Ok(values)
}
