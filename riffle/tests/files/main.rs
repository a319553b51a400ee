#![allow(missing_docs)]

mod endianness;
mod recreate;
mod round_trip;
mod scenario;
pub(crate) mod util;
mod wav;
