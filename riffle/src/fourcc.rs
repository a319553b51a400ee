//! Human-readable names for well-known chunk IDs and format tags
//!
//! These tables are informational only. Neither the reader nor the writer consults them, any
//! valid [`FourCC`] is accepted regardless of whether it has a known name.
//!
//! # Examples
//!
//! ```rust
//! use riffle::chunk::FourCC;
//! use riffle::fourcc::{chunk_name, form_type_name, info_tag_name};
//!
//! assert_eq!(form_type_name(FourCC::new(*b"WAVE")), Some("Waveform Audio"));
//! assert_eq!(info_tag_name(FourCC::new(*b"IART")), Some("Artist"));
//! assert_eq!(chunk_name(FourCC::new(*b"fmt ")), Some("Format"));
//! assert_eq!(chunk_name(FourCC::new(*b"zzzz")), None);
//! ```

use crate::chunk::FourCC;

// Usage:
//
// gen_map!(
// 	/// Docs
// 	function_name;
//
// 	b"ABCD" | b"ABCE" => "Name",
// );
macro_rules! gen_map {
	(
		$(#[$meta:meta])*
		$NAME:ident;

		$(
			$($key:literal)|+ => $value:literal
		),+ $(,)?
	) => {
		$(#[$meta])*
		pub fn $NAME(fourcc: FourCC) -> Option<&'static str> {
			match fourcc.as_bytes() {
				$(
					$($key)|+ => Some($value),
				)+
				_ => None,
			}
		}
	};
}

gen_map!(
	/// The name of a subchunk of a `LIST` chunk with the format tag `INFO`
	info_tag_name;

	b"IARL"           => "Archival Location",
	b"IART"           => "Artist",
	b"ICMS"           => "Commissioned",
	b"ICMT"           => "Comment",
	b"ICNT"           => "Country",
	b"ICOP"           => "Copyright",
	b"ICRD"           => "Creation Date",
	b"ICRP"           => "Cropped",
	b"IDIM"           => "Dimensions",
	b"IDPI"           => "Dots Per Inch",
	b"IENG"           => "Engineer",
	b"IGNR"           => "Genre",
	b"IKEY"           => "Keywords",
	b"ILGT"           => "Lightness",
	b"ILNG"           => "Language",
	b"IMED"           => "Medium",
	b"IMUS"           => "Composer",
	b"INAM"           => "Title",
	b"IPLT"           => "Palette Setting",
	b"IPRD"           => "Product",
	b"IPRO"           => "Producer",
	b"IPRT" | b"ITRK" => "Track Number",
	b"IFRM"           => "Total Tracks",
	b"IRTD"           => "Rating",
	b"ISBJ"           => "Subject",
	b"ISFT"           => "Software",
	b"ISHP"           => "Sharpness",
	b"ISRC"           => "Source",
	b"ISRF"           => "Source Form",
	b"ITCH"           => "Technician",
	b"IWRI"           => "Writer",
);

gen_map!(
	/// The name of a root or `LIST` format tag
	form_type_name;

	b"WAVE" => "Waveform Audio",
	b"AVI " => "Audio Video Interleave",
	b"AVIX" => "Audio Video Interleave Extension",
	b"WEBP" => "WebP Image",
	b"RMID" => "RIFF MIDI",
	b"ACON" => "Animated Cursor",
	b"PAL " => "Palette",
	b"RDIB" => "RIFF Device Independent Bitmap",
	b"RMMP" => "RIFF Multimedia Movie",
	b"CDXA" => "CD-ROM XA",
	b"DLS " => "Downloadable Sounds",
	b"sfbk" => "SoundFont Bank",
	b"INFO" => "Information",
	b"adtl" => "Associated Data",
	b"hdrl" => "Header List",
	b"strl" => "Stream List",
	b"movi" => "Movie Data",
	b"rec " => "Record",
	b"odml" => "OpenDML Extended Header",
	b"fram" => "Animation Frames",
	b"wvpl" => "Wave Pool",
	b"lins" => "Instrument List",
	b"sdta" => "Sample Data",
	b"pdta" => "Preset Data",
);

gen_map!(
	/// The name of a common leaf chunk
	chunk_name;

	b"fmt "           => "Format",
	b"data"           => "Data",
	b"fact"           => "Fact",
	b"cue "           => "Cue Points",
	b"plst"           => "Playlist",
	b"smpl"           => "Sampler",
	b"inst"           => "Instrument",
	b"bext"           => "Broadcast Extension",
	b"iXML"           => "iXML Metadata",
	b"id3 " | b"ID3 " => "ID3 Tag",
	b"labl"           => "Label",
	b"note"           => "Note",
	b"ltxt"           => "Labeled Text",
	b"avih"           => "Main AVI Header",
	b"strh"           => "Stream Header",
	b"strf"           => "Stream Format",
	b"strd"           => "Stream Header Data",
	b"strn"           => "Stream Name",
	b"idx1"           => "Legacy Index",
	b"indx"           => "Index",
	b"dmlh"           => "Extended AVI Header",
	b"VP8 "           => "VP8 Bitstream",
	b"VP8L"           => "VP8 Lossless Bitstream",
	b"VP8X"           => "Extended WebP Header",
	b"ANIM"           => "Animation Parameters",
	b"ANMF"           => "Animation Frame",
	b"ALPH"           => "Alpha",
	b"ICCP"           => "Color Profile",
	b"EXIF"           => "EXIF Metadata",
	b"XMP "           => "XMP Metadata",
	b"JUNK" | b"junk" => "Junk",
	b"PAD "           => "Padding",
	b"DISP"           => "Display",
);
