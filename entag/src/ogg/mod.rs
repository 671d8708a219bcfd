//! Items for OGG Vorbis and Vorbis comments
//!
//! ## File notes
//!
//! Vorbis comments are shared by OGG Vorbis and FLAC. In OGG, the comment block is its own
//! packet, preceded by `\x03vorbis` and followed by a framing bit.
pub(crate) mod constants;
mod field;
mod properties;
pub(crate) mod read;
pub(crate) mod write;

use crate::error::Result;
use crate::macros::decode_err;
use crate::tag::CommonField;

// Exports

pub use field::VorbisField;

pub(crate) fn verify_signature(content: &[u8], sig: &[u8]) -> Result<()> {
	if content.len() < sig.len() || &content[..sig.len()] != sig {
		decode_err!(@BAIL Vorbis, "File missing magic signature");
	}

	Ok(())
}

/// The common slot a Vorbis comment key maps to
///
/// `key` is expected to be upper-cased.
pub(crate) fn common_field(key: &str) -> Option<CommonField> {
	let slot = match key {
		"TITLE" => CommonField::Title,
		"ALBUM" => CommonField::Album,
		"ARTIST" => CommonField::Artist,
		"GENRE" => CommonField::Genre,
		"TRACKNUMBER" | "TRACK" => CommonField::Track,
		"TRACKTOTAL" => CommonField::TrackCount,
		"DATE" => CommonField::Year,
		"DESCRIPTION" | "COMMENT" => CommonField::Comment,
		_ => return None,
	};

	Some(slot)
}

/// The key written for a common slot
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn common_key(slot: CommonField) -> Option<&'static str> {
	let key = match slot {
		CommonField::Title => "TITLE",
		CommonField::Album => "ALBUM",
		CommonField::Artist => "ARTIST",
		CommonField::Genre => "GENRE",
		CommonField::Track => "TRACKNUMBER",
		CommonField::TrackCount => "TRACKTOTAL",
		CommonField::Year => "DATE",
		CommonField::Comment => "DESCRIPTION",
	};

	Some(key)
}
