//! ID3v2 items and utilities
//!
//! ## Important notes
//!
//! * Tags of every version are read, but tags are always written as ID3v2.3.
//! * Only text, comment and picture frames are interpreted. See [`Frame`].

pub(crate) mod frame;
pub(crate) mod header;
mod items;
pub(crate) mod read;
pub mod util;
pub(crate) mod write;

// Exports

pub use header::{Id3v2TagFlags, Id3v2Version};

pub use items::*;

pub use frame::{Frame, FrameFlags, FrameHeader, FrameId};

use crate::tag::CommonField;
use crate::util::text::TextEncoding;

/// The common slot an ID3v2 frame ID maps to
pub(crate) fn common_field(id: &str) -> Option<CommonField> {
	let slot = match id {
		"TIT2" => CommonField::Title,
		"TALB" => CommonField::Album,
		"TPE1" => CommonField::Artist,
		"TRCK" => CommonField::Track,
		"TYER" | "TDRC" => CommonField::Year,
		"COMM" => CommonField::Comment,
		"TCON" => CommonField::Genre,
		_ => return None,
	};

	Some(slot)
}

/// The frame ID written for a common slot
pub(crate) fn common_key(slot: CommonField) -> Option<&'static str> {
	match slot {
		CommonField::Title => Some("TIT2"),
		CommonField::Album => Some("TALB"),
		CommonField::Artist => Some("TPE1"),
		CommonField::Track => Some("TRCK"),
		CommonField::Year => Some("TYER"),
		CommonField::Comment => Some("COMM"),
		CommonField::Genre => Some("TCON"),
		CommonField::TrackCount => None,
	}
}

/// Create a text or comment frame for `key`
///
/// Without an explicit `encoding`, Latin-1 is used when it can represent `text`, otherwise UTF-16.
pub(crate) fn new_text_frame(
	key: &str,
	text: &str,
	encoding: Option<TextEncoding>,
) -> Option<Frame> {
	let encoding = encoding.unwrap_or_else(|| {
		if text.chars().all(|c| u32::from(c) <= 0xFF) {
			TextEncoding::Latin1
		} else {
			TextEncoding::UTF16
		}
	});

	if key == CommentFrame::ID {
		return Some(Frame::Comment(CommentFrame::new(
			encoding,
			CommentFrame::DEFAULT_LANGUAGE,
			String::new(),
			text.to_owned(),
		)));
	}

	let id = FrameId::new(key).ok()?;
	Some(Frame::Text(TextInformationFrame::new(
		id,
		encoding,
		text.to_owned(),
	)))
}
