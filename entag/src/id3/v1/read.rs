use super::constants::{GENRES, ID3V1_TAG_MARKER};
use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::err;
use crate::tag::{CommonField, Tag, TagType};
use crate::util::text::latin1_decode;

/// Parse an ID3v1(.1) tag into a [`TagType::Id3v1`] tag
pub(crate) fn parse_id3v1(reader: [u8; 128], parse_mode: ParsingMode) -> Result<Tag> {
	if reader[..3] != ID3V1_TAG_MARKER {
		err!(FakeTag);
	}

	let reader = &reader[3..];
	let mut tag = Tag::new(TagType::Id3v1);

	let mut push = |slot, value: Option<String>| {
		if let Some(value) = value {
			tag.push_text(slot, value);
		}
	};

	push(CommonField::Title, decode_text(&reader[..30]));
	push(CommonField::Artist, decode_text(&reader[30..60]));
	push(CommonField::Album, decode_text(&reader[60..90]));
	push(
		CommonField::Year,
		try_parse_year(&reader[90..94], parse_mode)?.map(|year| year.to_string()),
	);

	// ID3v1.1 stores the track in the last comment byte, following a null terminator.
	// A track number of 0 is invalid.
	let (comment_range, track) = if reader[122] == 0 && reader[123] != 0 {
		(94_usize..122, Some(reader[123]))
	} else {
		(94..124, None)
	};

	push(CommonField::Comment, decode_text(&reader[comment_range]));
	push(CommonField::Track, track.map(|track| track.to_string()));

	let genre = GENRES
		.get(usize::from(reader[124]))
		.map(|genre| String::from(*genre));
	push(CommonField::Genre, genre);

	Ok(tag)
}

fn decode_text(data: &[u8]) -> Option<String> {
	let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
	if data[end..].iter().any(|&b| b != 0) {
		log::warn!("ID3v1 text field contains trailing junk, skipping");
	}

	let text = latin1_decode(&data[..end]);
	let text = text.trim_end_matches(' ');
	if text.is_empty() {
		return None;
	}

	Some(text.to_owned())
}

fn try_parse_year(input: &[u8], parse_mode: ParsingMode) -> Result<Option<u16>> {
	let (num_digits, year) = input
		.iter()
		.take_while(|c| c.is_ascii_digit())
		.fold((0usize, 0u16), |(num_digits, year), c| {
			(num_digits + 1, year * 10 + u16::from(*c - b'0'))
		});

	if num_digits != 4 {
		// Empty years are commonly written as "\0\0\0\0"
		if parse_mode == ParsingMode::Strict && input.iter().any(|&b| b != 0) {
			err!(TextDecode("ID3v1 year field contains non-ASCII digit characters"));
		}

		return Ok(None);
	}

	Ok(Some(year))
}
