use super::frame::read::ParsedFrame;
use super::header::{Id3v2Header, Id3v2Version};
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v2::util::synchsafe::resynchronise;
use crate::tag::{Field, Tag, TagType};

/// Parse the frames of an ID3v2 tag
///
/// `content` holds everything after the header and extended header.
pub(crate) fn parse_id3v2(
	content: Vec<u8>,
	header: Id3v2Header,
	parse_options: ParseOptions,
) -> Result<Tag> {
	log::debug!(
		"Parsing ID3v2 tag, size: {}, version: {:?}",
		header.size,
		header.version
	);

	// ID3v2.4 unsynchronises each frame separately
	let unsynchronised = header.flags.unsynchronisation;
	let content = if unsynchronised && header.version != Id3v2Version::V4 {
		resynchronise(&content)
	} else {
		content
	};

	let mut tag = Tag::new(TagType::Id3v2);
	let reader = &mut &content[..];

	loop {
		match ParsedFrame::read(reader, header.version, unsynchronised, parse_options)? {
			ParsedFrame::Next(frame) => tag.fields.push(Field::Id3v2(frame)),
			ParsedFrame::Skip => {},
			// Padding or the end of the tag
			ParsedFrame::Eof => break,
		}
	}

	Ok(tag)
}
