use super::properties::read_properties;
use crate::ape::tag::read::read_ape_tag;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::file::{AudioFile, FileType};
use crate::id3::v1::read::parse_id3v1;
use crate::id3::{ID3FindResults, find_id3v1, find_id3v2};
use crate::macros::{decode_err, err};
use crate::properties::EncodingInfo;
use crate::tag::{Tag, TagType};
use crate::util::io::SeekStreamLen;

use std::io::{Read, Seek, SeekFrom};

pub(crate) fn read_from<R>(data: &mut R, parse_options: ParseOptions) -> Result<AudioFile>
where
	R: Read + Seek,
{
	let start = data.stream_position()?;
	let end = data.stream_len_hack()?;

	let mut stream_len = end - start;

	// ID3v2 tags are unsupported in APE files, but still possible
	if let ID3FindResults(Some(header), _) = find_id3v2(data, false)? {
		log::debug!("Skipping ID3v2 tag before the MAC header");

		let Some(new_stream_length) = stream_len.checked_sub(u64::from(header.full_tag_size()))
		else {
			err!(SizeMismatch);
		};

		stream_len = new_stream_length;
	}

	let mut header = [0; 4];
	data.read_exact(&mut header)
		.map_err(|_| decode_err!(Ape, "File is too small to contain a MAC header"))?;

	if &header != b"MAC " {
		decode_err!(@BAIL Ape, "Invalid data found while reading header, expected \"MAC \"");
	}

	let mac_start = data.stream_position()?;

	// First see if there's a ID3v1 tag
	let ID3FindResults(id3v1_header, id3v1) = find_id3v1(data, parse_options.read_tags)?;
	if id3v1_header.is_some() {
		let Some(new_stream_length) = stream_len.checked_sub(128) else {
			err!(SizeMismatch);
		};

		stream_len = new_stream_length;
	}

	// Next, search for an APE tag footer
	let mut ape_tag = None;
	let tag_end = data.stream_position()?;
	if tag_end >= mac_start + 32 {
		data.seek(SeekFrom::Start(tag_end - 32))?;

		if let (tag, Some(header)) = read_ape_tag(data, true, parse_options)? {
			let Some(new_stream_length) = stream_len.checked_sub(u64::from(header.full_tag_size()))
			else {
				err!(SizeMismatch);
			};

			stream_len = new_stream_length;
			ape_tag = tag;
		}
	}

	let tag = match (ape_tag, id3v1) {
		(Some(ape_tag), _) => ape_tag,
		(None, Some(id3v1)) => parse_id3v1(id3v1, parse_options.parsing_mode)?,
		(None, None) => Tag::new(TagType::Ape),
	};

	// Go back to the MAC header to read properties
	data.seek(SeekFrom::Start(mac_start))?;

	let encoding_info = if parse_options.read_properties {
		// The MAC header is part of the stream
		read_properties(data, stream_len, parse_options.parsing_mode)?
	} else {
		EncodingInfo::default()
	};

	Ok(AudioFile::new(FileType::Ape, encoding_info, tag))
}
