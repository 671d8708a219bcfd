use super::header::{FrameHeader, HEADER_MASK, VbrHeader};
use super::properties::read_properties;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::file::{AudioFile, FileType};
use crate::id3::v1::read::parse_id3v1;
use crate::id3::v2::read::parse_id3v2;
use crate::id3::{ID3FindResults, find_id3v1, find_id3v2};
use crate::macros::decode_err;
use crate::properties::EncodingInfo;
use crate::tag::{Tag, TagType};

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ByteOrder, ReadBytesExt};

// Searches for the first frame within `max_junk_bytes`, comparing it to the following one
fn find_first_frame<R>(reader: &mut R, max_junk_bytes: usize) -> Result<Option<(FrameHeader, u64)>>
where
	R: Read + Seek,
{
	let search_start = reader.stream_position()?;

	let mut window = Vec::new();
	reader
		.by_ref()
		.take(max_junk_bytes as u64 + 4)
		.read_to_end(&mut window)?;

	for (idx, header_bytes) in window.windows(4).enumerate() {
		let first_header_data = BigEndian::read_u32(header_bytes);
		let Some(first_header) = FrameHeader::read(first_header_data) else {
			continue;
		};

		let frame_start = search_start + idx as u64;

		// Read the next header and see if they are the same
		reader.seek(SeekFrom::Start(frame_start + u64::from(first_header.len)))?;
		match reader.read_u32::<BigEndian>() {
			Ok(second_header_data)
				if first_header_data & HEADER_MASK == second_header_data & HEADER_MASK =>
			{
				log::debug!("MPEG: Found the first frame at offset {frame_start}");
				return Ok(Some((first_header, frame_start)));
			},
			_ => log::trace!("MPEG: False frame sync at offset {frame_start}"),
		}
	}

	Ok(None)
}

pub(crate) fn read_from<R>(data: &mut R, parse_options: ParseOptions) -> Result<AudioFile>
where
	R: Read + Seek,
{
	let mut id3v2 = None;
	if let ID3FindResults(Some(header), Some(content)) = find_id3v2(data, parse_options.read_tags)? {
		id3v2 = Some(parse_id3v2(content, header, parse_options)?);
	}

	let first_frame = find_first_frame(data, parse_options.max_junk_bytes)?;

	let ID3FindResults(_, id3v1) = find_id3v1(data, parse_options.read_tags)?;
	let audio_end = data.stream_position()?;

	let tag = match (id3v2, id3v1) {
		(Some(id3v2), _) => id3v2,
		(None, Some(id3v1)) => parse_id3v1(id3v1, parse_options.parsing_mode)?,
		(None, None) => Tag::new(TagType::Id3v2),
	};

	let encoding_info = if parse_options.read_properties {
		let Some((first_frame_header, first_frame_offset)) = first_frame else {
			// The search for sync bits was unsuccessful
			decode_err!(@BAIL Mpeg, "File contains an invalid frame");
		};

		// Try to read a Xing header
		let xing_header_location = first_frame_offset + u64::from(first_frame_header.data_start);
		data.seek(SeekFrom::Start(xing_header_location))?;

		let mut xing_reader = Vec::with_capacity(32);
		data.by_ref().take(32).read_to_end(&mut xing_reader)?;

		let vbr_header = VbrHeader::read(&mut &xing_reader[..])?;

		read_properties(
			&first_frame_header,
			vbr_header,
			audio_end.saturating_sub(first_frame_offset),
		)
	} else {
		EncodingInfo::default()
	};

	Ok(AudioFile::new(FileType::Mpeg, encoding_info, tag))
}
