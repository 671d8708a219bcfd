use super::constants::MPC_MARKER;
use super::properties::{STREAM_HEADER_SIZE, StreamHeader, read_properties};
use crate::ape::tag::read::read_ape_tag;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::file::{AudioFile, FileType};
use crate::id3::v1::read::parse_id3v1;
use crate::id3::v2::util::synchsafe::SynchsafeInteger;
use crate::id3::{ID3FindResults, find_id3v1};
use crate::macros::decode_err;
use crate::properties::EncodingInfo;
use crate::tag::{Tag, TagType};
use crate::util::io::SeekStreamLen;

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

/// Locate the `MP+` marker, skipping at most one leading ID3v2 tag
///
/// The reader is left after the stream header.
fn find_stream_header<R>(data: &mut R, start: u64) -> Result<[u8; STREAM_HEADER_SIZE]>
where
	R: Read + Seek,
{
	let mut marker = [0; 3];
	data.read_exact(&mut marker)
		.map_err(|_| decode_err!(Mpc, "MP+ Header not found"))?;

	if marker == *b"ID3" {
		// Only the tag size is needed, found at offset 6 of the ID3v2 header
		data.seek(SeekFrom::Start(start + 6))?;
		let tag_size = data.read_u32::<BigEndian>()?.unsynch();

		log::debug!("Skipping ID3v2 tag before the MP+ marker, size: {tag_size}");

		data.seek(SeekFrom::Start(start + u64::from(tag_size) + 10))?;
		data.read_exact(&mut marker)
			.map_err(|_| decode_err!(Mpc, "MP+ Header not found"))?;
	}

	if marker != MPC_MARKER {
		decode_err!(@BAIL Mpc, "MP+ Header not found");
	}

	let mut header = [0; STREAM_HEADER_SIZE];
	data.read_exact(&mut header)
		.map_err(|_| decode_err!(Mpc, "File is too small to contain a stream header"))?;

	Ok(header)
}

pub(crate) fn read_from<R>(data: &mut R, parse_options: ParseOptions) -> Result<AudioFile>
where
	R: Read + Seek,
{
	log::debug!("Attempting to read MPC file");

	let start = data.stream_position()?;
	let file_length = data.stream_len_hack()? - start;

	let stream_header = StreamHeader::parse(&find_stream_header(data, start)?);
	let header_end = data.stream_position()?;

	let ID3FindResults(_, id3v1) = find_id3v1(data, parse_options.read_tags)?;

	// The APE tag sits before the ID3v1 tag, if there is one
	let mut ape_tag = None;
	let tag_end = data.stream_position()?;
	if tag_end >= header_end + 32 {
		data.seek(SeekFrom::Start(tag_end - 32))?;
		if let (tag, Some(_)) = read_ape_tag(data, true, parse_options)? {
			ape_tag = tag;
		}
	}

	let tag = match (ape_tag, id3v1) {
		(Some(ape_tag), _) => ape_tag,
		(None, Some(id3v1)) => parse_id3v1(id3v1, parse_options.parsing_mode)?,
		(None, None) => Tag::new(TagType::Ape),
	};

	let encoding_info = if parse_options.read_properties {
		read_properties(&stream_header, file_length)
	} else {
		EncodingInfo::default()
	};

	Ok(AudioFile::new(FileType::Mpc, encoding_info, tag))
}
