use super::constants::{DEFAULT_VENDOR, VORBIS_COMMENT_HEAD};
use super::verify_signature;
use crate::config::WriteOptions;
use crate::error::{EntagError, Result};
use crate::macros::{decode_err, err};
use crate::tag::{Field, Tag, TagField, TagType};
use crate::util::io::{FileLike, Length, Truncate};

use std::io::{Cursor, SeekFrom};

use ogg_pager::{CONTAINS_FIRST_PAGE_OF_BITSTREAM, Packets, Page, PageHeader};

/// Serialize a Vorbis comment block, without any signature or framing bit
///
/// The tag's vendor is used if it has one.
pub(crate) fn create_comments_block(tag: &Tag) -> Result<Vec<u8>> {
	if tag.tag_type() != TagType::VorbisComments {
		err!(UnsupportedTag);
	}

	let vendor = tag.vendor().unwrap_or(DEFAULT_VENDOR).as_bytes();

	let (Ok(vendor_len), Ok(count)) = (u32::try_from(vendor.len()), u32::try_from(tag.len()))
	else {
		err!(TooMuchData);
	};

	let mut block = Vec::new();
	block.extend(vendor_len.to_le_bytes());
	block.extend_from_slice(vendor);
	block.extend(count.to_le_bytes());

	for field in tag.iter() {
		let Field::Vorbis(field) = field else {
			err!(UnsupportedTag);
		};

		block.extend(field.raw_content()?);
	}

	Ok(block)
}

pub(super) fn create_metadata_packet(tag: &Tag) -> Result<Vec<u8>> {
	let mut packet = VORBIS_COMMENT_HEAD.to_vec();
	packet.extend(create_comments_block(tag)?);

	// OGG Vorbis makes use of a "framing bit" to separate the header packets
	//
	// https://xiph.org/vorbis/doc/Vorbis_I_spec.html#x1-590004
	packet.push(1);

	Ok(packet)
}

pub(crate) fn write_to<F>(file: &mut F, tag: &Tag, _write_options: WriteOptions) -> Result<()>
where
	F: FileLike,
	EntagError: From<<F as Truncate>::Error>,
	EntagError: From<<F as Length>::Error>,
{
	if tag.tag_type() != TagType::VorbisComments {
		err!(UnsupportedTag);
	}

	let new_metadata_packet = create_metadata_packet(tag)?;

	// Read the first page header to get the stream serial number
	let start = file.stream_position()?;
	let first_page_header = PageHeader::read(file)?;

	let stream_serial = first_page_header.stream_serial;

	file.seek(SeekFrom::Start(start))?;
	let mut packets = Packets::read_count(file, 3)?;

	let mut remaining_file_content = Vec::new();
	file.read_to_end(&mut remaining_file_content)?;

	let comment_packet = packets
		.get(1)
		.ok_or_else(|| decode_err!(Vorbis, "Expected a comment packet"))?;
	verify_signature(comment_packet, VORBIS_COMMENT_HEAD)?;

	// Replace the old comment packet
	packets.set(1, new_metadata_packet);

	file.rewind()?;
	file.truncate(0)?;

	let pages_written =
		packets.write_to(file, stream_serial, 0, CONTAINS_FIRST_PAGE_OF_BITSTREAM)? as u32;

	// Correct all remaining page sequence numbers
	let mut pages_reader = Cursor::new(&remaining_file_content[..]);
	let mut idx = 0;
	while let Ok(mut page) = Page::read(&mut pages_reader) {
		let header = page.header_mut();
		header.sequence_number = pages_written + idx;
		page.gen_crc();
		file.write_all(&page.as_bytes())?;

		idx += 1;
	}

	file.flush()?;
	Ok(())
}
