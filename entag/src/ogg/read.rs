use super::constants::{PICTURE_KEY, VORBIS_COMMENT_HEAD, VORBIS_IDENT_HEAD};
use super::field::VorbisField;
use super::properties::read_properties;
use super::verify_signature;
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::file::{AudioFile, FileType};
use crate::macros::{decode_err, err, parse_mode_choice, try_vec};
use crate::properties::EncodingInfo;
use crate::tag::{Field, Tag, TagType};

use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};
use ogg_pager::{Packets, PageHeader};

/// Read a Vorbis comment block (vendor, count, comments)
///
/// `len` is the number of bytes available in the block. Used by both OGG Vorbis and FLAC.
pub(crate) fn read_comments<R>(data: &mut R, mut len: u64, parse_options: ParseOptions) -> Result<Tag>
where
	R: Read,
{
	let parse_mode = parse_options.parsing_mode;

	let vendor_len = data.read_u32::<LittleEndian>()?;
	if u64::from(vendor_len) + 4 > len {
		err!(SizeMismatch);
	}
	len -= 4;

	let mut vendor_bytes = try_vec![0; vendor_len as usize];
	data.read_exact(&mut vendor_bytes)?;
	len -= u64::from(vendor_len);

	let vendor = match String::from_utf8(vendor_bytes) {
		Ok(vendor) => vendor,
		Err(e) => {
			if parse_mode == ParsingMode::Strict {
				return Err(e.into());
			}

			log::warn!("Vorbis comments: Vendor string is not valid UTF-8, decoding lossily");
			String::from_utf8_lossy(e.as_bytes()).into_owned()
		},
	};

	if len < 4 {
		err!(SizeMismatch);
	}

	let number_of_items = data.read_u32::<LittleEndian>()?;
	len -= 4;

	// Every comment has at least its 4 byte length
	if u64::from(number_of_items) > (len >> 2) {
		err!(SizeMismatch);
	}

	let mut tag = Tag::new(TagType::VorbisComments);
	tag.set_vendor(Some(vendor));

	for _ in 0..number_of_items {
		if len < 4 {
			err!(SizeMismatch);
		}

		let comment_len = data.read_u32::<LittleEndian>()?;
		len -= 4;

		if u64::from(comment_len) > len {
			err!(SizeMismatch);
		}

		let mut comment_bytes = try_vec![0; comment_len as usize];
		data.read_exact(&mut comment_bytes)?;
		len -= u64::from(comment_len);

		let comment = match String::from_utf8(comment_bytes) {
			Ok(comment) => comment,
			Err(e) => {
				if parse_mode == ParsingMode::Strict {
					return Err(e.into());
				}

				log::warn!("Vorbis comments: Comment is not valid UTF-8, discarding");
				continue;
			},
		};

		let field = match VorbisField::parse(&comment) {
			Some(field) => field,
			None => {
				parse_mode_choice!(
					parse_mode,
					STRICT: decode_err!(@BAIL "Vorbis comments: Found a comment without a separator"),
					RELAXED: {
						log::warn!("Vorbis comments: No separator found in field, discarding");
						continue;
					},
					DEFAULT: {
						log::warn!("Vorbis comments: No separator found in field, keeping as ERRONEOUS");
						VorbisField::erroneous(&comment)
					}
				)
			},
		};

		if field.key() == PICTURE_KEY && !parse_options.read_cover_art {
			log::trace!("Vorbis comments: Skipping picture");
			continue;
		}

		tag.fields.push(Field::Vorbis(field));
	}

	Ok(tag)
}

pub(crate) fn read_from<R>(data: &mut R, parse_options: ParseOptions) -> Result<AudioFile>
where
	R: Read + Seek,
{
	let start = data.stream_position()?;
	let first_page_header = PageHeader::read(data)?;
	data.seek(SeekFrom::Start(start))?;

	// Identification, comment and setup headers
	let packets = Packets::read_count(data, 3)?;

	let identification_packet = packets
		.get(0)
		.ok_or_else(|| decode_err!(Vorbis, "Expected an identification packet"))?;
	verify_signature(identification_packet, VORBIS_IDENT_HEAD)?;

	let comment_packet = packets
		.get(1)
		.ok_or_else(|| decode_err!(Vorbis, "Expected a comment packet"))?;
	verify_signature(comment_packet, VORBIS_COMMENT_HEAD)?;

	let tag = if parse_options.read_tags {
		let mut comments = &comment_packet[VORBIS_COMMENT_HEAD.len()..];
		let len = comments.len() as u64;
		read_comments(&mut comments, len, parse_options)?
	} else {
		Tag::new(TagType::VorbisComments)
	};

	let encoding_info = if parse_options.read_properties {
		read_properties(data, &first_page_header, identification_packet)?
	} else {
		EncodingInfo::default()
	};

	Ok(AudioFile::new(FileType::Vorbis, encoding_info, tag))
}
