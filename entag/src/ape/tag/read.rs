use crate::ape::constants::{APE_PICTURE_PREFIX, APE_PREAMBLE};
use crate::ape::header::{self, ApeHeader};
use crate::ape::{ApeItem, ItemValue};
use crate::config::{ParseOptions, ParsingMode};
use crate::error::{EntagError, ErrorKind, Result};
use crate::macros::{decode_err, err, try_vec};
use crate::tag::{Field, Tag, TagType};
use crate::util::text::utf8_decode;

use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

/// Read the items following `header`, the reader must be at the first item
///
/// The reader is left after the footer.
pub(crate) fn read_ape_tag_with_header<R>(
	data: &mut R,
	header: ApeHeader,
	parse_options: ParseOptions,
) -> Result<Tag>
where
	R: Read + Seek,
{
	let mut items = try_vec![0; (header.size - 32) as usize];
	data.read_exact(&mut items)?;

	// Skip over footer
	data.seek(SeekFrom::Current(32))?;

	parse_items(&items, header.item_count, parse_options)
}

/// Read an APE tag from the current position
///
/// With `footer`, the reader is expected to be at the start of the 32 byte footer. Otherwise it
/// is expected to be at the start of the header.
pub(crate) fn read_ape_tag<R>(
	reader: &mut R,
	footer: bool,
	parse_options: ParseOptions,
) -> Result<(Option<Tag>, Option<ApeHeader>)>
where
	R: Read + Seek,
{
	let mut ape_preamble = [0; 8];
	reader.read_exact(&mut ape_preamble)?;

	if &ape_preamble != APE_PREAMBLE {
		return Ok((None, None));
	}

	let ape_header = header::read_ape_header(reader, footer)?;

	let mut ape_tag = None;
	if parse_options.read_tags {
		ape_tag = Some(read_ape_tag_with_header(reader, ape_header, parse_options)?);
	}

	Ok((ape_tag, Some(ape_header)))
}

fn parse_items(mut items: &[u8], item_count: u32, parse_options: ParseOptions) -> Result<Tag> {
	let parse_mode = parse_options.parsing_mode;
	let mut tag = Tag::new(TagType::Ape);

	for _ in 0..item_count {
		// Size (4), flags (4), a 1 character key and its terminator
		if items.len() < 10 {
			break;
		}

		let value_size = items.read_u32::<LittleEndian>()? as usize;
		let flags = items.read_u32::<LittleEndian>()?;

		let Some(key_len) = items.iter().position(|&b| b == 0) else {
			decode_err!(@BAIL Ape, "APE tag item key is not terminated");
		};

		let key = utf8_decode(items[..key_len].to_vec())
			.map_err(|_| decode_err!(Ape, "APE tag item contains a non UTF-8 key"))?;
		items = &items[key_len + 1..];

		if value_size > items.len() {
			err!(SizeMismatch);
		}

		let (value, remaining) = items.split_at(value_size);
		items = remaining;

		let item_type = (flags >> 1) & 3;
		let value = match item_type {
			0 => ItemValue::Text(utf8_decode(value.to_vec()).map_err(|_| {
				decode_err!(Ape, "Failed to convert text item into a UTF-8 string")
			})?),
			1 => {
				if !parse_options.read_cover_art && key.starts_with(APE_PICTURE_PREFIX) {
					continue;
				}

				ItemValue::Binary(value.to_vec())
			},
			2 => ItemValue::Locator(utf8_decode(value.to_vec()).map_err(|_| {
				decode_err!(Ape, "Failed to convert locator item into a UTF-8 string")
			})?),
			_ => {
				skip_or_bail(EntagError::new(ErrorKind::BadApeItemType(item_type)), parse_mode)?;
				continue;
			},
		};

		let mut item = match ApeItem::new(key, value) {
			Ok(item) => item,
			Err(err) => {
				skip_or_bail(err, parse_mode)?;
				continue;
			},
		};

		item.read_only = flags & 1 == 1;

		log::trace!("Read APE item {} ({value_size} bytes)", item.key);
		tag.fields.push(Field::Ape(item));
	}

	Ok(tag)
}

fn skip_or_bail(err: EntagError, parse_mode: ParsingMode) -> Result<()> {
	if parse_mode == ParsingMode::Strict {
		return Err(err);
	}

	log::warn!("Skipping APE item: {err}");
	Ok(())
}
