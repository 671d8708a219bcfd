use crate::ape::ApeItem;
use crate::ape::header::create_ape_header;
use crate::ape::tag::read;
use crate::config::{ParseOptions, WriteOptions};
use crate::error::{EntagError, ErrorKind, Result};
use crate::id3::{find_id3v1, find_id3v2};
use crate::macros::{decode_err, err};
use crate::tag::{Field, Tag, TagField, TagType};
use crate::util::io::{FileLike, Length, Truncate, splice};

use std::io::SeekFrom;

/// Write `tag` as the APE tag at the end of `file`
///
/// An existing APE tag is replaced, and a trailing ID3v1 tag is kept after it.
pub(crate) fn write_to<F>(file: &mut F, tag: &Tag, write_options: WriteOptions) -> Result<()>
where
	F: FileLike,
	EntagError: From<<F as Truncate>::Error>,
	EntagError: From<<F as Length>::Error>,
{
	if tag.tag_type() != TagType::Ape {
		err!(UnsupportedTag);
	}

	file.rewind()?;

	// An ID3v2 tag can't contain the APE tag
	find_id3v2(file, false)?;
	let audio_start = file.stream_position()?;

	// Skip over the ID3v1 tag, this is the spot the APE tag belongs
	find_id3v1(file, false)?;
	let ape_end = file.stream_position()?;

	let mut ape_start = ape_end;
	let mut read_only = Vec::new();

	if ape_end >= audio_start + 32 {
		file.seek(SeekFrom::Start(ape_end - 32))?;

		if let (Some(existing), Some(header)) = read::read_ape_tag(file, true, ParseOptions::new())? {
			let Some(start) = ape_end.checked_sub(u64::from(header.full_tag_size())) else {
				decode_err!(@BAIL Ape, "File has a tag with an invalid size");
			};

			ape_start = start;

			if write_options.respect_read_only {
				read_only = existing
					.fields
					.into_iter()
					.filter_map(|field| match field {
						Field::Ape(item) if item.read_only => Some(item),
						_ => None,
					})
					.collect();
			}
		}
	}

	let bytes = create_ape_tag(tag, &read_only)?;
	log::debug!(
		"Replacing {} bytes of APE tag with {} bytes",
		ape_end - ape_start,
		bytes.len()
	);

	splice(file, ape_start, ape_end, &bytes)
}

/// Serialize the items of `tag`, with an APEv2 header and footer
///
/// Items in `read_only` replace any item in `tag` with the same key. A tag without items
/// produces no bytes at all.
pub(crate) fn create_ape_tag(tag: &Tag, read_only: &[ApeItem]) -> Result<Vec<u8>> {
	let items = tag
		.iter()
		.filter_map(|field| match field {
			Field::Ape(item) => Some(item),
			_ => None,
		})
		.filter(|item| {
			let kept = !read_only
				.iter()
				.any(|ro| ro.key.eq_ignore_ascii_case(&item.key));
			if !kept {
				log::warn!("Keeping read only APE item {}", item.key);
			}

			kept
		})
		.chain(read_only);

	let mut body = Vec::new();
	let mut item_count = 0_u32;
	for item in items {
		body.extend(item.raw_content()?);
		item_count += 1;
	}

	if item_count == 0 {
		return Ok(Vec::new());
	}

	// The total size includes the 32 bytes of the footer
	let size = u32::try_from(body.len() + 32).map_err(|_| EntagError::new(ErrorKind::TooMuchData))?;

	let mut bytes = Vec::with_capacity(body.len() + 64);
	bytes.extend(create_ape_header(size, item_count, true));
	bytes.extend(body);
	bytes.extend(create_ape_header(size, item_count, false));

	Ok(bytes)
}
