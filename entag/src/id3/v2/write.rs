use crate::config::WriteOptions;
use crate::error::{EntagError, ErrorKind, Result};
use crate::id3::{ID3FindResults, find_id3v2};
use crate::id3::v2::util::synchsafe::SynchsafeInteger;
use crate::macros::err;
use crate::tag::{Field, Tag, TagField, TagType};
use crate::util::io::{FileLike, Length, Truncate, splice};

use std::io::SeekFrom;

/// Write `tag` to the start of `file`, replacing any existing ID3v2 tag
pub(crate) fn write_id3v2<F>(file: &mut F, tag: &Tag, write_options: WriteOptions) -> Result<()>
where
	F: FileLike,
	EntagError: From<<F as Truncate>::Error>,
	EntagError: From<<F as Length>::Error>,
{
	if tag.tag_type() != TagType::Id3v2 {
		err!(UnsupportedTag);
	}

	file.seek(SeekFrom::Start(0))?;
	let existing_end = match find_id3v2(file, false)? {
		ID3FindResults(Some(header), _) => u64::from(header.full_tag_size()),
		ID3FindResults(None, _) => 0,
	};

	let bytes = create_tag(tag, write_options)?;
	log::debug!(
		"Replacing {existing_end} bytes of ID3v2 tag with {} bytes",
		bytes.len()
	);

	splice(file, 0, existing_end, &bytes)
}

/// Serialize `tag` as an ID3v2.3 tag
///
/// An empty tag produces no bytes at all.
pub(crate) fn create_tag(tag: &Tag, write_options: WriteOptions) -> Result<Vec<u8>> {
	if tag.is_empty() {
		return Ok(Vec::new());
	}

	let mut frames = Vec::new();
	for field in tag.iter() {
		let Field::Id3v2(frame) = field else {
			continue;
		};

		if frame.header().id.is_outdated() {
			log::warn!(
				"Skipping frame {}, it has no ID3v2.3 equivalent",
				frame.id()
			);
			continue;
		}

		frames.extend(frame.raw_content()?);
	}

	let padding = write_options.preferred_padding.unwrap_or(0);
	log::debug!("Padding ID3v2 tag with {padding} bytes");

	let size = u32::try_from(frames.len())
		.ok()
		.and_then(|len| len.checked_add(padding))
		.ok_or_else(|| EntagError::new(ErrorKind::TooMuchData))?
		.synch()?;

	let mut bytes = Vec::with_capacity(10 + frames.len() + padding as usize);
	bytes.extend(b"ID3");
	// Version 2.3.0, no flags
	bytes.extend([3, 0, 0]);
	bytes.extend(size.to_be_bytes());
	bytes.extend(frames);
	bytes.resize(bytes.len() + padding as usize, 0);

	Ok(bytes)
}
