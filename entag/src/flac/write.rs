use super::block::{Block, BlockType};
use super::read::verify_flac;
use crate::config::WriteOptions;
use crate::error::{EntagError, Result};
use crate::id3::find_id3v2;
use crate::macros::err;
use crate::ogg::write::create_comments_block;
use crate::tag::{Tag, TagType};
use crate::util::io::{FileLike, Length, Truncate, splice};

use std::io::Cursor;

/// Rewrite the metadata blocks of a FLAC file
///
/// Every block other than `VORBIS_COMMENT` and `PADDING` is kept in its original order. The
/// new comment block follows, then a padding block if `preferred_padding` is set. The audio
/// frames are untouched.
pub(crate) fn write_to<F>(file: &mut F, tag: &Tag, write_options: WriteOptions) -> Result<()>
where
	F: FileLike,
	EntagError: From<<F as Truncate>::Error>,
	EntagError: From<<F as Length>::Error>,
{
	if tag.tag_type() != TagType::VorbisComments {
		err!(UnsupportedTag);
	}

	let comments = create_comments_block(tag)?;

	let mut file_bytes = Vec::new();
	file.read_to_end(&mut file_bytes)?;

	let mut cursor = Cursor::new(file_bytes);

	// We don't need the ID3v2 tag, but reading it will seek to the end of it if it exists
	find_id3v2(&mut cursor, false)?;

	let stream_info = verify_flac(&mut cursor)?;

	let mut is_last_block = stream_info.header.is_last;
	let metadata_start = stream_info.start;
	let mut metadata_end = stream_info.end;

	let mut blocks = vec![stream_info];
	while !is_last_block {
		let block = Block::read(&mut cursor, |ty| {
			!matches!(ty, BlockType::VorbisComment | BlockType::Padding)
		})?;

		is_last_block = block.header.is_last;
		metadata_end = block.end;

		match block.header.block_type {
			BlockType::VorbisComment | BlockType::Padding => {
				log::trace!("Dropping {:?} block", block.header.block_type);
			},
			_ => blocks.push(block),
		}
	}

	blocks.push(Block::new(BlockType::VorbisComment, comments)?);

	if let Some(padding) = write_options.preferred_padding {
		log::debug!("Writing a PADDING block of {padding} bytes");
		blocks.push(Block::new(BlockType::Padding, vec![0; padding as usize])?);
	}

	let last_idx = blocks.len() - 1;
	let mut encoded_metadata = Vec::new();
	for (idx, mut block) in blocks.into_iter().enumerate() {
		block.header.is_last = idx == last_idx;
		block.write_to(&mut encoded_metadata);

		log::trace!(
			"Wrote a block (ty: {:?}, size: {})",
			block.header.block_type,
			block.content.len()
		);
	}

	// Block positions are relative to the start of the stream
	let stream_start = file.stream_position()? - cursor.get_ref().len() as u64;
	splice(
		file,
		stream_start + metadata_start,
		stream_start + metadata_end,
		&encoded_metadata,
	)
}

#[cfg(test)]
mod tests {
	use super::write_to;
	use crate::config::{ParseOptions, WriteOptions};
	use crate::flac::read::read_from;
	use crate::tag::{Tag, TagType};

	use std::io::Cursor;

	fn flac(blocks: &[(u8, &[u8])]) -> Vec<u8> {
		let mut file = b"fLaC".to_vec();

		let mut stream_info = vec![0x10, 0, 0x10, 0, 0, 0, 0, 0, 0, 0, 0x0A, 0xC4, 0x42, 0xF0];
		stream_info.extend([0, 0, 0xAC, 0x44]);
		stream_info.extend([0; 16]);

		let last = if blocks.is_empty() { 0x80 } else { 0 };
		file.extend([last, 0, 0, 34]);
		file.extend(stream_info);

		for (idx, (ty, content)) in blocks.iter().enumerate() {
			let last = if idx == blocks.len() - 1 { 0x80 } else { 0 };
			file.push(ty | last);
			file.extend(&(content.len() as u32).to_be_bytes()[1..]);
			file.extend(*content);
		}

		// Fake audio frames
		file.extend([0xFF, 0xF8, 0x01, 0x02]);
		file
	}

	#[test_log::test]
	fn replaces_comments_and_padding() {
		let mut file = Cursor::new(flac(&[
			(1, &[0; 10][..]),
			(2, &b"APPLdata"[..]),
			(4, &[0; 8][..]),
		]));

		let mut tag = Tag::new(TagType::VorbisComments);
		tag.push_title(String::from("Title"));

		write_to(&mut file, &tag, WriteOptions::new().preferred_padding(0)).unwrap();

		file.set_position(0);
		let audio_file = read_from(&mut file, ParseOptions::new()).unwrap();
		assert_eq!(audio_file.tag().title().count(), 1);

		let bytes = file.into_inner();
		// STREAMINFO is no longer the last block
		assert_eq!(bytes[4], 0x00);
		// APPLICATION is kept right after it
		assert_eq!(bytes[4 + 4 + 34], 0x02);
		assert!(bytes.ends_with(&[0xFF, 0xF8, 0x01, 0x02]));
	}

	#[test_log::test]
	fn padding_is_last() {
		let mut file = Cursor::new(flac(&[]));

		let tag = Tag::new(TagType::VorbisComments);
		write_to(&mut file, &tag, WriteOptions::new().preferred_padding(16)).unwrap();

		let bytes = file.into_inner();
		let comments_header = 4 + 4 + 34;
		assert_eq!(bytes[comments_header], 0x04);

		let comments_len = u32::from_be_bytes([
			0,
			bytes[comments_header + 1],
			bytes[comments_header + 2],
			bytes[comments_header + 3],
		]) as usize;

		let padding_header = comments_header + 4 + comments_len;
		assert_eq!(&bytes[padding_header..padding_header + 4], &[0x81, 0, 0, 16]);
		assert_eq!(bytes.len(), padding_header + 4 + 16 + 4);
	}

	#[test_log::test]
	fn comment_block_round_trip() {
		let mut comments = Vec::new();
		comments.extend(6_u32.to_le_bytes());
		comments.extend(b"vendor");
		comments.extend(3_u32.to_le_bytes());
		for comment in ["ARTIST=Foo", "ARTIST=Bar", "TITLE=Baz"] {
			comments.extend((comment.len() as u32).to_le_bytes());
			comments.extend(comment.as_bytes());
		}

		let original = flac(&[(2, &b"APPLdata"[..]), (4, &comments[..])]);
		let mut file = Cursor::new(original.clone());

		let audio_file = read_from(&mut file, ParseOptions::new()).unwrap();
		assert_eq!(audio_file.tag().artist().count(), 2);

		file.set_position(0);
		write_to(
			&mut file,
			audio_file.tag(),
			WriteOptions::new().preferred_padding(0),
		)
		.unwrap();

		assert_eq!(file.into_inner(), original);
	}

	#[test_log::test]
	fn rejects_other_tags() {
		let mut file = Cursor::new(flac(&[]));
		assert!(write_to(&mut file, &Tag::new(TagType::Ape), WriteOptions::new()).is_err());
	}
}
