use super::block::{Block, BlockType};
use super::properties::read_properties;
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::file::{AudioFile, FileType};
use crate::id3::{ID3FindResults, find_id3v2};
use crate::macros::{decode_err, err};
use crate::ogg::read::read_comments;
use crate::properties::EncodingInfo;
use crate::tag::{Tag, TagType};

use std::io::{Read, Seek, SeekFrom};

pub(super) fn verify_flac<R>(data: &mut R) -> Result<Block>
where
	R: Read + Seek,
{
	let mut marker = [0; 4];
	data.read_exact(&mut marker)
		.map_err(|_| decode_err!(Flac, "File is too small to contain a stream marker"))?;

	if &marker != b"fLaC" {
		decode_err!(@BAIL Flac, "File missing \"fLaC\" stream marker");
	}

	let block = Block::read(data, |_| true)?;

	if block.header.block_type != BlockType::StreamInfo {
		decode_err!(@BAIL Flac, "File missing mandatory STREAMINFO block");
	}

	if block.content.len() < 34 {
		decode_err!(@BAIL Flac, "File has an invalid STREAMINFO block size (< 34)");
	}

	log::debug!("File verified to be FLAC");
	Ok(block)
}

pub(crate) fn read_from<R>(data: &mut R, parse_options: ParseOptions) -> Result<AudioFile>
where
	R: Read + Seek,
{
	// It is possible for a FLAC file to contain an ID3v2 tag
	if let ID3FindResults(Some(_), _) = find_id3v2(data, false)? {
		log::debug!("Skipping ID3v2 tag before the FLAC stream marker");
	}

	let stream_info = verify_flac(data)?;

	let mut tag = None;
	let mut last_block = stream_info.header.is_last;

	while !last_block {
		let block = Block::read(data, |block_type| {
			block_type == BlockType::VorbisComment && parse_options.read_tags
		})?;

		last_block = block.header.is_last;

		if block.header.block_type != BlockType::VorbisComment || !parse_options.read_tags {
			continue;
		}

		log::debug!("Encountered a Vorbis Comments block, parsing");

		// Only one VORBIS_COMMENT block is allowed, otherwise the last one is used
		if tag.is_some() && parse_options.parsing_mode == ParsingMode::Strict {
			decode_err!(@BAIL Flac, "Streams are only allowed one Vorbis Comments block per stream");
		}

		tag = Some(read_comments(
			&mut &*block.content,
			block.content.len() as u64,
			parse_options,
		)?);
	}

	let encoding_info = if parse_options.read_properties {
		let current = data.stream_position()?;
		let end = data.seek(SeekFrom::End(0))?;

		// A block lying about its size could put us past the end
		if current > end {
			err!(SizeMismatch);
		}

		read_properties(&mut &*stream_info.content, end - current)?
	} else {
		EncodingInfo::default()
	};

	let tag = tag.unwrap_or_else(|| Tag::new(TagType::VorbisComments));
	Ok(AudioFile::new(FileType::Flac, encoding_info, tag))
}
