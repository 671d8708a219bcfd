use super::content::parse_content;
use super::header::parse_header;
use crate::config::{ParseOptions, ParsingMode};
use crate::error::{EntagError, Result};
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::util::synchsafe::resynchronise;
use crate::id3::v2::{AttachedPictureFrame, BinaryFrame, Frame, FrameHeader, FrameId};
use crate::macros::{id3v2_err, parse_mode_choice, try_vec};
#[cfg(feature = "id3v2_compression_support")]
use crate::util::alloc::VecFallibleCapacity;

use std::io::Read;

pub(crate) enum ParsedFrame {
	Next(Frame),
	Skip,
	Eof,
}

impl ParsedFrame {
	pub(crate) fn read<R>(
		reader: &mut R,
		version: Id3v2Version,
		tag_unsynchronised: bool,
		parse_options: ParseOptions,
	) -> Result<Self>
	where
		R: Read,
	{
		let parse_mode = parse_options.parsing_mode;

		let Some(raw) = parse_header(reader, version)? else {
			return Ok(Self::Eof);
		};

		let mut body = try_vec![0; raw.size as usize];
		if let Err(err) = reader.read_exact(&mut body) {
			parse_mode_choice!(
				parse_mode,
				STRICT: return Err(err.into()),
				DEFAULT: {
					log::warn!("Frame {} extends past the end of the tag, stopping", raw.id);
					return Ok(Self::Eof);
				}
			);
		}

		let id = match FrameId::new(raw.id) {
			Ok(id) => id,
			Err(err) => return recover(err, parse_mode),
		};

		log::trace!("Reading frame {id} ({} bytes)", raw.size);

		if raw.size == 0 {
			log::debug!("Skipping empty frame {id}");
			return Ok(Self::Skip);
		}

		if !parse_options.read_cover_art && id.as_str() == AttachedPictureFrame::ID {
			return Ok(Self::Skip);
		}

		let mut flags = raw.flags;
		if tag_unsynchronised && version == Id3v2Version::V4 {
			flags.unsynchronisation = true;
		}

		let flag_data_len = match flags.read_trailing(&body, version) {
			Ok(len) => len,
			Err(err) => return recover(err, parse_mode),
		};

		let mut content = body.split_off(flag_data_len);
		if flags.unsynchronisation {
			content = resynchronise(&content);
		}

		// Compressed frames need their decompressed size
		let decompressed_len = match (flags.compression, flags.data_length_indicator) {
			(true, None) => return recover(id3v2_err!(MissingDataLengthIndicator), parse_mode),
			(true, Some(len)) => Some(len),
			(false, _) => None,
		};

		let header = FrameHeader::new(id, flags);

		// Nothing can be done with encrypted frames, they're kept as-is
		if flags.encryption.is_some() {
			log::debug!("Keeping encrypted frame {} as binary", header.id);
			return Ok(Self::Next(Frame::Binary(BinaryFrame::new(header, content))));
		}

		if let Some(decompressed_len) = decompressed_len {
			content = decompress(&content, decompressed_len)?;
		}

		match parse_content(&content, header, version, parse_mode)? {
			Some(frame) => Ok(Self::Next(frame)),
			None => Ok(Self::Skip),
		}
	}
}

fn recover(err: EntagError, parse_mode: ParsingMode) -> Result<ParsedFrame> {
	if parse_mode == ParsingMode::Strict {
		return Err(err);
	}

	log::warn!("Skipping frame: {err}");
	Ok(ParsedFrame::Skip)
}

#[cfg(feature = "id3v2_compression_support")]
fn decompress(content: &[u8], decompressed_len: u32) -> Result<Vec<u8>> {
	let mut decompressed = Vec::try_with_capacity_stable(decompressed_len as usize)?;
	flate2::read::ZlibDecoder::new(content)
		.take(u64::from(decompressed_len))
		.read_to_end(&mut decompressed)
		.map_err(|err| id3v2_err!(Decompression(err)))?;

	Ok(decompressed)
}

#[cfg(not(feature = "id3v2_compression_support"))]
fn decompress(_content: &[u8], _decompressed_len: u32) -> Result<Vec<u8>> {
	Err(id3v2_err!(CompressedFrameEncountered))
}
