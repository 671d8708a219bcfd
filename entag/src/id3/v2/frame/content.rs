use crate::config::ParsingMode;
use crate::error::Result;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::{
	AttachedPictureFrame, BinaryFrame, CommentFrame, Frame, FrameHeader, TextInformationFrame,
};
use crate::macros::{id3v2_err, parse_mode_choice};
use crate::util::text::TextEncoding;

pub(crate) fn verify_encoding(encoding: u8, version: Id3v2Version) -> Result<TextEncoding> {
	// ID3v2.2 only supports Latin-1 and UTF-16
	if version == Id3v2Version::V2 && encoding > 1 {
		return Err(id3v2_err!(MalformedFrame));
	}

	TextEncoding::from_u8(encoding).ok_or_else(|| id3v2_err!(MalformedFrame))
}

/// Parse a frame body, which has already had all flag data removed
///
/// Returns `None` when the frame is discarded.
pub(crate) fn parse_content(
	body: &[u8],
	header: FrameHeader,
	version: Id3v2Version,
	parse_mode: ParsingMode,
) -> Result<Option<Frame>> {
	let id = header.id.as_str();

	let parsed = match id {
		AttachedPictureFrame::ID => {
			AttachedPictureFrame::parse(body, header.clone(), version).map(|f| Some(f.into()))
		},
		CommentFrame::ID => {
			CommentFrame::parse(body, header.clone(), version).map(|f| f.map(Frame::Comment))
		},
		_ if id.starts_with('T') && id != "TXXX" && !header.id.is_outdated() => {
			TextInformationFrame::parse(body, header.clone(), version).map(|f| f.map(Frame::Text))
		},
		_ => return Ok(Some(Frame::Binary(BinaryFrame::new(header, body.to_vec())))),
	};

	match parsed {
		Ok(frame) => Ok(frame),
		Err(err) => parse_mode_choice!(
			parse_mode,
			STRICT: return Err(err),
			RELAXED: {
				log::warn!("Failed to parse frame {}, discarding: {err}", header.id);
				Ok(None)
			},
			DEFAULT: {
				log::warn!("Failed to parse frame {}, keeping it as binary: {err}", header.id);
				Ok(Some(Frame::Binary(BinaryFrame::new(header, body.to_vec()))))
			}
		),
	}
}
