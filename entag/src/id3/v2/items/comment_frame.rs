use crate::error::Result;
use crate::id3::v2::frame::content::verify_encoding;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::{FrameFlags, FrameHeader, FrameId};
use crate::macros::id3v2_err;
use crate::tag::{TagField, TagTextField};
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

use byteorder::ReadBytesExt;

/// An `ID3v2` comment frame
///
/// The body is laid out as `[encoding][language x3][description][terminator][content]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommentFrame {
	pub(crate) header: FrameHeader,
	/// The encoding of the description and comment text
	pub encoding: TextEncoding,
	/// ISO-639-2 language code (3 bytes)
	pub language: [u8; 3],
	/// Unique content description
	pub description: String,
	/// The actual frame content
	pub content: String,
}

impl CommentFrame {
	pub(crate) const ID: &'static str = "COMM";
	/// The language used when none is specified
	pub const DEFAULT_LANGUAGE: [u8; 3] = *b"eng";

	/// Create a new [`CommentFrame`]
	pub fn new(
		encoding: TextEncoding,
		language: [u8; 3],
		description: String,
		content: String,
	) -> Self {
		Self {
			header: FrameHeader::new(FrameId(String::from(Self::ID)), FrameFlags::default()),
			encoding,
			language,
			description,
			content,
		}
	}

	/// Get the flags for the frame
	pub fn flags(&self) -> FrameFlags {
		self.header.flags
	}

	/// Read a [`CommentFrame`] from a slice
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * The encoding byte is invalid
	/// * Unable to decode the text
	pub fn parse(
		mut body: &[u8],
		header: FrameHeader,
		version: Id3v2Version,
	) -> Result<Option<Self>> {
		let reader = &mut body;
		let Ok(encoding_byte) = reader.read_u8() else {
			return Ok(None);
		};

		let encoding = verify_encoding(encoding_byte, version)?;

		let mut language = [0; 3];
		if reader.read_exact(&mut language).is_err() {
			return Err(id3v2_err!(MalformedFrame));
		}

		let description = decode_text(
			reader,
			TextDecodeOptions::new().encoding(encoding).terminated(true),
		)?;
		// A missing content segment is an empty comment
		let content = decode_text(
			reader,
			TextDecodeOptions::new()
				.encoding(encoding)
				.bom(description.bom),
		)?
		.content;

		Ok(Some(Self {
			header,
			encoding,
			language,
			description: description.content,
			content,
		}))
	}

	/// Convert a [`CommentFrame`] to an ID3v2.3 frame body
	///
	/// # Errors
	///
	/// * `language` contains invalid characters (Only `'a'..='z'` and `'A'..='Z'` allowed)
	/// * The text can't be represented in the frame's encoding
	pub fn as_bytes(&self) -> Result<Vec<u8>> {
		if !self.language.iter().all(u8::is_ascii_alphabetic) {
			return Err(id3v2_err!(InvalidLanguage(self.language)));
		}

		let encoding = self.encoding.to_id3v23();

		let mut bytes = vec![encoding as u8];
		bytes.extend(self.language);
		bytes.extend(encoding.encode(&self.description, true, false)?);
		bytes.extend(encoding.encode_value(&self.content)?);

		Ok(bytes)
	}
}

impl TagField for CommentFrame {
	fn id(&self) -> &str {
		self.header.id.as_str()
	}

	fn is_binary(&self) -> bool {
		false
	}

	fn is_empty(&self) -> bool {
		self.content.is_empty()
	}

	fn is_common(&self) -> bool {
		true
	}

	fn raw_content(&self) -> Result<Vec<u8>> {
		crate::id3::v2::frame::frame_bytes(&self.header, self.as_bytes()?, false)
	}
}

impl TagTextField for CommentFrame {
	fn content(&self) -> &str {
		&self.content
	}

	fn encoding(&self) -> TextEncoding {
		self.encoding
	}
}

#[cfg(test)]
mod tests {
	use crate::error::{ErrorKind, Id3v2ErrorKind};
	use crate::id3::v2::header::Id3v2Version;
	use crate::id3::v2::{CommentFrame, FrameFlags, FrameHeader, FrameId};
	use crate::util::text::TextEncoding;

	fn header() -> FrameHeader {
		FrameHeader::new(FrameId::new("COMM").unwrap(), FrameFlags::default())
	}

	#[test_log::test]
	fn build_then_populate() {
		for encoding in [TextEncoding::Latin1, TextEncoding::UTF16] {
			let frame = CommentFrame::new(
				encoding,
				*b"eng",
				String::new(),
				String::from("Hello"),
			);

			let body = frame.as_bytes().unwrap();
			let parsed = CommentFrame::parse(&body, header(), Id3v2Version::V3)
				.unwrap()
				.unwrap();

			assert_eq!(&parsed.language, b"eng");
			assert_eq!(parsed.description, "");
			assert_eq!(parsed.content, "Hello");
			assert_eq!(parsed.encoding, encoding);
		}
	}

	#[test_log::test]
	fn latin1_layout() {
		let frame = CommentFrame::new(
			TextEncoding::Latin1,
			*b"eng",
			String::from("d"),
			String::from("Hello"),
		);

		assert_eq!(frame.as_bytes().unwrap(), b"\x00engd\x00Hello");
	}

	#[test_log::test]
	fn missing_content_segment() {
		let body = b"\x00engjust a description";
		let parsed = CommentFrame::parse(body, header(), Id3v2Version::V3)
			.unwrap()
			.unwrap();

		assert_eq!(parsed.description, "just a description");
		assert_eq!(parsed.content, "");
	}

	#[test_log::test]
	fn utf16_content_shares_bom() {
		// The content has no BOM of its own
		let body = [
			1, b'e', b'n', b'g', 0xFF, 0xFE, b'd', 0, 0, 0, b'H', 0, b'i', 0,
		];
		let parsed = CommentFrame::parse(&body, header(), Id3v2Version::V3)
			.unwrap()
			.unwrap();

		assert_eq!(parsed.description, "d");
		assert_eq!(parsed.content, "Hi");
	}

	#[test_log::test]
	fn invalid_language() {
		let frame = CommentFrame::new(
			TextEncoding::Latin1,
			*b"e1g",
			String::new(),
			String::from("Hello"),
		);

		let err = frame.as_bytes().unwrap_err();
		let ErrorKind::Id3v2(id3v2_err) = err.kind() else {
			panic!("expected an ID3v2 error, got {err:?}");
		};
		assert!(matches!(
			id3v2_err.kind(),
			Id3v2ErrorKind::InvalidLanguage(lang) if lang == b"e1g"
		));
	}
}
