use crate::error::Result;
use crate::id3::v2::frame::content::verify_encoding;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::{FrameFlags, FrameHeader, FrameId};
use crate::tag::{TagField, TagTextField};
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use byteorder::ReadBytesExt;

/// An `ID3v2` text frame
///
/// Every `T***` frame other than `TXXX`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextInformationFrame {
	pub(crate) header: FrameHeader,
	/// The encoding of the text
	pub encoding: TextEncoding,
	/// The text itself
	pub value: String,
}

impl TextInformationFrame {
	/// Create a new [`TextInformationFrame`]
	pub fn new(id: FrameId, encoding: TextEncoding, value: String) -> Self {
		Self {
			header: FrameHeader::new(id, FrameFlags::default()),
			encoding,
			value,
		}
	}

	/// Get the ID for the frame
	pub fn id(&self) -> &FrameId {
		&self.header.id
	}

	/// Get the flags for the frame
	pub fn flags(&self) -> FrameFlags {
		self.header.flags
	}

	/// Read a [`TextInformationFrame`] from a slice
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
		let value = decode_text(reader, TextDecodeOptions::new().encoding(encoding))?.content;

		Ok(Some(Self {
			header,
			encoding,
			value,
		}))
	}

	/// Convert a [`TextInformationFrame`] to an ID3v2.3 frame body
	///
	/// # Errors
	///
	/// The value can't be represented in the frame's encoding
	pub fn as_bytes(&self) -> Result<Vec<u8>> {
		let encoding = self.encoding.to_id3v23();

		let mut content = encoding.encode_value(&self.value)?;
		content.insert(0, encoding as u8);
		Ok(content)
	}
}

impl TagField for TextInformationFrame {
	fn id(&self) -> &str {
		self.header.id.as_str()
	}

	fn is_binary(&self) -> bool {
		false
	}

	fn is_empty(&self) -> bool {
		self.value.is_empty()
	}

	fn is_common(&self) -> bool {
		crate::id3::v2::common_field(self.header.id.as_str()).is_some()
	}

	fn raw_content(&self) -> Result<Vec<u8>> {
		crate::id3::v2::frame::frame_bytes(&self.header, self.as_bytes()?, false)
	}
}

impl TagTextField for TextInformationFrame {
	fn content(&self) -> &str {
		&self.value
	}

	fn encoding(&self) -> TextEncoding {
		self.encoding
	}
}
