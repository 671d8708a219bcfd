use crate::error::Result;
use crate::id3::v2::frame::content::verify_encoding;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::{FrameFlags, FrameHeader, FrameId};
use crate::macros::{err, id3v2_err};
use crate::picture::{MimeType, Picture, PictureType};
use crate::tag::TagField;
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text, latin1_decode};

use std::io::Read;

use byteorder::ReadBytesExt as _;

/// An `ID3v2` attached picture frame
///
/// This is simply a wrapper around [`Picture`] to include a [`TextEncoding`]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttachedPictureFrame {
	pub(crate) header: FrameHeader,
	/// The encoding of the description
	pub encoding: TextEncoding,
	/// The picture itself
	pub picture: Picture,
}

impl AttachedPictureFrame {
	pub(crate) const ID: &'static str = "APIC";

	/// Create a new [`AttachedPictureFrame`]
	pub fn new(encoding: TextEncoding, picture: Picture) -> Self {
		Self {
			header: FrameHeader::new(FrameId(String::from(Self::ID)), FrameFlags::default()),
			encoding,
			picture,
		}
	}

	/// Get the flags for the frame
	pub fn flags(&self) -> FrameFlags {
		self.header.flags
	}

	/// Get an [`AttachedPictureFrame`] from ID3v2 A/PIC bytes:
	///
	/// NOTE: This expects *only* the frame content
	///
	/// # Errors
	///
	/// * There isn't enough data present
	/// * Unable to decode any of the text
	///
	/// ID3v2.2:
	///
	/// * The image format is unknown
	pub fn parse(mut body: &[u8], header: FrameHeader, version: Id3v2Version) -> Result<Self> {
		let reader = &mut body;

		let encoding = verify_encoding(reader.read_u8()?, version)?;

		let mime_type = if version == Id3v2Version::V2 {
			let mut format = [0; 3];
			reader.read_exact(&mut format)?;

			match MimeType::from_id3v22_format(&format) {
				Some(mime_type) => Some(mime_type),
				None => {
					return Err(id3v2_err!(BadPictureFormat(latin1_decode(&format))));
				},
			}
		} else {
			let mime_type_str = decode_text(
				reader,
				TextDecodeOptions::new()
					.encoding(TextEncoding::Latin1)
					.terminated(true),
			)?
			.content;

			(!mime_type_str.is_empty()).then(|| MimeType::from_str(&mime_type_str))
		};

		let pic_type = PictureType::from_u8(reader.read_u8()?);

		let description = decode_text(
			reader,
			TextDecodeOptions::new().encoding(encoding).terminated(true),
		)?
		.content;
		let description = (!description.is_empty()).then_some(description);

		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;

		if data.is_empty() {
			err!(NotAPicture);
		}

		Ok(Self {
			header,
			encoding,
			picture: Picture::new(pic_type, mime_type, description, data),
		})
	}

	/// Convert an [`AttachedPictureFrame`] to an ID3v2.3 APIC frame body
	///
	/// # Errors
	///
	/// * The mime type or description can't be represented in their encodings
	pub fn as_bytes(&self) -> Result<Vec<u8>> {
		let encoding = self.encoding.to_id3v23();

		let mut data = vec![encoding as u8];
		data.extend(TextEncoding::Latin1.encode(self.picture.mime_str(), true, false)?);
		data.push(self.picture.pic_type.as_u8());
		data.extend(encoding.encode(
			self.picture.description().unwrap_or_default(),
			true,
			false,
		)?);
		data.extend(&self.picture.data);

		Ok(data)
	}
}

impl TagField for AttachedPictureFrame {
	fn id(&self) -> &str {
		self.header.id.as_str()
	}

	fn is_binary(&self) -> bool {
		true
	}

	fn is_empty(&self) -> bool {
		self.picture.data.is_empty()
	}

	fn is_common(&self) -> bool {
		false
	}

	fn raw_content(&self) -> Result<Vec<u8>> {
		crate::id3::v2::frame::frame_bytes(&self.header, self.as_bytes()?, false)
	}
}

#[cfg(test)]
mod tests {
	use crate::id3::v2::header::Id3v2Version;
	use crate::id3::v2::{AttachedPictureFrame, FrameFlags, FrameHeader, FrameId};
	use crate::picture::{MimeType, Picture, PictureType};
	use crate::util::text::TextEncoding;

	fn header(id: &str) -> FrameHeader {
		FrameHeader::new(FrameId::new(id).unwrap(), FrameFlags::default())
	}

	#[test_log::test]
	fn apic_body() {
		let frame = AttachedPictureFrame::new(
			TextEncoding::Latin1,
			Picture::new(
				PictureType::CoverFront,
				Some(MimeType::Png),
				Some(String::from("cover")),
				vec![1, 2, 3],
			),
		);

		let body = frame.as_bytes().unwrap();
		assert_eq!(body, b"\x00image/png\x00\x03cover\x00\x01\x02\x03");

		let parsed = AttachedPictureFrame::parse(&body, header("APIC"), Id3v2Version::V3).unwrap();
		assert_eq!(parsed, frame);
	}

	#[test_log::test]
	fn v22_pic_body() {
		let body = b"\x00JPG\x04\x00\xFF\xD8";
		let parsed = AttachedPictureFrame::parse(body, header("APIC"), Id3v2Version::V2).unwrap();

		assert_eq!(parsed.picture.mime_type(), Some(&MimeType::Jpeg));
		assert_eq!(parsed.picture.pic_type(), PictureType::CoverBack);
		assert_eq!(parsed.picture.description(), None);
		assert_eq!(parsed.picture.data(), [0xFF, 0xD8]);
	}

	#[test_log::test]
	fn v22_unknown_format() {
		let body = b"\x00XYZ\x04\x00\xFF\xD8";
		assert!(AttachedPictureFrame::parse(body, header("APIC"), Id3v2Version::V2).is_err());
	}
}
