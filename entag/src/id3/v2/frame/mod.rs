pub(crate) mod content;
pub(crate) mod header;
pub(crate) mod read;

pub use header::{FrameFlags, FrameHeader, FrameId};

use crate::error::{EntagError, ErrorKind, Result};
use crate::id3::v2::{AttachedPictureFrame, BinaryFrame, CommentFrame, TextInformationFrame};
use crate::macros::id3v2_err;
use crate::tag::{TagField, TagTextField};
use crate::util::text::TextEncoding;

/// Represents an `ID3v2` frame
///
/// ## Outdated Frames
///
/// `ID3v2.2` frame IDs are 3 characters. When reading these tags, the common IDs are upgraded to
/// their `ID3v2.3` counterparts. Anything else is kept as a [`BinaryFrame`] with its 3 character
/// ID, which is skipped when the tag is written.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Frame {
	/// Represents a "T..." (excluding TXXX) frame
	Text(TextInformationFrame),
	/// Represents a "COMM" frame
	Comment(CommentFrame),
	/// Represents an "APIC" or "PIC" frame
	Picture(AttachedPictureFrame),
	/// Binary data, for every frame that isn't interpreted
	Binary(BinaryFrame),
}

impl Frame {
	/// Extract the string from the [`FrameId`]
	pub fn id(&self) -> &str {
		self.header().id.as_str()
	}

	/// The frame's header
	pub fn header(&self) -> &FrameHeader {
		match self {
			Frame::Text(frame) => &frame.header,
			Frame::Comment(frame) => &frame.header,
			Frame::Picture(frame) => &frame.header,
			Frame::Binary(frame) => &frame.header,
		}
	}

	/// Get the flags for the frame
	pub fn flags(&self) -> FrameFlags {
		self.header().flags
	}

	/// Set the flags for the frame
	pub fn set_flags(&mut self, flags: FrameFlags) {
		match self {
			Frame::Text(frame) => frame.header.flags = flags,
			Frame::Comment(frame) => frame.header.flags = flags,
			Frame::Picture(frame) => frame.header.flags = flags,
			Frame::Binary(frame) => frame.header.flags = flags,
		}
	}

	/// The frame as a text field
	///
	/// Only text and comment frames have text content.
	pub fn as_text(&self) -> Option<&dyn TagTextField> {
		match self {
			Frame::Text(frame) => Some(frame),
			Frame::Comment(frame) => Some(frame),
			Frame::Picture(_) | Frame::Binary(_) => None,
		}
	}

	/// Create a copy of this frame with new text content
	///
	/// This is `None` for frames without text content.
	pub fn with_text(&self, text: &str) -> Option<Frame> {
		match self {
			Frame::Text(frame) => Some(Frame::Text(TextInformationFrame {
				value: text.to_owned(),
				..frame.clone()
			})),
			Frame::Comment(frame) => Some(Frame::Comment(CommentFrame {
				content: text.to_owned(),
				..frame.clone()
			})),
			Frame::Picture(_) | Frame::Binary(_) => None,
		}
	}

	/// Whether both frames are the same variant
	pub fn is_same_kind(&self, other: &Frame) -> bool {
		std::mem::discriminant(self) == std::mem::discriminant(other)
	}

	/// Create a copy of this frame holding the content of `other`
	///
	/// The header and encoding of `self` are kept. Frames of a different kind return an
	/// unchanged copy of `self`.
	pub fn with_content_from(&self, other: &Frame) -> Frame {
		match (self, other) {
			(Frame::Text(frame), Frame::Text(other)) => Frame::Text(TextInformationFrame {
				value: other.value.clone(),
				..frame.clone()
			}),
			(Frame::Comment(frame), Frame::Comment(other)) => Frame::Comment(CommentFrame {
				content: other.content.clone(),
				..frame.clone()
			}),
			(Frame::Picture(frame), Frame::Picture(other)) => {
				Frame::Picture(AttachedPictureFrame {
					picture: other.picture.clone(),
					..frame.clone()
				})
			},
			(Frame::Binary(frame), Frame::Binary(other)) => Frame::Binary(BinaryFrame {
				data: other.data.clone(),
				..frame.clone()
			}),
			_ => self.clone(),
		}
	}

	/// Create a copy of this frame using a different text encoding
	///
	/// Binary frames have no encoding, and are returned unchanged.
	pub fn with_encoding(&self, encoding: TextEncoding) -> Frame {
		let mut frame = self.clone();
		match &mut frame {
			Frame::Text(frame) => frame.encoding = encoding,
			Frame::Comment(frame) => frame.encoding = encoding,
			Frame::Picture(frame) => frame.encoding = encoding,
			Frame::Binary(_) => {},
		}

		frame
	}
}

impl TagField for Frame {
	fn id(&self) -> &str {
		Frame::id(self)
	}

	fn is_binary(&self) -> bool {
		matches!(self, Frame::Picture(_) | Frame::Binary(_))
	}

	fn is_empty(&self) -> bool {
		match self {
			Frame::Text(frame) => frame.is_empty(),
			Frame::Comment(frame) => frame.is_empty(),
			Frame::Picture(frame) => frame.is_empty(),
			Frame::Binary(frame) => frame.is_empty(),
		}
	}

	fn is_common(&self) -> bool {
		crate::id3::v2::common_field(self.id()).is_some()
	}

	fn raw_content(&self) -> Result<Vec<u8>> {
		match self {
			Frame::Text(frame) => frame.raw_content(),
			Frame::Comment(frame) => frame.raw_content(),
			Frame::Picture(frame) => frame.raw_content(),
			Frame::Binary(frame) => frame.raw_content(),
		}
	}
}

impl From<TextInformationFrame> for Frame {
	fn from(value: TextInformationFrame) -> Self {
		Frame::Text(value)
	}
}

impl From<CommentFrame> for Frame {
	fn from(value: CommentFrame) -> Self {
		Frame::Comment(value)
	}
}

impl From<AttachedPictureFrame> for Frame {
	fn from(value: AttachedPictureFrame) -> Self {
		Frame::Picture(value)
	}
}

impl From<BinaryFrame> for Frame {
	fn from(value: BinaryFrame) -> Self {
		Frame::Binary(value)
	}
}

/// Build an ID3v2.3 frame: `id(4) ++ BE u32 size ++ flags(2) ++ flag data ++ body`
///
/// Bodies are stored decoded, so compression and unsynchronisation are dropped. Only an
/// encrypted `raw_payload` keeps its compression and encryption flags.
pub(crate) fn frame_bytes(header: &FrameHeader, body: Vec<u8>, raw_payload: bool) -> Result<Vec<u8>> {
	if header.id.is_outdated() {
		return Err(id3v2_err!(BadFrameId(header.id.as_str().as_bytes().to_vec())));
	}

	let mut flags = header.flags;
	flags.unsynchronisation = false;
	if !(raw_payload && flags.encryption.is_some()) {
		flags.compression = false;
		flags.encryption = None;
		flags.data_length_indicator = None;
	}

	let flag_data = flags.trailing_id3v23_bytes();
	let size = u32::try_from(flag_data.len() + body.len())
		.map_err(|_| EntagError::new(ErrorKind::TooMuchData))?;

	log::trace!("Writing frame {} ({size} bytes)", header.id);

	let mut bytes = Vec::with_capacity(10 + flag_data.len() + body.len());
	bytes.extend(header.id.as_str().as_bytes());
	bytes.extend(size.to_be_bytes());
	bytes.extend(flags.as_id3v23_bytes().to_be_bytes());
	bytes.extend(flag_data);
	bytes.extend(body);

	Ok(bytes)
}
