use crate::error::Result;
use crate::id3::v2::{FrameHeader, FrameId};
use crate::tag::TagField;

/// An `ID3v2` frame that entag does not interpret
///
/// The content is preserved as-is and written back unchanged. This is used for:
///
/// * Unknown frames
/// * Encrypted frames
/// * Frames with an ID3v2.2 ID that couldn't be upgraded
/// * Text frames with an invalid encoding, outside of [`ParsingMode::Strict`](crate::config::ParsingMode::Strict)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BinaryFrame {
	pub(crate) header: FrameHeader,
	/// The frame content
	pub data: Vec<u8>,
}

impl BinaryFrame {
	/// Create a new [`BinaryFrame`]
	pub fn new(header: FrameHeader, data: Vec<u8>) -> Self {
		Self { header, data }
	}

	/// Get the ID for the frame
	pub fn id(&self) -> &FrameId {
		&self.header.id
	}

	/// The frame content
	pub fn as_bytes(&self) -> &[u8] {
		&self.data
	}
}

impl TagField for BinaryFrame {
	fn id(&self) -> &str {
		self.header.id.as_str()
	}

	fn is_binary(&self) -> bool {
		true
	}

	fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	fn is_common(&self) -> bool {
		false
	}

	fn raw_content(&self) -> Result<Vec<u8>> {
		crate::id3::v2::frame::frame_bytes(&self.header, self.data.clone(), true)
	}
}
