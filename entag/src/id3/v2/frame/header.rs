use crate::error::Result;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::util::synchsafe::SynchsafeInteger;
use crate::id3::v2::util::upgrade::upgrade_v2;
use crate::macros::id3v2_err;

use std::fmt::{Display, Formatter};
use std::io::Read;

/// An ID3v2 frame header
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameHeader {
	pub(crate) id: FrameId,
	/// The frame's flags
	pub flags: FrameFlags,
}

impl FrameHeader {
	/// Create a new [`FrameHeader`]
	pub const fn new(id: FrameId, flags: FrameFlags) -> Self {
		Self { id, flags }
	}

	/// Get the ID of the frame
	pub fn id(&self) -> &FrameId {
		&self.id
	}
}

/// An ID3v2 frame ID
///
/// IDs are 4 characters, or 3 characters for ID3v2.2 frames that couldn't be upgraded.
#[derive(PartialEq, Clone, Debug, Eq, Hash)]
pub struct FrameId(pub(crate) String);

impl FrameId {
	/// Attempts to create a `FrameId` from an ID string
	///
	/// # Errors
	///
	/// * `id` contains invalid characters (must be 'A'..='Z' and '0'..='9')
	/// * `id` is an invalid length (must be 3 or 4)
	///
	/// # Examples
	///
	/// ```rust
	/// use entag::id3::v2::FrameId;
	///
	/// assert!(FrameId::new("TIT2").is_ok());
	/// assert!(FrameId::new("tit2").is_err());
	/// assert!(FrameId::new("TITLE").is_err());
	/// ```
	pub fn new(id: impl Into<String>) -> Result<Self> {
		let id = id.into();

		let valid_chars = id
			.chars()
			.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
		if !valid_chars || !(3..=4).contains(&id.len()) {
			return Err(id3v2_err!(BadFrameId(id.into_bytes())));
		}

		Ok(Self(id))
	}

	/// Whether this frame ID is an ID3v2.2 ID
	///
	/// These frames can't be written.
	pub fn is_outdated(&self) -> bool {
		self.0.len() == 3
	}

	/// Extracts the string from the ID
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Display for FrameId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Various flags to describe the content of an item
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[allow(clippy::struct_excessive_bools)]
pub struct FrameFlags {
	/// Preserve frame on tag edit
	pub tag_alter_preservation: bool,
	/// Preserve frame on file edit
	pub file_alter_preservation: bool,
	/// Item cannot be written to
	pub read_only: bool,
	/// The group identifier the frame belongs to
	pub grouping_identity: Option<u8>,
	/// Frame is zlib compressed
	pub compression: bool,
	/// Frame encryption method symbol
	///
	/// Encrypted frames are kept as [`BinaryFrame`](crate::id3::v2::BinaryFrame)s.
	pub encryption: Option<u8>,
	/// Frame is unsynchronised
	///
	/// This is only read, content is never unsynchronised when written.
	pub unsynchronisation: bool,
	/// The size of the frame content before compression or encryption
	pub data_length_indicator: Option<u32>,
}

impl FrameFlags {
	/// Parse the flags from an ID3v2.4 frame
	///
	/// NOTE: If any of the following flags are set, they will be set to `Some(0)`:
	/// * `grouping_identity`
	/// * `encryption`
	/// * `data_length_indicator`
	pub fn parse_id3v24(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x4000 == 0x4000,
			file_alter_preservation: flags & 0x2000 == 0x2000,
			read_only: flags & 0x1000 == 0x1000,
			grouping_identity: (flags & 0x0040 == 0x0040).then_some(0),
			compression: flags & 0x0008 == 0x0008,
			encryption: (flags & 0x0004 == 0x0004).then_some(0),
			unsynchronisation: flags & 0x0002 == 0x0002,
			data_length_indicator: (flags & 0x0001 == 0x0001).then_some(0),
		}
	}

	/// Parse the flags from an ID3v2.3 frame
	///
	/// NOTE: If any of the following flags are set, they will be set to `Some(0)`:
	/// * `grouping_identity`
	/// * `encryption`
	/// * `data_length_indicator` (compressed frames store their decompressed size)
	pub fn parse_id3v23(flags: u16) -> Self {
		let compression = flags & 0x0080 == 0x0080;

		FrameFlags {
			tag_alter_preservation: flags & 0x8000 == 0x8000,
			file_alter_preservation: flags & 0x4000 == 0x4000,
			read_only: flags & 0x2000 == 0x2000,
			grouping_identity: (flags & 0x0020 == 0x0020).then_some(0),
			compression,
			encryption: (flags & 0x0040 == 0x0040).then_some(0),
			unsynchronisation: false,
			data_length_indicator: compression.then_some(0),
		}
	}

	/// Get the ID3v2.3 byte representation of the flags
	pub fn as_id3v23_bytes(&self) -> u16 {
		let mut flags = 0;

		if self.tag_alter_preservation {
			flags |= 0x8000
		}

		if self.file_alter_preservation {
			flags |= 0x4000
		}

		if self.read_only {
			flags |= 0x2000
		}

		if self.compression {
			flags |= 0x0080
		}

		if self.encryption.is_some() {
			flags |= 0x0040
		}

		if self.grouping_identity.is_some() {
			flags |= 0x0020
		}

		flags
	}

	/// The number of bytes the flags add between the frame header and content
	pub(crate) fn trailing_len(&self, version: Id3v2Version) -> u32 {
		let dli = match version {
			Id3v2Version::V3 => self.compression,
			_ => self.data_length_indicator.is_some(),
		};

		u32::from(self.grouping_identity.is_some())
			+ u32::from(self.encryption.is_some())
			+ if dli { 4 } else { 0 }
	}

	/// Fill in the values that follow the frame header
	///
	/// ID3v2.3 orders these as (decompressed size, encryption, group), while ID3v2.4 orders
	/// them as (group, encryption, data length indicator).
	pub(crate) fn read_trailing(&mut self, body: &[u8], version: Id3v2Version) -> Result<usize> {
		let len = self.trailing_len(version) as usize;
		if body.len() < len {
			return Err(id3v2_err!(MalformedFrame));
		}

		let mut pos = 0;
		let take_u32 = |pos: &mut usize| {
			let value = u32::from_be_bytes([
				body[*pos],
				body[*pos + 1],
				body[*pos + 2],
				body[*pos + 3],
			]);
			*pos += 4;
			value
		};

		match version {
			Id3v2Version::V3 => {
				if self.compression {
					self.data_length_indicator = Some(take_u32(&mut pos));
				}
				if let Some(method) = self.encryption.as_mut() {
					*method = body[pos];
					pos += 1;
				}
				if let Some(group) = self.grouping_identity.as_mut() {
					*group = body[pos];
					pos += 1;
				}
			},
			_ => {
				if let Some(group) = self.grouping_identity.as_mut() {
					*group = body[pos];
					pos += 1;
				}
				if let Some(method) = self.encryption.as_mut() {
					*method = body[pos];
					pos += 1;
				}
				if self.data_length_indicator.is_some() {
					self.data_length_indicator = Some(take_u32(&mut pos).unsynch());
				}
			},
		}

		log::trace!("Read {pos} bytes of frame flag data");
		Ok(pos)
	}

	/// The ID3v2.3 values that follow the frame header
	pub(crate) fn trailing_id3v23_bytes(&self) -> Vec<u8> {
		let mut bytes = Vec::new();

		if self.compression {
			bytes.extend(self.data_length_indicator.unwrap_or(0).to_be_bytes());
		}
		if let Some(method) = self.encryption {
			bytes.push(method);
		}
		if let Some(group) = self.grouping_identity {
			bytes.push(group);
		}

		bytes
	}
}

/// A frame header as it appears on disk, before the ID is verified
pub(crate) struct RawFrameHeader {
	pub(crate) id: String,
	pub(crate) size: u32,
	pub(crate) flags: FrameFlags,
}

/// Read the next frame header
///
/// Returns `None` at the end of the frames, either because the reader is exhausted or
/// padding was reached.
pub(crate) fn parse_header<R>(reader: &mut R, version: Id3v2Version) -> Result<Option<RawFrameHeader>>
where
	R: Read,
{
	let header_len = match version {
		Id3v2Version::V2 => 6,
		_ => 10,
	};

	let mut header = [0; 10];
	if reader.read_exact(&mut header[..header_len]).is_err() {
		return Ok(None);
	}

	// Assume we just started reading padding
	if header[0] == 0 {
		return Ok(None);
	}

	if version == Id3v2Version::V2 {
		let id = latin1_id(&header[..3]);
		let id = upgrade_v2(&id).map_or(id, String::from);

		return Ok(Some(RawFrameHeader {
			id,
			size: u32::from_be_bytes([0, header[3], header[4], header[5]]),
			// V2 doesn't store flags
			flags: FrameFlags::default(),
		}));
	}

	let mut size = u32::from_be_bytes([header[4], header[5], header[6], header[7]]);
	let flags = u16::from_be_bytes([header[8], header[9]]);

	let flags = if version == Id3v2Version::V4 {
		size = size.unsynch();
		FrameFlags::parse_id3v24(flags)
	} else {
		FrameFlags::parse_id3v23(flags)
	};

	Ok(Some(RawFrameHeader {
		id: latin1_id(&header[..4]),
		size,
		flags,
	}))
}

fn latin1_id(bytes: &[u8]) -> String {
	bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
	use super::{FrameFlags, parse_header};
	use crate::id3::v2::header::Id3v2Version;

	#[test_log::test]
	fn v23_flag_bits() {
		let flags = FrameFlags::parse_id3v23(0x8000 | 0x2000 | 0x0080 | 0x0020);
		assert!(flags.tag_alter_preservation);
		assert!(flags.read_only);
		assert!(flags.compression);
		assert_eq!(flags.grouping_identity, Some(0));
		assert_eq!(flags.encryption, None);
		assert_eq!(flags.trailing_len(Id3v2Version::V3), 5);
		assert_eq!(flags.as_id3v23_bytes(), 0x8000 | 0x2000 | 0x0080 | 0x0020);
	}

	#[test_log::test]
	fn v24_flag_bits() {
		let flags = FrameFlags::parse_id3v24(0x1000 | 0x0040 | 0x0004 | 0x0002 | 0x0001);
		assert!(flags.read_only);
		assert!(flags.unsynchronisation);
		assert_eq!(flags.trailing_len(Id3v2Version::V4), 6);
		// Written as ID3v2.3
		assert_eq!(flags.as_id3v23_bytes(), 0x2000 | 0x0040 | 0x0020);
	}

	#[test_log::test]
	fn trailing_bytes_v23_order() {
		let mut flags = FrameFlags::parse_id3v23(0x0080 | 0x0040 | 0x0020);
		let body = [0, 0, 0x01, 0x00, 0x81, 0x07, b'x'];

		let consumed = flags.read_trailing(&body, Id3v2Version::V3).unwrap();
		assert_eq!(consumed, 6);
		assert_eq!(flags.data_length_indicator, Some(256));
		assert_eq!(flags.encryption, Some(0x81));
		assert_eq!(flags.grouping_identity, Some(0x07));
		assert_eq!(flags.trailing_id3v23_bytes(), body[..6]);
	}

	#[test_log::test]
	fn trailing_bytes_too_short() {
		let mut flags = FrameFlags::parse_id3v23(0x0080);
		assert!(flags.read_trailing(&[0, 0], Id3v2Version::V3).is_err());
	}

	#[test_log::test]
	fn v22_header_upgrade() {
		let bytes = [b'T', b'T', b'2', 0, 0, 5];
		let header = parse_header(&mut &bytes[..], Id3v2Version::V2)
			.unwrap()
			.unwrap();
		assert_eq!(header.id, "TIT2");
		assert_eq!(header.size, 5);
	}

	#[test_log::test]
	fn padding_ends_frames() {
		let bytes = [0; 10];
		assert!(
			parse_header(&mut &bytes[..], Id3v2Version::V3)
				.unwrap()
				.is_none()
		);
	}
}
